//! Self-play game generation CLI.
//!
//! Plays random games and writes one JSON record per game (JSONL).
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N       Number of games to play (default: 10)
//!   --max-turns N   Turn limit per game (default: 200)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --layout FILE   Starting layout as JSON (default: standard board)
//!   --output FILE   Output file path (default: stdout)
//!   --quiet         Suppress progress and summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Instant;

use tracing::{error, info};

use knightmoves::layout::load_layout;
use knightmoves::selfplay::{self, SelfPlayConfig};

fn value<T: FromStr>(args: &[String], i: usize, flag: &str) -> Result<T, String> {
    args.get(i)
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| format!("invalid {} value", flag))
}

fn main() -> ExitCode {
    knightmoves::init_logging();

    let args: Vec<String> = env::args().collect();
    let mut config = SelfPlayConfig::default();
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        let parsed = match args[i].as_str() {
            "--games" => {
                i += 1;
                value(&args, i, "--games").map(|v| config.num_games = v)
            }
            "--max-turns" => {
                i += 1;
                value(&args, i, "--max-turns").map(|v| config.max_turns = v)
            }
            "--threads" => {
                i += 1;
                value(&args, i, "--threads").map(|v| config.threads = v)
            }
            "--seed" => {
                i += 1;
                value(&args, i, "--seed").map(|v| config.seed = v)
            }
            "--layout" => {
                i += 1;
                value::<String>(&args, i, "--layout").and_then(|path| {
                    load_layout(Path::new(&path))
                        .map(|layout| config.layout = layout)
                        .map_err(|e| e.to_string())
                })
            }
            "--output" => {
                i += 1;
                value(&args, i, "--output").map(|v| output_path = Some(v))
            }
            "--quiet" => {
                config.quiet = true;
                Ok(())
            }
            "--help" | "-h" => {
                print_usage();
                return ExitCode::SUCCESS;
            }
            other => Err(format!("unknown argument: {}", other)),
        };
        if let Err(e) = parsed {
            error!("{}", e);
            print_usage();
            return ExitCode::FAILURE;
        }
        i += 1;
    }

    if !config.quiet {
        info!(
            "Self-play: {} games, max {} turns, {} threads",
            config.num_games, config.max_turns, config.threads
        );
    }

    let start = Instant::now();
    let games = match selfplay::run_self_play(&config) {
        Ok(games) => games,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if !config.quiet {
        info!(
            "Completed {} games in {:.2}s",
            games.len(),
            start.elapsed().as_secs_f64()
        );
        selfplay::log_summary(&selfplay::summarize(&games));
    }

    let written = match &output_path {
        Some(path) => File::create(path)
            .map_err(selfplay::SelfPlayError::from)
            .and_then(|file| selfplay::write_jsonl(&games, &mut BufWriter::new(file))),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer)
        }
    };
    if let Err(e) = written {
        error!("{}", e);
        return ExitCode::FAILURE;
    }
    if let (Some(path), false) = (&output_path, config.quiet) {
        info!("Wrote {} games to {}", games.len(), path);
    }
    ExitCode::SUCCESS
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N        Number of games to play (default: 10)");
    eprintln!("  --max-turns N    Turn limit per game (default: 200)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --layout FILE    Starting layout as JSON (default: standard board)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress progress and summary output");
    eprintln!("  --help           Show this help");
}
