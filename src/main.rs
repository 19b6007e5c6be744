//! Knightmoves -- plays a move list and prints the resulting board.
//!
//! Reads a move list from a file (or stdin) and writes the final board
//! state to stdout (or a file) as JSON. Logs go to stderr.
//!
//! Usage:
//!   knightmoves [MOVES_FILE] [OPTIONS]
//!
//! Options:
//!   --layout FILE   Starting layout as JSON (default: standard board)
//!   --output FILE   Output file path (default: stdout)
//!   --pretty        Indent the JSON output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};

use knightmoves::game::Game;
use knightmoves::layout::{load_layout, Layout};
use knightmoves::protocol::{play_file, play_moves, write_state, MoveListError};

/// Command-line options for the driver.
#[derive(Debug, Default)]
struct Options {
    moves: Option<PathBuf>,
    layout: Option<PathBuf>,
    output: Option<PathBuf>,
    pretty: bool,
}

enum Parsed {
    Run(Options),
    Help,
}

fn parse_args(args: &[String]) -> Result<Parsed, String> {
    let mut opts = Options::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--layout" => {
                i += 1;
                let path = args.get(i).ok_or("--layout needs a file")?;
                opts.layout = Some(PathBuf::from(path));
            }
            "--output" => {
                i += 1;
                let path = args.get(i).ok_or("--output needs a file")?;
                opts.output = Some(PathBuf::from(path));
            }
            "--pretty" => {
                opts.pretty = true;
            }
            "--help" | "-h" => return Ok(Parsed::Help),
            other if other.starts_with("--") => {
                return Err(format!("unknown argument: {}", other));
            }
            path => {
                if opts.moves.is_some() {
                    return Err(format!("unexpected argument: {}", path));
                }
                opts.moves = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }
    Ok(Parsed::Run(opts))
}

fn main() -> ExitCode {
    knightmoves::init_logging();

    let args: Vec<String> = env::args().collect();
    let opts = match parse_args(&args) {
        Ok(Parsed::Run(opts)) => opts,
        Ok(Parsed::Help) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            error!("{}", e);
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    let layout = match &opts.layout {
        Some(path) => match load_layout(path) {
            Ok(layout) => layout,
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Layout::default(),
    };

    let mut game = Game::from_layout(&layout);
    let result = match &opts.moves {
        Some(path) => play_file(&mut game, path),
        None => play_moves(&mut game, io::stdin().lock()),
    };

    // Without a readable header nothing was played; anything later leaves
    // the moves read so far applied, and that board is still reported.
    let mut status = ExitCode::SUCCESS;
    match result {
        Ok(applied) => info!(moves = applied, "move list applied"),
        Err(e @ (MoveListError::MissingHeader(_) | MoveListError::Io(_))) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
        Err(e) => {
            error!("{}", e);
            status = ExitCode::FAILURE;
        }
    }

    if let Err(e) = write_output(&game, &opts) {
        error!("failed to write state: {}", e);
        return ExitCode::FAILURE;
    }
    status
}

fn write_output(game: &Game, opts: &Options) -> io::Result<()> {
    let state = game.state();
    match &opts.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_state(&state, opts.pretty, &mut writer)?;
            info!("wrote state to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            write_state(&state, opts.pretty, &mut writer)?;
            writer.flush()?;
        }
    }
    Ok(())
}

fn print_usage() {
    eprintln!("Usage: knightmoves [MOVES_FILE] [OPTIONS]");
    eprintln!();
    eprintln!("Reads a move list (default: stdin) and prints the final board as JSON.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --layout FILE    Starting layout as JSON (default: standard board)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --pretty         Indent the JSON output");
    eprintln!("  --help           Show this help");
}
