//! Random self-play.
//!
//! Plays whole games by feeding random moves to the engine until at most
//! one knight is left alive or the turn limit is hit. Each game records
//! its move list, so any game can be replayed through the move-list
//! driver, and its final board state.

use std::io::Write;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::board::{BoardState, KnightId, ALL_KNIGHTS};
use crate::game::{Game, GameError};
use crate::layout::Layout;
use crate::movegen::random_move;
use crate::protocol::MoveCommand;

/// Errors that can occur during self-play.
#[derive(Debug, Error)]
pub enum SelfPlayError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to write games: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Maximum turns before a game is cut off.
    pub max_turns: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
    /// Starting layout for every game.
    pub layout: Layout,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            max_turns: 200,
            threads: 4,
            seed: 0,
            quiet: false,
            layout: Layout::default(),
        }
    }
}

/// A complete self-play game record.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub game_id: usize,
    /// The sole survivor, if the game ended with one.
    pub winner: Option<KnightId>,
    pub turns: usize,
    pub moves: Vec<MoveCommand>,
    pub final_state: BoardState,
}

/// Plays a single game with random moves.
pub fn play_game(
    config: &SelfPlayConfig,
    game_id: usize,
    rng: &mut SmallRng,
) -> Result<GameRecord, GameError> {
    let mut game = Game::from_layout(&config.layout);
    let mut moves = Vec::new();

    while moves.len() < config.max_turns && game.alive_knights().len() > 1 {
        let Some(cmd) = random_move(&game, rng) else {
            break;
        };
        game.make_move_by_id(cmd.knight, cmd.direction)?;
        moves.push(cmd);
    }

    Ok(GameRecord {
        game_id,
        winner: game.winner(),
        turns: moves.len(),
        moves,
        final_state: game.state(),
    })
}

fn game_rng(seed: u64, game_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

fn log_game(config: &SelfPlayConfig, game: &GameRecord, started: Instant) {
    if config.quiet {
        return;
    }
    let outcome = match game.winner {
        Some(w) => format!("{} wins", w.name()),
        None => "no winner".to_string(),
    };
    info!(
        "Game {}/{}: {} after {} turns ({:.1}ms)",
        game.game_id + 1,
        config.num_games,
        outcome,
        game.turns,
        started.elapsed().as_secs_f64() * 1000.0,
    );
}

/// Runs self-play generation, producing one record per game in game order.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
/// With a fixed seed, results do not depend on the thread count.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    if config.threads > 1 {
        run_self_play_parallel(config)
    } else {
        run_self_play_sequential(config)
    }
}

fn run_self_play_sequential(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    let mut games = Vec::with_capacity(config.num_games);
    for i in 0..config.num_games {
        let started = Instant::now();
        let game = play_game(config, i, &mut game_rng(config.seed, i))?;
        log_game(config, &game, started);
        games.push(game);
    }
    Ok(games)
}

fn run_self_play_parallel(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    let games = pool.install(|| {
        (0..config.num_games)
            .into_par_iter()
            .map(|i| -> Result<GameRecord, GameError> {
                let started = Instant::now();
                let game = play_game(config, i, &mut game_rng(config.seed, i))?;
                log_game(config, &game, started);
                Ok(game)
            })
            .collect::<Result<Vec<_>, GameError>>()
    })?;
    Ok(games)
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> Result<(), SelfPlayError> {
    for game in games {
        serde_json::to_writer(&mut *out, game).map_err(std::io::Error::from)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Aggregate results over a batch of games.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub games: usize,
    /// Wins indexed by `KnightId as usize`.
    pub wins: [usize; 4],
    pub no_winner: usize,
    pub total_turns: usize,
}

/// Tallies winners and game lengths.
pub fn summarize(games: &[GameRecord]) -> Summary {
    let mut summary = Summary {
        games: games.len(),
        ..Summary::default()
    };
    for game in games {
        summary.total_turns += game.turns;
        match game.winner {
            Some(w) => summary.wins[w as usize] += 1,
            None => summary.no_winner += 1,
        }
    }
    summary
}

/// Logs a summary of self-play results.
pub fn log_summary(summary: &Summary) {
    if summary.games == 0 {
        info!("No games played");
        return;
    }
    info!("=== Self-Play Summary ===");
    info!("Games: {}", summary.games);
    info!(
        "Avg length: {:.1} turns",
        summary.total_turns as f64 / summary.games as f64
    );
    for id in ALL_KNIGHTS {
        let wins = summary.wins[id as usize];
        info!(
            "  {:>6}: {} wins ({:.1}%)",
            id.name(),
            wins,
            wins as f64 / summary.games as f64 * 100.0
        );
    }
    info!("  No winner: {}", summary.no_winner);
}
