//! Knightmoves engine library.
//!
//! Exposes the board types, the game rule engine, the move-list and state
//! export formats, and random self-play for use by integration tests and
//! the binary entry points.

pub mod board;
pub mod game;
pub mod layout;
pub mod movegen;
pub mod protocol;
pub mod selfplay;

use tracing_subscriber::EnvFilter;

pub use game::{FightOutcome, Game, GameError, Turn};

/// Installs the stderr log subscriber used by the binaries.
///
/// Honours `RUST_LOG`; defaults to `info`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
