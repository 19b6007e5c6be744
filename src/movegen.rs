//! Random move generation.
//!
//! Only living knights can act, so a random move is drawn from them; the
//! direction is uniform and may well walk a knight off the board.

use rand::Rng;

use crate::board::{KnightId, ALL_DIRECTIONS};
use crate::game::Game;
use crate::protocol::MoveCommand;

/// Picks a uniformly random living knight and direction.
///
/// Returns `None` when no knight is alive.
pub fn random_move(game: &Game, rng: &mut impl Rng) -> Option<MoveCommand> {
    let alive = game.alive_knights();
    if alive.is_empty() {
        return None;
    }
    let knight: KnightId = alive[rng.gen_range(0..alive.len())];
    let direction = ALL_DIRECTIONS[rng.gen_range(0..ALL_DIRECTIONS.len())];
    Some(MoveCommand { knight, direction })
}
