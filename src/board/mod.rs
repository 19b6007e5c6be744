//! Board representation and game-state types.
//!
//! Contains the core data structures for positions, knights, items, and
//! the snapshot types used for state export.

pub mod item;
pub mod knight;
pub mod position;
pub mod state;

pub use item::{Item, ItemId};
pub use knight::{
    Knight, KnightId, MoveOutcome, PickupError, Status, ALL_KNIGHTS, BASE_ATTACK, BASE_DEFENCE,
};
pub use position::{
    Bounds, Direction, OffBoard, Position, PositionError, ALL_DIRECTIONS, MAX_INDEX,
};
pub use state::{BoardState, ItemState, KnightState};
