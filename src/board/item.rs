//! Pickable items and their combat modifiers.
//!
//! Items are owned by the game's item list and addressed by `ItemId`.
//! The holder link is a plain `KnightId`; only knight operations set it.

use super::knight::KnightId;
use super::position::{Bounds, Position, PositionError};
use super::state::ItemState;

/// Index of an item in the game's item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub usize);

/// An object lying on the board or carried by a knight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub attack: u32,
    pub defence: u32,
    pub(crate) position: Position,
    pub(crate) holder: Option<KnightId>,
}

impl Item {
    /// Creates an unequipped item at the given tile.
    pub fn new(name: impl Into<String>, position: Position, attack: u32, defence: u32) -> Self {
        Item {
            name: name.into(),
            attack,
            defence,
            position,
            holder: None,
        }
    }

    /// Creates an item from a raw coordinate, validated against `bounds`.
    pub fn with_bounds(
        name: impl Into<String>,
        x: i64,
        y: i64,
        bounds: Bounds,
        attack: u32,
        defence: u32,
    ) -> Result<Self, PositionError> {
        let position = Position::within(x, y, bounds)?;
        Ok(Item::new(name, position, attack, defence))
    }

    /// The tile the item lies on, or its holder's tile when equipped.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The knight currently carrying this item.
    pub fn holder(&self) -> Option<KnightId> {
        self.holder
    }

    /// True while a knight carries the item.
    pub fn equipped(&self) -> bool {
        self.holder.is_some()
    }

    /// Public snapshot; combat stats are not part of it.
    pub fn state(&self) -> ItemState {
        ItemState {
            position: self.position,
            equipped: self.equipped(),
        }
    }
}
