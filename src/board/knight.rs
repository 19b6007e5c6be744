//! Knights: identity, life cycle, movement, and carried items.
//!
//! A knight starts `Alive` and can end up `Dead` (corpse stays on its tile)
//! or `Drowned` (walked off the board, no position). Both are terminal.
//! Item operations take the game's item list so the knight can keep the
//! carried item's position and holder link in step with its own.

use serde::Serialize;
use thiserror::Error;

use super::item::{Item, ItemId};
use super::position::{Direction, OffBoard, Position};
use super::state::KnightState;

/// Base attack of an unarmed knight.
pub const BASE_ATTACK: u32 = 1;

/// Base defence of an unarmed knight.
pub const BASE_DEFENCE: u32 = 1;

/// One of the four knights. Serializes as its display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum KnightId {
    Red,
    Blue,
    Green,
    Yellow,
}

/// All four knights in board order.
pub const ALL_KNIGHTS: [KnightId; 4] = [
    KnightId::Red,
    KnightId::Blue,
    KnightId::Green,
    KnightId::Yellow,
];

impl KnightId {
    /// Returns the display name used in state exports.
    pub const fn name(self) -> &'static str {
        match self {
            KnightId::Red => "Red",
            KnightId::Blue => "Blue",
            KnightId::Green => "Green",
            KnightId::Yellow => "Yellow",
        }
    }

    /// Returns the single-character move-list key.
    pub const fn key(self) -> char {
        match self {
            KnightId::Red => 'R',
            KnightId::Blue => 'B',
            KnightId::Green => 'G',
            KnightId::Yellow => 'Y',
        }
    }

    /// Parses a knight from its move-list key.
    pub fn from_key(c: char) -> Option<KnightId> {
        match c {
            'R' => Some(KnightId::Red),
            'B' => Some(KnightId::Blue),
            'G' => Some(KnightId::Green),
            'Y' => Some(KnightId::Yellow),
            _ => None,
        }
    }

    /// Parses a knight from its display name.
    pub fn from_name(name: &str) -> Option<KnightId> {
        ALL_KNIGHTS.into_iter().find(|k| k.name() == name)
    }
}

/// Life cycle state of a knight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Alive,
    Dead,
    Drowned,
}

impl Status {
    /// Returns the lowercase name used in state exports.
    pub const fn name(self) -> &'static str {
        match self {
            Status::Alive => "alive",
            Status::Dead => "dead",
            Status::Drowned => "drowned",
        }
    }

    pub fn from_name(name: &str) -> Option<Status> {
        match name {
            "alive" => Some(Status::Alive),
            "dead" => Some(Status::Dead),
            "drowned" => Some(Status::Drowned),
            _ => None,
        }
    }
}

/// Result of a knight's attempt to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The knight now stands on this tile.
    Moved(Position),
    /// The knight stepped off the board at this coordinate and drowned.
    Drowned(OffBoard),
}

/// Errors raised by item pickup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PickupError {
    #[error("item {item} lies at {item_at:?}, knight {knight} stands at {knight_at:?}")]
    PositionMismatch {
        knight: &'static str,
        item: String,
        knight_at: Option<Position>,
        item_at: Position,
    },

    #[error("knight {knight} already carries an item")]
    HandsFull { knight: &'static str },

    #[error("item {item} is already held by {holder}")]
    AlreadyHeld { item: String, holder: &'static str },

    #[error("no item with index {0}")]
    UnknownItem(usize),
}

/// A knight on (or formerly on) the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Knight {
    id: KnightId,
    position: Option<Position>,
    status: Status,
    item: Option<ItemId>,
}

impl Knight {
    /// Creates a living, unarmed knight.
    pub fn new(id: KnightId, position: Position) -> Self {
        Knight::with_status(id, position, Status::Alive)
    }

    /// Creates an unarmed knight in the given state; a drowned knight gets
    /// no position.
    pub fn with_status(id: KnightId, position: Position, status: Status) -> Self {
        Knight {
            id,
            position: if status == Status::Drowned { None } else { Some(position) },
            status,
            item: None,
        }
    }

    /// Which of the four knights this is.
    pub fn id(&self) -> KnightId {
        self.id
    }

    /// The knight's display name.
    pub fn color(&self) -> &'static str {
        self.id.name()
    }

    /// Current tile; `None` once drowned.
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_alive(&self) -> bool {
        self.status == Status::Alive
    }

    /// The item this knight carries, if any.
    pub fn item(&self) -> Option<ItemId> {
        self.item
    }

    /// Effective attack: base plus the carried item's bonus.
    pub fn attack(&self, items: &[Item]) -> u32 {
        BASE_ATTACK + self.held(items).map_or(0, |i| i.attack)
    }

    /// Effective defence: base plus the carried item's bonus.
    pub fn defence(&self, items: &[Item]) -> u32 {
        BASE_DEFENCE + self.held(items).map_or(0, |i| i.defence)
    }

    fn held<'a>(&self, items: &'a [Item]) -> Option<&'a Item> {
        self.item.and_then(|id| items.get(id.0))
    }

    /// Moves the knight one tile.
    ///
    /// Returns `None` if the knight cannot move (not alive or off the board).
    /// Stepping off the board drowns the knight; its item stays on the last
    /// tile it stood on.
    pub fn make_move(&mut self, direction: Direction, items: &mut [Item]) -> Option<MoveOutcome> {
        let current = self.position?;
        if self.status != Status::Alive {
            return None;
        }

        match current.step(direction) {
            Ok(next) => {
                self.relocate(next, items);
                Some(MoveOutcome::Moved(next))
            }
            Err(off) => {
                self.drop_item(items);
                self.status = Status::Drowned;
                self.position = None;
                Some(MoveOutcome::Drowned(off))
            }
        }
    }

    /// Puts a living knight on a tile, carrying its item along.
    ///
    /// Dead or drowned knights are left where they are.
    pub fn place(&mut self, position: Position, items: &mut [Item]) {
        if self.status == Status::Alive {
            self.relocate(position, items);
        }
    }

    fn relocate(&mut self, position: Position, items: &mut [Item]) {
        self.position = Some(position);
        if let Some(item) = self.item.and_then(|id| items.get_mut(id.0)) {
            item.position = position;
        }
    }

    /// Kills the knight. The carried item is left on its tile.
    ///
    /// Only a living knight can die; dead and drowned are terminal.
    pub fn die(&mut self, items: &mut [Item]) {
        if self.status != Status::Alive {
            return;
        }
        self.drop_item(items);
        self.status = Status::Dead;
    }

    /// Lets go of the carried item, leaving it where it is.
    pub fn drop_item(&mut self, items: &mut [Item]) {
        if let Some(id) = self.item.take() {
            if let Some(item) = items.get_mut(id.0) {
                item.holder = None;
            }
        }
    }

    /// Picks up an item lying on the knight's tile.
    pub fn pickup_item(&mut self, id: ItemId, items: &mut [Item]) -> Result<(), PickupError> {
        let item = items.get_mut(id.0).ok_or(PickupError::UnknownItem(id.0))?;
        if self.position != Some(item.position) {
            return Err(PickupError::PositionMismatch {
                knight: self.color(),
                item: item.name.clone(),
                knight_at: self.position,
                item_at: item.position,
            });
        }
        if self.item.is_some() {
            return Err(PickupError::HandsFull { knight: self.color() });
        }
        if let Some(holder) = item.holder {
            return Err(PickupError::AlreadyHeld {
                item: item.name.clone(),
                holder: holder.name(),
            });
        }

        item.holder = Some(self.id);
        self.item = Some(id);
        Ok(())
    }

    /// Public snapshot of this knight.
    pub fn state(&self, items: &[Item]) -> KnightState {
        KnightState {
            position: self.position,
            status: self.status,
            item: self.held(items).map(|i| i.name.clone()),
            attack: self.attack(items),
            defence: self.defence(items),
        }
    }
}
