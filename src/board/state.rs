//! Board snapshots.
//!
//! Read-only copies of knight and item state, merged into one `BoardState`
//! keyed by display name. The JSON form is a flat object: the four knights
//! first, then the items in list order.

use serde::ser::{SerializeMap, SerializeTuple};
use serde::{Serialize, Serializer};

use super::knight::{KnightId, Status};
use super::position::Position;

/// Snapshot of one knight.
///
/// Serialized as `[position|null, status, item|null, attack, defence]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnightState {
    pub position: Option<Position>,
    pub status: Status,
    /// Name of the carried item.
    pub item: Option<String>,
    pub attack: u32,
    pub defence: u32,
}

impl Serialize for KnightState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(5)?;
        tuple.serialize_element(&self.position)?;
        tuple.serialize_element(self.status.name())?;
        tuple.serialize_element(&self.item)?;
        tuple.serialize_element(&self.attack)?;
        tuple.serialize_element(&self.defence)?;
        tuple.end()
    }
}

/// Snapshot of one item, serialized as `[position, equipped]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemState {
    pub position: Position,
    pub equipped: bool,
}

impl Serialize for ItemState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.position)?;
        tuple.serialize_element(&self.equipped)?;
        tuple.end()
    }
}

/// Complete board snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    /// Knight snapshots indexed by `KnightId as usize`.
    pub knights: [KnightState; 4],
    /// Item snapshots with their names, in item-list order.
    pub items: Vec<(String, ItemState)>,
}

impl BoardState {
    pub fn knight(&self, id: KnightId) -> &KnightState {
        &self.knights[id as usize]
    }

    /// Looks up an item snapshot by name.
    pub fn item(&self, name: &str) -> Option<&ItemState> {
        self.items.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    /// Number of top-level entries (knights plus items).
    pub fn len(&self) -> usize {
        self.knights.len() + self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for BoardState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (id, knight) in super::knight::ALL_KNIGHTS.iter().zip(&self.knights) {
            map.serialize_entry(id.name(), knight)?;
        }
        for (name, item) in &self.items {
            map.serialize_entry(name, item)?;
        }
        map.end()
    }
}
