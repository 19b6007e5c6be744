//! Game orchestration.
//!
//! Owns the four knights and the item list and runs the per-turn protocol:
//! the knight moves, then picks up the best item on its new tile if its
//! hands are empty, then fights any other living knight standing there.

use std::array;

use thiserror::Error;
use tracing::{debug, info};

use crate::board::{
    BoardState, Direction, Item, ItemId, Knight, KnightId, MoveOutcome, PickupError, Position,
    ALL_KNIGHTS,
};
use crate::layout::Layout;
use crate::protocol::export::{encode_state, encode_state_pretty};

/// Item name prefixes in pickup precedence order: 'A' (axe) beats 'M'
/// (magic staff) beats 'D' (dagger) beats 'H' (helmet).
///
/// TODO: replace with an explicit priority field on `Item` once layouts
/// carry one; the name prefix is kept for compatibility with recorded games.
pub const PICKUP_PRECEDENCE: [char; 4] = ['A', 'M', 'D', 'H'];

/// Errors raised by game operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("unknown knight key '{0}'")]
    UnknownKnight(char),

    #[error(transparent)]
    Pickup(#[from] PickupError),
}

/// The result of a fight: exactly one knight dies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FightOutcome {
    pub winner: KnightId,
    pub loser: KnightId,
}

/// What a single call to `Game::make_move` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub knight: KnightId,
    /// `None` when the knight could not move at all.
    pub outcome: Option<MoveOutcome>,
    pub picked_up: Option<ItemId>,
    pub fight: Option<FightOutcome>,
}

/// The board: four knights and a fixed list of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    knights: [Knight; 4],
    items: Vec<Item>,
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

impl Game {
    /// Sets up the standard board.
    pub fn new() -> Self {
        Game::from_layout(&Layout::default())
    }

    /// Sets up a board from a layout.
    pub fn from_layout(layout: &Layout) -> Self {
        let knights = array::from_fn(|i| Knight::new(ALL_KNIGHTS[i], layout.knights[i]));
        let items = layout
            .items
            .iter()
            .map(|spec| Item::new(spec.name.clone(), spec.position, spec.attack, spec.defence))
            .collect();
        Game { knights, items }
    }

    pub fn knight(&self, id: KnightId) -> &Knight {
        &self.knights[id as usize]
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.0)
    }

    /// Finds an item by name.
    pub fn item_id(&self, name: &str) -> Option<ItemId> {
        self.items.iter().position(|i| i.name == name).map(ItemId)
    }

    /// Effective attack of a knight including its item.
    pub fn attack(&self, id: KnightId) -> u32 {
        self.knight(id).attack(&self.items)
    }

    /// Effective defence of a knight including its item.
    pub fn defence(&self, id: KnightId) -> u32 {
        self.knight(id).defence(&self.items)
    }

    /// Puts a living knight on a tile without running the turn protocol.
    pub fn place_knight(&mut self, id: KnightId, position: Position) {
        self.knights[id as usize].place(position, &mut self.items);
    }

    /// Plays one turn for the knight with the given move-list key.
    pub fn make_move(&mut self, key: char, direction: Direction) -> Result<Turn, GameError> {
        let id = KnightId::from_key(key).ok_or(GameError::UnknownKnight(key))?;
        self.make_move_by_id(id, direction)
    }

    /// Plays one turn: move, then pickup, then fight.
    pub fn make_move_by_id(
        &mut self,
        id: KnightId,
        direction: Direction,
    ) -> Result<Turn, GameError> {
        let mut turn = Turn {
            knight: id,
            outcome: None,
            picked_up: None,
            fight: None,
        };

        turn.outcome = self.knights[id as usize].make_move(direction, &mut self.items);
        let position = match turn.outcome {
            None => {
                debug!(knight = id.name(), "knight cannot move");
                return Ok(turn);
            }
            Some(MoveOutcome::Drowned(off)) => {
                info!(knight = id.name(), x = off.x, y = off.y, "knight drowned");
                return Ok(turn);
            }
            Some(MoveOutcome::Moved(position)) => position,
        };
        debug!(knight = id.name(), x = position.x(), y = position.y(), "knight moved");

        if self.knights[id as usize].item().is_none() {
            let here = self.items_on(position);
            if let Some(best) = self.choose_best_item(&here) {
                self.knights[id as usize].pickup_item(best, &mut self.items)?;
                debug!(knight = id.name(), item = %self.items[best.0].name, "picked up item");
                turn.picked_up = Some(best);
            }
        }

        if let Some(defender) = self.other_alive_knight_at(position, id) {
            turn.fight = Some(self.fight(id, defender));
        }

        Ok(turn)
    }

    /// Unequipped items lying on a tile, in item-list order.
    pub fn items_on(&self, position: Position) -> Vec<ItemId> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.equipped() && item.position() == position)
            .map(|(i, _)| ItemId(i))
            .collect()
    }

    /// Picks the item a knight takes from a tile by name prefix.
    ///
    /// Falls back to the first candidate when no name matches a known prefix.
    pub fn choose_best_item(&self, candidates: &[ItemId]) -> Option<ItemId> {
        PICKUP_PRECEDENCE
            .iter()
            .find_map(|&prefix| {
                candidates.iter().copied().find(|id| {
                    self.item(*id)
                        .is_some_and(|item| item.name.starts_with(prefix))
                })
            })
            .or_else(|| candidates.first().copied())
    }

    /// The first other living knight standing on a tile.
    pub fn other_alive_knight_at(
        &self,
        position: Position,
        excluding: KnightId,
    ) -> Option<KnightId> {
        self.knights
            .iter()
            .find(|k| k.id() != excluding && k.is_alive() && k.position() == Some(position))
            .map(Knight::id)
    }

    /// Resolves a fight. The defender dies if `attack + 0.5 > defence`,
    /// i.e. ties go to the attacker; otherwise the attacker dies.
    pub fn fight(&mut self, attacker: KnightId, defender: KnightId) -> FightOutcome {
        let attack = self.attack(attacker);
        let defence = self.defence(defender);
        let (winner, loser) = if attack >= defence {
            (attacker, defender)
        } else {
            (defender, attacker)
        };
        self.knights[loser as usize].die(&mut self.items);
        info!(
            attacker = attacker.name(),
            defender = defender.name(),
            attack,
            defence,
            winner = winner.name(),
            "fight"
        );
        FightOutcome { winner, loser }
    }

    /// Knights still alive, in board order.
    pub fn alive_knights(&self) -> Vec<KnightId> {
        self.knights
            .iter()
            .filter(|k| k.is_alive())
            .map(Knight::id)
            .collect()
    }

    /// The sole surviving knight, if exactly one is left.
    pub fn winner(&self) -> Option<KnightId> {
        match self.alive_knights().as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Snapshot of every knight and item.
    pub fn state(&self) -> BoardState {
        BoardState {
            knights: array::from_fn(|i| self.knights[i].state(&self.items)),
            items: self
                .items
                .iter()
                .map(|item| (item.name.clone(), item.state()))
                .collect(),
        }
    }

    /// Encodes the current state as compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        encode_state(&self.state())
    }

    /// Encodes the current state as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        encode_state_pretty(&self.state())
    }
}
