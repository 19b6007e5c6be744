//! Board coordinates and movement directions.
//!
//! A `Position` is always on the board: it can only be built through a
//! bounds check. Steps that would leave the board surface as `OffBoard`,
//! which still carries the raw coordinate the knight tried to reach.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest row/column index on the standard board.
pub const MAX_INDEX: u8 = 7;

/// Inclusive upper bounds for board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub max_x: u8,
    pub max_y: u8,
}

impl Bounds {
    /// The standard 8x8 board.
    pub const STANDARD: Bounds = Bounds {
        max_x: MAX_INDEX,
        max_y: MAX_INDEX,
    };

    /// Returns true if the raw coordinate lies inside these bounds.
    pub fn contains(self, x: i64, y: i64) -> bool {
        (0..=i64::from(self.max_x)).contains(&x) && (0..=i64::from(self.max_y)).contains(&y)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::STANDARD
    }
}

/// Errors raised when building a position.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PositionError {
    #[error("position [{x}, {y}] is outside the board (max [{max_x}, {max_y}])")]
    OutOfBounds {
        x: i64,
        y: i64,
        max_x: u8,
        max_y: u8,
    },
}

/// A tile on the board, `x` is the row and `y` the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "[u8; 2]", try_from = "[i64; 2]")]
pub struct Position {
    x: u8,
    y: u8,
}

impl Position {
    /// Builds a standard-board position in a constant.
    ///
    /// Panics on an off-board coordinate, which fails const evaluation.
    pub(crate) const fn tile(x: u8, y: u8) -> Self {
        assert!(x <= MAX_INDEX && y <= MAX_INDEX, "tile is outside the board");
        Position { x, y }
    }

    /// Builds a position on the standard board.
    pub fn new(x: i64, y: i64) -> Result<Self, PositionError> {
        Position::within(x, y, Bounds::STANDARD)
    }

    /// Builds a position, checking it against custom bounds.
    pub fn within(x: i64, y: i64, bounds: Bounds) -> Result<Self, PositionError> {
        if !bounds.contains(x, y) {
            return Err(PositionError::OutOfBounds {
                x,
                y,
                max_x: bounds.max_x,
                max_y: bounds.max_y,
            });
        }
        // Both values are within 0..=u8::MAX after the bounds check.
        Ok(Position {
            x: x as u8,
            y: y as u8,
        })
    }

    /// Row index.
    pub const fn x(self) -> u8 {
        self.x
    }

    /// Column index.
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Moves one tile on the standard board.
    ///
    /// Returns the off-board candidate as the error when the step would
    /// leave the board.
    pub fn step(self, direction: Direction) -> Result<Position, OffBoard> {
        let (dx, dy) = direction.delta();
        let x = i16::from(self.x) + dx;
        let y = i16::from(self.y) + dy;
        Position::new(i64::from(x), i64::from(y)).map_err(|_| OffBoard { x, y })
    }
}

impl From<Position> for [u8; 2] {
    fn from(p: Position) -> Self {
        [p.x, p.y]
    }
}

impl TryFrom<[i64; 2]> for Position {
    type Error = PositionError;

    fn try_from([x, y]: [i64; 2]) -> Result<Self, Self::Error> {
        Position::new(x, y)
    }
}

/// A coordinate a knight tried to reach beyond the board edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffBoard {
    pub x: i16,
    pub y: i16,
}

/// One of the four compass directions a knight can move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

/// All four directions in protocol order.
pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
];

impl Direction {
    /// Returns the (row, column) offset of a single step.
    pub const fn delta(self) -> (i16, i16) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
            Direction::East => (0, 1),
        }
    }

    /// Returns the single-character move-list abbreviation.
    pub const fn as_char(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::South => 'S',
            Direction::East => 'E',
            Direction::West => 'W',
        }
    }

    /// Parses a direction from its move-list abbreviation.
    pub fn from_char(c: char) -> Option<Direction> {
        match c {
            'N' => Some(Direction::North),
            'S' => Some(Direction::South),
            'E' => Some(Direction::East),
            'W' => Some(Direction::West),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_are_valid() {
        for (x, y) in [(0, 0), (7, 0), (7, 7), (0, 7)] {
            assert!(Position::new(x, y).is_ok());
        }
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        assert_eq!(
            Position::new(8, 0),
            Err(PositionError::OutOfBounds { x: 8, y: 0, max_x: 7, max_y: 7 })
        );
        assert!(Position::new(-1, 3).is_err());
        assert!(Position::new(3, 8).is_err());
    }

    #[test]
    fn custom_bounds() {
        let small = Bounds { max_x: 2, max_y: 3 };
        assert!(Position::within(2, 3, small).is_ok());
        assert!(Position::within(3, 3, small).is_err());
        assert!(Position::within(2, 4, small).is_err());
    }

    #[test]
    fn direction_char_roundtrip() {
        for d in ALL_DIRECTIONS {
            assert_eq!(Direction::from_char(d.as_char()), Some(d));
        }
        assert_eq!(Direction::from_char('X'), None);
        assert_eq!(Direction::from_char('n'), None);
    }

    #[test]
    fn step_follows_row_column_convention() {
        let p = Position::new(3, 3).unwrap();
        assert_eq!(p.step(Direction::North), Ok(Position { x: 2, y: 3 }));
        assert_eq!(p.step(Direction::South), Ok(Position { x: 4, y: 3 }));
        assert_eq!(p.step(Direction::West), Ok(Position { x: 3, y: 2 }));
        assert_eq!(p.step(Direction::East), Ok(Position { x: 3, y: 4 }));
    }

    #[test]
    fn step_off_the_edge_reports_candidate() {
        let corner = Position::new(0, 0).unwrap();
        assert_eq!(corner.step(Direction::North), Err(OffBoard { x: -1, y: 0 }));
        assert_eq!(corner.step(Direction::West), Err(OffBoard { x: 0, y: -1 }));

        let far = Position::new(7, 7).unwrap();
        assert_eq!(far.step(Direction::South), Err(OffBoard { x: 8, y: 7 }));
        assert_eq!(far.step(Direction::East), Err(OffBoard { x: 7, y: 8 }));
    }

    #[test]
    fn accessors_and_const_tiles() {
        const CENTRE: Position = Position::tile(3, 4);
        assert_eq!(CENTRE, Position::new(3, 4).unwrap());
        assert_eq!((CENTRE.x(), CENTRE.y()), (3, 4));
    }

    #[test]
    #[should_panic(expected = "outside the board")]
    fn tile_rejects_off_board_coordinates() {
        let _ = Position::tile(8, 0);
    }

    #[test]
    fn serializes_as_pair() {
        let p = Position::new(2, 5).unwrap();
        assert_eq!(serde_json::to_string(&p).unwrap(), "[2,5]");
        let back: Position = serde_json::from_str("[2,5]").unwrap();
        assert_eq!(back, p);
        assert!(serde_json::from_str::<Position>("[9,0]").is_err());
        assert!(serde_json::from_str::<Position>("[-1,0]").is_err());
    }
}
