//! Starting layouts.
//!
//! A layout fixes where the four knights start and which items lie where.
//! The default is the standard board; other layouts can be loaded from
//! JSON, e.g.
//!
//! ```json
//! {
//!   "knights": [[0, 0], [7, 0], [7, 7], [0, 7]],
//!   "items": [
//!     { "name": "Axe", "position": [3, 3], "attack": 2 },
//!     { "name": "Helmet", "position": [3, 3], "defence": 1 }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::board::{Position, ALL_KNIGHTS};

/// Knight start tiles on the standard board, one per corner.
pub const STANDARD_KNIGHTS: [Position; 4] = [
    Position::tile(0, 0),
    Position::tile(7, 0),
    Position::tile(7, 7),
    Position::tile(0, 7),
];

/// Errors that can occur while loading a layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse layout JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("name '{0}' is used more than once on the board")]
    DuplicateName(String),
}

/// An item to place on the board at the start of a game.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ItemSpec {
    pub name: String,
    pub position: Position,
    #[serde(default)]
    pub attack: u32,
    #[serde(default)]
    pub defence: u32,
}

impl ItemSpec {
    fn standard(name: &str, position: Position, attack: u32, defence: u32) -> Self {
        ItemSpec {
            name: name.to_string(),
            position,
            attack,
            defence,
        }
    }
}

/// Starting positions for knights and items.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Layout {
    /// Knight start tiles indexed by `KnightId as usize`.
    pub knights: [Position; 4],
    pub items: Vec<ItemSpec>,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            knights: STANDARD_KNIGHTS,
            items: vec![
                ItemSpec::standard("Axe", Position::tile(2, 2), 2, 0),
                ItemSpec::standard("Dagger", Position::tile(2, 5), 1, 0),
                ItemSpec::standard("MagicStaff", Position::tile(5, 2), 1, 1),
                ItemSpec::standard("Helmet", Position::tile(5, 5), 0, 1),
            ],
        }
    }
}

impl Layout {
    /// Checks that knight and item names form one namespace without clashes.
    ///
    /// The exported state is keyed by name, so a clash would hide an entry.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let mut seen: Vec<&str> = ALL_KNIGHTS.iter().map(|k| k.name()).collect();
        for item in &self.items {
            if seen.contains(&item.name.as_str()) {
                return Err(LayoutError::DuplicateName(item.name.clone()));
            }
            seen.push(&item.name);
        }
        Ok(())
    }
}

/// Loads a layout from a JSON file at the given path.
pub fn load_layout(path: &Path) -> Result<Layout, LayoutError> {
    let data = fs::read_to_string(path).map_err(|source| LayoutError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_layout_from_str(&data)
}

/// Loads a layout from a JSON string.
pub fn load_layout_from_str(json: &str) -> Result<Layout, LayoutError> {
    let layout: Layout = serde_json::from_str(json)?;
    layout.validate()?;
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_standard_board() {
        let layout = Layout::default();
        assert_eq!(layout.knights[0], Position::new(0, 0).unwrap());
        assert_eq!(layout.knights[3], Position::new(0, 7).unwrap());
        let names: Vec<&str> = layout.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Axe", "Dagger", "MagicStaff", "Helmet"]);
        assert_eq!(layout.items[2].attack, 1);
        assert_eq!(layout.items[2].defence, 1);
    }

    #[test]
    fn parse_layout_with_defaults() {
        let json = r#"{
            "knights": [[0, 0], [7, 0], [7, 7], [0, 7]],
            "items": [
                { "name": "Axe", "position": [3, 3], "attack": 2 },
                { "name": "Helmet", "position": [3, 3], "defence": 1 }
            ]
        }"#;
        let layout = load_layout_from_str(json).unwrap();
        assert_eq!(layout.items.len(), 2);
        assert_eq!(layout.items[0].defence, 0);
        assert_eq!(layout.items[1].attack, 0);
        assert_eq!(layout.items[1].position, Position::new(3, 3).unwrap());
    }

    #[test]
    fn off_board_positions_are_rejected() {
        let json = r#"{
            "knights": [[0, 0], [7, 0], [7, 7], [0, 8]],
            "items": []
        }"#;
        assert!(matches!(load_layout_from_str(json), Err(LayoutError::Json(_))));
    }

    #[test]
    fn item_named_like_a_knight_is_rejected() {
        let json = r#"{
            "knights": [[0, 0], [7, 0], [7, 7], [0, 7]],
            "items": [{ "name": "Red", "position": [3, 3], "attack": 2 }]
        }"#;
        assert!(matches!(
            load_layout_from_str(json),
            Err(LayoutError::DuplicateName(name)) if name == "Red"
        ));
    }

    #[test]
    fn repeated_item_name_is_rejected() {
        let json = r#"{
            "knights": [[0, 0], [7, 0], [7, 7], [0, 7]],
            "items": [
                { "name": "Axe", "position": [3, 3], "attack": 2 },
                { "name": "Axe", "position": [4, 4], "attack": 1 }
            ]
        }"#;
        assert!(matches!(
            load_layout_from_str(json),
            Err(LayoutError::DuplicateName(name)) if name == "Axe"
        ));
        assert!(Layout::default().validate().is_ok());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_layout(Path::new("/nonexistent/layout.json")).unwrap_err();
        assert!(matches!(err, LayoutError::Io { .. }));
    }
}
