//! Move-list parser and driver.
//!
//! A move list is line-oriented text:
//!
//! ```text
//! GAME-START
//! R:S
//! B:E
//! ```
//!
//! The first line must be exactly `GAME-START`. Each following line is
//! `<knight-key>:<direction>`. Reading stops quietly at the first line that
//! does not split into exactly two `:`-separated fields, including the end
//! of input. Moves are applied as they are read, so an error part way
//! through, including an unreadable line, leaves the earlier moves in place.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Serialize, Serializer};
use thiserror::Error;
use tracing::{debug, warn};

use crate::board::{Direction, KnightId};
use crate::game::{Game, GameError};

/// Required first line of every move list.
pub const HEADER: &str = "GAME-START";

/// Errors that can occur while reading a move list.
#[derive(Debug, Error)]
pub enum MoveListError {
    #[error("failed to read move list: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: failed to read move: {source}")]
    ReadLine {
        line: usize,
        source: std::io::Error,
    },

    #[error("expected 'GAME-START' on the first line, got '{0}'")]
    MissingHeader(String),

    #[error("line {line}: unknown knight key '{key}'")]
    UnknownKnight { line: usize, key: String },

    #[error("line {line}: invalid direction '{direction}'")]
    InvalidDirection { line: usize, direction: String },

    #[error(transparent)]
    Game(#[from] GameError),
}

/// One parsed move-list line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveCommand {
    pub knight: KnightId,
    pub direction: Direction,
}

impl fmt::Display for MoveCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.knight.key(), self.direction.as_char())
    }
}

/// Serialized in move-list form, e.g. `"R:N"`.
impl Serialize for MoveCommand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Checks the first line of a move list.
///
/// The line must be exactly `GAME-START`; only a trailing `\r` from CRLF
/// input is ignored.
pub fn parse_header(line: &str) -> Result<(), MoveListError> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line == HEADER {
        Ok(())
    } else {
        Err(MoveListError::MissingHeader(line.to_string()))
    }
}

/// Parses a single `<knight-key>:<direction>` line.
///
/// Returns `Ok(None)` for lines that end the move list. `line_no` is only
/// used in error messages.
pub fn parse_move(line: &str, line_no: usize) -> Result<Option<MoveCommand>, MoveListError> {
    let fields: Vec<&str> = line.trim().split(':').collect();
    let [key, direction] = fields.as_slice() else {
        return Ok(None);
    };

    let knight = single_char(key)
        .and_then(KnightId::from_key)
        .ok_or_else(|| MoveListError::UnknownKnight {
            line: line_no,
            key: key.to_string(),
        })?;
    let direction = single_char(direction)
        .and_then(Direction::from_char)
        .ok_or_else(|| MoveListError::InvalidDirection {
            line: line_no,
            direction: direction.to_string(),
        })?;

    Ok(Some(MoveCommand { knight, direction }))
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Reads a move list and plays every move on `game` in order.
///
/// Returns the number of moves applied.
pub fn play_moves<R: BufRead>(game: &mut Game, reader: R) -> Result<usize, MoveListError> {
    let mut lines = reader.lines();
    match lines.next() {
        Some(first) => parse_header(&first?)?,
        None => return Err(MoveListError::MissingHeader(String::new())),
    }

    let mut applied = 0;
    for (idx, line) in lines.enumerate() {
        // Header is line 1.
        let line_no = idx + 2;
        let line = line.map_err(|source| {
            warn!(line = line_no, moves_applied = applied, "unreadable move line");
            MoveListError::ReadLine { line: line_no, source }
        })?;
        let cmd = match parse_move(&line, line_no) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => {
                debug!(line = line_no, "end of move list");
                break;
            }
            Err(e) => {
                warn!(line = line_no, moves_applied = applied, "rejected move: {}", e);
                return Err(e);
            }
        };
        game.make_move_by_id(cmd.knight, cmd.direction)?;
        applied += 1;
    }

    Ok(applied)
}

/// Opens a move-list file and plays it on `game`.
pub fn play_file(game: &mut Game, path: &Path) -> Result<usize, MoveListError> {
    let file = File::open(path)?;
    play_moves(game, BufReader::new(file))
}

/// Formats a move as a move-list line, e.g. `R:N`.
pub fn format_move(cmd: &MoveCommand) -> String {
    cmd.to_string()
}

/// Formats a complete move list including the header line.
pub fn format_move_list(cmds: &[MoveCommand]) -> String {
    let mut out = String::with_capacity(HEADER.len() + 1 + cmds.len() * 4);
    out.push_str(HEADER);
    out.push('\n');
    for cmd in cmds {
        out.push_str(&format_move(cmd));
        out.push('\n');
    }
    out
}
