//! Text formats at the edge of the engine.
//!
//! `movelist` reads the line-oriented move lists that drive a game;
//! `export` writes the board snapshot as JSON.

pub mod export;
pub mod movelist;

pub use export::{encode_state, encode_state_pretty, write_state};
pub use movelist::{
    format_move, format_move_list, parse_header, parse_move, play_file, play_moves, MoveCommand,
    MoveListError, HEADER,
};
