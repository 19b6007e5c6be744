//! State export encoding.
//!
//! The exported document is a single JSON object keyed by display name:
//!
//! ```json
//! {"Red":[[0,0],"alive",null,1,1], ..., "Axe":[[2,2],false], ...}
//! ```
//!
//! Knights map to `[position|null, status, item|null, attack, defence]`
//! and items to `[position, equipped]`. A carried item appears by name only.

use std::io::Write;

use crate::board::BoardState;

/// Encodes a board snapshot as compact JSON.
pub fn encode_state(state: &BoardState) -> Result<String, serde_json::Error> {
    serde_json::to_string(state)
}

/// Encodes a board snapshot as indented JSON.
pub fn encode_state_pretty(state: &BoardState) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(state)
}

/// Writes a board snapshot followed by a newline.
pub fn write_state<W: Write>(state: &BoardState, pretty: bool, out: &mut W) -> std::io::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, state)?;
    } else {
        serde_json::to_writer(&mut *out, state)?;
    }
    writeln!(out)?;
    out.flush()
}
