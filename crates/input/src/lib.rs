//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]s. There is no
//! repeat or hold handling: every press the terminal delivers is one action.

pub mod map;

pub use tui_blocks_types as types;

pub use map::{map_key, should_quit};
