//! Terminal rendering module.
//!
//! A small, game-oriented rendering layer: the core draws onto a [`BoardCanvas`]
//! through the [`RenderSurface`](crate::core::RenderSurface) interface, and
//! [`Terminal`] flushes the resulting framebuffer to the real terminal.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Keep layout code pure so it can be unit-tested without a terminal
//! - Control the aspect ratio (2 chars wide per board cell by default)

pub mod board_view;
pub mod fb;
pub mod terminal;

pub use tui_blocks_core as core;
pub use tui_blocks_types as types;

pub use board_view::{AnchorY, BoardCanvas, Viewport, BLOCK_CHAR, EMPTY_CHAR};
pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use terminal::{changed_rows, encode_rows_into, Terminal};
