//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the whole falling-block simulation. It has no dependencies on
//! terminals, windows or input devices, which makes it:
//!
//! - **Deterministic**: the same seed produces the same shape sequence
//! - **Testable**: every rule is exercised without a screen
//! - **Portable**: any [`RenderSurface`] can display it
//!
//! # Module Structure
//!
//! - [`shape`]: 4x4 shape matrices, the 6-pattern catalog, rotation and edge queries
//! - [`board`]: grid, active/pending shapes, collision, locking and line clears
//! - [`events`]: listener interface for lines-cleared and game-over events
//! - [`session`]: level, score, lines, pause and gravity timing
//! - [`controller`]: per-tick update, input and draw entry points
//! - [`render`]: the render surface interface
//! - [`config`]: validated startup settings
//! - [`rng`]: seeded generator for shape selection
//!
//! # Game Rules
//!
//! - Shapes spawn centered at row -1 and fall one row per gravity step
//! - No wall kicks: a rotation is only nudged back inside the side walls
//! - A shape that cannot move down locks; full rows are removed bottom-up
//! - Each lock that clears `n` lines scores `n × level`
//! - The level rises to `lines / 10` once that exceeds the current level
//! - A shape that collides on spawn ends the game; the board and session reset
//!
//! # Example
//!
//! ```
//! use tui_blocks_core::{GameConfig, GameController};
//! use tui_blocks_types::GameAction;
//!
//! let mut game = GameController::new(&GameConfig::default().with_seed(12345)).unwrap();
//!
//! game.handle_action(GameAction::MoveRight);
//! game.handle_action(GameAction::Rotate);
//!
//! // 58 frames per row at level 1.
//! let steps = (0..58).filter(|_| game.cycle()).count();
//! assert_eq!(steps, 1);
//! assert_eq!(game.score(), 0);
//! ```

pub mod board;
pub mod config;
pub mod controller;
pub mod events;
pub mod render;
pub mod rng;
pub mod session;
pub mod shape;

pub use tui_blocks_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{ConfigError, GameConfig};
pub use controller::GameController;
pub use events::{BoardListener, EventLog, ListenerHandle};
pub use render::{RecordingSurface, RenderSurface};
pub use session::Session;
pub use shape::{Shape, ShapeKind};
