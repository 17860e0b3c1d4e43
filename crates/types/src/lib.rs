//! Core types module - shared data structures and constants
//!
//! Everything here is plain data with no dependencies, so it can be shared by the
//! simulation core, the terminal renderer, and the input mapping alike.
//!
//! # Board Dimensions
//!
//! The default playfield is the Game Boy layout:
//!
//! - **Width**: 14 columns (indexed 0-13)
//! - **Height**: 20 rows (indexed 0-19, row 0 on top)
//! - **Spawn row**: -1, one row above the visible top
//!
//! # Gravity Timing
//!
//! Gravity is counted in frames, not milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_RATE` | 60 | Update ticks per second |
//! | `SPEED_FACTOR` | 2 | Frames shaved off the drop interval per level |
//! | `MIN_DROP_INTERVAL` | 1 | Floor for the drop interval |
//! | `LINES_PER_LEVEL` | 10 | Lines needed per level step |
//!
//! A shape at level `n` falls one row every `FRAME_RATE - n * SPEED_FACTOR` frames,
//! floored at `MIN_DROP_INTERVAL`.
//!
//! # Examples
//!
//! ```
//! use tui_blocks_types::{drop_interval, Direction, GameAction, BOARD_WIDTH};
//!
//! assert_eq!(BOARD_WIDTH, 14);
//! assert_eq!(drop_interval(1), 58);
//!
//! let action = GameAction::from_str("rotate").unwrap();
//! assert_eq!(action.direction(), Some(Direction::Up));
//! ```

/// Default board width in cells (14 columns)
pub const BOARD_WIDTH: u16 = 14;

/// Default board height in cells (20 rows)
pub const BOARD_HEIGHT: u16 = 20;

/// Side length of the local shape frame
pub const SHAPE_SIZE: usize = 4;

/// Row a freshly spawned shape is placed at (one above the visible top)
pub const SPAWN_ROW: i16 = -1;

/// Update ticks per second; the external timer calls the controller at this rate
pub const FRAME_RATE: u32 = 60;

/// Frames removed from the drop interval per level
pub const SPEED_FACTOR: u32 = 2;

/// Smallest drop interval in frames, whatever the level
pub const MIN_DROP_INTERVAL: u32 = 1;

/// Cleared lines needed per level step
pub const LINES_PER_LEVEL: u32 = 10;

/// Starting level when none is supplied at launch
pub const DEFAULT_STARTING_LEVEL: u32 = 1;

/// Frames between gravity steps at `level`.
///
/// Saturates instead of underflowing, so very high levels settle at
/// [`MIN_DROP_INTERVAL`].
pub fn drop_interval(level: u32) -> u32 {
    FRAME_RATE
        .saturating_sub(level.saturating_mul(SPEED_FACTOR))
        .max(MIN_DROP_INTERVAL)
}

/// Highest level whose drop interval is still computed without clamping.
pub const fn max_unclamped_level() -> u32 {
    (FRAME_RATE - MIN_DROP_INTERVAL) / SPEED_FACTOR
}

/// State of one grid or shape cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Empty,
    Full,
}

impl CellState {
    pub fn is_full(self) -> bool {
        matches!(self, CellState::Full)
    }

    /// Numeric form: empty=0, full=1
    pub fn as_u8(self) -> u8 {
        match self {
            CellState::Empty => 0,
            CellState::Full => 1,
        }
    }
}

impl From<u8> for CellState {
    fn from(value: u8) -> Self {
        if value == 0 {
            CellState::Empty
        } else {
            CellState::Full
        }
    }
}

/// Movement commands understood by the board
///
/// `Up` is a rotation, not an upward move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Parse direction from string (case-insensitive)
    ///
    /// ```
    /// use tui_blocks_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("LEFT"), Some(Direction::Left));
    /// assert_eq!(Direction::from_str("rotate"), Some(Direction::Up));
    /// assert_eq!(Direction::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            "up" | "rotate" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// Discrete inputs delivered to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move the active shape one column left
    MoveLeft,
    /// Move the active shape one column right
    MoveRight,
    /// Rotate the active shape 90° clockwise
    Rotate,
    /// Move the active shape one row down (locks it if it cannot move)
    MoveDown,
    /// Toggle pause
    TogglePause,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" | "left" => Some(GameAction::MoveLeft),
            "moveright" | "right" => Some(GameAction::MoveRight),
            "rotate" | "up" => Some(GameAction::Rotate),
            "movedown" | "down" => Some(GameAction::MoveDown),
            "pause" | "togglepause" => Some(GameAction::TogglePause),
            _ => None,
        }
    }

    /// The board direction this action forwards to, if any
    pub fn direction(&self) -> Option<Direction> {
        match self {
            GameAction::MoveLeft => Some(Direction::Left),
            GameAction::MoveRight => Some(Direction::Right),
            GameAction::Rotate => Some(Direction::Up),
            GameAction::MoveDown => Some(Direction::Down),
            GameAction::TogglePause => None,
        }
    }
}

impl From<Direction> for GameAction {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Left => GameAction::MoveLeft,
            Direction::Right => GameAction::MoveRight,
            Direction::Up => GameAction::Rotate,
            Direction::Down => GameAction::MoveDown,
        }
    }
}

/// Domain events emitted by the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardEvent {
    /// One or more rows were removed by a single lock (count ≥ 1)
    LinesCleared(u32),
    /// A new shape had no room to spawn; the board has already been reset
    GameOver,
}
