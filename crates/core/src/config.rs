//! Startup configuration and its validation

use std::fmt;

use crate::types::{
    max_unclamped_level, BOARD_HEIGHT, BOARD_WIDTH, DEFAULT_STARTING_LEVEL, FRAME_RATE,
    SHAPE_SIZE, SPEED_FACTOR,
};

/// Narrowest board on which a centered spawn always fits inside the walls
pub const MIN_BOARD_WIDTH: u16 = 2 * SHAPE_SIZE as u16;

/// Shortest board on which a spawned shape never reaches past the bottom
pub const MIN_BOARD_HEIGHT: u16 = SHAPE_SIZE as u16;

/// Largest side supported by the `i16` board coordinates
pub const MAX_BOARD_SIDE: u16 = 1024;

/// Settings fixed at launch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    pub starting_level: u32,
    /// Shape sequence seed; `None` picks a random one
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            starting_level: DEFAULT_STARTING_LEVEL,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_starting_level(mut self, level: u32) -> Self {
        self.starting_level = level;
        self
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject settings the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_level == 0 {
            return Err(ConfigError::LevelZero);
        }
        if self.starting_level > max_unclamped_level() {
            return Err(ConfigError::LevelTooHigh {
                level: self.starting_level,
                max: max_unclamped_level(),
            });
        }
        if !(MIN_BOARD_WIDTH..=MAX_BOARD_SIDE).contains(&self.width) {
            return Err(ConfigError::BadWidth(self.width));
        }
        if !(MIN_BOARD_HEIGHT..=MAX_BOARD_SIDE).contains(&self.height) {
            return Err(ConfigError::BadHeight(self.height));
        }
        Ok(())
    }
}

/// Invalid startup configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Levels start at 1
    LevelZero,
    /// The gravity interval `FRAME_RATE - level * SPEED_FACTOR` would not be positive
    LevelTooHigh { level: u32, max: u32 },
    BadWidth(u16),
    BadHeight(u16),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LevelZero => write!(f, "starting level must be at least 1"),
            ConfigError::LevelTooHigh { level, max } => write!(
                f,
                "starting level {} leaves no gravity interval at {} fps (speed factor {}); maximum is {}",
                level, FRAME_RATE, SPEED_FACTOR, max
            ),
            ConfigError::BadWidth(w) => write!(
                f,
                "board width {} out of range {}..={}",
                w, MIN_BOARD_WIDTH, MAX_BOARD_SIDE
            ),
            ConfigError::BadHeight(h) => write!(
                f,
                "board height {} out of range {}..={}",
                h, MIN_BOARD_HEIGHT, MAX_BOARD_SIDE
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_level_zero() {
        let config = GameConfig::default().with_starting_level(0);
        assert_eq!(config.validate(), Err(ConfigError::LevelZero));
    }

    #[test]
    fn rejects_level_without_gravity_interval() {
        assert!(GameConfig::default().with_starting_level(29).validate().is_ok());

        let err = GameConfig::default()
            .with_starting_level(30)
            .validate()
            .unwrap_err();
        assert_eq!(err, ConfigError::LevelTooHigh { level: 30, max: 29 });
        assert!(err.to_string().contains("maximum is 29"));
    }

    #[test]
    fn rejects_tiny_boards() {
        assert_eq!(
            GameConfig::default().with_size(7, 20).validate(),
            Err(ConfigError::BadWidth(7))
        );
        assert_eq!(
            GameConfig::default().with_size(14, 3).validate(),
            Err(ConfigError::BadHeight(3))
        );
        assert!(GameConfig::default().with_size(8, 4).validate().is_ok());
    }
}
