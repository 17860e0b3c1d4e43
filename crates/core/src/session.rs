//! Session state - level, score, lines, pause and gravity timing
//!
//! This is the listener the controller registers on its board: line clears feed
//! the score and level, game over resets everything back to the starting level.

use crate::events::BoardListener;
use crate::types::{drop_interval, LINES_PER_LEVEL};

/// Per-game counters mutated by board events and elapsed ticks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    starting_level: u32,
    level: u32,
    score: u32,
    lines: u32,
    /// Frames since the last gravity step
    ticks: u32,
    paused: bool,
}

impl Session {
    /// Levels start at 1; a zero starting level is raised to 1.
    pub fn new(starting_level: u32) -> Self {
        let starting_level = starting_level.max(1);
        Self {
            starting_level,
            level: starting_level,
            score: 0,
            lines: 0,
            ticks: 0,
            paused: false,
        }
    }

    /// Back to the starting level with no score, lines or pending ticks.
    ///
    /// The pause flag is left alone.
    pub fn reset(&mut self) {
        self.level = self.starting_level;
        self.score = 0;
        self.lines = 0;
        self.ticks = 0;
    }

    pub fn starting_level(&self) -> u32 {
        self.starting_level
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Frames between gravity steps at the current level
    pub fn drop_interval(&self) -> u32 {
        drop_interval(self.level)
    }

    /// Count one frame; true when gravity should move the shape down.
    ///
    /// Frozen while paused: the counter does not advance.
    pub fn should_advance(&mut self) -> bool {
        if self.paused {
            return false;
        }
        self.ticks += 1;
        if self.ticks >= self.drop_interval() {
            self.ticks = 0;
            return true;
        }
        false
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        log::info!("{}", if self.paused { "paused" } else { "resumed" });
        self.paused
    }

    /// Score `count × level`, add the lines, and level up once every ten lines.
    pub fn record_lines(&mut self, count: u32) {
        self.score = self.score.saturating_add(count.saturating_mul(self.level));
        self.lines = self.lines.saturating_add(count);

        let earned = self.lines / LINES_PER_LEVEL;
        if earned > self.level {
            log::info!("level {} -> {}", self.level, earned);
            self.level = earned;
        }
    }

    /// Status line shown by the renderer
    pub fn caption(&self) -> String {
        format!(
            "Level {} | Score {} | Lines {}",
            self.level, self.score, self.lines
        )
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(1)
    }
}

impl BoardListener for Session {
    fn on_lines_cleared(&mut self, count: u32) {
        self.record_lines(count);
    }

    fn on_game_over(&mut self) {
        log::info!(
            "game over at level {} with score {} ({} lines)",
            self.level,
            self.score,
            self.lines
        );
        self.reset();
    }
}
