//! Game configuration.

use std::time::Duration;

use chrono::TimeDelta;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::DEFAULT_CLOCK_MINUTES;

/// History lines the side panel shows.
pub const DEFAULT_HISTORY_LINES: usize = 8;

/// Host loop pacing, about 60 frames per second.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Starting time on each clock.
    pub clock_time: TimeDelta,
    /// Fischer increment credited after every completed move.
    pub increment: TimeDelta,
    pub history_lines: usize,
    pub frame_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            clock_time: TimeDelta::minutes(DEFAULT_CLOCK_MINUTES),
            increment: TimeDelta::zero(),
            history_lines: DEFAULT_HISTORY_LINES,
            frame_interval: DEFAULT_FRAME_INTERVAL,
        }
    }
}

impl GameConfig {
    /// Build a validated config from whole minutes and increment seconds.
    pub fn new(clock_minutes: i64, increment_seconds: i64) -> ChessResult<Self> {
        let clock_time = TimeDelta::try_minutes(clock_minutes).ok_or_else(|| {
            ChessError::InvalidConfig(format!("clock of {clock_minutes} minutes is out of range"))
        })?;
        let increment = TimeDelta::try_seconds(increment_seconds).ok_or_else(|| {
            ChessError::InvalidConfig(format!(
                "increment of {increment_seconds} seconds is out of range"
            ))
        })?;

        let config = Self {
            clock_time,
            increment,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_history_lines(self, history_lines: usize) -> Self {
        Self {
            history_lines,
            ..self
        }
    }

    pub fn validate(&self) -> ChessResult<()> {
        if self.clock_time <= TimeDelta::zero() {
            return Err(ChessError::InvalidConfig(
                "clock time must be positive".to_owned(),
            ));
        }
        if self.increment < TimeDelta::zero() {
            return Err(ChessError::InvalidConfig(
                "increment must not be negative".to_owned(),
            ));
        }
        if self.history_lines == 0 {
            return Err(ChessError::InvalidConfig(
                "at least one history line must be shown".to_owned(),
            ));
        }
        if self.frame_interval.is_zero() {
            return Err(ChessError::InvalidConfig(
                "frame interval must be positive".to_owned(),
            ));
        }
        Ok(())
    }
}
