//! Per-side countdown clocks.
//!
//! Both clocks start from the same duration and stay frozen until the first
//! move completes. Each tick charges the elapsed wall time to the side to move
//! only, clamping at zero. An optional Fischer increment is credited to the
//! mover after every completed move.

use chrono::TimeDelta;
use tracing::warn;

use crate::game_state::chess_types::Color;

/// Remaining-time marks, in seconds, that log a warning when crossed.
const LOW_TIME_WARNINGS_SECS: [i64; 2] = [30, 10];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessClock {
    remaining: [TimeDelta; 2],
    increment: TimeDelta,
    started: bool,
}

impl ChessClock {
    pub fn new(initial: TimeDelta, increment: TimeDelta) -> Self {
        Self {
            remaining: [initial; 2],
            increment,
            started: false,
        }
    }

    #[inline]
    pub fn remaining(&self, color: Color) -> TimeDelta {
        self.remaining[color.index()]
    }

    #[inline]
    pub fn increment(&self) -> TimeDelta {
        self.increment
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn start(&mut self) {
        self.started = true;
    }

    /// Charge `elapsed` to `side` and report it if its clock hit zero.
    ///
    /// Does nothing before the clock has started. Negative elapsed values are
    /// treated as zero.
    pub fn tick(&mut self, side: Color, elapsed: TimeDelta) -> Option<Color> {
        if !self.started {
            return None;
        }

        let elapsed = elapsed.max(TimeDelta::zero());
        let before = self.remaining(side);
        let after = before
            .checked_sub(&elapsed)
            .unwrap_or(TimeDelta::zero())
            .max(TimeDelta::zero());
        self.remaining[side.index()] = after;

        for secs in LOW_TIME_WARNINGS_SECS {
            let mark = TimeDelta::seconds(secs);
            if before > mark && after <= mark && after > TimeDelta::zero() {
                warn!(side = side.name(), left = %format_clock(after), "low time");
            }
        }

        (after == TimeDelta::zero()).then_some(side)
    }

    /// Credit the increment to the side that just completed a move.
    pub fn add_increment(&mut self, mover: Color) {
        if self.increment <= TimeDelta::zero() {
            return;
        }
        let slot = &mut self.remaining[mover.index()];
        if let Some(next) = slot.checked_add(&self.increment) {
            *slot = next;
        }
    }
}

/// Render a clock value as `mm:ss`, truncating sub-second remainders.
pub fn format_clock(value: TimeDelta) -> String {
    let total = value.num_seconds().max(0);
    format!("{:02}:{:02}", total / 60, total % 60)
}
