//! Session timer
//!
//! Tracks elapsed wall-time against an optional total-duration budget.
//! Advisory only: the driver loop queries `expired` each frame and decides
//! when to end the session.

use std::time::{Duration, Instant};

/// How the session is bounded
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionMode {
    /// Unbounded: go until the user stops
    Endurance,
    /// Time-boxed to a fixed budget
    Timed(Duration),
}

impl SessionMode {
    /// Uppercase label for the HUD mode line
    pub fn label(&self) -> &'static str {
        match self {
            SessionMode::Endurance => "ENDURANCE",
            SessionMode::Timed(_) => "TIME",
        }
    }
}

/// Elapsed/remaining time bookkeeping for one session
#[derive(Clone, Copy, Debug)]
pub struct SessionTimer {
    start: Instant,
    budget: Option<Duration>,
}

impl SessionTimer {
    /// Start the clock at `now` for the given mode
    pub fn start(mode: SessionMode, now: Instant) -> Self {
        let budget = match mode {
            SessionMode::Endurance => None,
            SessionMode::Timed(budget) => Some(budget),
        };
        SessionTimer { start: now, budget }
    }

    /// Time elapsed since session start
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.duration_since(self.start)
    }

    /// Time left in the budget, saturating at zero; None in endurance mode
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.budget.map(|b| b.saturating_sub(self.elapsed(now)))
    }

    /// Whether the budget has been used up (always false in endurance mode)
    pub fn expired(&self, now: Instant) -> bool {
        match self.budget {
            Some(budget) => self.elapsed(now) >= budget,
            None => false,
        }
    }
}
