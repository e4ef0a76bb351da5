//! Workout statistics
//!
//! Features:
//! - Completed/failed repetition tallies
//! - Dwell-time tracking with exponential moving average
//! - Whole-second dwell histogram
//! - Pace (reps per minute) over the session

use rustc_hash::FxHashMap;
use std::time::Duration;

/// Tracks repetition outcomes and dwell times for a session
#[derive(Clone, Debug)]
pub struct WorkoutStats {
    completed: u64,
    failed: u64,
    /// Sum of completed-rep dwell times, for the mean
    dwell_total: Duration,
    /// EMA of dwell seconds across completed reps (alpha = 0.1)
    ema_dwell_secs: f64,
    ema_alpha: f64,
    fastest_dwell: Option<Duration>,
    slowest_dwell: Option<Duration>,
    /// Dwell histogram bucketed to whole seconds
    dwell_buckets: FxHashMap<u64, u32>,
}

#[allow(dead_code)]
impl WorkoutStats {
    /// Create empty statistics for a new session
    pub fn new() -> Self {
        WorkoutStats {
            completed: 0,
            failed: 0,
            dwell_total: Duration::ZERO,
            ema_dwell_secs: 0.0,
            ema_alpha: 0.1,
            fastest_dwell: None,
            slowest_dwell: None,
            dwell_buckets: FxHashMap::default(),
        }
    }

    /// Record a repetition that locked out in time
    pub fn record_completed(&mut self, dwell: Duration) {
        self.completed += 1;
        self.dwell_total += dwell;

        let secs = dwell.as_secs_f64();
        if self.completed == 1 {
            self.ema_dwell_secs = secs;
        } else {
            self.ema_dwell_secs =
                self.ema_alpha * secs + (1.0 - self.ema_alpha) * self.ema_dwell_secs;
        }

        self.fastest_dwell = Some(match self.fastest_dwell {
            Some(best) => best.min(dwell),
            None => dwell,
        });
        self.slowest_dwell = Some(match self.slowest_dwell {
            Some(worst) => worst.max(dwell),
            None => dwell,
        });

        *self.dwell_buckets.entry(dwell.as_secs()).or_insert(0) += 1;
    }

    /// Record a repetition that exceeded the dwell limit
    pub fn record_failed(&mut self) {
        self.failed += 1;
    }

    /// Completed repetitions
    pub fn completed(&self) -> u64 {
        self.completed
    }

    /// Failed repetitions
    pub fn failed(&self) -> u64 {
        self.failed
    }

    /// Mean dwell over completed reps, in seconds
    pub fn mean_dwell_secs(&self) -> f64 {
        if self.completed == 0 {
            0.0
        } else {
            self.dwell_total.as_secs_f64() / self.completed as f64
        }
    }

    /// EMA dwell over completed reps, in seconds
    pub fn ema_dwell_secs(&self) -> f64 {
        self.ema_dwell_secs
    }

    /// Completed reps per minute over the given session length
    pub fn pace(&self, elapsed: Duration) -> f64 {
        let mins = elapsed.as_secs_f64() / 60.0;
        if mins > 0.0 {
            self.completed as f64 / mins
        } else {
            0.0
        }
    }

    /// Histogram buckets sorted by dwell second
    pub fn dwell_histogram(&self) -> Vec<(u64, u32)> {
        let mut buckets: Vec<(u64, u32)> = self
            .dwell_buckets
            .iter()
            .map(|(&secs, &count)| (secs, count))
            .collect();
        buckets.sort_by_key(|&(secs, _)| secs);
        buckets
    }

    /// Snapshot for the end-of-session report
    pub fn summary(&self, elapsed: Duration) -> WorkoutSummary {
        WorkoutSummary {
            completed: self.completed,
            failed: self.failed,
            elapsed,
            pace: self.pace(elapsed),
            mean_dwell_secs: self.mean_dwell_secs(),
            ema_dwell_secs: self.ema_dwell_secs,
            fastest_dwell: self.fastest_dwell,
            slowest_dwell: self.slowest_dwell,
        }
    }
}

impl Default for WorkoutStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary statistics for one session
#[derive(Clone, Debug)]
pub struct WorkoutSummary {
    pub completed: u64,
    pub failed: u64,
    pub elapsed: Duration,
    pub pace: f64,
    pub mean_dwell_secs: f64,
    pub ema_dwell_secs: f64,
    pub fastest_dwell: Option<Duration>,
    pub slowest_dwell: Option<Duration>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_mean() {
        let mut stats = WorkoutStats::new();
        stats.record_completed(Duration::from_secs(1));
        stats.record_completed(Duration::from_secs(2));
        stats.record_failed();

        assert_eq!(stats.completed(), 2);
        assert_eq!(stats.failed(), 1);
        assert!((stats.mean_dwell_secs() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_ema_seeds_on_first_rep() {
        let mut stats = WorkoutStats::new();
        stats.record_completed(Duration::from_secs(2));
        assert!((stats.ema_dwell_secs() - 2.0).abs() < 1e-9);

        stats.record_completed(Duration::from_secs(1));
        // 0.1 * 1.0 + 0.9 * 2.0
        assert!((stats.ema_dwell_secs() - 1.9).abs() < 1e-9);
    }

    #[test]
    fn test_histogram_buckets_whole_seconds() {
        let mut stats = WorkoutStats::new();
        stats.record_completed(Duration::from_millis(800));
        stats.record_completed(Duration::from_millis(900));
        stats.record_completed(Duration::from_millis(1400));

        let buckets = stats.dwell_histogram();
        assert_eq!(buckets, vec![(0, 2), (1, 1)]);
    }

    #[test]
    fn test_pace_over_session() {
        let mut stats = WorkoutStats::new();
        for _ in 0..10 {
            stats.record_completed(Duration::from_secs(1));
        }
        assert!((stats.pace(Duration::from_secs(60)) - 10.0).abs() < 1e-9);
        assert_eq!(stats.pace(Duration::ZERO), 0.0);
    }

    #[test]
    fn test_fastest_and_slowest() {
        let mut stats = WorkoutStats::new();
        stats.record_completed(Duration::from_millis(700));
        stats.record_completed(Duration::from_millis(2100));
        stats.record_completed(Duration::from_millis(1200));

        let summary = stats.summary(Duration::from_secs(30));
        assert_eq!(summary.fastest_dwell, Some(Duration::from_millis(700)));
        assert_eq!(summary.slowest_dwell, Some(Duration::from_millis(2100)));
    }
}
