//! Repetition state machine
//!
//! Maintains:
//! - Current phase (idle, down, locked out, failed)
//! - Bottom-position timestamp for dwell measurement
//! - Accumulated repetition count
//!
//! The machine reacts only at the two threshold crossings; angles inside the
//! hysteresis band never cause a transition, so jitter near the midpoint
//! cannot produce spurious state changes.

use std::time::{Duration, Instant};

/// Phase of the current repetition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepPhase {
    /// No repetition observed yet
    Idle,
    /// Bottom position reached, dwell timer running
    Down,
    /// Last repetition completed within the dwell limit
    LockedOut,
    /// Last repetition exceeded the dwell limit
    Failed,
}

impl RepPhase {
    /// HUD label for the phase (sticky: shows the last transition)
    pub fn label(&self) -> &'static str {
        match self {
            RepPhase::Idle => "READY",
            RepPhase::Down => "DOWN POSITION",
            RepPhase::LockedOut => "LOCKED OUT",
            RepPhase::Failed => "FAIL DETECTED",
        }
    }
}

/// Event emitted by a single observation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepEvent {
    /// Entered a new phase without completing a repetition
    StateChanged(RepPhase),
    /// Repetition locked out in time; carries the updated count
    RepetitionCompleted(u64),
    /// Dwell limit exceeded; the notifier should fire
    FailureDetected,
}

/// Immutable angle/dwell thresholds, supplied once at session start
#[derive(Clone, Copy, Debug)]
pub struct Thresholds {
    /// Elbow angle for the bottom position (degrees)
    pub down_angle: f64,
    /// Elbow angle for full extension (degrees)
    pub up_angle: f64,
    /// +/- tolerance applied to both angles (degrees)
    pub tolerance: f64,
    /// Maximum dwell in the bottom position before a rep fails
    pub fail_threshold: Duration,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            down_angle: 90.0,
            up_angle: 175.0,
            tolerance: 5.0,
            fail_threshold: Duration::from_millis(2500),
        }
    }
}

/// Tracks repetitions across a stream of per-frame angle samples
#[derive(Clone, Debug)]
pub struct RepTracker {
    thresholds: Thresholds,
    phase: RepPhase,
    /// Set on the down-crossing; cleared on the up-crossing
    bottom_time: Option<Instant>,
    count: u64,
    last_dwell: Option<Duration>,
}

impl RepTracker {
    /// Create a tracker for a new session
    pub fn new(thresholds: Thresholds) -> Self {
        RepTracker {
            thresholds,
            phase: RepPhase::Idle,
            bottom_time: None,
            count: 0,
            last_dwell: None,
        }
    }

    /// Feed one angle sample (averaged elbow angle, degrees) taken at `now`.
    ///
    /// Returns the transition event, if any. A sample that stays inside the
    /// hysteresis band, or repeats the current side of it, returns None and
    /// leaves the machine untouched.
    pub fn observe(&mut self, angle: f64, now: Instant) -> Option<RepEvent> {
        let t = &self.thresholds;

        // Down-crossing: only a fresh crossing starts the dwell timer, so
        // repeated below-threshold samples never reset it.
        if angle < t.down_angle + t.tolerance && self.phase != RepPhase::Down {
            self.phase = RepPhase::Down;
            self.bottom_time = Some(now);
            return Some(RepEvent::StateChanged(RepPhase::Down));
        }

        // Up-crossing: classify the rep by how long the body dwelt at the
        // bottom. The failure is a normal outcome, not an error.
        if angle > t.up_angle - t.tolerance && self.phase == RepPhase::Down {
            if let Some(bottom) = self.bottom_time.take() {
                let dwell = now.duration_since(bottom);
                self.last_dwell = Some(dwell);

                if dwell > t.fail_threshold {
                    self.phase = RepPhase::Failed;
                    return Some(RepEvent::FailureDetected);
                }

                self.phase = RepPhase::LockedOut;
                self.count += 1;
                return Some(RepEvent::RepetitionCompleted(self.count));
            }
        }

        None
    }

    /// Current phase (sticky between transitions, for display)
    pub fn phase(&self) -> RepPhase {
        self.phase
    }

    /// Completed repetitions so far
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Dwell time of the most recent completed or failed repetition
    pub fn last_dwell(&self) -> Option<Duration> {
        self.last_dwell
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> RepTracker {
        // down 90, up 175, tolerance 5, fail threshold 2.5s
        RepTracker::new(Thresholds::default())
    }

    fn at(base: Instant, secs: f64) -> Instant {
        base + Duration::from_secs_f64(secs)
    }

    #[test]
    fn test_successful_rep() {
        let base = Instant::now();
        let mut reps = tracker();

        let down = reps.observe(80.0, at(base, 0.0));
        assert_eq!(down, Some(RepEvent::StateChanged(RepPhase::Down)));
        assert_eq!(reps.phase(), RepPhase::Down);

        let up = reps.observe(178.0, at(base, 1.0));
        assert_eq!(up, Some(RepEvent::RepetitionCompleted(1)));
        assert_eq!(reps.phase(), RepPhase::LockedOut);
        assert_eq!(reps.count(), 1);
    }

    #[test]
    fn test_failed_rep_when_dwell_too_long() {
        let base = Instant::now();
        let mut reps = tracker();

        reps.observe(80.0, at(base, 0.0));
        let up = reps.observe(178.0, at(base, 3.0));

        assert_eq!(up, Some(RepEvent::FailureDetected));
        assert_eq!(reps.phase(), RepPhase::Failed);
        assert_eq!(reps.count(), 0);
        assert_eq!(reps.last_dwell(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_hysteresis_band_produces_no_transitions() {
        let base = Instant::now();
        let mut reps = tracker();

        // Oscillating between 100 and 150: never below 95, never above 170
        for i in 0..20 {
            let angle = if i % 2 == 0 { 100.0 } else { 150.0 };
            let event = reps.observe(angle, at(base, i as f64 * 0.1));
            assert_eq!(event, None);
        }
        assert_eq!(reps.phase(), RepPhase::Idle);
        assert_eq!(reps.count(), 0);
    }

    #[test]
    fn test_repeated_down_samples_keep_bottom_time() {
        let base = Instant::now();
        let mut reps = tracker();

        reps.observe(80.0, at(base, 0.0));
        // Still below threshold: must not reset the dwell timer
        assert_eq!(reps.observe(82.0, at(base, 0.5)), None);

        // Elapsed measured from t=0, not t=0.5, so 1.0s < 2.5s completes
        let up = reps.observe(178.0, at(base, 1.0));
        assert_eq!(up, Some(RepEvent::RepetitionCompleted(1)));
        assert_eq!(reps.last_dwell(), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_boundary_samples_do_not_transition() {
        let base = Instant::now();
        let mut reps = tracker();

        // Exactly down_angle + tolerance: strict < does not fire
        assert_eq!(reps.observe(95.0, at(base, 0.0)), None);
        assert_eq!(reps.phase(), RepPhase::Idle);

        reps.observe(80.0, at(base, 0.1));
        // Exactly up_angle - tolerance: strict > does not fire
        assert_eq!(reps.observe(170.0, at(base, 0.5)), None);
        assert_eq!(reps.phase(), RepPhase::Down);
    }

    #[test]
    fn test_counting_continues_across_reps() {
        let base = Instant::now();
        let mut reps = tracker();

        for i in 0..3 {
            let t0 = i as f64 * 2.0;
            reps.observe(80.0, at(base, t0));
            reps.observe(178.0, at(base, t0 + 1.0));
        }
        assert_eq!(reps.count(), 3);
        assert_eq!(reps.phase(), RepPhase::LockedOut);
    }

    #[test]
    fn test_recovers_after_failure() {
        let base = Instant::now();
        let mut reps = tracker();

        reps.observe(80.0, at(base, 0.0));
        assert_eq!(reps.observe(178.0, at(base, 3.0)), Some(RepEvent::FailureDetected));

        // The next down-crossing starts a fresh rep
        let down = reps.observe(80.0, at(base, 4.0));
        assert_eq!(down, Some(RepEvent::StateChanged(RepPhase::Down)));
        let up = reps.observe(178.0, at(base, 5.0));
        assert_eq!(up, Some(RepEvent::RepetitionCompleted(1)));
    }

    #[test]
    fn test_phase_is_sticky_for_display() {
        let base = Instant::now();
        let mut reps = tracker();

        reps.observe(80.0, at(base, 0.0));
        reps.observe(178.0, at(base, 1.0));
        // Mid-band samples leave the displayed phase at LockedOut
        reps.observe(120.0, at(base, 1.5));
        reps.observe(140.0, at(base, 1.6));
        assert_eq!(reps.phase(), RepPhase::LockedOut);
        assert_eq!(reps.phase().label(), "LOCKED OUT");
    }
}
