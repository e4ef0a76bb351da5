//! Session Management: Repetition tracking, timing, and statistics
//!
//! # Components
//! - `reps.rs`: RepTracker state machine for down/lockout/failure detection
//! - `timer.rs`: SessionTimer for endurance/timed budgets
//! - `notify.rs`: FailureNotifier capability for the failure signal
//! - `stats.rs`: WorkoutStats dwell/pace bookkeeping

pub mod notify;
pub mod reps;
pub mod stats;
pub mod timer;

pub use notify::{ConsoleNotifier, FailureNotifier};
pub use reps::{RepEvent, RepPhase, RepTracker, Thresholds};
pub use stats::WorkoutStats;
pub use timer::{SessionMode, SessionTimer};

#[allow(unused_imports)]
pub use stats::WorkoutSummary;
