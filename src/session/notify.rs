//! Failure notification
//!
//! The tracker only decides *when* a repetition failed; the transport used to
//! signal it (wireless trigger, buzzer, ...) lives behind this trait. The
//! driver forwards `FailureDetected` events to the injected notifier.

use crossterm::style::Stylize;

/// Receives fire-and-forget failure signals from the session driver
pub trait FailureNotifier {
    /// A repetition exceeded the dwell limit
    fn notify_failure(&mut self);
}

/// Console notifier: prints the failure line.
/// Stands in for a hardware trigger until one is wired up.
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    fired: u32,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        ConsoleNotifier { fired: 0 }
    }

    /// How many failure signals have been sent this session
    pub fn fired(&self) -> u32 {
        self.fired
    }
}

impl FailureNotifier for ConsoleNotifier {
    fn notify_failure(&mut self) {
        self.fired += 1;
        println!("{}", "FAILED".red().bold());
    }
}
