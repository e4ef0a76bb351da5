//! Terminal display and HUD rendering
//!
//! Features:
//! - Mode, rep count, and countdown lines
//! - Live left/right elbow angle readout
//! - Color-coded state banner (down / locked out / failed)

#[allow(unused_imports)]
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{
    cursor, execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{stdout, Write};
use std::time::Duration;

use crate::pose::landmarks::ElbowAngles;
use crate::session::{RepPhase, SessionMode};

/// Terminal display manager
pub struct Display {
    /// Whether we're using alternate screen
    use_alternate_screen: bool,
}

impl Display {
    /// Create display without alternate screen (simpler mode)
    pub fn simple() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Display {
            use_alternate_screen: false,
        })
    }

    /// Clear screen
    pub fn clear(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        Ok(())
    }

    /// Render the mode line
    pub fn show_mode(&self, mode: SessionMode) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Cyan),
            Print("Mode: "),
            ResetColor,
            Print(mode.label()),
            Print("\n")
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Render the repetition counter
    pub fn show_count(&self, count: u64) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, 1),
            Print("Pushups: "),
            SetForegroundColor(Color::Green),
            Print(count.to_string()),
            ResetColor,
            Print("\n")
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Render the session clock: countdown in timed mode, elapsed otherwise
    pub fn show_timer(
        &self,
        elapsed: Duration,
        remaining: Option<Duration>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        let (label, value) = match remaining {
            Some(left) => ("Time Left: ", left),
            None => ("Elapsed: ", elapsed),
        };
        let total_secs = value.as_secs();
        let (mins, secs) = (total_secs / 60, total_secs % 60);

        execute!(
            stdout,
            cursor::MoveTo(0, 2),
            SetForegroundColor(Color::Yellow),
            Print(label),
            ResetColor,
            Print(format!("{:02}:{:02}\n", mins, secs))
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Render the per-frame elbow angle readout
    pub fn show_angles(&self, angles: &ElbowAngles) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, 3),
            SetForegroundColor(Color::Cyan),
            Print("Elbow angles  "),
            ResetColor,
            Print(format!(
                "L: {:>3}°  R: {:>3}°  avg: {:>3}°\n",
                angles.left as i32,
                angles.right as i32,
                angles.average() as i32
            ))
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Render the color-coded state banner
    pub fn show_state(&self, phase: RepPhase) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        let color = match phase {
            RepPhase::Idle => Color::DarkGrey,
            RepPhase::Down => Color::Yellow,
            RepPhase::LockedOut => Color::Green,
            RepPhase::Failed => Color::Red,
        };

        execute!(
            stdout,
            cursor::MoveTo(0, 5),
            SetForegroundColor(color),
            Print(format!("{:^30}\n", phase.label())),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Show help text
    pub fn show_help(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, 7),
            SetForegroundColor(Color::DarkGrey),
            Print("Esc or Ctrl+C to stop\n"),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Reset terminal state and cleanup
    pub fn shutdown(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        if self.use_alternate_screen {
            execute!(stdout, LeaveAlternateScreen, cursor::Show,)?;
        }

        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl Default for Display {
    fn default() -> Self {
        Display {
            use_alternate_screen: false,
        }
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        // Best effort cleanup
        let _ = self.shutdown();
    }
}
