//! Keystroke handling and session setup prompts
//!
//! Features:
//! - Non-blocking keystroke capture during replay
//! - Esc / Ctrl+C graceful exit
//! - Interactive mode and duration acquisition with safe fallbacks

use crossterm::event::{self, KeyCode, KeyEvent, KeyModifiers};
use std::io::Result as IoResult;
use std::io::{self, Write};
use std::time::Duration;

use crate::session::SessionMode;

/// Budget used when the duration input cannot be parsed
const DEFAULT_BUDGET: Duration = Duration::from_secs(60);

/// Handles user input from terminal
pub struct InputHandler {
    /// Timeout for poll operations (milliseconds)
    poll_timeout: Duration,
}

impl InputHandler {
    /// Create new input handler with default timeout (50ms for responsive input)
    pub fn new() -> Self {
        InputHandler {
            poll_timeout: Duration::from_millis(50),
        }
    }

    /// Enable raw mode for terminal input
    pub fn enable_raw_mode() -> IoResult<()> {
        crossterm::terminal::enable_raw_mode()
    }

    /// Disable raw mode and restore terminal
    pub fn disable_raw_mode() -> IoResult<()> {
        crossterm::terminal::disable_raw_mode()
    }

    /// Poll for keystroke with timeout (non-blocking)
    /// Returns Some(KeyEvent) if key pressed, None if timeout
    pub fn read_key(&self) -> Result<Option<KeyEvent>, Box<dyn std::error::Error>> {
        if event::poll(self.poll_timeout)? {
            match event::read()? {
                event::Event::Key(key_event) => Ok(Some(key_event)),
                _ => Ok(None),
            }
        } else {
            Ok(None)
        }
    }

    /// Check if key event is an exit signal (Ctrl+C or Escape)
    pub fn is_exit(key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
            KeyCode::Esc => true,
            _ => false,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Ask for the session mode; anything other than "time" means endurance.
/// Timed mode follows up with a duration prompt.
pub fn prompt_mode() -> Result<SessionMode, Box<dyn std::error::Error>> {
    let answer = prompt_line("Choose mode (endurance/time): ")?;
    if answer.trim().eq_ignore_ascii_case("time") {
        Ok(SessionMode::Timed(prompt_duration()?))
    } else {
        Ok(SessionMode::Endurance)
    }
}

/// Ask for the workout duration in minutes (decimals allowed).
/// Non-numeric input falls back to a one-minute budget.
pub fn prompt_duration() -> Result<Duration, Box<dyn std::error::Error>> {
    let answer = prompt_line("Enter workout duration in minutes (can be decimal): ")?;
    Ok(parse_duration_minutes(&answer))
}

/// Parse a minutes string into a budget, defaulting on bad input
pub fn parse_duration_minutes(input: &str) -> Duration {
    match input.trim().parse::<f64>() {
        Ok(minutes) if minutes > 0.0 => Duration::from_secs_f64(minutes * 60.0),
        _ => {
            println!("Invalid input, defaulting to 1 minute.");
            DEFAULT_BUDGET
        }
    }
}

fn prompt_line(prompt: &str) -> Result<String, Box<dyn std::error::Error>> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_whole_minutes() {
        assert_eq!(parse_duration_minutes("2"), Duration::from_secs(120));
    }

    #[test]
    fn test_parse_duration_decimal_minutes() {
        assert_eq!(parse_duration_minutes("0.5"), Duration::from_secs(30));
        assert_eq!(parse_duration_minutes(" 1.5 \n"), Duration::from_secs(90));
    }

    #[test]
    fn test_parse_duration_invalid_defaults_to_one_minute() {
        assert_eq!(parse_duration_minutes("soon"), Duration::from_secs(60));
        assert_eq!(parse_duration_minutes(""), Duration::from_secs(60));
        assert_eq!(parse_duration_minutes("-3"), Duration::from_secs(60));
    }
}
