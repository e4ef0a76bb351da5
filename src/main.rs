//! Push-up Tracker - dwell-time repetition counting
//!
//! Single-session, self-contained CLI application. Replays a pose stream
//! recorded by an external pose pipeline, feeds per-frame elbow angles to
//! the repetition tracker, and renders a terminal HUD.

mod cli;
mod pose;
mod session;

use clap::Parser;
use cli::display::Display;
use cli::input::{self, InputHandler};
use pose::landmarks::{load_frames, ElbowAngles};
use session::{
    ConsoleNotifier, FailureNotifier, RepEvent, RepTracker, SessionMode, SessionTimer, Thresholds,
    WorkoutStats,
};
use std::error::Error;
use std::thread;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "Push-up Tracker")]
#[command(about = "Dwell-time push-up repetition tracking from a recorded pose stream")]
struct Args {
    /// Path to the recorded pose stream (one JSON frame per line)
    #[arg(short, long, default_value = "data/session.jsonl")]
    input: String,

    /// Session mode (endurance or time); prompts when omitted
    #[arg(short, long)]
    mode: Option<String>,

    /// Workout duration in minutes for timed mode (can be decimal)
    #[arg(long)]
    duration_mins: Option<f64>,

    /// Elbow angle for the bottom position (degrees)
    #[arg(long, default_value = "90")]
    down_angle: f64,

    /// Elbow angle for full extension (degrees)
    #[arg(long, default_value = "175")]
    up_angle: f64,

    /// +/- tolerance in degrees
    #[arg(long, default_value = "5")]
    tolerance: f64,

    /// Seconds allowed at the bottom before a rep fails
    #[arg(long, default_value = "2.5")]
    fail_threshold: f64,

    /// Replay as fast as possible instead of pacing to frame timestamps
    #[arg(long)]
    fast: bool,

    /// Enable debug mode
    #[arg(short, long)]
    debug: bool,
}

/// Resolve the session mode from flags, prompting for anything missing
fn resolve_mode(args: &Args) -> Result<SessionMode, Box<dyn Error>> {
    match args.mode.as_deref() {
        Some(m) if m.eq_ignore_ascii_case("time") => {
            let budget = match args.duration_mins {
                Some(mins) if mins > 0.0 => Duration::from_secs_f64(mins * 60.0),
                Some(_) => {
                    println!("Invalid input, defaulting to 1 minute.");
                    Duration::from_secs(60)
                }
                None => input::prompt_duration()?,
            };
            Ok(SessionMode::Timed(budget))
        }
        Some(_) => Ok(SessionMode::Endurance),
        None => input::prompt_mode(),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    println!("💪 Push-up Tracker v0.1.0");
    println!(
        "Input: {} | down: {}° | up: {}° | tolerance: {}° | fail: {}s",
        args.input, args.down_angle, args.up_angle, args.tolerance, args.fail_threshold
    );

    let mode = resolve_mode(&args)?;

    // Load the recorded pose stream up front
    let frames = load_frames(&args.input)?;
    if args.debug {
        println!("✓ Loaded {} frames from {}", frames.len(), args.input);
    }

    let thresholds = Thresholds {
        down_angle: args.down_angle,
        up_angle: args.up_angle,
        tolerance: args.tolerance,
        fail_threshold: Duration::from_secs_f64(args.fail_threshold),
    };

    // Initialize display
    let display = Display::simple()?;
    display.clear()?;

    // Initialize input handler
    InputHandler::enable_raw_mode()?;
    let input_handler = InputHandler::new();

    // Initialize session
    let session_start = Instant::now();
    let timer = SessionTimer::start(mode, session_start);
    let mut tracker = RepTracker::new(thresholds);
    let mut stats = WorkoutStats::new();
    let mut notifier = ConsoleNotifier::new();

    let mut last_offset = Duration::ZERO;
    let mut last_angles: Option<ElbowAngles> = None;
    let mut time_limit_hit = false;

    // Event loop: one iteration per recorded frame
    'session: for frame in &frames {
        let offset = Duration::from_millis(frame.timestamp_ms);

        // Pace replay to the recording unless running unpaced
        if !args.fast {
            thread::sleep(offset.saturating_sub(last_offset));
        }
        last_offset = offset;

        // Frame timestamps drive the session clock, so replay speed never
        // skews dwell measurement.
        let now = session_start + offset;

        // Frames with no detection are skipped; the tracker holds its state
        if let Some(angles) = frame.elbow_angles() {
            match tracker.observe(angles.average(), now) {
                Some(RepEvent::RepetitionCompleted(_)) => {
                    if let Some(dwell) = tracker.last_dwell() {
                        stats.record_completed(dwell);
                    }
                }
                Some(RepEvent::FailureDetected) => {
                    stats.record_failed();
                    notifier.notify_failure();
                }
                Some(RepEvent::StateChanged(_)) | None => {}
            }
            last_angles = Some(angles);
        }

        if timer.expired(now) {
            time_limit_hit = true;
            break 'session;
        }

        // Display current state
        display.clear()?;
        display.show_mode(mode)?;
        display.show_count(tracker.count())?;
        display.show_timer(timer.elapsed(now), timer.remaining(now))?;
        if let Some(angles) = &last_angles {
            display.show_angles(angles)?;
        }
        display.show_state(tracker.phase())?;
        display.show_help()?;

        // Check for exit
        if let Some(key) = input_handler.read_key()? {
            if InputHandler::is_exit(&key) {
                break 'session;
            }
        }
    }

    // Cleanup
    InputHandler::disable_raw_mode()?;
    display.shutdown()?;

    if time_limit_hit {
        if let SessionMode::Timed(budget) = mode {
            println!("\n⏱️ Time limit reached: {:.1} minute(s)", budget.as_secs_f64() / 60.0);
        }
    }

    // Summary
    let summary = stats.summary(timer.elapsed(session_start + last_offset));
    println!("\n🏁 Workout ended. Total pushups: {}", tracker.count());
    println!(
        "📊 Final Stats: {} completed | {} failed | {:.1}s | {:.1} reps/min",
        summary.completed,
        summary.failed,
        summary.elapsed.as_secs_f64(),
        summary.pace
    );

    if summary.completed > 0 {
        println!(
            "   Dwell: mean {:.2}s | ema {:.2}s | fastest {:.2}s | slowest {:.2}s",
            summary.mean_dwell_secs,
            summary.ema_dwell_secs,
            summary.fastest_dwell.unwrap_or(Duration::ZERO).as_secs_f64(),
            summary.slowest_dwell.unwrap_or(Duration::ZERO).as_secs_f64()
        );
        let buckets: Vec<String> = stats
            .dwell_histogram()
            .iter()
            .map(|(secs, count)| format!("{}s ×{}", secs, count))
            .collect();
        println!("   Dwell histogram: {}", buckets.join(", "));
    }

    if notifier.fired() > 0 {
        println!("⚠️  Failure signals sent: {}", notifier.fired());
    }

    Ok(())
}
