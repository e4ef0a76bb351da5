//! Pose-stream generator for the push-up tracker
//!
//! Produces a synthetic recording (one JSON frame per line) shaped like the
//! output of the external pose pipeline, for replay by the main binary.
//! Usage: cargo run --bin simulate -- --output data/session.jsonl --reps 10

use clap::Parser;
use rand::Rng;
use serde_json::json;
use std::fs;
use std::path::Path;

// BlazePose upper-body landmark indices, matching the replay side
const LEFT_SHOULDER: usize = 11;
const RIGHT_SHOULDER: usize = 12;
const LEFT_ELBOW: usize = 13;
const RIGHT_ELBOW: usize = 14;
const LEFT_WRIST: usize = 15;
const RIGHT_WRIST: usize = 16;
const LANDMARK_COUNT: usize = 33;

/// Elbow angle at the top of a rep (fully extended)
const TOP_ANGLE: f64 = 178.0;
/// Elbow angle at the bottom of a rep
const BOTTOM_ANGLE: f64 = 82.0;

#[derive(Parser, Debug)]
#[command(name = "Push-up Tracker - Stream Simulation")]
#[command(about = "Generate a synthetic recorded pose stream for replay")]
struct Args {
    /// Output path for the recording
    #[arg(short, long, default_value = "data/session.jsonl")]
    output: String,

    /// Number of repetitions to script
    #[arg(short, long, default_value = "10")]
    reps: usize,

    /// Of those, how many dwell long enough to fail
    #[arg(short, long, default_value = "2")]
    slow_reps: usize,

    /// Dwell at the bottom for normal reps (seconds)
    #[arg(long, default_value = "0.9")]
    dwell: f64,

    /// Dwell at the bottom for slow reps (seconds)
    #[arg(long, default_value = "3.2")]
    slow_dwell: f64,

    /// Frames per second of the recording
    #[arg(long, default_value = "30")]
    fps: u32,

    /// Angle jitter applied per frame (degrees)
    #[arg(long, default_value = "1.5")]
    jitter: f64,

    /// Fraction of frames with no body detected (0.0-1.0)
    #[arg(long, default_value = "0.0")]
    dropout: f64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Timing script for a single repetition
#[derive(Clone, Copy, Debug)]
struct RepScript {
    descent: f64,
    dwell: f64,
    ascent: f64,
    top_hold: f64,
}

impl RepScript {
    fn duration(&self) -> f64 {
        self.descent + self.dwell + self.ascent + self.top_hold
    }

    /// Elbow angle at `t` seconds into the rep
    fn angle_at(&self, t: f64) -> f64 {
        if t < self.descent {
            let p = t / self.descent;
            lerp(TOP_ANGLE, BOTTOM_ANGLE, ease(p))
        } else if t < self.descent + self.dwell {
            BOTTOM_ANGLE
        } else if t < self.descent + self.dwell + self.ascent {
            let p = (t - self.descent - self.dwell) / self.ascent;
            lerp(BOTTOM_ANGLE, TOP_ANGLE, ease(p))
        } else {
            TOP_ANGLE
        }
    }
}

fn lerp(from: f64, to: f64, p: f64) -> f64 {
    from + (to - from) * p
}

/// Cosine easing: smooth start/end of the descent and ascent
fn ease(p: f64) -> f64 {
    0.5 * (1.0 - (std::f64::consts::PI * p).cos())
}

/// Place shoulder/elbow/wrist so the included angle at the elbow is `angle_deg`
fn arm_landmarks(
    shoulder: (f64, f64),
    elbow: (f64, f64),
    forearm_len: f64,
    angle_deg: f64,
) -> [(f64, f64); 3] {
    let to_shoulder = (shoulder.0 - elbow.0, shoulder.1 - elbow.1);
    let upper_angle = to_shoulder.1.atan2(to_shoulder.0);
    let wrist_angle = upper_angle - angle_deg.to_radians();
    let wrist = (
        elbow.0 + forearm_len * wrist_angle.cos(),
        elbow.1 + forearm_len * wrist_angle.sin(),
    );
    [shoulder, elbow, wrist]
}

/// Build one JSON frame with both arms posed at `angle_deg`
fn frame_json(timestamp_ms: u64, angle_deg: f64) -> serde_json::Value {
    let left = arm_landmarks((0.42, 0.30), (0.40, 0.46), 0.16, angle_deg);
    let right = arm_landmarks((0.58, 0.30), (0.60, 0.46), 0.16, angle_deg);

    let mut landmarks = vec![json!({"x": 0.0, "y": 0.0, "z": 0.0, "visibility": 0.0}); LANDMARK_COUNT];
    for (idx, (x, y)) in [
        (LEFT_SHOULDER, left[0]),
        (LEFT_ELBOW, left[1]),
        (LEFT_WRIST, left[2]),
        (RIGHT_SHOULDER, right[0]),
        (RIGHT_ELBOW, right[1]),
        (RIGHT_WRIST, right[2]),
    ] {
        landmarks[idx] = json!({"x": x, "y": y, "z": 0.0, "visibility": 1.0});
    }

    json!({"timestamp_ms": timestamp_ms, "landmarks": landmarks})
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let mut rng = rand::thread_rng();

    println!("💪 Push-up Tracker - Stream Simulation");
    println!(
        "Reps: {} ({} slow) | fps: {} | dwell: {}s / {}s",
        args.reps, args.slow_reps, args.fps, args.dwell, args.slow_dwell
    );

    if args.fps == 0 {
        return Err("fps must be at least 1".into());
    }
    let slow_reps = args.slow_reps.min(args.reps);

    // Pick which reps run slow
    let slow_indices = rand::seq::index::sample(&mut rng, args.reps.max(1), slow_reps);

    // Script every rep with a little timing variation
    let mut scripts = Vec::with_capacity(args.reps);
    for i in 0..args.reps {
        let dwell = if slow_indices.iter().any(|s| s == i) {
            args.slow_dwell + rng.gen_range(-0.2..0.2)
        } else {
            args.dwell + rng.gen_range(-0.2..0.2)
        };
        scripts.push(RepScript {
            descent: rng.gen_range(0.5..0.8),
            dwell: dwell.max(0.1),
            ascent: rng.gen_range(0.5..0.8),
            top_hold: rng.gen_range(0.3..0.6),
        });
    }

    // Sample the scripted session at the recording frame rate
    let frame_step_ms = (1000 / args.fps as u64).max(1);
    let mut lines = Vec::new();
    let mut timestamp_ms: u64 = 0;
    let mut dropped = 0usize;

    for (i, script) in scripts.iter().enumerate() {
        let frames = (script.duration() * args.fps as f64).ceil() as u64;
        for f in 0..frames {
            let t = f as f64 / args.fps as f64;
            let angle = script.angle_at(t) + rng.gen_range(-args.jitter..=args.jitter);
            let angle = angle.clamp(5.0, 179.5);

            let frame = if args.dropout > 0.0 && rng.gen_bool(args.dropout.clamp(0.0, 1.0)) {
                dropped += 1;
                json!({"timestamp_ms": timestamp_ms, "landmarks": []})
            } else {
                frame_json(timestamp_ms, angle)
            };
            lines.push(frame.to_string());
            timestamp_ms += frame_step_ms;
        }
        if args.verbose {
            println!(
                "   Rep {}: dwell {:.2}s{}",
                i + 1,
                script.dwell,
                if slow_indices.iter().any(|s| s == i) {
                    " (slow)"
                } else {
                    ""
                }
            );
        }
    }

    // Write the recording
    if let Some(parent) = Path::new(&args.output).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&args.output, lines.join("\n") + "\n")?;

    println!(
        "💾 Saved {} frames ({:.1}s of recording) to {}",
        lines.len(),
        timestamp_ms as f64 / 1000.0,
        args.output
    );
    if dropped > 0 {
        println!("   Dropped frames (no detection): {}", dropped);
    }
    println!("✅ Replay with: cargo run -- --input {}", args.output);

    Ok(())
}
