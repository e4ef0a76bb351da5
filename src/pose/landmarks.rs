//! Pose landmark frames
//!
//! Handles:
//! - Per-frame landmark sets as emitted by the external pose pipeline
//! - Bilateral elbow angle extraction (left/right average)
//! - Loading recorded pose streams (one JSON frame per line)

use crate::pose::angle::{joint_angle, Point2};
use serde::{Deserialize, Serialize};
use std::fs;

// BlazePose upper-body landmark indices
pub const LEFT_SHOULDER: usize = 11;
pub const RIGHT_SHOULDER: usize = 12;
pub const LEFT_ELBOW: usize = 13;
pub const RIGHT_ELBOW: usize = 14;
pub const LEFT_WRIST: usize = 15;
pub const RIGHT_WRIST: usize = 16;

/// Number of landmarks in a full-body pose set
#[allow(dead_code)]
pub const LANDMARK_COUNT: usize = 33;

/// A single normalized landmark position for one frame
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default = "default_visibility")]
    pub visibility: f64,
}

fn default_visibility() -> f64 {
    1.0
}

impl Landmark {
    /// Project onto the image plane (z is not used for angle geometry)
    pub fn point(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// One frame of the recorded pose stream
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoseFrame {
    /// Milliseconds since the start of the recording
    pub timestamp_ms: u64,
    /// Landmark set; empty when the pipeline found no body in the frame
    pub landmarks: Vec<Landmark>,
}

/// Left and right elbow angles for a single frame
#[derive(Clone, Copy, Debug)]
pub struct ElbowAngles {
    pub left: f64,
    pub right: f64,
}

impl ElbowAngles {
    /// Bilateral average fed to the repetition tracker
    pub fn average(&self) -> f64 {
        (self.left + self.right) / 2.0
    }
}

impl PoseFrame {
    /// Extract both elbow angles, or None when the arm landmarks are missing
    /// (the caller skips such frames; the tracker holds its state).
    pub fn elbow_angles(&self) -> Option<ElbowAngles> {
        let triple = |s: usize, e: usize, w: usize| -> Option<f64> {
            let shoulder = self.landmarks.get(s)?;
            let elbow = self.landmarks.get(e)?;
            let wrist = self.landmarks.get(w)?;
            Some(joint_angle(shoulder.point(), elbow.point(), wrist.point()))
        };

        let left = triple(LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST)?;
        let right = triple(RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST)?;
        Some(ElbowAngles { left, right })
    }
}

/// Load a recorded pose stream: one JSON-encoded frame per line.
/// Blank lines are skipped; frames must be ordered by timestamp.
pub fn load_frames(path: &str) -> Result<Vec<PoseFrame>, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let mut frames = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let frame: PoseFrame = serde_json::from_str(line)
            .map_err(|e| format!("bad frame on line {}: {}", line_no + 1, e))?;
        frames.push(frame);
    }

    if frames.is_empty() {
        return Err(format!("no frames found in {}", path).into());
    }

    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with_arms(left: [Landmark; 3], right: [Landmark; 3]) -> PoseFrame {
        let filler = Landmark {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            visibility: 0.0,
        };
        let mut landmarks = vec![filler; LANDMARK_COUNT];
        landmarks[LEFT_SHOULDER] = left[0];
        landmarks[LEFT_ELBOW] = left[1];
        landmarks[LEFT_WRIST] = left[2];
        landmarks[RIGHT_SHOULDER] = right[0];
        landmarks[RIGHT_ELBOW] = right[1];
        landmarks[RIGHT_WRIST] = right[2];
        PoseFrame {
            timestamp_ms: 0,
            landmarks,
        }
    }

    fn lm(x: f64, y: f64) -> Landmark {
        Landmark {
            x,
            y,
            z: 0.0,
            visibility: 1.0,
        }
    }

    #[test]
    fn test_straight_arms_average_to_180() {
        let left = [lm(0.3, 0.2), lm(0.3, 0.4), lm(0.3, 0.6)];
        let right = [lm(0.7, 0.2), lm(0.7, 0.4), lm(0.7, 0.6)];
        let angles = frame_with_arms(left, right).elbow_angles().unwrap();
        assert!((angles.left - 180.0).abs() < 1e-6);
        assert!((angles.right - 180.0).abs() < 1e-6);
        assert!((angles.average() - 180.0).abs() < 1e-6);
    }

    #[test]
    fn test_bent_arm_average() {
        // Left elbow at a right angle, right arm straight -> average 135
        let left = [lm(0.3, 0.2), lm(0.3, 0.4), lm(0.5, 0.4)];
        let right = [lm(0.7, 0.2), lm(0.7, 0.4), lm(0.7, 0.6)];
        let angles = frame_with_arms(left, right).elbow_angles().unwrap();
        assert!((angles.left - 90.0).abs() < 1e-6);
        assert!((angles.average() - 135.0).abs() < 1e-6);
    }

    #[test]
    fn test_missing_landmarks_yield_none() {
        let frame = PoseFrame {
            timestamp_ms: 42,
            landmarks: Vec::new(),
        };
        assert!(frame.elbow_angles().is_none());

        // A truncated set (no wrists) is also treated as no detection
        let truncated = PoseFrame {
            timestamp_ms: 43,
            landmarks: vec![lm(0.5, 0.5); LEFT_WRIST],
        };
        assert!(truncated.elbow_angles().is_none());
    }

    #[test]
    fn test_frame_json_round_trip() {
        let left = [lm(0.3, 0.2), lm(0.3, 0.4), lm(0.3, 0.6)];
        let right = [lm(0.7, 0.2), lm(0.7, 0.4), lm(0.7, 0.6)];
        let frame = frame_with_arms(left, right);
        let json = serde_json::to_string(&frame).unwrap();
        let parsed: PoseFrame = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.timestamp_ms, frame.timestamp_ms);
        assert_eq!(parsed.landmarks.len(), LANDMARK_COUNT);
    }
}
