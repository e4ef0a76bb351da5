//! Pose Geometry: Joint angles and landmark frames
//!
//! # Components
//! - `angle.rs`: included-angle computation at a joint vertex
//! - `landmarks.rs`: per-frame landmark sets and elbow angle extraction

pub mod angle;
pub mod landmarks;

// pub use angle::{joint_angle, Point2};
// pub use landmarks::{ElbowAngles, PoseFrame};
