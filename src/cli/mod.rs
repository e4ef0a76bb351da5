//! CLI Interface: User input and terminal rendering
//!
//! # Components
//! - `input.rs`: Keystroke capture and session setup prompts
//! - `display.rs`: Terminal rendering and HUD

pub mod display;
pub mod input;

// pub use display::Display;
// pub use input::InputHandler;
