//! Application systems
//!
//! Pieces of the binary kept out of main.rs for testability.

mod console_renderer;
mod frame_timer;

pub use console_renderer::ConsoleRenderer;
pub use frame_timer::{cap_delta, FrameTimer};
