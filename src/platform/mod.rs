//! Platform abstraction layer
//!
//! Handles the window side of the loop:
//! - Time/ticks
//! - Input events

pub mod input;
pub mod time;

pub use input::{InputEvent, InputState, Key};
pub use time::FixedTimestep;
