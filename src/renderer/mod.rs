//! Rendering interface
//!
//! The core never draws. It produces a flat list of sprite instances that a
//! GPU or software renderer can upload as-is.

pub mod instance;
pub mod sprites;

pub use instance::{Sheet, SpriteInstance};
pub use sprites::build_sprites;
