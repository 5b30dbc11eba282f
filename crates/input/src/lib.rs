//! Terminal input module (host-facing).
//!
//! Maps `crossterm` key and mouse events onto the engine's input model:
//! virtual-key indices with reconstructed levels, and [`types::InputEvent`]s
//! for mouse movement, button masks and focus.

pub mod map;
pub mod tracker;

pub use wide_console_types as types;

pub use map::{key_index, modifier_levels, MouseTranslator};
pub use tracker::KeyTracker;
