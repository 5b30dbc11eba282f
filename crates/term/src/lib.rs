//! Terminal host module.
//!
//! Binds the engine to a real terminal through crossterm: raw mode and the
//! alternate screen stand in for a dedicated console buffer, mouse capture and
//! focus reporting feed the input queue, and the surface is blitted as a diff
//! of changed cell runs.
//!
//! Goals:
//! - Keep the engine core platform-agnostic and testable
//! - Present one full surface per frame with as little terminal traffic as possible
//! - Leave the terminal exactly as it was found, on every exit path

pub mod host;
pub mod renderer;

pub use wide_console_core as core;
pub use wide_console_engine as engine;
pub use wide_console_input as input;
pub use wide_console_types as types;

pub use host::TerminalHost;
pub use renderer::{encode_diff_into, encode_full_into, glyph_char, palette, TerminalRenderer};
