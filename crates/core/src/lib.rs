//! Core engine state - surface, input sampling and frame timing
//!
//! Everything in this crate is platform-agnostic and owned by the frame
//! worker thread. Hosts feed it raw key levels and input events; game code
//! draws into the [`Surface`] through the [`Canvas`] capability.
//!
//! # Module Structure
//!
//! - [`surface`]: fixed-size glyph/attribute grid with bounds-checked writes
//! - [`input`]: press/hold/release edge detection for 256 keys and 5 mouse buttons
//! - [`queue`]: bounded (32 events) per-frame input queue
//! - [`clock`]: elapsed time between frames
//!
//! # Example
//!
//! ```
//! use wide_console_core::{Canvas, InputQueue, InputSampler, Surface};
//! use wide_console_types::{colour, vk, InputEvent, KEY_COUNT};
//!
//! let mut surface = Surface::new(80, 40);
//! surface.write(10, 10, 'A' as u16, colour::FG_WHITE);
//! surface.write(-1, 5, 'B' as u16, 0); // ignored
//! assert_eq!(surface.get(10, 10).map(|c| c.glyph), Some('A' as u16));
//!
//! let mut levels = [false; KEY_COUNT];
//! levels[vk::ESCAPE as usize] = true;
//!
//! let mut queue = InputQueue::new();
//! queue.push(InputEvent::MouseMoved { x: 3, y: 4 });
//!
//! let mut input = InputSampler::default();
//! input.sample_queue(&levels, &queue);
//! assert!(input.key(vk::ESCAPE).pressed);
//! assert_eq!(input.mouse_position(), (3, 4));
//! ```

pub mod clock;
pub mod input;
pub mod queue;
pub mod surface;

pub use wide_console_types as types;

pub use clock::{frame_rate, FrameClock};
pub use input::{InputSampler, KeyState, PressPolicy};
pub use queue::InputQueue;
pub use surface::{Canvas, Cell, Surface};
