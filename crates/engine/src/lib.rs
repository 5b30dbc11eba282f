//! Frame driver and host abstraction
//!
//! This crate turns the platform-agnostic pieces in `wide-console-core` into a
//! running engine:
//!
//! - [`Host`]: the platform binding (console setup, input polling, blit, title, restore)
//! - [`Game`]: the two user callbacks, `on_create` and `on_update`
//! - [`Engine`]: constructs the console and runs the frame loop on one worker thread
//! - [`HeadlessHost`]: a host with scripted input, for tests and automated runs
//!
//! # Lifecycle
//!
//! ```text
//! construct_console ──► Created ──on_create()──► Running ──on_update() == false──► Stopped
//!         │                 └── on_create() == false ───────────────────────────►┘
//!         └── SetupError (display restored, loop never entered)
//! ```
//!
//! Callback failures are normal stops, reported as a [`StopReason`]. Setup and
//! host I/O failures are [`EngineError`]s. The display is restored on every path.
//!
//! # Known limitations
//!
//! - There is no timeout: an `on_update` that never returns blocks the engine.
//! - At most 32 input events are read per frame; bursts beyond that are dropped.

pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod game;
pub mod headless;
pub mod host;

pub use wide_console_core as core;
pub use wide_console_types as types;

pub use config::EngineConfig;
pub use driver::{format_title, EngineState};
pub use engine::{Engine, ShutdownHandle};
pub use error::{EngineError, HostError, SetupError, StopReason};
pub use game::{Context, Game};
pub use headless::{HeadlessHost, ScriptedFrame};
pub use host::Host;
