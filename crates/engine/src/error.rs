//! Error taxonomy and stop reasons.

use std::fmt;

/// Display/buffer configuration rejected by the host. Always fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("console size {width}x{height} is invalid")]
    InvalidSize { width: u16, height: u16 },

    #[error("screen width or height are too big")]
    TooLarge {
        width: u16,
        height: u16,
        max_width: u16,
        max_height: u16,
    },

    #[error("{operation}")]
    Host {
        operation: &'static str,
        diagnostic: String,
    },
}

impl SetupError {
    /// Human-readable detail printed under the error line.
    pub fn diagnostic(&self) -> String {
        match self {
            SetupError::InvalidSize { .. } => "width and height must be non-zero".to_string(),
            SetupError::TooLarge {
                width,
                height,
                max_width,
                max_height,
            } => format!(
                "requested {width}x{height}, max width: {max_width}, max height: {max_height}"
            ),
            SetupError::Host { diagnostic, .. } => diagnostic.clone(),
        }
    }
}

/// Failure while polling input from, or presenting to, the host.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("console i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("console setup failed: {0}")]
    Setup(#[from] SetupError),

    #[error("host failure: {0}")]
    Host(#[from] HostError),

    #[error("console has not been constructed")]
    NotConstructed,

    #[error("engine already stopped; restart is not supported")]
    AlreadyStopped,

    #[error("failed to spawn frame worker: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("frame worker panicked")]
    WorkerPanicked,
}

/// Why a run ended normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `on_create` returned `false`; the loop never ran.
    CreateFailed,
    /// `on_update` returned `false`.
    UpdateFailed,
    /// The active flag was cleared through a [`crate::ShutdownHandle`].
    ShutdownRequested,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StopReason::CreateFailed => "create failed",
            StopReason::UpdateFailed => "update returned false",
            StopReason::ShutdownRequested => "shutdown requested",
        };
        f.write_str(s)
    }
}
