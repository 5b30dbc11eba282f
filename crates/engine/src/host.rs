//! Host binding: the platform layer the frame driver talks to.

use crate::core::{InputQueue, Surface};
use crate::error::{HostError, SetupError};
use crate::types::KEY_COUNT;

/// Console allocation, input polling and presentation.
///
/// Every call is synchronous and made from the frame worker thread only. A
/// host that blocks (a hung console driver) blocks the frame loop with it.
pub trait Host: Send {
    /// Configure a fixed-size character display of `width` x `height` cells.
    fn initialize(&mut self, width: u16, height: u16) -> Result<(), SetupError>;

    /// Blit the whole surface to the display.
    fn present(&mut self, surface: &Surface) -> Result<(), HostError>;

    /// Read pending mouse/focus events into `queue`, at most its capacity.
    fn poll_input(&mut self, queue: &mut InputQueue) -> Result<(), HostError>;

    /// Write the current down/up level of every virtual key into `levels`.
    fn key_levels(&mut self, levels: &mut [bool; KEY_COUNT]);

    /// Cosmetic; called once per frame with the frame rate.
    fn set_title(&mut self, title: &str);

    /// Put the display back the way it was before `initialize`.
    fn restore_original(&mut self);
}

impl<H: Host + ?Sized> Host for Box<H> {
    fn initialize(&mut self, width: u16, height: u16) -> Result<(), SetupError> {
        (**self).initialize(width, height)
    }

    fn present(&mut self, surface: &Surface) -> Result<(), HostError> {
        (**self).present(surface)
    }

    fn poll_input(&mut self, queue: &mut InputQueue) -> Result<(), HostError> {
        (**self).poll_input(queue)
    }

    fn key_levels(&mut self, levels: &mut [bool; KEY_COUNT]) {
        (**self).key_levels(levels)
    }

    fn set_title(&mut self, title: &str) {
        (**self).set_title(title)
    }

    fn restore_original(&mut self) {
        (**self).restore_original()
    }
}
