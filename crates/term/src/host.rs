//! Terminal host: the [`Host`] binding for a real terminal via crossterm.

use std::fmt::Display;
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};
use tracing::{debug, info, warn};

use crate::core::{InputQueue, Surface};
use crate::engine::{EngineConfig, Host, HostError, SetupError};
use crate::input::{KeyTracker, MouseTranslator};
use crate::renderer::TerminalRenderer;
use crate::types::{InputEvent, INPUT_EVENT_CAPACITY, KEY_COUNT};

/// Most queue entries a single terminal event produces (mouse move + buttons,
/// focus loss + buttons).
const MAX_EVENTS_PER_READ: usize = 2;

fn setup_failure(operation: &'static str, err: impl Display) -> SetupError {
    SetupError::Host {
        operation,
        diagnostic: err.to_string(),
    }
}

pub struct TerminalHost {
    renderer: TerminalRenderer,
    keys: KeyTracker,
    mouse: MouseTranslator,
    entered: bool,
    keyboard_enhanced: bool,
    title: String,
}

impl Default for TerminalHost {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalHost {
    pub fn new() -> Self {
        Self::with_key_tracker(KeyTracker::new())
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::with_key_tracker(KeyTracker::with_release_timeout_ms(
            config.key_release_timeout_ms,
        ))
    }

    fn with_key_tracker(keys: KeyTracker) -> Self {
        Self {
            renderer: TerminalRenderer::new(),
            keys,
            mouse: MouseTranslator::new(),
            entered: false,
            keyboard_enhanced: false,
            title: String::new(),
        }
    }

    /// Whether the terminal reports key releases (keyboard enhancement active).
    pub fn reports_key_release(&self) -> bool {
        self.keyboard_enhanced
    }

    fn enable_input(&mut self) -> Result<(), SetupError> {
        execute!(io::stdout(), EnableMouseCapture, EnableFocusChange)
            .map_err(|e| setup_failure("enable mouse and focus reporting", e))?;

        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .map_err(|e| setup_failure("enable key release reporting", e))?;
            self.keyboard_enhanced = true;
        }
        self.keys.set_reports_release(self.keyboard_enhanced);
        Ok(())
    }

    /// Read pending terminal events into `queue`, at most
    /// [`INPUT_EVENT_CAPACITY`] per frame.
    ///
    /// One terminal event can queue up to [`MAX_EVENTS_PER_READ`] entries, so
    /// reading stops while fewer slots are free and the rest stays buffered in
    /// the terminal for the next frame. Nothing the host queues is ever dropped.
    fn drain_events(
        &mut self,
        queue: &mut InputQueue,
        now: Instant,
        mut next: impl FnMut() -> io::Result<Option<Event>>,
    ) -> io::Result<usize> {
        let mut reads = 0;
        while reads < INPUT_EVENT_CAPACITY && queue.remaining_capacity() >= MAX_EVENTS_PER_READ {
            let Some(ev) = next()? else {
                break;
            };
            reads += 1;
            self.handle_event(ev, now, queue);
        }
        Ok(reads)
    }

    fn handle_event(&mut self, ev: Event, now: Instant, queue: &mut InputQueue) {
        match ev {
            Event::Key(key) => self.keys.handle_key_event(key, now),
            Event::Mouse(mouse) => {
                for e in self.mouse.translate(mouse) {
                    queue.push(e);
                }
            }
            Event::FocusGained => {
                queue.push(InputEvent::Focus(true));
            }
            Event::FocusLost => {
                // Releases that happen while unfocused are never reported.
                self.keys.release_all();
                self.mouse.reset();
                queue.push(InputEvent::Focus(false));
                queue.push(InputEvent::MouseButtons(0));
            }
            Event::Resize(w, h) => {
                debug!(w, h, "terminal resized; forcing full redraw");
                self.renderer.invalidate();
            }
            Event::Paste(_) => {}
        }
    }
}

impl Host for TerminalHost {
    fn initialize(&mut self, width: u16, height: u16) -> Result<(), SetupError> {
        let (max_width, max_height) =
            terminal::size().map_err(|e| setup_failure("query terminal size", e))?;
        if width > max_width || height > max_height {
            return Err(SetupError::TooLarge {
                width,
                height,
                max_width,
                max_height,
            });
        }

        self.renderer
            .enter()
            .map_err(|e| setup_failure("enter alternate screen", e))?;
        self.entered = true;
        self.enable_input()?;

        info!(
            width,
            height,
            key_release = self.keyboard_enhanced,
            "terminal console ready"
        );
        Ok(())
    }

    fn present(&mut self, surface: &Surface) -> Result<(), HostError> {
        self.renderer.draw(surface)?;
        Ok(())
    }

    fn poll_input(&mut self, queue: &mut InputQueue) -> Result<(), HostError> {
        let now = Instant::now();
        self.drain_events(queue, now, || {
            if event::poll(Duration::ZERO)? {
                event::read().map(Some)
            } else {
                Ok(None)
            }
        })?;
        self.keys.expire(now);
        Ok(())
    }

    fn key_levels(&mut self, levels: &mut [bool; KEY_COUNT]) {
        levels.copy_from_slice(self.keys.levels());
    }

    fn set_title(&mut self, title: &str) {
        if self.title == title {
            return;
        }
        if let Err(err) = self.renderer.set_title(title) {
            warn!(error = %err, "failed to set terminal title");
        }
        self.title.clear();
        self.title.push_str(title);
    }

    fn restore_original(&mut self) {
        if !self.entered {
            return;
        }
        self.entered = false;

        let mut out = io::stdout();
        if self.keyboard_enhanced {
            if let Err(err) = execute!(out, PopKeyboardEnhancementFlags) {
                warn!(error = %err, "failed to pop keyboard enhancement flags");
            }
            self.keyboard_enhanced = false;
        }
        if let Err(err) = execute!(out, DisableFocusChange, DisableMouseCapture) {
            warn!(error = %err, "failed to disable mouse and focus reporting");
        }
        if let Err(err) = self.renderer.exit() {
            warn!(error = %err, "failed to restore terminal");
        }
        info!("terminal restored");
    }
}

impl Drop for TerminalHost {
    fn drop(&mut self) {
        self.restore_original();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use crossterm::event::{
        KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton as TermButton, MouseEvent,
        MouseEventKind,
    };

    use crate::core::InputSampler;
    use crate::types::{vk, MouseButton};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn press(c: char) -> Event {
        Event::Key(KeyEvent::new_with_kind(
            KeyCode::Char(c),
            KeyModifiers::NONE,
            KeyEventKind::Press,
        ))
    }

    /// One frame of reads from events the terminal has buffered.
    fn read_frame(
        host: &mut TerminalHost,
        pending: &mut VecDeque<Event>,
        queue: &mut InputQueue,
        now: Instant,
    ) -> usize {
        queue.clear();
        host.drain_events(queue, now, || Ok(pending.pop_front())).unwrap()
    }

    #[test]
    fn button_release_after_burst_is_delivered_next_frame() {
        let mut host = TerminalHost::new();
        let mut input = InputSampler::default();
        let mut queue = InputQueue::new();
        let mut pending = VecDeque::new();
        let now = Instant::now();

        pending.push_back(mouse(MouseEventKind::Down(TermButton::Left), 0, 0));
        read_frame(&mut host, &mut pending, &mut queue, now);
        input.sample_queue(host.keys.levels(), &queue);
        assert!(input.button(MouseButton::Left).pressed);

        for x in 1..=31 {
            pending.push_back(mouse(MouseEventKind::Moved, x, 0));
        }
        pending.push_back(mouse(MouseEventKind::Up(TermButton::Left), 31, 0));
        assert_eq!(read_frame(&mut host, &mut pending, &mut queue, now), 31);
        assert_eq!(queue.dropped(), 0);
        assert_eq!(pending.len(), 1);
        input.sample_queue(host.keys.levels(), &queue);
        assert!(input.button(MouseButton::Left).held);

        read_frame(&mut host, &mut pending, &mut queue, now);
        assert_eq!(queue.dropped(), 0);
        input.sample_queue(host.keys.levels(), &queue);
        assert!(input.button(MouseButton::Left).released);

        for x in 0..8 {
            pending.push_back(mouse(MouseEventKind::Moved, x, 1));
            read_frame(&mut host, &mut pending, &mut queue, now);
            input.sample_queue(host.keys.levels(), &queue);
            assert!(!input.button(MouseButton::Left).held);
        }
        assert_eq!(host.mouse.mask(), 0);
        assert_eq!(input.mouse_position(), (7, 1));
    }

    #[test]
    fn focus_loss_releases_keys_and_buttons() {
        let mut host = TerminalHost::new();
        let mut queue = InputQueue::new();
        let now = Instant::now();
        let mut pending = VecDeque::from([
            press('a'),
            mouse(MouseEventKind::Down(TermButton::Right), 2, 3),
        ]);

        read_frame(&mut host, &mut pending, &mut queue, now);
        assert!(host.keys.is_down(vk::KEY_A));
        assert_eq!(host.mouse.mask(), MouseButton::Right.mask());

        pending.push_back(Event::FocusLost);
        read_frame(&mut host, &mut pending, &mut queue, now);
        assert!(host.keys.levels().iter().all(|down| !down));
        assert_eq!(host.mouse.mask(), 0);
        assert_eq!(
            queue.as_slice(),
            &[InputEvent::Focus(false), InputEvent::MouseButtons(0)]
        );

        pending.push_back(Event::FocusGained);
        read_frame(&mut host, &mut pending, &mut queue, now);
        assert_eq!(queue.as_slice(), &[InputEvent::Focus(true)]);
    }

    #[test]
    fn reads_stop_at_event_capacity() {
        let mut host = TerminalHost::new();
        let mut queue = InputQueue::new();
        let mut pending: VecDeque<Event> = (0..40).map(|_| press('x')).collect();

        let reads = read_frame(&mut host, &mut pending, &mut queue, Instant::now());
        assert_eq!(reads, INPUT_EVENT_CAPACITY);
        assert_eq!(pending.len(), 8);
    }

    #[test]
    fn read_errors_are_reported() {
        let mut host = TerminalHost::new();
        let mut queue = InputQueue::new();
        let err = host
            .drain_events(&mut queue, Instant::now(), || Err(io::Error::other("tty gone")))
            .unwrap_err();
        assert_eq!(err.to_string(), "tty gone");
    }

    #[test]
    fn resize_forces_full_redraw() {
        let mut host = TerminalHost::new();
        let mut queue = InputQueue::new();
        assert!(host.renderer.needs_full_redraw());

        host.renderer.encode_frame(&Surface::new(4, 2)).unwrap();
        assert!(!host.renderer.needs_full_redraw());

        let mut pending = VecDeque::from([Event::Resize(120, 50)]);
        read_frame(&mut host, &mut pending, &mut queue, Instant::now());
        assert!(host.renderer.needs_full_redraw());
        assert!(queue.is_empty());
    }
}
