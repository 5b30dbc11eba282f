//! Key level reconstruction for terminal environments.
//!
//! Terminals report key *events*, while the engine samples key *levels*. The
//! tracker folds press/repeat/release events into a 256-entry level table.
//! Terminals that do not emit release events (no keyboard enhancement) get a
//! release timeout instead, so a tap does not stay "held" forever.

use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{key_index, modifier_levels};
use crate::types::{DEFAULT_KEY_RELEASE_TIMEOUT_MS, KEY_COUNT};

#[derive(Debug, Clone)]
pub struct KeyTracker {
    levels: [bool; KEY_COUNT],
    last_seen: [Option<Instant>; KEY_COUNT],
    // Levels that fall back to up only through the timeout.
    timed: [bool; KEY_COUNT],
    release_timeout: Duration,
    reports_release: bool,
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::with_release_timeout_ms(DEFAULT_KEY_RELEASE_TIMEOUT_MS)
    }

    pub fn with_release_timeout_ms(timeout_ms: u32) -> Self {
        Self {
            levels: [false; KEY_COUNT],
            last_seen: [None; KEY_COUNT],
            timed: [false; KEY_COUNT],
            release_timeout: Duration::from_millis(u64::from(timeout_ms)),
            reports_release: false,
        }
    }

    /// Whether the terminal delivers `KeyEventKind::Release`.
    pub fn set_reports_release(&mut self, reports_release: bool) {
        self.reports_release = reports_release;
    }

    pub fn reports_release(&self) -> bool {
        self.reports_release
    }

    pub fn release_timeout(&self) -> Duration {
        self.release_timeout
    }

    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) {
        // Modifier flags ride along on every key event but their own releases
        // are rarely reported, so they always use the timeout.
        for (index, down) in modifier_levels(key.modifiers) {
            if down {
                self.set_down(index, now, true);
            }
        }

        let Some(index) = key_index(key.code) else {
            return;
        };

        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.set_down(index, now, !self.reports_release);
            }
            KeyEventKind::Release => {
                self.levels[index as usize] = false;
                self.last_seen[index as usize] = Some(now);
            }
        }
    }

    fn set_down(&mut self, index: u8, now: Instant, timed: bool) {
        let i = index as usize;
        self.levels[i] = true;
        self.last_seen[i] = Some(now);
        self.timed[i] = timed;
    }

    /// Drop timed-out levels back to up.
    pub fn expire(&mut self, now: Instant) {
        for i in 0..KEY_COUNT {
            if !self.levels[i] || !self.timed[i] {
                continue;
            }
            let stale = self.last_seen[i]
                .map(|t| now.saturating_duration_since(t) > self.release_timeout)
                .unwrap_or(true);
            if stale {
                self.levels[i] = false;
            }
        }
    }

    /// Release every key, e.g. when focus is lost and releases would go unseen.
    pub fn release_all(&mut self) {
        self.levels = [false; KEY_COUNT];
    }

    pub fn levels(&self) -> &[bool; KEY_COUNT] {
        &self.levels
    }

    pub fn is_down(&self, index: u8) -> bool {
        self.levels[index as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::vk;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn press_without_release_support_times_out() {
        let t0 = Instant::now();
        let mut tracker = KeyTracker::with_release_timeout_ms(100);
        tracker.handle_key_event(key(KeyCode::Char('w'), KeyEventKind::Press), t0);
        assert!(tracker.is_down(vk::KEY_A + (b'w' - b'a')));

        tracker.expire(t0 + Duration::from_millis(50));
        assert!(tracker.is_down(vk::KEY_A + (b'w' - b'a')));

        tracker.expire(t0 + Duration::from_millis(101));
        assert!(!tracker.is_down(vk::KEY_A + (b'w' - b'a')));
    }

    #[test]
    fn repeat_refreshes_timeout() {
        let t0 = Instant::now();
        let mut tracker = KeyTracker::with_release_timeout_ms(100);
        tracker.handle_key_event(key(KeyCode::Left, KeyEventKind::Press), t0);
        tracker.handle_key_event(
            key(KeyCode::Left, KeyEventKind::Repeat),
            t0 + Duration::from_millis(90),
        );
        tracker.expire(t0 + Duration::from_millis(150));
        assert!(tracker.is_down(vk::LEFT));
    }

    #[test]
    fn release_events_are_honoured_when_reported() {
        let t0 = Instant::now();
        let mut tracker = KeyTracker::with_release_timeout_ms(100);
        tracker.set_reports_release(true);

        tracker.handle_key_event(key(KeyCode::Esc, KeyEventKind::Press), t0);
        tracker.expire(t0 + Duration::from_secs(5));
        assert!(tracker.is_down(vk::ESCAPE), "no timeout when releases are reported");

        tracker.handle_key_event(
            key(KeyCode::Esc, KeyEventKind::Release),
            t0 + Duration::from_secs(5),
        );
        assert!(!tracker.is_down(vk::ESCAPE));
    }

    #[test]
    fn modifier_flags_raise_modifier_keys() {
        let t0 = Instant::now();
        let mut tracker = KeyTracker::with_release_timeout_ms(100);
        tracker.set_reports_release(true);
        let mut ev = key(KeyCode::Char('c'), KeyEventKind::Press);
        ev.modifiers = KeyModifiers::CONTROL;
        tracker.handle_key_event(ev, t0);

        assert!(tracker.is_down(vk::CONTROL));
        assert!(!tracker.is_down(vk::SHIFT));

        tracker.expire(t0 + Duration::from_millis(200));
        assert!(!tracker.is_down(vk::CONTROL));
        assert!(tracker.is_down(vk::KEY_A + 2));
    }

    #[test]
    fn release_all_clears_levels() {
        let mut tracker = KeyTracker::new();
        tracker.handle_key_event(key(KeyCode::Up, KeyEventKind::Press), Instant::now());
        tracker.release_all();
        assert!(tracker.levels().iter().all(|l| !l));
    }
}
