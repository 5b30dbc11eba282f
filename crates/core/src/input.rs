//! Per-frame input sampling.
//!
//! The host reports raw key *levels* (down/up) and a small queue of mouse and
//! focus events. Each frame the sampler diffs those levels against the previous
//! frame and derives one-frame `pressed` / `released` edges plus the `held`
//! level for 256 keys and 5 mouse buttons.

use tracing::debug;

use crate::types::{InputEvent, MouseButton, INPUT_EVENT_CAPACITY, KEY_COUNT, MOUSE_BUTTON_COUNT};

/// Edge/level state of one key or mouse button.
///
/// `pressed` and `released` are only true for the frame the transition was
/// sampled in, and never both at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyState {
    pub pressed: bool,
    pub released: bool,
    pub held: bool,
}

/// How `pressed` is derived on a down transition.
///
/// The default is [`PressPolicy::Edge`]. Engines pick the policy up from
/// `EngineConfig::press_policy` (`WCE_PRESS_POLICY=edge|carry-held`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PressPolicy {
    /// `pressed = !held` before the transition: every fresh down edge reports
    /// `pressed` for exactly one frame.
    #[default]
    Edge,
    /// Legacy rule `pressed = held` before the transition.
    ///
    /// Because `held` mirrors the previous level, this never reports `pressed`
    /// on a genuine down edge. Kept selectable for parity with older builds.
    CarryHeld,
}

impl PressPolicy {
    /// Parse `edge` / `carry-held` (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "edge" => Some(Self::Edge),
            "carry-held" | "carry_held" | "carryheld" => Some(Self::CarryHeld),
            _ => None,
        }
    }
}

#[inline]
fn step(state: &mut KeyState, previous: &mut bool, level: bool, policy: PressPolicy) {
    state.pressed = false;
    state.released = false;

    if level != *previous {
        if level {
            state.pressed = match policy {
                PressPolicy::Edge => !state.held,
                PressPolicy::CarryHeld => state.held,
            };
            state.held = true;
        } else {
            state.released = true;
            state.held = false;
        }
    }

    *previous = level;
}

/// Keyboard, mouse and focus state, refreshed once per frame.
#[derive(Debug, Clone)]
pub struct InputSampler {
    keys: [KeyState; KEY_COUNT],
    key_levels: [bool; KEY_COUNT],
    buttons: [KeyState; MOUSE_BUTTON_COUNT],
    button_levels: [bool; MOUSE_BUTTON_COUNT],
    button_mask: u8,
    mouse_x: i32,
    mouse_y: i32,
    focused: bool,
    policy: PressPolicy,
    dropped_last_frame: usize,
}

impl Default for InputSampler {
    fn default() -> Self {
        Self::new(PressPolicy::default())
    }
}

impl InputSampler {
    pub fn new(policy: PressPolicy) -> Self {
        Self {
            keys: [KeyState::default(); KEY_COUNT],
            key_levels: [false; KEY_COUNT],
            buttons: [KeyState::default(); MOUSE_BUTTON_COUNT],
            button_levels: [false; MOUSE_BUTTON_COUNT],
            button_mask: 0,
            mouse_x: 0,
            mouse_y: 0,
            focused: true,
            policy,
            dropped_last_frame: 0,
        }
    }

    pub fn policy(&self) -> PressPolicy {
        self.policy
    }

    /// Advance one frame.
    ///
    /// Only the first [`INPUT_EVENT_CAPACITY`] entries of `events` are
    /// processed; the remainder is dropped for this frame. Returns the number
    /// of events processed.
    pub fn sample(&mut self, key_levels: &[bool; KEY_COUNT], events: &[InputEvent]) -> usize {
        let policy = self.policy;
        for ((state, previous), &level) in self
            .keys
            .iter_mut()
            .zip(self.key_levels.iter_mut())
            .zip(key_levels.iter())
        {
            step(state, previous, level, policy);
        }

        let processed = events.len().min(INPUT_EVENT_CAPACITY);
        for event in &events[..processed] {
            match *event {
                InputEvent::MouseMoved { x, y } => {
                    self.mouse_x = x;
                    self.mouse_y = y;
                }
                InputEvent::MouseButtons(mask) => self.button_mask = mask,
                InputEvent::Focus(focused) => self.focused = focused,
            }
        }

        for button in MouseButton::ALL {
            let i = button.index();
            let level = self.button_mask & button.mask() != 0;
            step(&mut self.buttons[i], &mut self.button_levels[i], level, policy);
        }

        self.dropped_last_frame = events.len() - processed;
        if self.dropped_last_frame > 0 {
            debug!(
                dropped = self.dropped_last_frame,
                capacity = INPUT_EVENT_CAPACITY,
                "input events dropped this frame"
            );
        }
        processed
    }

    /// [`sample`](Self::sample) over a host-filled queue, counting the queue's
    /// own overflow as dropped too.
    pub fn sample_queue(
        &mut self,
        key_levels: &[bool; KEY_COUNT],
        queue: &crate::queue::InputQueue,
    ) -> usize {
        let processed = self.sample(key_levels, queue.as_slice());
        if queue.dropped() > 0 {
            self.dropped_last_frame += queue.dropped();
            debug!(dropped = queue.dropped(), "input queue overflowed");
        }
        processed
    }

    pub fn key(&self, key: u8) -> KeyState {
        self.keys[key as usize]
    }

    pub fn keys(&self) -> &[KeyState; KEY_COUNT] {
        &self.keys
    }

    pub fn button(&self, button: MouseButton) -> KeyState {
        self.buttons[button.index()]
    }

    pub fn mouse_x(&self) -> i32 {
        self.mouse_x
    }

    pub fn mouse_y(&self) -> i32 {
        self.mouse_y
    }

    pub fn mouse_position(&self) -> (i32, i32) {
        (self.mouse_x, self.mouse_y)
    }

    pub fn has_focus(&self) -> bool {
        self.focused
    }

    /// Events discarded during the most recent frame.
    pub fn dropped_last_frame(&self) -> usize {
        self.dropped_last_frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::vk;

    fn levels_with(down: &[u8]) -> [bool; KEY_COUNT] {
        let mut levels = [false; KEY_COUNT];
        for &k in down {
            levels[k as usize] = true;
        }
        levels
    }

    #[test]
    fn untouched_keys_stay_idle() {
        let mut s = InputSampler::default();
        let idle = [false; KEY_COUNT];
        for _ in 0..10 {
            s.sample(&idle, &[]);
        }
        assert!(s.keys().iter().all(|k| *k == KeyState::default()));
        for b in MouseButton::ALL {
            assert_eq!(s.button(b), KeyState::default());
        }
    }

    #[test]
    fn default_policy_is_edge() {
        assert_eq!(PressPolicy::default(), PressPolicy::Edge);
        assert_eq!(InputSampler::default().policy(), PressPolicy::Edge);
    }

    #[test]
    fn press_then_release_yields_single_edges() {
        let mut s = InputSampler::default();
        s.sample(&levels_with(&[vk::SPACE]), &[]);
        assert_eq!(
            s.key(vk::SPACE),
            KeyState {
                pressed: true,
                released: false,
                held: true
            }
        );

        s.sample(&levels_with(&[]), &[]);
        assert_eq!(
            s.key(vk::SPACE),
            KeyState {
                pressed: false,
                released: true,
                held: false
            }
        );

        s.sample(&levels_with(&[]), &[]);
        assert_eq!(s.key(vk::SPACE), KeyState::default());
    }

    #[test]
    fn holding_reports_pressed_only_on_first_frame() {
        let mut s = InputSampler::default();
        let down = levels_with(&[vk::KEY_A]);
        for frame in 0..6 {
            s.sample(&down, &[]);
            let k = s.key(vk::KEY_A);
            assert_eq!(k.pressed, frame == 0, "frame {frame}");
            assert!(k.held);
            assert!(!k.released);
        }
    }

    #[test]
    fn carry_held_policy_never_reports_fresh_press() {
        let mut s = InputSampler::new(PressPolicy::CarryHeld);
        s.sample(&levels_with(&[vk::LEFT]), &[]);
        let k = s.key(vk::LEFT);
        assert!(!k.pressed);
        assert!(k.held);

        s.sample(&levels_with(&[]), &[]);
        assert!(s.key(vk::LEFT).released);
    }

    #[test]
    fn mouse_buttons_follow_last_mask_in_frame() {
        let mut s = InputSampler::default();
        let idle = [false; KEY_COUNT];
        s.sample(
            &idle,
            &[
                InputEvent::MouseMoved { x: 4, y: 7 },
                InputEvent::MouseButtons(MouseButton::Left.mask()),
            ],
        );
        assert_eq!(s.mouse_position(), (4, 7));
        assert!(s.button(MouseButton::Left).pressed);
        assert!(!s.button(MouseButton::Right).held);

        s.sample(&idle, &[InputEvent::MouseButtons(0)]);
        let left = s.button(MouseButton::Left);
        assert!(left.released);
        assert!(!left.held);
    }

    #[test]
    fn focus_events_update_focus() {
        let mut s = InputSampler::default();
        assert!(s.has_focus());
        s.sample(&[false; KEY_COUNT], &[InputEvent::Focus(false)]);
        assert!(!s.has_focus());
    }

    #[test]
    fn only_capacity_events_processed() {
        let mut s = InputSampler::default();
        let events: Vec<InputEvent> = (0..40)
            .map(|i| InputEvent::MouseMoved { x: i, y: i })
            .collect();
        let processed = s.sample(&[false; KEY_COUNT], &events);
        assert_eq!(processed, 32);
        assert_eq!(s.mouse_position(), (31, 31));
        assert_eq!(s.dropped_last_frame(), 8);
    }

    #[test]
    fn policy_parses_from_config_strings() {
        assert_eq!(PressPolicy::from_str("Edge"), Some(PressPolicy::Edge));
        assert_eq!(PressPolicy::from_str("carry-held"), Some(PressPolicy::CarryHeld));
        assert_eq!(PressPolicy::from_str("sometimes"), None);
    }
}
