//! Mapping from terminal events to virtual-key indices and input events.

use arrayvec::ArrayVec;
use crossterm::event::{
    KeyCode, KeyModifiers, ModifierKeyCode, MouseButton as TermButton, MouseEvent,
    MouseEventKind,
};

use crate::types::{vk, InputEvent, MouseButton};

/// Map a terminal key code to its virtual-key index.
///
/// Letters map case-insensitively; shifted digits and punctuation map to the
/// key that produces them on a US layout.
pub fn key_index(code: KeyCode) -> Option<u8> {
    let index = match code {
        KeyCode::Char(c) => return char_key_index(c),
        KeyCode::Backspace => vk::BACK,
        KeyCode::Tab | KeyCode::BackTab => vk::TAB,
        KeyCode::Enter => vk::RETURN,
        KeyCode::Esc => vk::ESCAPE,
        KeyCode::PageUp => vk::PRIOR,
        KeyCode::PageDown => vk::NEXT,
        KeyCode::End => vk::END,
        KeyCode::Home => vk::HOME,
        KeyCode::Left => vk::LEFT,
        KeyCode::Up => vk::UP,
        KeyCode::Right => vk::RIGHT,
        KeyCode::Down => vk::DOWN,
        KeyCode::Insert => vk::INSERT,
        KeyCode::Delete => vk::DELETE,
        KeyCode::F(n @ 1..=24) => vk::F1 + (n - 1),
        KeyCode::CapsLock => vk::CAPITAL,
        KeyCode::ScrollLock => vk::SCROLL,
        KeyCode::NumLock => vk::NUMLOCK,
        KeyCode::Pause => vk::PAUSE,
        KeyCode::Modifier(m) => match m {
            ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => vk::SHIFT,
            ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => vk::CONTROL,
            ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => vk::MENU,
            _ => return None,
        },
        _ => return None,
    };
    Some(index)
}

fn char_key_index(c: char) -> Option<u8> {
    let index = match c {
        'a'..='z' => vk::KEY_A + (c as u8 - b'a'),
        'A'..='Z' => vk::KEY_A + (c as u8 - b'A'),
        '0'..='9' => vk::KEY_0 + (c as u8 - b'0'),
        ')' => vk::KEY_0,
        '!' => vk::KEY_0 + 1,
        '@' => vk::KEY_0 + 2,
        '#' => vk::KEY_0 + 3,
        '$' => vk::KEY_0 + 4,
        '%' => vk::KEY_0 + 5,
        '^' => vk::KEY_0 + 6,
        '&' => vk::KEY_0 + 7,
        '*' => vk::KEY_0 + 8,
        '(' => vk::KEY_0 + 9,
        ' ' => vk::SPACE,
        ';' | ':' => vk::OEM_1,
        '=' | '+' => vk::OEM_PLUS,
        ',' | '<' => vk::OEM_COMMA,
        '-' | '_' => vk::OEM_MINUS,
        '.' | '>' => vk::OEM_PERIOD,
        '/' | '?' => vk::OEM_2,
        '`' | '~' => vk::OEM_3,
        '[' | '{' => vk::OEM_4,
        '\\' | '|' => vk::OEM_5,
        ']' | '}' => vk::OEM_6,
        '\'' | '"' => vk::OEM_7,
        _ => return None,
    };
    Some(index)
}

/// Modifier key levels implied by an event's modifier flags.
pub fn modifier_levels(modifiers: KeyModifiers) -> [(u8, bool); 3] {
    [
        (vk::SHIFT, modifiers.contains(KeyModifiers::SHIFT)),
        (vk::CONTROL, modifiers.contains(KeyModifiers::CONTROL)),
        (vk::MENU, modifiers.contains(KeyModifiers::ALT)),
    ]
}

fn button_mask(button: TermButton) -> u8 {
    match button {
        TermButton::Left => MouseButton::Left.mask(),
        TermButton::Right => MouseButton::Right.mask(),
        TermButton::Middle => MouseButton::Middle.mask(),
    }
}

/// Turns terminal mouse reports into [`InputEvent`]s.
///
/// Terminals report individual button transitions; the engine consumes the
/// whole button bitmask, so the translator keeps it between events.
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseTranslator {
    mask: u8,
}

impl MouseTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// Forget every pressed button (e.g. after focus loss).
    pub fn reset(&mut self) {
        self.mask = 0;
    }

    /// Events for one mouse report: always a move, plus a button mask when it changed.
    pub fn translate(&mut self, ev: MouseEvent) -> ArrayVec<InputEvent, 2> {
        let mut out = ArrayVec::new();
        out.push(InputEvent::MouseMoved {
            x: i32::from(ev.column),
            y: i32::from(ev.row),
        });

        let next = match ev.kind {
            MouseEventKind::Down(b) | MouseEventKind::Drag(b) => self.mask | button_mask(b),
            MouseEventKind::Up(b) => self.mask & !button_mask(b),
            _ => self.mask,
        };
        if next != self.mask {
            self.mask = next;
            out.push(InputEvent::MouseButtons(next));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_letter_keys_are_case_insensitive() {
        assert_eq!(key_index(KeyCode::Char('a')), Some(vk::KEY_A));
        assert_eq!(key_index(KeyCode::Char('A')), Some(vk::KEY_A));
        assert_eq!(key_index(KeyCode::Char('z')), Some(vk::KEY_A + 25));
    }

    #[test]
    fn test_digits_and_shifted_digits() {
        assert_eq!(key_index(KeyCode::Char('0')), Some(vk::KEY_0));
        assert_eq!(key_index(KeyCode::Char('7')), Some(vk::KEY_0 + 7));
        assert_eq!(key_index(KeyCode::Char('&')), Some(vk::KEY_0 + 7));
        assert_eq!(key_index(KeyCode::Char(')')), Some(vk::KEY_0));
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(key_index(KeyCode::Left), Some(vk::LEFT));
        assert_eq!(key_index(KeyCode::Up), Some(vk::UP));
        assert_eq!(key_index(KeyCode::Right), Some(vk::RIGHT));
        assert_eq!(key_index(KeyCode::Down), Some(vk::DOWN));
        assert_eq!(key_index(KeyCode::Esc), Some(vk::ESCAPE));
        assert_eq!(key_index(KeyCode::Enter), Some(vk::RETURN));
        assert_eq!(key_index(KeyCode::Char(' ')), Some(vk::SPACE));
    }

    #[test]
    fn test_function_keys() {
        assert_eq!(key_index(KeyCode::F(1)), Some(vk::F1));
        assert_eq!(key_index(KeyCode::F(12)), Some(vk::F1 + 11));
        assert_eq!(key_index(KeyCode::F(0)), None);
        assert_eq!(key_index(KeyCode::F(25)), None);
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(key_index(KeyCode::Char('é')), None);
        assert_eq!(key_index(KeyCode::Null), None);
    }

    #[test]
    fn test_modifier_levels() {
        let levels = modifier_levels(KeyModifiers::CONTROL | KeyModifiers::ALT);
        assert_eq!(levels, [(vk::SHIFT, false), (vk::CONTROL, true), (vk::MENU, true)]);
    }

    #[test]
    fn test_mouse_translator_tracks_mask() {
        let mut t = MouseTranslator::new();

        let evs = t.translate(mouse(MouseEventKind::Moved, 3, 4));
        assert_eq!(evs.as_slice(), &[InputEvent::MouseMoved { x: 3, y: 4 }]);

        let evs = t.translate(mouse(MouseEventKind::Down(TermButton::Left), 3, 4));
        assert_eq!(
            evs.as_slice(),
            &[
                InputEvent::MouseMoved { x: 3, y: 4 },
                InputEvent::MouseButtons(MouseButton::Left.mask())
            ]
        );

        let evs = t.translate(mouse(MouseEventKind::Down(TermButton::Right), 5, 4));
        assert_eq!(evs[1], InputEvent::MouseButtons(0b11));

        // Drag with a button already down does not repeat the mask.
        let evs = t.translate(mouse(MouseEventKind::Drag(TermButton::Left), 6, 4));
        assert_eq!(evs.len(), 1);

        let evs = t.translate(mouse(MouseEventKind::Up(TermButton::Left), 6, 4));
        assert_eq!(evs[1], InputEvent::MouseButtons(MouseButton::Right.mask()));
        assert_eq!(t.mask(), MouseButton::Right.mask());
    }
}
