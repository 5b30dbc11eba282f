//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the engine.
//! All types are pure data with no external dependencies, so they can be used
//! by the surface, the input sampler, the frame driver and any host binding.
//!
//! # Cells
//!
//! A console cell holds a 16-bit glyph (a UTF-16 code unit) and a 16-bit
//! attribute laid out like a Windows console `CHAR_INFO`:
//!
//! | Bits | Meaning |
//! |------|---------|
//! | 0-3 | Foreground colour index (0-15) |
//! | 4-7 | Background colour index (0-15) |
//! | 8-15 | Unused |
//!
//! # Input Limits
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `KEY_COUNT` | 256 | Virtual-key slots sampled each frame |
//! | `MOUSE_BUTTON_COUNT` | 5 | Mouse buttons sampled each frame |
//! | `INPUT_EVENT_CAPACITY` | 32 | Input events read per frame; the rest are dropped |
//!
//! # Examples
//!
//! ```
//! use wide_console_types::{colour, glyph, InputEvent, MouseButton, KEY_COUNT};
//!
//! let attr = colour::FG_WHITE | colour::BG_DARK_BLUE;
//! assert_eq!(colour::foreground(attr), 15);
//! assert_eq!(colour::background(attr), 1);
//!
//! assert_eq!(glyph::SOLID, 0x2588);
//! assert_eq!(KEY_COUNT, 256);
//!
//! let ev = InputEvent::MouseButtons(MouseButton::Left.mask() | MouseButton::Right.mask());
//! assert_eq!(ev, InputEvent::MouseButtons(0b11));
//! ```

/// A glyph: one UTF-16 code unit (16-bit code point).
pub type Glyph = u16;

/// Foreground/background colour encoding of a cell.
pub type Attribute = u16;

/// Number of virtual-key slots sampled per frame.
pub const KEY_COUNT: usize = 256;

/// Number of mouse buttons sampled per frame.
pub const MOUSE_BUTTON_COUNT: usize = 5;

/// Maximum number of input events read per frame.
///
/// Events beyond this are dropped for the frame. Bursts (fast mouse motion)
/// can therefore lose intermediate positions.
pub const INPUT_EVENT_CAPACITY: usize = 32;

/// Console width used when no size is configured.
pub const DEFAULT_WIDTH: u16 = 80;

/// Console height used when no size is configured.
pub const DEFAULT_HEIGHT: u16 = 40;

/// Key release fallback for terminals that never report key releases.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Cell attribute constants (16-colour console palette).
pub mod colour {
    use super::Attribute;

    pub const FG_BLACK: Attribute = 0x0000;
    pub const FG_DARK_BLUE: Attribute = 0x0001;
    pub const FG_DARK_GREEN: Attribute = 0x0002;
    pub const FG_DARK_CYAN: Attribute = 0x0003;
    pub const FG_DARK_RED: Attribute = 0x0004;
    pub const FG_DARK_MAGENTA: Attribute = 0x0005;
    pub const FG_DARK_YELLOW: Attribute = 0x0006;
    pub const FG_GREY: Attribute = 0x0007;
    pub const FG_DARK_GREY: Attribute = 0x0008;
    pub const FG_BLUE: Attribute = 0x0009;
    pub const FG_GREEN: Attribute = 0x000A;
    pub const FG_CYAN: Attribute = 0x000B;
    pub const FG_RED: Attribute = 0x000C;
    pub const FG_MAGENTA: Attribute = 0x000D;
    pub const FG_YELLOW: Attribute = 0x000E;
    pub const FG_WHITE: Attribute = 0x000F;

    pub const BG_BLACK: Attribute = 0x0000;
    pub const BG_DARK_BLUE: Attribute = 0x0010;
    pub const BG_DARK_GREEN: Attribute = 0x0020;
    pub const BG_DARK_CYAN: Attribute = 0x0030;
    pub const BG_DARK_RED: Attribute = 0x0040;
    pub const BG_DARK_MAGENTA: Attribute = 0x0050;
    pub const BG_DARK_YELLOW: Attribute = 0x0060;
    pub const BG_GREY: Attribute = 0x0070;
    pub const BG_DARK_GREY: Attribute = 0x0080;
    pub const BG_BLUE: Attribute = 0x0090;
    pub const BG_GREEN: Attribute = 0x00A0;
    pub const BG_CYAN: Attribute = 0x00B0;
    pub const BG_RED: Attribute = 0x00C0;
    pub const BG_MAGENTA: Attribute = 0x00D0;
    pub const BG_YELLOW: Attribute = 0x00E0;
    pub const BG_WHITE: Attribute = 0x00F0;

    /// Foreground palette index (0-15).
    pub const fn foreground(attr: Attribute) -> u8 {
        (attr & 0x000F) as u8
    }

    /// Background palette index (0-15).
    pub const fn background(attr: Attribute) -> u8 {
        ((attr & 0x00F0) >> 4) as u8
    }
}

/// Commonly used block glyphs.
pub mod glyph {
    use super::Glyph;

    /// Full block, the default "pixel".
    pub const SOLID: Glyph = 0x2588;
    /// Dark shade.
    pub const THREEQUARTERS: Glyph = 0x2593;
    /// Medium shade.
    pub const HALF: Glyph = 0x2592;
    /// Light shade.
    pub const QUARTER: Glyph = 0x2591;
    pub const SPACE: Glyph = 0x0020;
}

/// Virtual-key codes (Windows layout) used as indices into the key table.
pub mod vk {
    pub const BACK: u8 = 0x08;
    pub const TAB: u8 = 0x09;
    pub const RETURN: u8 = 0x0D;
    pub const SHIFT: u8 = 0x10;
    pub const CONTROL: u8 = 0x11;
    pub const MENU: u8 = 0x12;
    pub const PAUSE: u8 = 0x13;
    pub const CAPITAL: u8 = 0x14;
    pub const ESCAPE: u8 = 0x1B;
    pub const SPACE: u8 = 0x20;
    pub const PRIOR: u8 = 0x21;
    pub const NEXT: u8 = 0x22;
    pub const END: u8 = 0x23;
    pub const HOME: u8 = 0x24;
    pub const LEFT: u8 = 0x25;
    pub const UP: u8 = 0x26;
    pub const RIGHT: u8 = 0x27;
    pub const DOWN: u8 = 0x28;
    pub const INSERT: u8 = 0x2D;
    pub const DELETE: u8 = 0x2E;
    /// `0`..`9` are `KEY_0 + n`.
    pub const KEY_0: u8 = 0x30;
    /// `A`..`Z` are `KEY_A + n`.
    pub const KEY_A: u8 = 0x41;
    /// `F1`..`F24` are `F1 + n - 1`.
    pub const F1: u8 = 0x70;
    pub const SCROLL: u8 = 0x91;
    pub const NUMLOCK: u8 = 0x90;
    pub const OEM_1: u8 = 0xBA;
    pub const OEM_PLUS: u8 = 0xBB;
    pub const OEM_COMMA: u8 = 0xBC;
    pub const OEM_MINUS: u8 = 0xBD;
    pub const OEM_PERIOD: u8 = 0xBE;
    pub const OEM_2: u8 = 0xBF;
    pub const OEM_3: u8 = 0xC0;
    pub const OEM_4: u8 = 0xDB;
    pub const OEM_5: u8 = 0xDC;
    pub const OEM_6: u8 = 0xDD;
    pub const OEM_7: u8 = 0xDE;
}

/// Mouse buttons, in console bitmask order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left = 0,
    Right = 1,
    Middle = 2,
    X1 = 3,
    X2 = 4,
}

impl MouseButton {
    pub const ALL: [MouseButton; MOUSE_BUTTON_COUNT] = [
        MouseButton::Left,
        MouseButton::Right,
        MouseButton::Middle,
        MouseButton::X1,
        MouseButton::X2,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Bit for this button in a [`InputEvent::MouseButtons`] mask.
    pub const fn mask(self) -> u8 {
        1 << (self as u8)
    }
}

/// One entry of the per-frame input queue.
///
/// Keyboard state is not carried here; keys are sampled as levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Mouse moved to a cell position.
    MouseMoved { x: i32, y: i32 },
    /// Full button-state bitmask after the event (bit n = button n down).
    MouseButtons(u8),
    /// Console gained (`true`) or lost (`false`) focus.
    Focus(bool),
}
