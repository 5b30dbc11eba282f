//! User-facing callbacks and the per-call drawing/input context.

use crate::core::{Canvas, InputSampler, KeyState, Surface};
use crate::types::{Attribute, Glyph, MouseButton};

/// The game: two required callbacks driven by the frame loop.
///
/// Returning `false` from either callback stops the engine cleanly.
pub trait Game {
    /// Called once before the first frame.
    fn on_create(&mut self, ctx: &mut Context<'_>) -> bool;

    /// Called once per frame with the seconds elapsed since the previous frame.
    fn on_update(&mut self, ctx: &mut Context<'_>, elapsed: f32) -> bool;

    /// Called once when a started loop stops, before the display is restored.
    fn on_destroy(&mut self, _ctx: &mut Context<'_>) {}
}

/// What a callback can see and touch during one call.
///
/// Drawing goes through [`Canvas`]; the surface itself stays owned by the engine.
pub struct Context<'a> {
    surface: &'a mut Surface,
    input: &'a InputSampler,
    app_name: &'a str,
    frame: u64,
}

impl<'a> Context<'a> {
    pub fn new(
        surface: &'a mut Surface,
        input: &'a InputSampler,
        app_name: &'a str,
        frame: u64,
    ) -> Self {
        Self {
            surface,
            input,
            app_name,
            frame,
        }
    }

    pub fn screen_width(&self) -> u16 {
        self.surface.width()
    }

    pub fn screen_height(&self) -> u16 {
        self.surface.height()
    }

    /// Read-only view of what has been drawn so far.
    pub fn surface(&self) -> &Surface {
        self.surface
    }

    pub fn key(&self, key: u8) -> KeyState {
        self.input.key(key)
    }

    pub fn mouse(&self, button: MouseButton) -> KeyState {
        self.input.button(button)
    }

    pub fn mouse_x(&self) -> i32 {
        self.input.mouse_x()
    }

    pub fn mouse_y(&self) -> i32 {
        self.input.mouse_y()
    }

    pub fn has_focus(&self) -> bool {
        self.input.has_focus()
    }

    pub fn app_name(&self) -> &str {
        self.app_name
    }

    /// Frames completed before this call (0 during `on_create`).
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl Canvas for Context<'_> {
    fn width(&self) -> u16 {
        self.surface.width()
    }

    fn height(&self) -> u16 {
        self.surface.height()
    }

    fn write(&mut self, x: i32, y: i32, glyph: Glyph, attr: Attribute) {
        self.surface.write(x, y, glyph, attr);
    }
}
