//! TerminalRenderer: flushes a surface to a real terminal.
//!
//! The first frame (and any frame after [`TerminalRenderer::invalidate`]) is a
//! full redraw; later frames only emit runs of cells that changed.

use std::io::{self, Write};

use anyhow::Result;
use unicode_width::UnicodeWidthChar;

use crossterm::{
    cursor,
    style::{
        Attribute as TermAttribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::core::Surface;
use crate::types::{colour, Attribute, Glyph};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<Surface>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.last = None;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(TermAttribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Whether the next draw repaints every cell.
    pub fn needs_full_redraw(&self) -> bool {
        self.last.is_none()
    }

    /// Draw a surface, diffing against the previously drawn one.
    pub fn draw(&mut self, surface: &Surface) -> Result<()> {
        self.encode_frame(surface)?;
        self.flush_buf()
    }

    /// Encode the next frame into the internal buffer without writing it.
    pub(crate) fn encode_frame(&mut self, surface: &Surface) -> Result<()> {
        self.buf.clear();
        let same_size = self.last.as_ref().is_some_and(|prev| {
            prev.width() == surface.width() && prev.height() == surface.height()
        });

        match self.last.as_mut() {
            Some(prev) if same_size => {
                encode_diff_into(prev, surface, &mut self.buf)?;
                prev.copy_from(surface);
            }
            _ => {
                encode_full_into(surface, &mut self.buf)?;
                self.last = Some(surface.clone());
            }
        }
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) -> Result<()> {
        self.buf.clear();
        self.buf.queue(terminal::SetTitle(title))?;
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(surface: &Surface, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut current: Option<Attribute> = None;
    for y in 0..surface.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..surface.width() {
            let cell = surface.get(i32::from(x), i32::from(y)).unwrap_or_default();
            if current != Some(cell.attr) {
                apply_attr_into(out, cell.attr)?;
                current = Some(cell.attr);
            }
            out.queue(Print(glyph_char(cell.glyph)))?;
        }
    }

    out.queue(ResetColor)?;
    Ok(())
}

/// Encode a diff redraw (changed runs) into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_diff_into(prev: &Surface, next: &Surface, out: &mut Vec<u8>) -> Result<()> {
    let mut current: Option<Attribute> = None;

    for_each_changed_run(prev, next, |x, y, len| {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let cell = next
                .get(i32::from(x + dx), i32::from(y))
                .unwrap_or_default();
            if current != Some(cell.attr) {
                apply_attr_into(out, cell.attr)?;
                current = Some(cell.attr);
            }
            out.queue(Print(glyph_char(cell.glyph)))?;
        }
        Ok(())
    })?;

    out.queue(ResetColor)?;
    Ok(())
}

fn apply_attr_into(out: &mut Vec<u8>, attr: Attribute) -> Result<()> {
    out.queue(SetForegroundColor(palette(colour::foreground(attr))))?;
    out.queue(SetBackgroundColor(palette(colour::background(attr))))?;
    Ok(())
}

/// 16-colour console palette index to terminal colour.
pub fn palette(index: u8) -> Color {
    match index & 0x0F {
        0 => Color::Black,
        1 => Color::DarkBlue,
        2 => Color::DarkGreen,
        3 => Color::DarkCyan,
        4 => Color::DarkRed,
        5 => Color::DarkMagenta,
        6 => Color::DarkYellow,
        7 => Color::Grey,
        8 => Color::DarkGrey,
        9 => Color::Blue,
        10 => Color::Green,
        11 => Color::Cyan,
        12 => Color::Red,
        13 => Color::Magenta,
        14 => Color::Yellow,
        _ => Color::White,
    }
}

/// Printable character for a glyph.
///
/// One surface cell is one terminal column, so anything that does not occupy
/// exactly one column (control codes, surrogates, combining marks, wide CJK)
/// prints as a space.
pub fn glyph_char(glyph: Glyph) -> char {
    char::from_u32(u32::from(glyph))
        .filter(|c| !c.is_control() && c.width() == Some(1))
        .unwrap_or(' ')
}

fn for_each_changed_run(
    prev: &Surface,
    next: &Surface,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        for y in 0..next.height() {
            f(0, y, next.width())?;
        }
        return Ok(());
    }

    let w = next.width() as usize;
    let (a, b) = (prev.cells(), next.cells());

    for (y, (row_a, row_b)) in a.chunks(w.max(1)).zip(b.chunks(w.max(1))).enumerate() {
        let mut x = 0;
        while x < w {
            if row_a[x] == row_b[x] {
                x += 1;
                continue;
            }

            let start = x;
            x += 1;
            while x < w && row_a[x] != row_b[x] {
                x += 1;
            }
            f(start as u16, y as u16, (x - start) as u16)?;
        }
    }

    Ok(())
}
