//! Character surface: the fixed-size glyph/attribute grid the game draws into.

use crate::types::{colour, glyph, Attribute, Glyph};

/// A single console cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: Glyph,
    pub attr: Attribute,
}

impl Cell {
    pub const fn new(glyph: Glyph, attr: Attribute) -> Self {
        Self { glyph, attr }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: glyph::SPACE,
            attr: colour::FG_BLACK,
        }
    }
}

/// Drawing capability handed to game code.
///
/// `write` is the only primitive; every helper goes through it and inherits
/// its bounds policy (out-of-range coordinates are ignored).
pub trait Canvas {
    fn width(&self) -> u16;
    fn height(&self) -> u16;

    /// Overwrite the cell at `(x, y)`. Out-of-bounds writes are no-ops.
    fn write(&mut self, x: i32, y: i32, glyph: Glyph, attr: Attribute);

    /// Fill the half-open rectangle `[x1, x2) x [y1, y2)`.
    fn fill(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, glyph: Glyph, attr: Attribute) {
        let (x1, x2) = clip_span(x1, x2, self.width());
        let (y1, y2) = clip_span(y1, y2, self.height());
        for y in y1..y2 {
            for x in x1..x2 {
                self.write(x, y, glyph, attr);
            }
        }
    }

    /// Draw `text` left to right starting at `(x, y)`, one UTF-16 unit per cell.
    fn draw_str(&mut self, x: i32, y: i32, text: &str, attr: Attribute) {
        let mut cx = x;
        for unit in text.encode_utf16() {
            if cx >= i32::from(self.width()) {
                break;
            }
            self.write(cx, y, unit, attr);
            cx += 1;
        }
    }

    /// Reset every cell to `glyph`/`attr`.
    fn clear(&mut self, glyph: Glyph, attr: Attribute) {
        let (w, h) = (i32::from(self.width()), i32::from(self.height()));
        self.fill(0, 0, w, h, glyph, attr);
    }
}

fn clip_span(a: i32, b: i32, limit: u16) -> (i32, i32) {
    let limit = i32::from(limit);
    (a.clamp(0, limit), b.clamp(0, limit))
}

/// 2D grid of glyph/attribute cells.
///
/// Dimensions are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Surface {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Row-major cells, for presentation.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn write(&mut self, x: i32, y: i32, glyph: Glyph, attr: Attribute) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = Cell { glyph, attr };
        }
    }

    /// Copy `other` into `self` without reallocating when sizes match.
    pub fn copy_from(&mut self, other: &Surface) {
        self.width = other.width;
        self.height = other.height;
        self.cells.clone_from(&other.cells);
    }
}

impl Canvas for Surface {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn write(&mut self, x: i32, y: i32, glyph: Glyph, attr: Attribute) {
        Surface::write(self, x, y, glyph, attr);
    }

    fn clear(&mut self, glyph: Glyph, attr: Attribute) {
        self.cells.fill(Cell { glyph, attr });
    }
}
