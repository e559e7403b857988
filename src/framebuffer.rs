//! Character frame buffer
//!
//! Holds one byte per character cell, row-major. Callers address cells with
//! 1-based coordinates, as the host server does; the buffer converts them to
//! 0-based indices and silently drops anything that falls off the display.

use alloc::vec;
use alloc::vec::Vec;

use crate::command::{sanitize_char, sanitize_text};

/// Value of a cleared cell
pub const BLANK: u8 = b' ';

/// Character frame buffer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl FrameBuffer {
    /// Create a buffer of `width` x `height` blank cells
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![BLANK; width * height],
        }
    }

    /// Width in cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells
    pub fn height(&self) -> usize {
        self.height
    }

    /// Reset every cell to blank
    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    /// Place a single byte at 1-based `(x, y)`
    ///
    /// Glyph slot references 0-7 are stored as-is. Ignored when the position is
    /// outside the display.
    pub fn write_char(&mut self, x: i32, y: i32, byte: u8) {
        let col = self.column(x.saturating_sub(1));
        let row = self.row(y.saturating_sub(1));
        let (Some(col), Some(row)) = (col, row) else {
            return;
        };
        self.cells[row * self.width + col] = sanitize_char(byte);
    }

    /// Place `text` left to right starting at 1-based `(x, y)`
    ///
    /// Characters left of the display are skipped and the string is truncated
    /// at the right edge, never wrapped.
    pub fn write_string(&mut self, x: i32, y: i32, text: &[u8]) {
        let Some(row) = self.row(y.saturating_sub(1)) else {
            return;
        };
        let start = row * self.width;
        for (offset, &byte) in text.iter().enumerate() {
            let Ok(offset) = i32::try_from(offset) else {
                break;
            };
            let x0 = x.saturating_sub(1).saturating_add(offset);
            if x0 >= self.width as i32 {
                break;
            }
            if let Some(col) = self.column(x0) {
                self.cells[start + col] = sanitize_text(byte);
            }
        }
    }

    /// Cell at 0-based `(col, row)`
    pub fn get(&self, col: usize, row: usize) -> Option<u8> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells.get(row * self.width + col).copied()
    }

    /// One row of cells, 0-based
    pub fn row_bytes(&self, row: usize) -> Option<&[u8]> {
        if row >= self.height {
            return None;
        }
        let start = row * self.width;
        self.cells.get(start..start + self.width)
    }

    /// Iterate over rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.width.max(1))
    }

    /// All cells, row-major
    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }

    fn column(&self, x0: i32) -> Option<usize> {
        usize::try_from(x0).ok().filter(|&c| c < self.width)
    }

    fn row(&self, y0: i32) -> Option<usize> {
        usize::try_from(y0).ok().filter(|&r| r < self.height)
    }
}
