//! Programmable glyph slots and built-in patterns
//!
//! The module offers eight glyph slots (character codes 0-7). [`GlyphTable`]
//! mirrors what the driver last programmed into each slot so the contents can
//! be inspected without reading the device, which has no read-back.

use crate::command::{GLYPH_ROWS, GLYPH_ROW_MASK, NUM_CUSTOM_CHARS};

/// Pixel rows of one glyph, top to bottom, 5 bits used per row
pub type Pattern = [u8; GLYPH_ROWS];

/// Slot used for the full-block icon
pub const BLOCK_SLOT: u8 = 0;

/// Slot used for the heart icons
pub const HEART_SLOT: u8 = 7;

/// Fully lit cell
pub const BLOCK_FILLED: Pattern = [0x1F; GLYPH_ROWS];

/// Outline heart
pub const HEART_OPEN: Pattern = [0x1F, 0x15, 0x00, 0x00, 0x00, 0x11, 0x1B, 0x1F];

/// Filled heart
pub const HEART_FILLED: Pattern = [0x1F, 0x15, 0x0A, 0x0E, 0x0E, 0x15, 0x1B, 0x1F];

/// Vertical bar glyphs, 1 to 7 pixels high; the full cell uses the block icon
pub const VBAR_PATTERNS: [Pattern; 7] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F, 0x1F],
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x1F, 0x1F, 0x1F],
    [0x00, 0x00, 0x00, 0x00, 0x1F, 0x1F, 0x1F, 0x1F],
    [0x00, 0x00, 0x00, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F],
    [0x00, 0x00, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F],
    [0x00, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F],
];

/// Horizontal bar glyphs, 1 to 4 pixels wide; the full cell uses the block icon
pub const HBAR_PATTERNS: [Pattern; 4] = [
    [0x10; GLYPH_ROWS],
    [0x18; GLYPH_ROWS],
    [0x1C; GLYPH_ROWS],
    [0x1E; GLYPH_ROWS],
];

/// Contents of the eight glyph slots as last programmed
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphTable {
    slots: [Option<Pattern>; NUM_CUSTOM_CHARS as usize],
}

impl GlyphTable {
    /// Create a table with every slot undefined
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `pattern` for `slot` as the module will show it
    ///
    /// Rows are masked to 5 bits and only the first `min(cell_height, 8)` rows
    /// are kept; the rest read back as zero. Returns the stored rows, or `None`
    /// if `slot` is out of range.
    pub fn store(&mut self, slot: u8, pattern: &[u8], cell_height: u8) -> Option<Pattern> {
        let entry = self.slots.get_mut(slot as usize)?;
        let mut rows = [0u8; GLYPH_ROWS];
        let used = (cell_height as usize).min(GLYPH_ROWS);
        for (dst, src) in rows.iter_mut().zip(pattern).take(used) {
            *dst = src & GLYPH_ROW_MASK;
        }
        *entry = Some(rows);
        Some(rows)
    }

    /// Pattern currently valid in `slot`
    pub fn get(&self, slot: u8) -> Option<&Pattern> {
        self.slots.get(slot as usize)?.as_ref()
    }

    /// Mark slots as no longer holding valid content
    ///
    /// The device keeps showing the old pixels until the slot is reprogrammed.
    pub fn invalidate(&mut self, slots: core::ops::RangeInclusive<u8>) {
        for slot in slots {
            if let Some(entry) = self.slots.get_mut(slot as usize) {
                *entry = None;
            }
        }
    }

    /// Number of slots the module provides
    pub fn capacity(&self) -> u8 {
        NUM_CUSTOM_CHARS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_is_empty() {
        let table = GlyphTable::new();
        assert!((0..8).all(|slot| table.get(slot).is_none()));
        assert_eq!(table.capacity(), 8);
    }

    #[test]
    fn test_store_masks_rows() {
        let mut table = GlyphTable::new();
        let stored = table.store(3, &[0xFF, 0x20, 0x15, 0, 0, 0, 0, 0xE0], 8);
        assert_eq!(stored, Some([0x1F, 0x00, 0x15, 0, 0, 0, 0, 0x00]));
        assert_eq!(table.get(3), stored.as_ref());
    }

    #[test]
    fn test_store_truncates_to_cell_height() {
        let mut table = GlyphTable::new();
        let _ = table.store(3, &[0x1F; 8], 6);
        assert_eq!(table.get(3), Some(&[0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0, 0]));
    }

    #[test]
    fn test_store_out_of_range() {
        let mut table = GlyphTable::new();
        assert_eq!(table.store(8, &BLOCK_FILLED, 8), None);
        assert_eq!(table.get(8), None);
    }

    #[test]
    fn test_invalidate_range() {
        let mut table = GlyphTable::new();
        for slot in 0..8 {
            let _ = table.store(slot, &BLOCK_FILLED, 8);
        }
        table.invalidate(1..=7);
        assert!(table.get(0).is_some());
        assert!((1..8).all(|slot| table.get(slot).is_none()));
    }

    #[test]
    fn test_bar_patterns_grow_by_one_pixel() {
        for (i, pattern) in VBAR_PATTERNS.iter().enumerate() {
            let lit = pattern.iter().filter(|&&row| row == 0x1F).count();
            assert_eq!(lit, i + 1);
        }
        for (i, pattern) in HBAR_PATTERNS.iter().enumerate() {
            assert_eq!(pattern[0].count_ones() as usize, i + 1);
        }
    }
}
