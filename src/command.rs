//! Parallax serial LCD command definitions
//!
//! This module defines the control bytes understood by the Parallax serial LCD
//! modules and the small encoders that turn driver operations into the exact
//! byte sequences put on the wire.
//!
//! ## Command Structure
//!
//! The module has no separate command/data line. Every byte in the range
//! 0x20-0x7E is shown as a character at the cursor, 0x00-0x07 shows one of the
//! eight programmable glyphs, and the remaining values are commands:
//!
//! 1. Single-byte commands (clear, cursor position, backlight, ...)
//! 2. `0xF8 + n` followed by 8 row bytes to program glyph slot `n`
//!
//! ## Example
//!
//! ```rust
//! use parallax_lcd::command;
//!
//! let cmd = command::define_char(3, &[0xFF; 8], 8);
//! assert_eq!(cmd[0], 0xFB);
//! assert_eq!(cmd[1], 0x1F);
//! ```

// Display control commands

/// Clear display and move cursor home (0x0C)
///
/// The module needs about 5ms to settle after this command.
pub const CLEAR: u8 = 0x0C;

/// Display on, cursor off, no blink (0x16)
pub const DISPLAY_ON_CURSOR_OFF: u8 = 0x16;

/// Move cursor to line 0, position 0 (0x80)
///
/// Base of the cursor positioning range 0x80-0xA7.
pub const CURSOR_HOME: u8 = 0x80;

/// Turn backlight on (0x11)
///
/// Ignored by models without backlight.
pub const BACKLIGHT_ON: u8 = 0x11;

/// Turn backlight off (0x12)
pub const BACKLIGHT_OFF: u8 = 0x12;

// Custom character commands

/// Define custom character 0 (0xF8)
///
/// Slot `n` is defined by `DEFINE_CHAR_BASE + n`, followed by 8 row bytes.
pub const DEFINE_CHAR_BASE: u8 = 0xF8;

/// Number of programmable glyph slots
pub const NUM_CUSTOM_CHARS: u8 = 8;

/// Number of pattern rows per glyph accepted by the module
pub const GLYPH_ROWS: usize = 8;

/// Bits of a pattern row that are shown (5 pixel columns)
pub const GLYPH_ROW_MASK: u8 = 0x1F;

/// Length of an encoded define-character command
pub const DEFINE_CHAR_LEN: usize = 1 + GLYPH_ROWS;

/// Replacement for bytes the module would interpret as commands
pub const REPLACEMENT_CHAR: u8 = b'_';

/// Encode a define-character command for slot `slot`
///
/// At most `min(cell_height, 8)` rows are copied from `pattern`, each masked to
/// the low 5 bits. Rows past that are sent as zero so the command always has
/// its full length.
///
/// The caller is responsible for checking `slot < NUM_CUSTOM_CHARS`.
pub fn define_char(slot: u8, pattern: &[u8], cell_height: u8) -> [u8; DEFINE_CHAR_LEN] {
    let mut out = [0u8; DEFINE_CHAR_LEN];
    out[0] = DEFINE_CHAR_BASE + slot;

    let rows = (cell_height as usize).min(GLYPH_ROWS);
    for (dst, src) in out[1..].iter_mut().zip(pattern.iter()).take(rows) {
        *dst = src & GLYPH_ROW_MASK;
    }
    out
}

/// Backlight command for the requested state
pub fn backlight(on: bool) -> u8 {
    if on { BACKLIGHT_ON } else { BACKLIGHT_OFF }
}

/// Whether `byte` is shown as a printable ASCII character
pub fn is_printable(byte: u8) -> bool {
    (0x20..=0x7E).contains(&byte)
}

/// Sanitize a byte placed by a single-character write
///
/// Glyph slot references (0-7) and printable ASCII pass through; anything
/// else becomes `_`.
pub fn sanitize_char(byte: u8) -> u8 {
    if byte < NUM_CUSTOM_CHARS || is_printable(byte) {
        byte
    } else {
        REPLACEMENT_CHAR
    }
}

/// Sanitize a byte that is part of a string write
///
/// Unlike [`sanitize_char`], slot references are not accepted here: a string
/// can only carry printable ASCII.
pub fn sanitize_text(byte: u8) -> u8 {
    if is_printable(byte) {
        byte
    } else {
        REPLACEMENT_CHAR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_char_opcode() {
        assert_eq!(define_char(0, &[0; 8], 8)[0], 0xF8);
        assert_eq!(define_char(7, &[0; 8], 8)[0], 0xFF);
    }

    #[test]
    fn test_define_char_masks_rows() {
        let cmd = define_char(1, &[0xFF, 0xE1, 0x10, 0x00, 0x3F, 0x20, 0x1F, 0x80], 8);
        assert_eq!(cmd, [0xF9, 0x1F, 0x01, 0x10, 0x00, 0x1F, 0x00, 0x1F, 0x00]);
    }

    #[test]
    fn test_define_char_short_cell_zero_fills() {
        let cmd = define_char(2, &[0x1F; 8], 7);
        assert_eq!(cmd.len(), DEFINE_CHAR_LEN);
        assert_eq!(&cmd[1..8], &[0x1F; 7]);
        assert_eq!(cmd[8], 0x00);
    }

    #[test]
    fn test_define_char_short_pattern() {
        let cmd = define_char(4, &[0x0A, 0x15], 8);
        assert_eq!(cmd, [0xFC, 0x0A, 0x15, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_sanitize_char_keeps_slot_refs() {
        for b in 0..8u8 {
            assert_eq!(sanitize_char(b), b);
        }
        assert_eq!(sanitize_char(8), b'_');
        assert_eq!(sanitize_char(0x1F), b'_');
        assert_eq!(sanitize_char(b' '), b' ');
        assert_eq!(sanitize_char(b'~'), b'~');
        assert_eq!(sanitize_char(0x7F), b'_');
        assert_eq!(sanitize_char(0xF8), b'_');
    }

    #[test]
    fn test_sanitize_text_rejects_slot_refs() {
        for b in 0..8u8 {
            assert_eq!(sanitize_text(b), b'_');
        }
        assert_eq!(sanitize_text(b'A'), b'A');
        assert_eq!(sanitize_text(0x0C), b'_');
    }

    #[test]
    fn test_backlight_bytes() {
        assert_eq!(backlight(true), 0x11);
        assert_eq!(backlight(false), 0x12);
    }
}
