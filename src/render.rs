//! Bar graph and big number placement
//!
//! The functions here decide which cell gets which glyph. They know nothing
//! about the wire protocol: everything goes through the primitives of a
//! [`CharTarget`], which the [`Display`](crate::display::Display) implements.
//! The driver claims the matching custom character mode and programs the bar
//! glyphs before calling in here.

use crate::display::Icon;
use crate::glyph::{BLOCK_FILLED, Pattern};

/// Character-level primitives lent to the renderers
pub trait CharTarget {
    /// Error returned by fallible primitives
    type Error;

    /// Display height in cells
    fn height(&self) -> u8;

    /// Place a character or glyph code at 1-based `(x, y)`
    fn chr(&mut self, x: i32, y: i32, code: u8);

    /// Place an icon at 1-based `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns an error if the icon cannot be shown.
    fn icon(&mut self, x: i32, y: i32, icon: Icon) -> Result<(), Self::Error>;

    /// Program glyph slot `slot` with `pattern`
    ///
    /// # Errors
    ///
    /// Returns an error if the slot is invalid or the transport fails.
    fn define_char(&mut self, slot: u8, pattern: &[u8]) -> Result<(), Self::Error>;
}

/// Number of lit pixels for a `len`-cell bar filled to `promille`
fn total_pixels(len: u8, cell: u8, promille: u16) -> i32 {
    let promille = i32::from(promille.min(1000));
    (2 * i32::from(len) * i32::from(cell) + 1) * promille / 2000
}

/// Draw a vertical bar growing upwards from 1-based `(x, y)`
///
/// Full cells use the block icon; the topmost partial cell uses glyph
/// `offset + pixels`, which the caller must have programmed.
///
/// # Errors
///
/// Propagates the first error from the target.
pub fn vbar_static<T: CharTarget + ?Sized>(
    target: &mut T,
    x: i32,
    y: i32,
    len: u8,
    promille: u16,
    cell_height: u8,
    offset: u8,
) -> Result<(), T::Error> {
    let total = total_pixels(len, cell_height, promille);
    let cell = i32::from(cell_height);

    for pos in 0..i32::from(len) {
        let Some(row) = y.checked_sub(pos) else {
            break;
        };
        let pixels = total - cell * pos;
        if pixels >= cell {
            target.icon(x, row, Icon::BlockFilled)?;
        } else if pixels > 0 {
            // 0 < pixels < cell_height <= 8
            target.chr(x, row, offset + pixels as u8);
            break;
        }
    }
    Ok(())
}

/// Draw a horizontal bar growing to the right from 1-based `(x, y)`
///
/// # Errors
///
/// Propagates the first error from the target.
pub fn hbar_static<T: CharTarget + ?Sized>(
    target: &mut T,
    x: i32,
    y: i32,
    len: u8,
    promille: u16,
    cell_width: u8,
    offset: u8,
) -> Result<(), T::Error> {
    let total = total_pixels(len, cell_width, promille);
    let cell = i32::from(cell_width);

    for pos in 0..i32::from(len) {
        let Some(col) = x.checked_add(pos) else {
            break;
        };
        let pixels = total - cell * pos;
        if pixels >= cell {
            target.icon(col, y, Icon::BlockFilled)?;
        } else if pixels > 0 {
            target.chr(col, y, offset + pixels as u8);
            break;
        }
    }
    Ok(())
}

/// Value of the colon for [`big_num`]
pub const BIG_NUM_COLON: u8 = 10;

/// Glyphs used by [`big_num`], programmed into slots 0-4
pub const BIG_NUM_PATTERNS: [Pattern; 5] = [
    BLOCK_FILLED,
    // top stroke
    [0x1F, 0x1F, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
    // bottom stroke
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F, 0x1F],
    // top and bottom strokes
    [0x1F, 0x1F, 0x00, 0x00, 0x00, 0x00, 0x1F, 0x1F],
    // dot
    [0x00, 0x00, 0x0E, 0x0E, 0x0E, 0x00, 0x00, 0x00],
];

const FULL: u8 = 0;
const TOP: u8 = 1;
const BOT: u8 = 2;
const TOP_BOT: u8 = 3;
const DOT: u8 = 4;
const SP: u8 = b' ';

/// Digits 0-9 as 3x2 cells, upper row first
const BIG_DIGITS: [[[u8; 3]; 2]; 10] = [
    [[FULL, TOP, FULL], [FULL, BOT, FULL]],
    [[TOP, FULL, SP], [BOT, FULL, BOT]],
    [[TOP_BOT, TOP_BOT, FULL], [FULL, BOT, BOT]],
    [[TOP_BOT, TOP_BOT, FULL], [BOT, BOT, FULL]],
    [[FULL, BOT, FULL], [SP, SP, FULL]],
    [[FULL, TOP_BOT, TOP_BOT], [BOT, BOT, FULL]],
    [[FULL, TOP_BOT, TOP_BOT], [FULL, BOT, FULL]],
    [[TOP, TOP, FULL], [SP, SP, FULL]],
    [[FULL, TOP_BOT, FULL], [FULL, BOT, FULL]],
    [[FULL, TOP_BOT, FULL], [BOT, BOT, FULL]],
];

/// Draw big number `num` (0-9, or [`BIG_NUM_COLON`]) with its left edge at column `x`
///
/// Digits are three cells wide and two high, the colon one cell wide. The
/// number is centred vertically. The glyphs are only programmed when `init` is
/// set, i.e. when the big number mode has just been entered. Values above 10
/// are ignored.
///
/// # Errors
///
/// Propagates the first error from the target.
pub fn big_num<T: CharTarget + ?Sized>(
    target: &mut T,
    x: i32,
    num: u8,
    init: bool,
) -> Result<(), T::Error> {
    if num > BIG_NUM_COLON {
        return Ok(());
    }

    if init {
        for (slot, pattern) in (0u8..).zip(BIG_NUM_PATTERNS.iter()) {
            target.define_char(slot, pattern)?;
        }
    }

    let top = i32::from(target.height().saturating_sub(2) / 2) + 1;

    if num == BIG_NUM_COLON {
        target.chr(x, top, DOT);
        target.chr(x, top + 1, DOT);
        return Ok(());
    }

    for (dy, row) in (0..).zip(BIG_DIGITS[num as usize].iter()) {
        for (dx, &code) in (0..).zip(row.iter()) {
            let Some(col) = x.checked_add(dx) else {
                break;
            };
            target.chr(col, top + dy, code);
        }
    }
    Ok(())
}
