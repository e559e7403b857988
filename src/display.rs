//! Core display operations

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::command::{self, CLEAR, CURSOR_HOME, DISPLAY_ON_CURSOR_OFF, NUM_CUSTOM_CHARS};
use crate::config::{Config, Geometry};
use crate::error::Error;
use crate::framebuffer::FrameBuffer;
use crate::glyph::{
    BLOCK_FILLED, BLOCK_SLOT, GlyphTable, HBAR_PATTERNS, HEART_FILLED, HEART_OPEN, HEART_SLOT,
    Pattern, VBAR_PATTERNS,
};
use crate::interface::SerialInterface;
use crate::mode::{Acquired, CustomCharMode, ModeState};
use crate::render::{self, BIG_NUM_COLON, CharTarget};

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Settling time after [`CLEAR`] in milliseconds
pub const CLEAR_SETTLE_MS: u32 = 5;

/// Pause after each flushed row in milliseconds
pub const ROW_DELAY_MS: u32 = 1;

/// Human-readable driver description
pub const DRIVER_INFO: &str = "Parallax Inc. serial LCD driver";

/// Icons a host may ask for
///
/// Only [`Icon::BlockFilled`], [`Icon::HeartOpen`] and [`Icon::HeartFilled`]
/// are drawn by this driver; the module has no room for the others.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Icon {
    /// Fully lit cell
    BlockFilled,
    /// Outline heart
    HeartOpen,
    /// Filled heart
    HeartFilled,
    /// Arrow pointing up
    ArrowUp,
    /// Arrow pointing down
    ArrowDown,
    /// Arrow pointing left
    ArrowLeft,
    /// Arrow pointing right
    ArrowRight,
    /// Unchecked checkbox
    CheckboxOff,
    /// Checked checkbox
    CheckboxOn,
    /// Greyed checkbox
    CheckboxGray,
    /// Menu selector on the left
    SelectorAtLeft,
    /// Menu selector on the right
    SelectorAtRight,
    /// Ellipsis
    Ellipsis,
}

impl Icon {
    /// Glyph slot and pattern used to draw this icon, if supported
    pub fn glyph(self) -> Option<(u8, &'static Pattern)> {
        match self {
            Self::BlockFilled => Some((BLOCK_SLOT, &BLOCK_FILLED)),
            Self::HeartOpen => Some((HEART_SLOT, &HEART_OPEN)),
            Self::HeartFilled => Some((HEART_SLOT, &HEART_FILLED)),
            _ => None,
        }
    }
}

/// Backlight state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Backlight {
    /// Backlight lit
    #[default]
    On,
    /// Backlight dark
    Off,
}

impl From<bool> for Backlight {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

/// Driver for one Parallax serial LCD
///
/// Owns the transport, the frame buffer, the glyph slot table and the custom
/// character mode. Drawing calls only touch the frame buffer (and program
/// glyphs when needed); [`Display::flush`] sends the buffer to the module.
///
/// ## Example
///
/// ```rust
/// use core::convert::Infallible;
/// use embedded_hal::delay::DelayNs;
/// use parallax_lcd::{Builder, Display, SerialInterface};
/// # #[derive(Debug)]
/// # struct Sink;
/// # impl SerialInterface for Sink {
/// #     type Error = Infallible;
/// #     fn write_bytes(&mut self, _bytes: &[u8]) -> Result<(), Infallible> { Ok(()) }
/// # }
/// # struct NoDelay;
/// # impl DelayNs for NoDelay { fn delay_ns(&mut self, _ns: u32) {} }
/// # let mut delay = NoDelay;
/// let config = Builder::new().model("27979").build().unwrap();
/// let mut display = Display::new(Sink, config);
/// display.init(&mut delay).unwrap();
///
/// display.write_string(1, 1, "Hello");
/// display.hbar(1, 2, 10, 650).unwrap();
/// display.flush(&mut delay).unwrap();
/// ```
pub struct Display<I>
where
    I: SerialInterface,
{
    /// Serial transport
    interface: I,
    /// Display configuration
    config: Config,
    /// Characters to be shown on the next flush
    framebuffer: FrameBuffer,
    /// Last programmed glyphs
    glyphs: GlyphTable,
    /// Owner of the glyph slots
    mode: ModeState,
}

impl<I> Display<I>
where
    I: SerialInterface,
{
    /// Create a new Display instance
    pub fn new(interface: I, config: Config) -> Self {
        let geometry = config.geometry;
        Self {
            interface,
            config,
            framebuffer: FrameBuffer::new(geometry.width as usize, geometry.height as usize),
            glyphs: GlyphTable::new(),
            mode: ModeState::new(),
        }
    }

    /// Put the module in a known state
    ///
    /// Clears the display, waits for it to settle, then switches the display
    /// on with the cursor hidden.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        let geometry = self.config.geometry;
        info!(
            "parallax: init model {} ({}x{})",
            self.config.model.id(),
            geometry.width,
            geometry.height
        );
        self.send(&[CLEAR])?;
        delay.delay_ms(CLEAR_SETTLE_MS);
        self.send(&[DISPLAY_ON_CURSOR_OFF])?;
        Ok(())
    }

    /// Release the transport
    ///
    /// Calling this more than once is harmless.
    pub fn close(&mut self) {
        info!("parallax: close");
        self.interface.close();
    }

    /// Consume the driver and hand back the transport
    pub fn release(self) -> I {
        self.interface
    }

    /// Display configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Display geometry
    pub fn geometry(&self) -> Geometry {
        self.config.geometry
    }

    /// Width in characters
    pub fn width(&self) -> u8 {
        self.config.geometry.width
    }

    /// Height in characters
    pub fn height(&self) -> u8 {
        self.config.geometry.height
    }

    /// Width of a character cell in pixels
    pub fn cell_width(&self) -> u8 {
        self.config.geometry.cell_width
    }

    /// Height of a character cell in pixels
    pub fn cell_height(&self) -> u8 {
        self.config.geometry.cell_height
    }

    /// Frame buffer contents
    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    /// Mode currently owning the glyph slots
    pub fn mode(&self) -> CustomCharMode {
        self.mode.active()
    }

    /// Pattern last programmed into `slot`, if still valid
    pub fn glyph(&self, slot: u8) -> Option<&Pattern> {
        self.glyphs.get(slot)
    }

    /// Clear the frame buffer and give the glyph slots back to Standard mode
    pub fn clear(&mut self) {
        self.framebuffer.clear();
        let released = self.mode.reset();
        if let Some(slots) = released.owned_slots() {
            self.glyphs.invalidate(slots);
        }
    }

    /// Send the frame buffer to the module
    ///
    /// Homes the cursor, then writes each row as one run followed by a short
    /// pause the module needs to keep up.
    pub fn flush<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.send(&[CURSOR_HOME])?;
        for row in self.framebuffer.rows() {
            self.interface.write_bytes(row).map_err(Error::Interface)?;
            delay.delay_ms(ROW_DELAY_MS);
        }
        Ok(())
    }

    /// Print `text` at 1-based `(x, y)`
    ///
    /// Only printable ASCII is shown; other bytes become `_`. The text is cut
    /// at the right edge.
    pub fn write_string(&mut self, x: i32, y: i32, text: impl AsRef<[u8]>) {
        self.framebuffer.write_string(x, y, text.as_ref());
    }

    /// Print one character at 1-based `(x, y)`
    ///
    /// Codes 0-7 show the glyph slots; printable ASCII shows as-is; anything
    /// else becomes `_`.
    pub fn write_char(&mut self, x: i32, y: i32, byte: u8) {
        self.framebuffer.write_char(x, y, byte);
    }

    /// Draw a vertical bar growing up from 1-based `(x, y)`
    ///
    /// `len` is the maximum length in cells, `promille` the fill level
    /// (0-1000).
    ///
    /// # Errors
    ///
    /// Returns `Error::ModeConflict` without drawing if horizontal bars or big
    /// numbers own the glyph slots.
    pub fn vbar(&mut self, x: i32, y: i32, len: u8, promille: u16) -> DisplayResult<I> {
        if self.acquire(CustomCharMode::VerticalBar)?.needs_init() {
            self.program_mode_glyphs(&VBAR_PATTERNS)?;
        }
        let cell_height = self.cell_height();
        render::vbar_static(self, x, y, len, promille, cell_height, 0)
    }

    /// Draw a horizontal bar growing right from 1-based `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns `Error::ModeConflict` without drawing if vertical bars or big
    /// numbers own the glyph slots.
    pub fn hbar(&mut self, x: i32, y: i32, len: u8, promille: u16) -> DisplayResult<I> {
        if self.acquire(CustomCharMode::HorizontalBar)?.needs_init() {
            self.program_mode_glyphs(&HBAR_PATTERNS)?;
        }
        let cell_width = self.cell_width();
        render::hbar_static(self, x, y, len, promille, cell_width, 0)
    }

    /// Draw big number `num` at column `x`
    ///
    /// `num` is a digit 0-9, or 10 for a colon.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidBigNumber` for `num > 10` and
    /// `Error::ModeConflict` if bars own the glyph slots.
    pub fn big_num(&mut self, x: i32, num: u8) -> DisplayResult<I> {
        if num > BIG_NUM_COLON {
            return Err(Error::InvalidBigNumber(num));
        }
        let init = self.acquire(CustomCharMode::BigNumber)?.needs_init();
        let result = render::big_num(self, x, num, init);
        if init && result.is_err() {
            self.mode.reset();
        }
        result
    }

    /// Place an icon at 1-based `(x, y)`
    ///
    /// Icons are drawn with a glyph slot, so they are refused while the active
    /// mode owns that slot: the full block is unavailable with big numbers, the
    /// hearts with big numbers and vertical bars.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedIcon` if the icon cannot be drawn now.
    pub fn icon(&mut self, x: i32, y: i32, icon: Icon) -> DisplayResult<I> {
        let Some((slot, pattern)) = icon.glyph() else {
            return Err(Error::UnsupportedIcon(icon));
        };
        if self.mode.active().owns_slot(slot) {
            debug!(
                "parallax: icon {:?} unavailable in {} mode",
                icon,
                self.mode.active()
            );
            return Err(Error::UnsupportedIcon(icon));
        }
        self.define_char(slot, pattern)?;
        self.write_char(x, y, slot);
        Ok(())
    }

    /// Program glyph slot `slot` (0-7) and send it to the module right away
    ///
    /// Each row is masked to 5 bits; rows beyond the cell height are sent as
    /// zero.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSlot` or `Error::MissingPattern` without sending
    /// anything if the arguments are unusable.
    pub fn define_char(&mut self, slot: u8, pattern: &[u8]) -> DisplayResult<I> {
        if slot >= NUM_CUSTOM_CHARS {
            return Err(Error::InvalidSlot(slot));
        }
        if pattern.is_empty() {
            return Err(Error::MissingPattern);
        }
        let cell_height = self.cell_height();
        self.send(&command::define_char(slot, pattern, cell_height))?;
        let _ = self.glyphs.store(slot, pattern, cell_height);
        Ok(())
    }

    /// Number of programmable glyph slots
    ///
    /// Always 8, whatever the current mode is using.
    pub fn free_chars(&self) -> u8 {
        self.glyphs.capacity()
    }

    /// Switch the backlight
    ///
    /// Does nothing on models without backlight.
    pub fn set_backlight(&mut self, state: Backlight) -> DisplayResult<I> {
        if !self.config.geometry.has_backlight {
            return Ok(());
        }
        self.send(&[command::backlight(state == Backlight::On)])
    }

    /// Driver description
    pub fn info(&self) -> &'static str {
        DRIVER_INFO
    }

    fn acquire(&mut self, mode: CustomCharMode) -> Result<Acquired, Error<I>> {
        self.mode.acquire(mode).map_err(|conflict| {
            warn!(
                "parallax: {}: cannot combine two modes using user-defined characters",
                conflict.requested
            );
            Error::from(conflict)
        })
    }

    /// Program the bar glyphs into slots 1.. after entering a bar mode
    ///
    /// A failed write gives the slots back, so the next call programs them
    /// again.
    fn program_mode_glyphs(&mut self, patterns: &[Pattern]) -> DisplayResult<I> {
        for (slot, pattern) in (1u8..).zip(patterns.iter()) {
            if let Err(e) = self.define_char(slot, pattern) {
                self.mode.reset();
                return Err(e);
            }
        }
        Ok(())
    }

    fn send(&mut self, bytes: &[u8]) -> DisplayResult<I> {
        self.interface.write_bytes(bytes).map_err(Error::Interface)
    }
}

impl<I> CharTarget for Display<I>
where
    I: SerialInterface,
{
    type Error = Error<I>;

    fn height(&self) -> u8 {
        self.config.geometry.height
    }

    fn chr(&mut self, x: i32, y: i32, code: u8) {
        self.write_char(x, y, code);
    }

    fn icon(&mut self, x: i32, y: i32, icon: Icon) -> Result<(), Self::Error> {
        Display::icon(self, x, y, icon)
    }

    fn define_char(&mut self, slot: u8, pattern: &[u8]) -> Result<(), Self::Error> {
        Display::define_char(self, slot, pattern)
    }
}
