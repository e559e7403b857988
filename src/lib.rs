//! Parallax Serial LCD Driver
//!
//! A driver for the Parallax serial LCD modules 27976 (16x2), 27977 (16x2,
//! backlit) and 27979 (20x4, backlit).
//!
//! ## Features
//!
//! - `no_std` core (needs `alloc` for the frame buffer)
//! - Any [`embedded_io::Write`] transport, or a host serial device with the
//!   `std` feature
//! - Buffered text output, flushed row by row
//! - Vertical and horizontal bar graphs, big numbers, icons
//! - Custom characters, with the 8 glyph slots arbitrated between modes
//!
//! ## Usage
//!
//! ```rust
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use parallax_lcd::{Backlight, Builder, Display, Interface};
//!
//! # #[derive(Debug)]
//! # struct MockUart;
//! # impl embedded_io::ErrorType for MockUart { type Error = Infallible; }
//! # impl embedded_io::Write for MockUart {
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let uart = MockUart;
//! # let mut delay = MockDelay;
//! let interface = Interface::new(uart);
//! let config = match Builder::new().model("27977").speed(19200).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Display::new(interface, config);
//! let _ = display.init(&mut delay);
//! let _ = display.set_backlight(Backlight::On);
//! display.write_string(1, 1, "CPU");
//! let _ = display.hbar(5, 1, 12, 420);
//! let _ = display.flush(&mut delay);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Parallax command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Character frame buffer
pub mod framebuffer;
/// Glyph slot table and built-in glyphs
pub mod glyph;
/// Serial interface abstraction
pub mod interface;
/// Custom character mode tracking
pub mod mode;
/// Bar graph and big number placement
pub mod render;

/// Host serial device transport (requires `std` feature)
#[cfg(feature = "std")]
pub mod tty;

pub use config::{
    BaudRate, Builder, Config, DEFAULT_DEVICE, DEFAULT_MODEL, DEFAULT_SPEED, Geometry, Model,
};
pub use display::{Backlight, DRIVER_INFO, Display, Icon};
pub use error::{BuilderError, Error};
pub use framebuffer::FrameBuffer;
pub use glyph::{GlyphTable, Pattern};
pub use interface::{Interface, InterfaceError, SerialInterface};
pub use mode::{CustomCharMode, ModeState};
pub use render::CharTarget;

#[cfg(feature = "std")]
pub use tty::{StdDelay, TtyInterface};
