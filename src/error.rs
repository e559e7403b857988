//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level serial write errors
//!
//! Only transport failures are real faults. The other [`Error`] variants report a
//! call that was refused (mode conflict, unsupported icon, ...); the display and
//! driver state are untouched and the caller is free to ignore them.
//!
//! ## Example
//!
//! ```
//! use parallax_lcd::{BuilderError, Geometry};
//!
//! // Zero-sized geometry
//! let result = Geometry::new(0, 2, 5, 8, true);
//! assert!(matches!(result, Err(BuilderError::InvalidGeometry { .. })));
//! ```

use crate::display::Icon;
use crate::interface::SerialInterface;
use crate::mode::{CustomCharMode, ModeConflict};

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: SerialInterface> {
    /// Serial write error
    ///
    /// Wraps the underlying error from the [`SerialInterface`] implementation.
    Interface(I::Error),
    /// Glyph slots are owned by another custom character mode
    ///
    /// Bars and big numbers cannot share the display until it is cleared.
    ModeConflict {
        /// Mode currently owning the slots
        active: CustomCharMode,
        /// Mode the call needed
        requested: CustomCharMode,
    },
    /// Icon not available, either at all or in the active mode
    UnsupportedIcon(Icon),
    /// Glyph slot index outside 0-7
    InvalidSlot(u8),
    /// Glyph definition without any pattern rows
    MissingPattern,
    /// Big number outside 0-10 (10 is the colon)
    InvalidBigNumber(u8),
}

impl<I: SerialInterface> From<ModeConflict> for Error<I> {
    fn from(conflict: ModeConflict) -> Self {
        Self::ModeConflict {
            active: conflict.active,
            requested: conflict.requested,
        }
    }
}

impl<I: SerialInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::ModeConflict { active, requested } => write!(
                f,
                "cannot combine two modes using user-defined characters: {requested} while {active} is active"
            ),
            Self::UnsupportedIcon(icon) => write!(f, "Unsupported icon: {icon:?}"),
            Self::InvalidSlot(slot) => write!(f, "Invalid custom character slot: {slot}"),
            Self::MissingPattern => write!(f, "Custom character pattern is empty"),
            Self::InvalidBigNumber(num) => write!(f, "Invalid big number: {num}"),
        }
    }
}

impl<I: SerialInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the display is created.
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Invalid geometry provided
    ///
    /// See [`Geometry::new()`](crate::config::Geometry::new) for constraints.
    InvalidGeometry {
        /// Width in cells
        width: u8,
        /// Height in cells
        height: u8,
        /// Cell width in pixels
        cell_width: u8,
        /// Cell height in pixels
        cell_height: u8,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidGeometry {
                width,
                height,
                cell_width,
                cell_height,
            } => write!(
                f,
                "Invalid geometry {width}x{height} cells of {cell_width}x{cell_height} pixels (all must be non-zero, cells at most 5x8)"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
