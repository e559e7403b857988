//! Custom character mode tracking
//!
//! The module has only eight programmable glyph slots, so bars, big numbers and
//! plain text with icons cannot all have their glyphs loaded at once. The active
//! [`CustomCharMode`] is the single owner of the slots it needs; any drawing
//! primitive that wants glyphs has to acquire its mode through [`ModeState`].

use core::ops::RangeInclusive;

/// Mode that currently owns the programmable glyph slots
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CustomCharMode {
    /// No bar or number glyphs loaded
    #[default]
    Standard,
    /// Vertical bar glyphs in slots 1-7
    VerticalBar,
    /// Horizontal bar glyphs in slots 1-4
    HorizontalBar,
    /// Big number glyphs, using every slot
    BigNumber,
}

impl CustomCharMode {
    /// Glyph slots this mode claims, if any
    pub fn owned_slots(self) -> Option<RangeInclusive<u8>> {
        match self {
            Self::Standard => None,
            Self::VerticalBar => Some(1..=7),
            Self::HorizontalBar => Some(1..=4),
            Self::BigNumber => Some(0..=7),
        }
    }

    /// Whether this mode claims glyph slot `slot`
    pub fn owns_slot(self, slot: u8) -> bool {
        self.owned_slots()
            .is_some_and(|slots| slots.contains(&slot))
    }
}

impl core::fmt::Display for CustomCharMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Standard => "standard",
            Self::VerticalBar => "vbar",
            Self::HorizontalBar => "hbar",
            Self::BigNumber => "bignum",
        };
        f.write_str(name)
    }
}

/// Result of a successful [`ModeState::acquire`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Acquired {
    /// The mode was just entered; its glyphs must be programmed
    Entered,
    /// The mode was already active; its glyphs are loaded
    AlreadyActive,
}

impl Acquired {
    /// Whether glyphs have to be (re)programmed
    pub fn needs_init(self) -> bool {
        self == Self::Entered
    }
}

/// Acquisition refused because another mode owns the slots
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeConflict {
    /// Mode currently active
    pub active: CustomCharMode,
    /// Mode that was requested
    pub requested: CustomCharMode,
}

/// Custom character mode state machine
///
/// Starts in [`CustomCharMode::Standard`]. A mode can only be entered from
/// Standard, and the only way back to Standard is [`ModeState::reset`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModeState {
    active: CustomCharMode,
}

impl ModeState {
    /// Create a state machine in Standard mode
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently active mode
    pub fn active(&self) -> CustomCharMode {
        self.active
    }

    /// Acquire the glyph slots for `requested`
    ///
    /// # Errors
    ///
    /// Returns [`ModeConflict`] when a different mode is active. The state is
    /// left unchanged in that case.
    pub fn acquire(&mut self, requested: CustomCharMode) -> Result<Acquired, ModeConflict> {
        if self.active == requested {
            return Ok(Acquired::AlreadyActive);
        }
        if self.active != CustomCharMode::Standard {
            return Err(ModeConflict {
                active: self.active,
                requested,
            });
        }
        self.active = requested;
        Ok(Acquired::Entered)
    }

    /// Return to Standard, returning the mode that was released
    pub fn reset(&mut self) -> CustomCharMode {
        core::mem::take(&mut self.active)
    }
}
