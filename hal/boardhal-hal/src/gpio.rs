//! GPIO abstractions
//!
//! Provides the digital levels, pull resistor settings and the register-access
//! trait that chip-specific backends implement.

use crate::{ErrorType, PinId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Digital level of an input or output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// The opposite level
    pub const fn inverted(self) -> Self {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }

    /// Check if this is the high level
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level.is_high()
    }
}

/// Pull-up/pull-down resistor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Pull {
    /// Floating input
    #[default]
    None,
    /// Internal pull-up enabled
    Up,
    /// Internal pull-down enabled
    Down,
}

/// Digital pin register access
///
/// Implementations handle the actual register manipulation (or sysfs file
/// writes) for one chip family. The caller guarantees the pin has been
/// validated against the board's pin table before any method is invoked.
pub trait DigitalBackend: ErrorType {
    /// Configure the pin as an input with the given pull resistor
    fn configure_input(&mut self, pin: PinId, pull: Pull) -> Result<(), Self::Error>;

    /// Configure the pin as a push-pull output driving `initial`
    fn configure_output(&mut self, pin: PinId, initial: Level) -> Result<(), Self::Error>;

    /// Sample the raw electrical level on the pin
    fn read_level(&mut self, pin: PinId) -> Result<Level, Self::Error>;

    /// Drive the raw electrical level on the pin
    fn write_level(&mut self, pin: PinId, level: Level) -> Result<(), Self::Error>;

    /// Return the pin to its reset state and drop any descriptor held for it
    fn release_digital(&mut self, pin: PinId) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_conversions() {
        assert_eq!(Level::from(true), Level::High);
        assert_eq!(Level::from(false), Level::Low);
        assert!(bool::from(Level::High));
        assert_eq!(Level::High.inverted(), Level::Low);
        assert_eq!(Level::Low.inverted(), Level::High);
    }

    #[test]
    fn test_pull_default_is_floating() {
        assert_eq!(Pull::default(), Pull::None);
    }
}
