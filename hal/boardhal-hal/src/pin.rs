//! Pin identifiers

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Opaque identifier for a physical GPIO
///
/// Encodes a port/bit pair as `port << 8 | bit`. Boards publish their pins
/// as named constants; the raw value only matters to the board's slot map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct PinId(u16);

impl PinId {
    /// Build an identifier from a port and a bit within that port
    pub const fn new(port: u8, bit: u8) -> Self {
        Self(((port as u16) << 8) | bit as u16)
    }

    /// Wrap a raw encoded value
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Raw encoded value
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Port index
    pub const fn port(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Bit index within the port
    pub const fn bit(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}
