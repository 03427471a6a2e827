//! ADC channel and sequencer abstractions
//!
//! The sample sequencer model follows the TM4C ADC: four sequencers with
//! FIFO depths of 8, 4, 4 and 1 samples. Chips with a single conversion
//! register expose only [`Sequencer::Ss3`] semantics.

use crate::{ErrorType, PinId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// ADC input channel number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AdcChannel(pub u8);

impl AdcChannel {
    /// Channel number as used by the chip's mux
    pub const fn index(self) -> u8 {
        self.0
    }
}

/// Sample sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sequencer {
    /// Eight-sample sequencer
    Ss0,
    /// Four-sample sequencer
    Ss1,
    /// Four-sample sequencer
    Ss2,
    /// Single-sample sequencer
    Ss3,
}

impl Sequencer {
    /// FIFO depth (maximum number of channels in one sequence)
    pub const fn depth(self) -> usize {
        match self {
            Sequencer::Ss0 => 8,
            Sequencer::Ss1 | Sequencer::Ss2 => 4,
            Sequencer::Ss3 => 1,
        }
    }

    /// Sequencer number
    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// ADC register access
pub trait AdcBackend: ErrorType {
    /// Switch the pin to its analog function
    fn enable_adc(&mut self, pin: PinId, channel: AdcChannel) -> Result<(), Self::Error>;

    /// Program the sequencer steps, in order; the last step ends the sequence
    fn configure_sequencer(
        &mut self,
        sequencer: Sequencer,
        channels: &[AdcChannel],
    ) -> Result<(), Self::Error>;

    /// Start a conversion on the sequencer (processor trigger)
    fn trigger(&mut self, sequencer: Sequencer) -> Result<(), Self::Error>;

    /// Check the sequencer's completion flag
    fn is_complete(&mut self, sequencer: Sequencer) -> Result<bool, Self::Error>;

    /// Drain the sequencer FIFO into `buf`, returning the number of samples
    fn read_samples(&mut self, sequencer: Sequencer, buf: &mut [u16])
        -> Result<usize, Self::Error>;

    /// Return the pin to digital function
    fn release_adc(&mut self, pin: PinId, channel: AdcChannel) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequencer_depths() {
        assert_eq!(Sequencer::Ss0.depth(), 8);
        assert_eq!(Sequencer::Ss1.depth(), 4);
        assert_eq!(Sequencer::Ss2.depth(), 4);
        assert_eq!(Sequencer::Ss3.depth(), 1);
        assert_eq!(Sequencer::Ss3.index(), 3);
    }
}
