//! PWM timing computation
//!
//! Converts a frequency and duty cycle into period/compare register values
//! for a 16-bit count-down generator:
//!
//! ```text
//! period  = clock_hz / divisor / frequency_hz
//! compare = period * duty / 100
//! ```

use boardhal_hal::{PwmDivisor, PwmTiming};

use crate::error::PwmError;

/// Largest period the 16-bit generator can count
pub const MAX_PERIOD: u32 = u16::MAX as u32;

/// Smallest period that still yields a waveform
pub const MIN_PERIOD: u32 = 2;

/// Frequency used when a pin is bound as PWM without an explicit one
pub const DEFAULT_FREQUENCY_HZ: u32 = 1_000;

/// Peripheral clock and divisor feeding the PWM generators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmClock {
    /// Undivided peripheral clock
    pub clock_hz: u32,
    /// Configured divisor
    pub divisor: PwmDivisor,
}

impl PwmClock {
    /// Create a clock description
    pub const fn new(clock_hz: u32, divisor: PwmDivisor) -> Self {
        Self { clock_hz, divisor }
    }

    /// Smallest divisor that can reach `frequency_hz`
    ///
    /// Falls back to the largest divisor when nothing fits.
    pub fn for_frequency(clock_hz: u32, frequency_hz: u32) -> Self {
        let divisor = PwmDivisor::ALL
            .iter()
            .copied()
            .find(|&d| Self::new(clock_hz, d).timing(frequency_hz, 0).is_ok())
            .unwrap_or(PwmDivisor::Div64);
        Self::new(clock_hz, divisor)
    }

    /// Clock seen by the counter after the divisor
    pub const fn tick_hz(&self) -> u32 {
        self.clock_hz / self.divisor.ratio()
    }

    /// Lowest frequency reachable with this divisor
    pub fn min_frequency_hz(&self) -> u32 {
        self.tick_hz().div_ceil(MAX_PERIOD).max(1)
    }

    /// Highest frequency reachable with this divisor
    pub fn max_frequency_hz(&self) -> u32 {
        self.tick_hz() / MIN_PERIOD
    }

    /// Compute register values for `frequency_hz` at `duty` percent
    pub fn timing(&self, frequency_hz: u32, duty: u8) -> Result<PwmTiming, PwmError> {
        if duty > 100 {
            return Err(PwmError::InvalidDuty(duty));
        }
        if frequency_hz == 0 {
            return Err(PwmError::FrequencyOutOfRange(frequency_hz));
        }

        let period = self.tick_hz() / frequency_hz;
        if !(MIN_PERIOD..=MAX_PERIOD).contains(&period) {
            return Err(PwmError::FrequencyOutOfRange(frequency_hz));
        }

        let compare = period * u32::from(duty) / 100;

        // Both fit in 16 bits: period <= MAX_PERIOD and compare <= period
        Ok(PwmTiming {
            divisor: self.divisor,
            period: period as u16,
            compare: compare as u16,
        })
    }
}
