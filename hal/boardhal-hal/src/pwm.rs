//! PWM generator abstractions
//!
//! Timing values are computed by the context manager from the board's
//! peripheral clock; backends only load them into their timer registers.

use crate::{ErrorType, PinId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// PWM clock divisor applied to the peripheral clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PwmDivisor {
    #[default]
    Div1,
    Div2,
    Div4,
    Div8,
    Div16,
    Div32,
    Div64,
}

impl PwmDivisor {
    /// All divisors, smallest first
    pub const ALL: [PwmDivisor; 7] = [
        PwmDivisor::Div1,
        PwmDivisor::Div2,
        PwmDivisor::Div4,
        PwmDivisor::Div8,
        PwmDivisor::Div16,
        PwmDivisor::Div32,
        PwmDivisor::Div64,
    ];

    /// Numeric divide ratio
    pub const fn ratio(self) -> u32 {
        match self {
            PwmDivisor::Div1 => 1,
            PwmDivisor::Div2 => 2,
            PwmDivisor::Div4 => 4,
            PwmDivisor::Div8 => 8,
            PwmDivisor::Div16 => 16,
            PwmDivisor::Div32 => 32,
            PwmDivisor::Div64 => 64,
        }
    }

    /// Look up a divisor by its numeric ratio
    pub fn from_ratio(ratio: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.ratio() == ratio)
    }
}

/// Register values for one PWM generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmTiming {
    /// Clock divisor
    pub divisor: PwmDivisor,
    /// Timer period in divided clock ticks
    pub period: u16,
    /// Compare value (high time) in divided clock ticks
    pub compare: u16,
}

/// PWM generator register access
pub trait PwmBackend: ErrorType {
    /// Route the pin to its generator, load `timing` and start counting
    fn enable_pwm(&mut self, pin: PinId, timing: PwmTiming) -> Result<(), Self::Error>;

    /// Reload period and compare on a running generator
    fn set_pwm_timing(&mut self, pin: PinId, timing: PwmTiming) -> Result<(), Self::Error>;

    /// Stop the generator and force the output low
    fn stop_pwm(&mut self, pin: PinId) -> Result<(), Self::Error>;

    /// Disconnect the pin from its generator
    fn release_pwm(&mut self, pin: PinId) -> Result<(), Self::Error>;
}
