//! MSP432P401R board description for boardhal
//!
//! Provides the LaunchPad pin table (see [`pins`]), Timer_A PWM routing,
//! the ADC14 channel map and pin-string parsing. The PWM timers run from
//! SMCLK, which is 3 MHz out of reset.
//!
//! The ADC14 is driven through the same sequencer model as the other
//! boards; the backend maps [`boardhal_core::Sequencer`] onto ADC14
//! memory-control ranges.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod pins;

use boardhal_core::{Board, Hal, PeripheralBackend, PinId, PinInfo};
use embedded_hal::delay::DelayNs;

pub use pins::PIN_COUNT;

/// SMCLK frequency with the default DCO setting
pub const SMCLK_HZ: u32 = 3_000_000;

/// MSP432P401R LaunchPad (MSP-EXP432P401R)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Msp432Launchpad;

impl Board for Msp432Launchpad {
    fn name(&self) -> &'static str {
        "msp432p401r"
    }

    fn pins(&self) -> &'static [PinInfo] {
        &pins::PINS
    }

    fn pwm_clock_hz(&self) -> u32 {
        SMCLK_HZ
    }

    fn parse_pin(&self, name: &str) -> Option<PinId> {
        pins::parse_pin_string(name)
    }
}

/// Context manager sized for the LaunchPad pin table
pub type Msp432Hal<P, D> = Hal<Msp432Launchpad, P, D, PIN_COUNT>;

/// Create a manager with a cleared context table
pub fn setup<P: PeripheralBackend, D: DelayNs>(backend: P, delay: D) -> Msp432Hal<P, D> {
    let mut hal = Hal::new(Msp432Launchpad, backend, delay);
    hal.setup();
    hal
}
