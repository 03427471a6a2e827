//! Raspberry Pi board description for boardhal
//!
//! Provides the BCM2835 GPIO table (see [`pins`]) and the two PWM channels.
//! The PWM clock manager is fed from the 19.2 MHz crystal. There is no ADC;
//! analog operations fail with `HalError::Unsupported`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod pins;

use boardhal_core::{Board, Hal, PeripheralBackend, PinId, PinInfo};
use embedded_hal::delay::DelayNs;

pub use pins::PIN_COUNT;

/// PWM clock source (oscillator)
pub const PWM_CLOCK_HZ: u32 = 19_200_000;

/// Raspberry Pi with the 40-pin header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RaspberryPi;

impl Board for RaspberryPi {
    fn name(&self) -> &'static str {
        "raspberry-pi"
    }

    fn pins(&self) -> &'static [PinInfo] {
        &pins::PINS
    }

    fn pwm_clock_hz(&self) -> u32 {
        PWM_CLOCK_HZ
    }

    // Table is contiguous in BCM order
    fn slot(&self, pin: PinId) -> Option<usize> {
        let n = pin.bit();
        (pin.port() == 0 && (pins::FIRST_GPIO..=pins::LAST_GPIO).contains(&n))
            .then(|| usize::from(n - pins::FIRST_GPIO))
    }

    fn parse_pin(&self, name: &str) -> Option<PinId> {
        pins::parse_pin_string(name)
    }
}

/// Context manager sized for the header table
pub type RpiHal<P, D> = Hal<RaspberryPi, P, D, PIN_COUNT>;

/// Create a manager with a cleared context table
pub fn setup<P: PeripheralBackend, D: DelayNs>(backend: P, delay: D) -> RpiHal<P, D> {
    let mut hal = Hal::new(RaspberryPi, backend, delay);
    hal.setup();
    hal
}
