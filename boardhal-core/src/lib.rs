//! Board-agnostic peripheral context manager
//!
//! This crate contains the pin bookkeeping shared by every board variant:
//!
//! - Board description trait (pin table, PWM clock, ADC channel map)
//! - Context registry with weak/shared/greedy access policies
//! - PWM timer period/compare computation
//! - ADC sequencer selection
//! - The [`Hal`] manager that binds pins lazily and dispatches to a
//!   [`boardhal_hal::PeripheralBackend`]
//! - Configuration types, text parsing and postcard persistence
//!
//! ```ignore
//! let mut hal: Hal<_, _, _, 37> = Hal::new(Tm4c123Launchpad, backend, delay);
//! hal.setup();
//! hal.pin_mode(pins::PF1, Mode::Output)?;
//! hal.digital_write(pins::PF1, Level::High)?;
//! hal.pwm_write(pins::PB6, 50)?;
//! let raw = hal.analog_read(pins::PE3)?;
//! hal.wait_ms(10);
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod log;

pub mod adc;
pub mod board;
pub mod config;
pub mod context;
pub mod error;
pub mod hal;
pub mod pin;
pub mod pwm;
pub mod registry;

#[cfg(test)]
pub(crate) mod mock;

pub use board::{Board, PinInfo};
pub use context::{Access, Context, Mode, PeripheralKind, Polarity};
pub use error::HalError;
pub use hal::Hal;
pub use pin::DigitalPin;
pub use registry::Registry;

// Re-export the backend traits and shared value types
pub use boardhal_hal::{
    AdcChannel, Level, PeripheralBackend, PinId, Pull, PwmDivisor, PwmTiming, Sequencer,
};
