//! boardhal Hardware Abstraction Layer
//!
//! This crate defines the register-access primitives that the board-agnostic
//! context manager in `boardhal-core` dispatches to. A chip family (TM4C
//! driverlib, MSP432 driverlib, BeagleBone sysfs, ...) implements these
//! traits once; the pin bookkeeping on top of them is shared.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application                            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  boardhal-core (context registry, Hal)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  boardhal-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!     ┌───────────┬───┴───────┬────────────┐
//!     ▼           ▼           ▼            ▼
//!  tm4c        msp432     beaglebone      rpi
//! ```
//!
//! # Traits
//!
//! - [`gpio::DigitalBackend`] - Digital I/O
//! - [`pwm::PwmBackend`] - Timer-driven PWM generators
//! - [`adc::AdcBackend`] - ADC channels and sample sequencers
//! - [`PeripheralBackend`] - All of the above

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod pin;
pub mod pwm;

pub use adc::{AdcBackend, AdcChannel, Sequencer};
pub use gpio::{DigitalBackend, Level, Pull};
pub use pin::PinId;
pub use pwm::{PwmBackend, PwmDivisor, PwmTiming};

/// Error type shared by every backend trait
///
/// Mirrors the `ErrorType` split used by `embedded-hal` so that one backend
/// value can implement all peripheral traits with a single error type.
pub trait ErrorType {
    /// Error reported by the register-access layer
    type Error: core::fmt::Debug;
}

impl<T: ErrorType + ?Sized> ErrorType for &mut T {
    type Error = T::Error;
}

/// A backend able to drive every peripheral kind the context manager knows
pub trait PeripheralBackend: DigitalBackend + PwmBackend + AdcBackend {}

impl<T: DigitalBackend + PwmBackend + AdcBackend> PeripheralBackend for T {}
