//! `embedded-hal` adapter
//!
//! A [`DigitalPin`] borrows the manager for one pin so that drivers written
//! against `embedded_hal::digital` can run on any board.

use boardhal_hal::{Level, PeripheralBackend, PinId};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};

use crate::board::Board;
use crate::error::HalError;
use crate::hal::Hal;

/// One digital pin borrowed from a [`Hal`]
pub struct DigitalPin<'a, B, P, D, const N: usize> {
    hal: &'a mut Hal<B, P, D, N>,
    pin: PinId,
}

impl<B, P, D, const N: usize> Hal<B, P, D, N>
where
    B: Board,
    P: PeripheralBackend,
    D: DelayNs,
{
    /// Borrow a pin as an `embedded-hal` digital pin
    ///
    /// The pin is bound lazily by the first read or write, like any other
    /// digital operation.
    pub fn pin(&mut self, pin: PinId) -> Result<DigitalPin<'_, B, P, D, N>, HalError<P::Error>> {
        self.slot(pin)?;
        Ok(DigitalPin { hal: self, pin })
    }
}

impl<B, P, D, const N: usize> DigitalPin<'_, B, P, D, N> {
    /// Identifier of the borrowed pin
    pub fn id(&self) -> PinId {
        self.pin
    }
}

impl<B, P, D, const N: usize> ErrorType for DigitalPin<'_, B, P, D, N>
where
    P: PeripheralBackend,
{
    type Error = HalError<P::Error>;
}

impl<B, P, D, const N: usize> InputPin for DigitalPin<'_, B, P, D, N>
where
    B: Board,
    P: PeripheralBackend,
    D: DelayNs,
{
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.hal.digital_read(self.pin).map(Level::is_high)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

impl<B, P, D, const N: usize> OutputPin for DigitalPin<'_, B, P, D, N>
where
    B: Board,
    P: PeripheralBackend,
    D: DelayNs,
{
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.hal.digital_write(self.pin, Level::Low)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.hal.digital_write(self.pin, Level::High)
    }
}

impl<B, P, D, const N: usize> StatefulOutputPin for DigitalPin<'_, B, P, D, N>
where
    B: Board,
    P: PeripheralBackend,
    D: DelayNs,
{
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        self.hal.output_level(self.pin).map(Level::is_high)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        self.is_set_high().map(|high| !high)
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        self.hal.digital_toggle(self.pin)
    }
}
