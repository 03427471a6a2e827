//! Board descriptions
//!
//! A board contributes the facts the context manager cannot know on its
//! own: which pins exist (and therefore the size and order of the context
//! table), which of them reach a PWM generator or an ADC input, and the
//! clock feeding the PWM timers.

use boardhal_hal::{AdcChannel, PinId};

/// Static description of one pin on a board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinInfo {
    /// Encoded port/bit identifier
    pub id: PinId,
    /// Silkscreen or datasheet name ("PF1", "P1.0", "P9_14", "GPIO18")
    pub name: &'static str,
    /// Pin has a digital input/output function
    pub digital: bool,
    /// Pin can be routed to a PWM generator
    pub pwm: bool,
    /// ADC input channel reachable from this pin
    pub adc: Option<AdcChannel>,
}

impl PinInfo {
    /// Plain GPIO pin
    pub const fn gpio(id: PinId, name: &'static str) -> Self {
        Self {
            id,
            name,
            digital: true,
            pwm: false,
            adc: None,
        }
    }

    /// Dedicated analog input with no digital function
    pub const fn analog(id: PinId, name: &'static str, channel: u8) -> Self {
        Self {
            id,
            name,
            digital: false,
            pwm: false,
            adc: Some(AdcChannel(channel)),
        }
    }

    /// Mark the pin as PWM capable
    pub const fn with_pwm(mut self) -> Self {
        self.pwm = true;
        self
    }

    /// Attach an ADC channel
    pub const fn with_adc(mut self, channel: u8) -> Self {
        self.adc = Some(AdcChannel(channel));
        self
    }
}

/// Board description consumed by [`crate::Hal`]
///
/// Only `name`, `pins` and `pwm_clock_hz` are required; the lookups have
/// table-driven defaults. Boards override `parse_pin` to accept aliases.
pub trait Board {
    /// Board name used in log output
    fn name(&self) -> &'static str;

    /// Pin table; a pin's position is its context slot
    fn pins(&self) -> &'static [PinInfo];

    /// Clock feeding the PWM timers, before the divisor
    fn pwm_clock_hz(&self) -> u32;

    /// Number of context slots the board needs
    fn pin_count(&self) -> usize {
        self.pins().len()
    }

    /// Context slot for a pin
    fn slot(&self, pin: PinId) -> Option<usize> {
        self.pins().iter().position(|p| p.id == pin)
    }

    /// Table entry for a pin
    fn info(&self, pin: PinId) -> Option<&'static PinInfo> {
        self.pins().iter().find(|p| p.id == pin)
    }

    /// Check if the pin can be used as digital I/O
    fn supports_digital(&self, pin: PinId) -> bool {
        self.info(pin).is_some_and(|p| p.digital)
    }

    /// Check if the pin can drive a PWM generator
    fn supports_pwm(&self, pin: PinId) -> bool {
        self.info(pin).is_some_and(|p| p.pwm)
    }

    /// ADC channel for the pin, if it has an analog function
    fn adc_channel(&self, pin: PinId) -> Option<AdcChannel> {
        self.info(pin).and_then(|p| p.adc)
    }

    /// Resolve a pin name (case-insensitive) to its identifier
    fn parse_pin(&self, name: &str) -> Option<PinId> {
        let name = name.trim();
        self.pins()
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .map(|p| p.id)
    }
}

impl<T: Board + ?Sized> Board for &T {
    fn name(&self) -> &'static str {
        T::name(self)
    }

    fn pins(&self) -> &'static [PinInfo] {
        T::pins(self)
    }

    fn pwm_clock_hz(&self) -> u32 {
        T::pwm_clock_hz(self)
    }

    fn slot(&self, pin: PinId) -> Option<usize> {
        T::slot(self, pin)
    }

    fn info(&self, pin: PinId) -> Option<&'static PinInfo> {
        T::info(self, pin)
    }

    fn supports_digital(&self, pin: PinId) -> bool {
        T::supports_digital(self, pin)
    }

    fn supports_pwm(&self, pin: PinId) -> bool {
        T::supports_pwm(self, pin)
    }

    fn adc_channel(&self, pin: PinId) -> Option<AdcChannel> {
        T::adc_channel(self, pin)
    }

    fn parse_pin(&self, name: &str) -> Option<PinId> {
        T::parse_pin(self, name)
    }
}
