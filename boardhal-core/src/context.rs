//! Peripheral contexts
//!
//! A context is the runtime state bound to a pin while it plays one
//! peripheral role. Its kind is fixed for its whole lifetime; changing a
//! pin's role means freeing the context and creating a new one.

use boardhal_hal::{AdcChannel, Level, PinId, Pull, PwmTiming};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Peripheral role of a context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeripheralKind {
    /// Digital input or output
    Digital,
    /// Timer-driven PWM output
    Pwm,
    /// Analog input
    Adc,
}

/// Access policy applied when a pin is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access {
    /// Fail if the pin is already bound
    Weak,
    /// Join an existing context, incrementing its share counter
    #[default]
    Shared,
    /// Take ownership unconditionally, resetting the share counter to one
    Greedy,
}

/// Pin mode requested through `pin_mode`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    /// Floating digital input
    Input,
    /// Digital input with pull-up (reads active-low by default)
    InputPullUp,
    /// Digital input with pull-down
    InputPullDown,
    /// Push-pull digital output
    Output,
    /// Analog input
    AnalogInput,
    /// PWM output
    PwmOutput,
}

impl Mode {
    /// Peripheral kind a pin in this mode is bound as
    pub const fn kind(self) -> PeripheralKind {
        match self {
            Mode::Input | Mode::InputPullUp | Mode::InputPullDown | Mode::Output => {
                PeripheralKind::Digital
            }
            Mode::AnalogInput => PeripheralKind::Adc,
            Mode::PwmOutput => PeripheralKind::Pwm,
        }
    }

    /// Pull resistor for digital input modes
    pub const fn pull(self) -> Pull {
        match self {
            Mode::InputPullUp => Pull::Up,
            Mode::InputPullDown => Pull::Down,
            _ => Pull::None,
        }
    }
}

/// Direction of a digital pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Input,
    Output,
}

/// Mapping between logical and electrical levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Polarity {
    /// Logical high is electrical high
    #[default]
    ActiveHigh,
    /// Logical high is electrical low
    ActiveLow,
}

impl Polarity {
    /// Default polarity for an input with the given pull resistor
    ///
    /// A pulled-up input idles high, so its asserted state is low.
    pub const fn for_pull(pull: Pull) -> Self {
        match pull {
            Pull::Up => Polarity::ActiveLow,
            _ => Polarity::ActiveHigh,
        }
    }

    /// Convert between logical and electrical level (the mapping is symmetric)
    pub const fn apply(self, level: Level) -> Level {
        match self {
            Polarity::ActiveHigh => level,
            Polarity::ActiveLow => level.inverted(),
        }
    }
}

/// Digital payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitalState {
    pub direction: Direction,
    pub pull: Pull,
    pub polarity: Polarity,
    /// Last logical level written (outputs only)
    pub level: Level,
}

impl DigitalState {
    /// State for a pin entering a digital mode
    pub fn for_mode(mode: Mode, level: Level) -> Self {
        let pull = mode.pull();
        Self {
            direction: if mode == Mode::Output {
                Direction::Output
            } else {
                Direction::Input
            },
            pull,
            polarity: Polarity::for_pull(pull),
            level,
        }
    }
}

/// PWM payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmState {
    /// Output frequency in Hz
    pub frequency_hz: u32,
    /// Duty cycle in percent (0-100)
    pub duty: u8,
    /// Register values currently loaded
    pub timing: PwmTiming,
    /// Generator is counting (false after a zero duty)
    pub running: bool,
}

/// ADC payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcState {
    pub channel: AdcChannel,
}

/// Type-specific state of a context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Payload {
    Digital(DigitalState),
    Pwm(PwmState),
    Adc(AdcState),
}

impl Payload {
    /// Kind of this payload
    pub const fn kind(&self) -> PeripheralKind {
        match self {
            Payload::Digital(_) => PeripheralKind::Digital,
            Payload::Pwm(_) => PeripheralKind::Pwm,
            Payload::Adc(_) => PeripheralKind::Adc,
        }
    }
}

/// Runtime state bound to one pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Context {
    pub(crate) pin: PinId,
    pub(crate) access: Access,
    pub(crate) users: u8,
    pub(crate) payload: Payload,
}

impl Context {
    pub(crate) fn new(pin: PinId, access: Access, payload: Payload) -> Self {
        Self {
            pin,
            access,
            users: 1,
            payload,
        }
    }

    /// Pin this context is bound to
    pub fn pin(&self) -> PinId {
        self.pin
    }

    /// Peripheral role
    pub fn kind(&self) -> PeripheralKind {
        self.payload.kind()
    }

    /// Access mode of the most recent acquisition
    pub fn access(&self) -> Access {
        self.access
    }

    /// Share counter
    pub fn users(&self) -> u8 {
        self.users
    }

    /// Type-specific state
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Digital state, if this is a digital context
    pub fn digital(&self) -> Option<&DigitalState> {
        match &self.payload {
            Payload::Digital(d) => Some(d),
            _ => None,
        }
    }

    /// PWM state, if this is a PWM context
    pub fn pwm(&self) -> Option<&PwmState> {
        match &self.payload {
            Payload::Pwm(p) => Some(p),
            _ => None,
        }
    }

    /// ADC state, if this is an ADC context
    pub fn adc(&self) -> Option<&AdcState> {
        match &self.payload {
            Payload::Adc(a) => Some(a),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_kinds() {
        assert_eq!(Mode::Input.kind(), PeripheralKind::Digital);
        assert_eq!(Mode::InputPullUp.kind(), PeripheralKind::Digital);
        assert_eq!(Mode::Output.kind(), PeripheralKind::Digital);
        assert_eq!(Mode::AnalogInput.kind(), PeripheralKind::Adc);
        assert_eq!(Mode::PwmOutput.kind(), PeripheralKind::Pwm);
    }

    #[test]
    fn test_pull_up_reads_active_low() {
        let state = DigitalState::for_mode(Mode::InputPullUp, Level::Low);
        assert_eq!(state.pull, Pull::Up);
        assert_eq!(state.polarity, Polarity::ActiveLow);
        assert_eq!(state.polarity.apply(Level::Low), Level::High);

        let state = DigitalState::for_mode(Mode::InputPullDown, Level::Low);
        assert_eq!(state.polarity, Polarity::ActiveHigh);
    }

    #[test]
    fn test_output_direction() {
        let state = DigitalState::for_mode(Mode::Output, Level::High);
        assert_eq!(state.direction, Direction::Output);
        assert_eq!(state.level, Level::High);
    }
}
