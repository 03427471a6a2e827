//! Error types
//!
//! Every operation reports failure through [`HalError`]. Callers that still
//! speak the integer convention can use [`HalError::code`], which maps each
//! variant to a stable negative number.

use boardhal_hal::PinId;

use crate::context::PeripheralKind;

/// Errors returned by the context manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError<E> {
    /// Pin is not in the board's table
    InvalidPin(PinId),
    /// Pin is bound to a different peripheral kind
    TypeConflict {
        pin: PinId,
        bound: PeripheralKind,
        requested: PeripheralKind,
    },
    /// Pin is already bound and the access policy forbids joining
    Busy(PinId),
    /// Release requested for a pin with no context
    NotBound(PinId),
    /// Digital write on a pin configured as input
    NotOutput(PinId),
    /// Pin has no route to the requested peripheral
    Unsupported { pin: PinId, kind: PeripheralKind },
    /// Duty cycle above 100%
    InvalidDuty(u8),
    /// Frequency cannot be reached with the current clock divisor
    FrequencyOutOfRange(u32),
    /// ADC sequence with no channels
    EmptySequence,
    /// More channels than the deepest sequencer holds
    SequenceTooLong(usize),
    /// Sequence read before `configure_adc_sequence`
    SequenceNotConfigured,
    /// Conversion did not complete within the poll budget
    AdcTimeout,
    /// Conversion completed but the sequencer FIFO was empty
    NoSamples,
    /// Register-access layer failure
    Backend(E),
}

impl<E> HalError<E> {
    /// Negative integer code for C-style callers
    pub fn code(&self) -> i32 {
        match self {
            HalError::InvalidPin(_) => -1,
            HalError::TypeConflict { .. } => -2,
            HalError::Busy(_) => -3,
            HalError::NotBound(_) => -4,
            HalError::NotOutput(_) => -5,
            HalError::Unsupported { .. } => -6,
            HalError::InvalidDuty(_) => -7,
            HalError::FrequencyOutOfRange(_) => -8,
            HalError::EmptySequence => -9,
            HalError::SequenceTooLong(_) => -10,
            HalError::SequenceNotConfigured => -11,
            HalError::AdcTimeout => -12,
            HalError::Backend(_) => -13,
            HalError::NoSamples => -14,
        }
    }

    /// Check if the error came from the register-access layer
    pub fn is_backend(&self) -> bool {
        matches!(self, HalError::Backend(_))
    }
}

impl<E: core::fmt::Debug> embedded_hal::digital::Error for HalError<E> {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

/// Bookkeeping failures raised by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// Slot outside the table
    InvalidPin(PinId),
    /// Slot holds a context of another kind
    TypeConflict {
        pin: PinId,
        bound: PeripheralKind,
        requested: PeripheralKind,
    },
    /// Access policy refused the request
    Busy(PinId),
    /// Slot is empty
    NotBound(PinId),
}

impl<E> From<RegistryError> for HalError<E> {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::InvalidPin(pin) => HalError::InvalidPin(pin),
            RegistryError::TypeConflict {
                pin,
                bound,
                requested,
            } => HalError::TypeConflict {
                pin,
                bound,
                requested,
            },
            RegistryError::Busy(pin) => HalError::Busy(pin),
            RegistryError::NotBound(pin) => HalError::NotBound(pin),
        }
    }
}

/// PWM timing failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmError {
    /// Duty cycle above 100%
    InvalidDuty(u8),
    /// Period does not fit the timer
    FrequencyOutOfRange(u32),
}

impl<E> From<PwmError> for HalError<E> {
    fn from(err: PwmError) -> Self {
        match err {
            PwmError::InvalidDuty(duty) => HalError::InvalidDuty(duty),
            PwmError::FrequencyOutOfRange(hz) => HalError::FrequencyOutOfRange(hz),
        }
    }
}

/// ADC sequence planning failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcError {
    /// No channels requested
    EmptySequence,
    /// More channels than the deepest sequencer holds
    SequenceTooLong(usize),
}

impl<E> From<AdcError> for HalError<E> {
    fn from(err: AdcError) -> Self {
        match err {
            AdcError::EmptySequence => HalError::EmptySequence,
            AdcError::SequenceTooLong(n) => HalError::SequenceTooLong(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Error = HalError<()>;

    #[test]
    fn test_codes_are_negative_and_distinct() {
        let pin = PinId::new(0, 0);
        let errors: [Error; 14] = [
            HalError::InvalidPin(pin),
            HalError::TypeConflict {
                pin,
                bound: PeripheralKind::Digital,
                requested: PeripheralKind::Pwm,
            },
            HalError::Busy(pin),
            HalError::NotBound(pin),
            HalError::NotOutput(pin),
            HalError::Unsupported {
                pin,
                kind: PeripheralKind::Adc,
            },
            HalError::InvalidDuty(101),
            HalError::FrequencyOutOfRange(1),
            HalError::EmptySequence,
            HalError::SequenceTooLong(9),
            HalError::SequenceNotConfigured,
            HalError::AdcTimeout,
            HalError::NoSamples,
            HalError::Backend(()),
        ];

        for (i, a) in errors.iter().enumerate() {
            assert!(a.code() < 0);
            for b in &errors[i + 1..] {
                assert_ne!(a.code(), b.code());
            }
        }
    }

    #[test]
    fn test_registry_error_conversion() {
        let pin = PinId::new(1, 2);
        let err: Error = RegistryError::Busy(pin).into();
        assert_eq!(err, HalError::Busy(pin));
        assert!(!err.is_backend());
        assert!(Error::Backend(()).is_backend());
    }
}
