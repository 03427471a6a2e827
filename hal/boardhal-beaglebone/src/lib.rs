//! BeagleBone Black board description for boardhal
//!
//! Provides the P8/P9 header map (see [`pins`]), eHRPWM/eCAP PWM routing
//! with the 100 MHz functional clock, and the seven AIN inputs of the
//! touchscreen ADC. Pins parse from header names ("P9_14") or kernel GPIO
//! numbers ("gpio50").

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod pins;

use boardhal_core::{Board, Hal, PeripheralBackend, PinId, PinInfo};
use embedded_hal::delay::DelayNs;

pub use pins::PIN_COUNT;

/// eHRPWM time-base clock (SYSCLKOUT)
pub const PWM_CLOCK_HZ: u32 = 100_000_000;

/// BeagleBone Black
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BeagleBoneBlack;

impl Board for BeagleBoneBlack {
    fn name(&self) -> &'static str {
        "beaglebone-black"
    }

    fn pins(&self) -> &'static [PinInfo] {
        &pins::PINS
    }

    fn pwm_clock_hz(&self) -> u32 {
        PWM_CLOCK_HZ
    }

    fn parse_pin(&self, name: &str) -> Option<PinId> {
        pins::parse_pin_string(name)
    }
}

/// Context manager sized for the header table
pub type BeagleBoneHal<P, D> = Hal<BeagleBoneBlack, P, D, PIN_COUNT>;

/// Create a manager with a cleared context table
pub fn setup<P: PeripheralBackend, D: DelayNs>(backend: P, delay: D) -> BeagleBoneHal<P, D> {
    let mut hal = Hal::new(BeagleBoneBlack, backend, delay);
    hal.setup();
    hal
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardhal_core::config::parse_config;
    use boardhal_core::{HalError, Level, Mode, PeripheralKind, PwmDivisor};
    use boardhal_hal::{
        AdcBackend, AdcChannel, DigitalBackend, ErrorType, Pull, PwmBackend, PwmTiming, Sequencer,
    };
    use pins::*;

    /// Backend that logs which pins each peripheral touched
    #[derive(Default)]
    struct PinLog {
        digital: Vec<PinId>,
        analog: Vec<PinId>,
    }

    impl ErrorType for PinLog {
        type Error = ();
    }

    impl DigitalBackend for PinLog {
        fn configure_input(&mut self, pin: PinId, _: Pull) -> Result<(), ()> {
            self.digital.push(pin);
            Ok(())
        }
        fn configure_output(&mut self, pin: PinId, _: Level) -> Result<(), ()> {
            self.digital.push(pin);
            Ok(())
        }
        fn read_level(&mut self, pin: PinId) -> Result<Level, ()> {
            self.digital.push(pin);
            Ok(Level::Low)
        }
        fn write_level(&mut self, pin: PinId, _: Level) -> Result<(), ()> {
            self.digital.push(pin);
            Ok(())
        }
        fn release_digital(&mut self, pin: PinId) -> Result<(), ()> {
            self.digital.push(pin);
            Ok(())
        }
    }

    impl PwmBackend for PinLog {
        fn enable_pwm(&mut self, _: PinId, _: PwmTiming) -> Result<(), ()> {
            Ok(())
        }
        fn set_pwm_timing(&mut self, _: PinId, _: PwmTiming) -> Result<(), ()> {
            Ok(())
        }
        fn stop_pwm(&mut self, _: PinId) -> Result<(), ()> {
            Ok(())
        }
        fn release_pwm(&mut self, _: PinId) -> Result<(), ()> {
            Ok(())
        }
    }

    impl AdcBackend for PinLog {
        fn enable_adc(&mut self, pin: PinId, _: AdcChannel) -> Result<(), ()> {
            self.analog.push(pin);
            Ok(())
        }
        fn configure_sequencer(&mut self, _: Sequencer, _: &[AdcChannel]) -> Result<(), ()> {
            Ok(())
        }
        fn trigger(&mut self, _: Sequencer) -> Result<(), ()> {
            Ok(())
        }
        fn is_complete(&mut self, _: Sequencer) -> Result<bool, ()> {
            Ok(true)
        }
        fn read_samples(&mut self, _: Sequencer, buf: &mut [u16]) -> Result<usize, ()> {
            buf.fill(1800);
            Ok(buf.len())
        }
        fn release_adc(&mut self, pin: PinId, _: AdcChannel) -> Result<(), ()> {
            self.analog.push(pin);
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _: u32) {}
    }

    #[test]
    fn test_board_lookups() {
        let board = BeagleBoneBlack;
        assert_eq!(board.pin_count(), PIN_COUNT);
        assert!(board.supports_pwm(P9_14));
        assert!(!board.supports_pwm(AIN0));
        assert_eq!(board.adc_channel(AIN5).map(|c| c.index()), Some(5));
        assert_eq!(board.adc_channel(P9_12), None);
        assert!(board.supports_digital(P9_12));
        assert!(!board.supports_digital(AIN0));
    }

    #[test]
    fn test_ain_pins_reject_digital_use() {
        let mut hal = setup(PinLog::default(), NoDelay);
        let unsupported = HalError::Unsupported {
            pin: AIN0,
            kind: PeripheralKind::Digital,
        };

        assert_eq!(hal.pin_mode(AIN0, Mode::Output), Err(unsupported));
        assert_eq!(hal.digital_write(AIN0, Level::High), Err(unsupported));
        assert_eq!(hal.digital_read(AIN0), Err(unsupported));
        assert!(hal.backend().digital.is_empty());
        assert!(!hal.is_bound(AIN0));

        // The analog function is unaffected
        assert_eq!(hal.analog_read(AIN0), Ok(1800));
        assert_eq!(hal.backend().analog, vec![AIN0]);

        // Header pins keep their digital function
        hal.digital_write(P9_12, Level::High).unwrap();
        assert_eq!(hal.backend().digital, vec![P9_12]);
    }

    #[test]
    fn test_config_mixes_name_styles() {
        let text = r#"
[pwm]
divisor = 64

[adc]
sequence = ["AIN0", "P9_40"]

[pin servo]
pin = "P9_14"
mode = "pwm"
frequency = 50

[pin led]
pin = "!gpio60"
mode = "output"
"#;
        let config = parse_config(text, &BeagleBoneBlack).unwrap();
        assert_eq!(config.pwm.divisor, Some(PwmDivisor::Div64));
        assert_eq!(config.adc_sequence.as_slice(), &[AIN0, AIN1]);
        assert_eq!(config.find_pin("servo").map(|p| p.pin), Some(P9_14));
        assert_eq!(config.find_pin("led").map(|p| p.mode), Some(Mode::Output));
    }
}
