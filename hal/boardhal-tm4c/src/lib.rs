//! TM4C123 board description for boardhal
//!
//! This crate provides the TM4C123GXL LaunchPad (Tiva C) facts the context
//! manager needs:
//!
//! - Pin constants and the 37-entry pin table (see [`pins`])
//! - PWM routing and the 80 MHz PWM module clock
//! - ADC0 channel map (AIN0-AIN11)
//! - Pin-string parsing with LaunchPad aliases ("RED_LED", "SW1")
//!
//! Register access stays in the caller's [`PeripheralBackend`]; this crate
//! never touches hardware itself.
//!
//! # Usage
//!
//! ```ignore
//! let mut hal = boardhal_tm4c::setup(backend, delay);
//! hal.digital_write(pins::RED_LED, Level::High)?;
//! hal.pwm_write(pins::PB6, 25)?;
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod pins;

use boardhal_core::{Board, Hal, PeripheralBackend, PinId, PinInfo};
use embedded_hal::delay::DelayNs;

pub use pins::PIN_COUNT;

/// PWM module clock with the system clock at 80 MHz (PWMDIV bypassed)
pub const PWM_CLOCK_HZ: u32 = 80_000_000;

/// TM4C123GXL LaunchPad
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tm4c123Launchpad;

impl Board for Tm4c123Launchpad {
    fn name(&self) -> &'static str {
        "tm4c123"
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

/// Context manager sized for the LaunchPad pin table
pub type Tm4cHal<P, D> = Hal<Tm4c123Launchpad, P, D, PIN_COUNT>;

/// Create a manager with a cleared context table
pub fn setup<P: PeripheralBackend, D: DelayNs>(backend: P, delay: D) -> Tm4cHal<P, D> {
    let mut hal = Hal::new(Tm4c123Launchpad, backend, delay);
    hal.setup();
    hal
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardhal_core::config::parse_config;
    use boardhal_core::{HalError, Level, Mode, PeripheralKind, PwmDivisor, Sequencer};
    use boardhal_hal::{
        AdcBackend, AdcChannel, DigitalBackend, ErrorType, Pull, PwmBackend, PwmTiming,
    };
    use pins::*;

    /// Backend that accepts everything and remembers the last PWM timing
    #[derive(Default)]
    struct NullBackend {
        calls: usize,
        last_timing: Option<PwmTiming>,
        sequencer: Option<Sequencer>,
    }

    impl ErrorType for NullBackend {
        type Error = ();
    }

    impl DigitalBackend for NullBackend {
        fn configure_input(&mut self, _: PinId, _: Pull) -> Result<(), ()> {
            self.calls += 1;
            Ok(())
        }
        fn configure_output(&mut self, _: PinId, _: Level) -> Result<(), ()> {
            self.calls += 1;
            Ok(())
        }
        fn read_level(&mut self, _: PinId) -> Result<Level, ()> {
            self.calls += 1;
            Ok(Level::Low)
        }
        fn write_level(&mut self, _: PinId, _: Level) -> Result<(), ()> {
            self.calls += 1;
            Ok(())
        }
        fn release_digital(&mut self, _: PinId) -> Result<(), ()> {
            self.calls += 1;
            Ok(())
        }
    }

    impl PwmBackend for NullBackend {
        fn enable_pwm(&mut self, _: PinId, timing: PwmTiming) -> Result<(), ()> {
            self.calls += 1;
            self.last_timing = Some(timing);
            Ok(())
        }
        fn set_pwm_timing(&mut self, _: PinId, timing: PwmTiming) -> Result<(), ()> {
            self.calls += 1;
            self.last_timing = Some(timing);
            Ok(())
        }
        fn stop_pwm(&mut self, _: PinId) -> Result<(), ()> {
            self.calls += 1;
            Ok(())
        }
        fn release_pwm(&mut self, _: PinId) -> Result<(), ()> {
            self.calls += 1;
            Ok(())
        }
    }

    impl AdcBackend for NullBackend {
        fn enable_adc(&mut self, _: PinId, _: AdcChannel) -> Result<(), ()> {
            self.calls += 1;
            Ok(())
        }
        fn configure_sequencer(&mut self, seq: Sequencer, _: &[AdcChannel]) -> Result<(), ()> {
            self.calls += 1;
            self.sequencer = Some(seq);
            Ok(())
        }
        fn trigger(&mut self, _: Sequencer) -> Result<(), ()> {
            self.calls += 1;
            Ok(())
        }
        fn is_complete(&mut self, _: Sequencer) -> Result<bool, ()> {
            Ok(true)
        }
        fn read_samples(&mut self, _: Sequencer, buf: &mut [u16]) -> Result<usize, ()> {
            self.calls += 1;
            buf.fill(2048);
            Ok(buf.len())
        }
        fn release_adc(&mut self, _: PinId, _: AdcChannel) -> Result<(), ()> {
            self.calls += 1;
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _: u32) {}
    }

    #[test]
    fn test_board_lookups() {
        let board = Tm4c123Launchpad;
        assert_eq!(board.pin_count(), PIN_COUNT);
        assert_eq!(board.adc_channel(PE3), Some(AdcChannel(0)));
        assert_eq!(board.adc_channel(PB5), Some(AdcChannel(11)));
        assert!(board.supports_pwm(PF2));
        assert!(!board.supports_pwm(PF4));
        assert_eq!(board.parse_pin("GREEN_LED"), Some(PF3));
    }

    #[test]
    fn test_pwm_timing_at_80mhz() {
        let mut hal = setup(NullBackend::default(), NoDelay);
        hal.set_pwm_divisor(PwmDivisor::Div8);
        hal.pwm_write(PB6, 25).unwrap();

        assert_eq!(
            hal.backend().last_timing,
            Some(PwmTiming {
                divisor: PwmDivisor::Div8,
                period: 10_000,
                compare: 2_500,
            })
        );
    }

    #[test]
    fn test_launchpad_blink_and_sample() {
        let mut hal = setup(NullBackend::default(), NoDelay);
        hal.digital_write(RED_LED, Level::High).unwrap();
        hal.digital_toggle(RED_LED).unwrap();
        assert_eq!(hal.output_level(RED_LED), Ok(Level::Low));

        assert_eq!(hal.analog_read(PE3), Ok(2048));
        assert_eq!(
            hal.configure_adc_sequence(&[PE3, PE2, PE1, PE0, PD3]),
            Ok(Sequencer::Ss0)
        );
        let mut out = [0u16; 8];
        assert_eq!(hal.analog_read_sequence(&mut out), Ok(8));

        hal.shutdown().unwrap();
        assert_eq!(hal.bound_count(), 0);
    }

    #[test]
    fn test_jtag_pins_are_invalid() {
        let mut hal = setup(NullBackend::default(), NoDelay);
        let pc0 = PinId::new(2, 0);
        assert_eq!(hal.pin_mode(pc0, Mode::Output), Err(HalError::InvalidPin(pc0)));
        assert_eq!(hal.backend().calls, 0);
    }

    #[test]
    fn test_switch_is_not_pwm() {
        let mut hal = setup(NullBackend::default(), NoDelay);
        assert_eq!(
            hal.pwm_write(SW1, 50),
            Err(HalError::Unsupported {
                pin: SW1,
                kind: PeripheralKind::Pwm,
            })
        );
    }

    #[test]
    fn test_config_with_aliases() {
        let text = r#"
[pin button]
pin = "^SW1"

[pin led]
pin = "BLUE_LED"
mode = "output"
"#;
        let config = parse_config(text, &Tm4c123Launchpad).unwrap();
        assert_eq!(config.find_pin("button").map(|p| p.mode), Some(Mode::InputPullUp));

        let mut hal = setup(NullBackend::default(), NoDelay);
        hal.apply_config(&config).unwrap();
        // Pulled-up switch reads pressed while the line sits low
        assert_eq!(hal.digital_read(SW1), Ok(Level::High));
        assert!(hal.is_bound(BLUE_LED));
    }
}
