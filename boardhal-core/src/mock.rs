//! Test doubles: a six-pin board and a backend that records every call

use std::collections::HashMap;
use std::vec::Vec;

use boardhal_hal::{
    AdcBackend, AdcChannel, DigitalBackend, ErrorType, Level, PinId, Pull, PwmBackend,
    PwmTiming, Sequencer,
};
use embedded_hal::delay::DelayNs;

use crate::board::{Board, PinInfo};
use crate::hal::Hal;

pub const PA0: PinId = PinId::new(0, 0);
pub const PA1: PinId = PinId::new(0, 1);
pub const PA2: PinId = PinId::new(0, 2);
pub const PA3: PinId = PinId::new(0, 3);
pub const PB0: PinId = PinId::new(1, 0);
pub const PB1: PinId = PinId::new(1, 1);

/// Pin that no test board knows about
pub const PZ9: PinId = PinId::new(25, 9);

static PINS: [PinInfo; 6] = [
    PinInfo::gpio(PA0, "PA0"),
    PinInfo::gpio(PA1, "PA1"),
    PinInfo::gpio(PA2, "PA2").with_pwm(),
    PinInfo::gpio(PA3, "PA3").with_pwm(),
    PinInfo::gpio(PB0, "PB0").with_adc(0),
    PinInfo::gpio(PB1, "PB1").with_adc(1),
];

pub struct TestBoard;

impl Board for TestBoard {
    fn name(&self) -> &'static str {
        "test"
    }

    fn pins(&self) -> &'static [PinInfo] {
        &PINS
    }

    fn pwm_clock_hz(&self) -> u32 {
        16_000_000
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ConfigureInput(PinId, Pull),
    ConfigureOutput(PinId, Level),
    ReadLevel(PinId),
    WriteLevel(PinId, Level),
    ReleaseDigital(PinId),
    EnablePwm(PinId, PwmTiming),
    SetPwmTiming(PinId, PwmTiming),
    StopPwm(PinId),
    ReleasePwm(PinId),
    EnableAdc(PinId, AdcChannel),
    ConfigureSequencer(Sequencer, Vec<AdcChannel>),
    Trigger(Sequencer),
    ReadSamples(Sequencer),
    ReleaseAdc(PinId, AdcChannel),
}

#[derive(Default)]
pub struct MockBackend {
    /// Every hardware access, in order (completion polls excluded)
    pub calls: Vec<Call>,
    /// Electrical level seen by `read_level`
    pub levels: HashMap<PinId, Level>,
    /// Conversion result per channel number
    pub adc_values: HashMap<u8, u16>,
    /// Polls before the completion flag is raised
    pub polls_until_complete: u32,
    /// Any call touching this pin fails
    pub fail_pin: Option<PinId>,
    /// Cap on samples handed back by `read_samples`
    pub sample_limit: Option<usize>,
    programmed: HashMap<u8, Vec<AdcChannel>>,
    polls: u32,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, call: Call, pin: Option<PinId>) -> Result<(), MockError> {
        self.calls.push(call);
        match (pin, self.fail_pin) {
            (Some(pin), Some(bad)) if pin == bad => Err(MockError),
            _ => Ok(()),
        }
    }
}

impl ErrorType for MockBackend {
    type Error = MockError;
}

impl DigitalBackend for MockBackend {
    fn configure_input(&mut self, pin: PinId, pull: Pull) -> Result<(), MockError> {
        self.record(Call::ConfigureInput(pin, pull), Some(pin))
    }

    fn configure_output(&mut self, pin: PinId, initial: Level) -> Result<(), MockError> {
        self.record(Call::ConfigureOutput(pin, initial), Some(pin))?;
        self.levels.insert(pin, initial);
        Ok(())
    }

    fn read_level(&mut self, pin: PinId) -> Result<Level, MockError> {
        self.record(Call::ReadLevel(pin), Some(pin))?;
        Ok(self.levels.get(&pin).copied().unwrap_or(Level::Low))
    }

    fn write_level(&mut self, pin: PinId, level: Level) -> Result<(), MockError> {
        self.record(Call::WriteLevel(pin, level), Some(pin))?;
        self.levels.insert(pin, level);
        Ok(())
    }

    fn release_digital(&mut self, pin: PinId) -> Result<(), MockError> {
        self.record(Call::ReleaseDigital(pin), Some(pin))
    }
}

impl PwmBackend for MockBackend {
    fn enable_pwm(&mut self, pin: PinId, timing: PwmTiming) -> Result<(), MockError> {
        self.record(Call::EnablePwm(pin, timing), Some(pin))
    }

    fn set_pwm_timing(&mut self, pin: PinId, timing: PwmTiming) -> Result<(), MockError> {
        self.record(Call::SetPwmTiming(pin, timing), Some(pin))
    }

    fn stop_pwm(&mut self, pin: PinId) -> Result<(), MockError> {
        self.record(Call::StopPwm(pin), Some(pin))
    }

    fn release_pwm(&mut self, pin: PinId) -> Result<(), MockError> {
        self.record(Call::ReleasePwm(pin), Some(pin))
    }
}

impl AdcBackend for MockBackend {
    fn enable_adc(&mut self, pin: PinId, channel: AdcChannel) -> Result<(), MockError> {
        self.record(Call::EnableAdc(pin, channel), Some(pin))
    }

    fn configure_sequencer(
        &mut self,
        sequencer: Sequencer,
        channels: &[AdcChannel],
    ) -> Result<(), MockError> {
        self.record(Call::ConfigureSequencer(sequencer, channels.to_vec()), None)?;
        self.programmed.insert(sequencer.index(), channels.to_vec());
        Ok(())
    }

    fn trigger(&mut self, sequencer: Sequencer) -> Result<(), MockError> {
        self.polls = 0;
        self.record(Call::Trigger(sequencer), None)
    }

    fn is_complete(&mut self, _sequencer: Sequencer) -> Result<bool, MockError> {
        self.polls = self.polls.saturating_add(1);
        Ok(self.polls >= self.polls_until_complete)
    }

    fn read_samples(&mut self, sequencer: Sequencer, buf: &mut [u16]) -> Result<usize, MockError> {
        self.record(Call::ReadSamples(sequencer), None)?;
        let channels = self
            .programmed
            .get(&sequencer.index())
            .cloned()
            .unwrap_or_default();
        let limit = self.sample_limit.unwrap_or(usize::MAX);
        let mut count = 0;
        for (slot, channel) in buf.iter_mut().zip(channels.iter()).take(limit) {
            *slot = self.adc_values.get(&channel.index()).copied().unwrap_or(0);
            count += 1;
        }
        Ok(count)
    }

    fn release_adc(&mut self, pin: PinId, channel: AdcChannel) -> Result<(), MockError> {
        self.record(Call::ReleaseAdc(pin, channel), Some(pin))
    }
}

/// Delay provider that only accumulates the requested time
#[derive(Default)]
pub struct MockDelay {
    pub elapsed_ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
    }
}

pub type TestHal = Hal<TestBoard, MockBackend, MockDelay, 6>;

pub fn test_hal() -> TestHal {
    let mut hal = Hal::new(TestBoard, MockBackend::new(), MockDelay::default());
    hal.setup();
    hal
}
