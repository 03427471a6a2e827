//! Peripheral context manager
//!
//! [`Hal`] owns the board description, the register-access backend, the
//! delay provider and the context table. Pins are bound lazily the first
//! time an operation touches them; every pin identifier is checked against
//! the board table before any backend call is made.

use boardhal_hal::{Level, PeripheralBackend, PinId, PwmDivisor, Sequencer};
use embedded_hal::delay::DelayNs;
use heapless::Vec;

use crate::adc::{self, SequencePlan, MAX_SEQUENCE, SINGLE_SAMPLE_SEQUENCER};
use crate::board::Board;
use crate::config::BoardConfig;
use crate::context::{
    Access, AdcState, Context, DigitalState, Direction, Mode, Payload, PeripheralKind, Polarity,
    PwmState,
};
use crate::error::HalError;
use crate::pwm::{PwmClock, DEFAULT_FREQUENCY_HZ};
use crate::registry::{Acquired, Bound, Registry, Released};

/// Board-agnostic peripheral context manager
///
/// `N` is the number of context slots; it must cover the board's pin table
/// (board crates export a matching type alias). Pins whose slot falls
/// outside `N` are treated as invalid.
pub struct Hal<B, P, D, const N: usize> {
    board: B,
    backend: P,
    delay: D,
    registry: Registry<N>,
    pwm_clock: PwmClock,
    default_pwm_hz: u32,
    sequence: Option<SequencePlan>,
}

impl<B, P, D, const N: usize> Hal<B, P, D, N>
where
    B: Board,
    P: PeripheralBackend,
    D: DelayNs,
{
    /// Create a manager with an empty context table
    ///
    /// No hardware is touched until a pin is used.
    pub fn new(board: B, backend: P, delay: D) -> Self {
        if N < board.pin_count() {
            crate::warn!(
                "{}: {} context slots for {} pins",
                board.name(),
                N,
                board.pin_count()
            );
        }
        let pwm_clock = PwmClock::for_frequency(board.pwm_clock_hz(), DEFAULT_FREQUENCY_HZ);
        Self {
            board,
            backend,
            delay,
            registry: Registry::new(),
            pwm_clock,
            default_pwm_hz: DEFAULT_FREQUENCY_HZ,
            sequence: None,
        }
    }

    /// Reset the context table
    ///
    /// Forgets every context without touching hardware, as done once at
    /// process start.
    pub fn setup(&mut self) {
        self.registry.clear();
        self.sequence = None;
        crate::info!("{}: context table reset, {} slots", self.board.name(), N);
    }

    /// Free every bound pin
    ///
    /// Walks the whole table even when a teardown fails and reports the
    /// first failure.
    pub fn shutdown(&mut self) -> Result<(), HalError<P::Error>> {
        self.sequence = None;
        let mut first_err = None;

        for slot in 0..N {
            let Some(ctx) = self.registry.discard(slot) else {
                continue;
            };
            if let Err(err) = self.teardown(&ctx) {
                crate::warn!("{}: teardown of {} failed", self.board.name(), ctx.pin());
                first_err.get_or_insert(err);
            }
        }

        crate::info!("{}: shutdown complete", self.board.name());
        first_err.map_or(Ok(()), Err)
    }

    /// Give back the board, backend and delay
    pub fn into_parts(self) -> (B, P, D) {
        (self.board, self.backend, self.delay)
    }

    /// Board description
    pub fn board(&self) -> &B {
        &self.board
    }

    /// Register-access backend
    pub fn backend(&self) -> &P {
        &self.backend
    }

    /// Mutable register-access backend
    pub fn backend_mut(&mut self) -> &mut P {
        &mut self.backend
    }

    /// Delay provider
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Context table
    pub fn registry(&self) -> &Registry<N> {
        &self.registry
    }

    /// Context bound to a pin, if any
    pub fn context(&self, pin: PinId) -> Option<&Context> {
        self.slot(pin).ok().and_then(|slot| self.registry.get(slot))
    }

    /// Check if a pin has a live context
    pub fn is_bound(&self, pin: PinId) -> bool {
        self.context(pin).is_some()
    }

    /// Number of live contexts
    pub fn bound_count(&self) -> usize {
        self.registry.bound_count()
    }

    /// PWM clock in use
    pub fn pwm_clock(&self) -> PwmClock {
        self.pwm_clock
    }

    /// Change the PWM clock divisor
    ///
    /// Running generators keep their timing until their next write.
    pub fn set_pwm_divisor(&mut self, divisor: PwmDivisor) {
        self.pwm_clock.divisor = divisor;
    }

    /// Frequency given to pins bound as PWM without an explicit one
    pub fn default_pwm_frequency(&self) -> u32 {
        self.default_pwm_hz
    }

    /// Change the default PWM frequency
    pub fn set_default_pwm_frequency(
        &mut self,
        frequency_hz: u32,
    ) -> Result<(), HalError<P::Error>> {
        self.pwm_clock.timing(frequency_hz, 0)?;
        self.default_pwm_hz = frequency_hz;
        Ok(())
    }

    /// Configured ADC sequence, if any
    pub fn sequence(&self) -> Option<&SequencePlan> {
        self.sequence.as_ref()
    }

    /// Acquire a pin under an access policy
    ///
    /// An unbound pin is brought up in `mode`. A bound pin keeps its current
    /// configuration; only the share counter changes.
    pub fn acquire(
        &mut self,
        pin: PinId,
        access: Access,
        mode: Mode,
    ) -> Result<Acquired, HalError<P::Error>> {
        let slot = self.slot(pin)?;
        let payload = self.payload_for(pin, mode, Level::Low, 0)?;
        let acquired = self.registry.acquire(slot, pin, access, payload)?;
        if acquired == Acquired::Created {
            self.bring_up(slot)?;
        }
        Ok(acquired)
    }

    /// Release one acquisition of a pin
    ///
    /// Returns the remaining share count; the hardware is released when it
    /// reaches zero.
    pub fn release(&mut self, pin: PinId) -> Result<u8, HalError<P::Error>> {
        let slot = self.slot(pin)?;
        match self.registry.release(slot, pin)? {
            Released::Retained(users) => Ok(users),
            Released::Freed(ctx) => {
                self.teardown(&ctx)?;
                Ok(0)
            }
        }
    }

    /// Configure a pin's mode, binding it if needed
    ///
    /// Switching between digital modes is allowed; switching kinds (say
    /// digital to PWM) requires releasing the pin first.
    pub fn pin_mode(&mut self, pin: PinId, mode: Mode) -> Result<(), HalError<P::Error>> {
        let slot = self.slot(pin)?;
        let payload = self.payload_for(pin, mode, Level::Low, 0)?;
        match self.registry.bind(slot, pin, payload)? {
            Bound::Created => self.bring_up(slot),
            Bound::Existing => self.reconfigure_digital(slot, pin, mode),
        }
    }

    /// Override how a digital pin maps logical to electrical levels
    ///
    /// `pin_mode` resets the polarity to the default for the pull setting.
    pub fn set_polarity(
        &mut self,
        pin: PinId,
        polarity: Polarity,
    ) -> Result<(), HalError<P::Error>> {
        let slot = self.slot(pin)?;
        let mut state = self.digital_state(slot, pin)?;
        if state.polarity == polarity {
            return Ok(());
        }
        state.polarity = polarity;
        if state.direction == Direction::Output {
            self.backend
                .write_level(pin, polarity.apply(state.level))
                .map_err(HalError::Backend)?;
        }
        self.store(slot, Payload::Digital(state));
        Ok(())
    }

    /// Read the logical level of a pin, binding it as a floating input if needed
    pub fn digital_read(&mut self, pin: PinId) -> Result<Level, HalError<P::Error>> {
        let slot = self.slot(pin)?;
        let payload = self.digital_payload(pin, Mode::Input, Level::Low)?;
        if self.registry.bind(slot, pin, payload)? == Bound::Created {
            self.bring_up(slot)?;
        }

        let state = self.digital_state(slot, pin)?;
        let raw = self.backend.read_level(pin).map_err(HalError::Backend)?;
        Ok(state.polarity.apply(raw))
    }

    /// Write the logical level of a pin, binding it as an output if needed
    pub fn digital_write(&mut self, pin: PinId, level: Level) -> Result<(), HalError<P::Error>> {
        let slot = self.slot(pin)?;
        let payload = self.digital_payload(pin, Mode::Output, level)?;
        if self.registry.bind(slot, pin, payload)? == Bound::Created {
            // Bring-up drives the initial level
            return self.bring_up(slot);
        }

        let mut state = self.digital_state(slot, pin)?;
        if state.direction != Direction::Output {
            return Err(HalError::NotOutput(pin));
        }
        self.backend
            .write_level(pin, state.polarity.apply(level))
            .map_err(HalError::Backend)?;
        state.level = level;
        self.store(slot, Payload::Digital(state));
        Ok(())
    }

    /// Invert the last level written to an output
    pub fn digital_toggle(&mut self, pin: PinId) -> Result<(), HalError<P::Error>> {
        let slot = self.slot(pin)?;
        let state = self.digital_state(slot, pin)?;
        if state.direction != Direction::Output {
            return Err(HalError::NotOutput(pin));
        }
        self.digital_write(pin, state.level.inverted())
    }

    /// Last logical level written to an output
    pub fn output_level(&self, pin: PinId) -> Result<Level, HalError<P::Error>> {
        let slot = self.slot(pin)?;
        let state = self.digital_state(slot, pin)?;
        if state.direction != Direction::Output {
            return Err(HalError::NotOutput(pin));
        }
        Ok(state.level)
    }

    /// Set a PWM duty cycle in percent, binding the pin as PWM if needed
    ///
    /// A zero duty stops the generator and holds the output low; the next
    /// non-zero duty restarts it.
    pub fn pwm_write(&mut self, pin: PinId, duty: u8) -> Result<(), HalError<P::Error>> {
        let slot = self.slot(pin)?;
        let payload = self.pwm_payload(pin, self.default_pwm_hz, duty)?;
        match self.registry.bind(slot, pin, payload)? {
            Bound::Created => self.bring_up(slot),
            Bound::Existing => {
                let state = self.pwm_state(slot, pin)?;
                self.update_pwm(slot, pin, state, state.frequency_hz, duty)
            }
        }
    }

    /// Change a PWM pin's frequency, keeping its duty cycle
    pub fn pwm_set_frequency(
        &mut self,
        pin: PinId,
        frequency_hz: u32,
    ) -> Result<(), HalError<P::Error>> {
        let slot = self.slot(pin)?;
        let payload = self.pwm_payload(pin, frequency_hz, 0)?;
        match self.registry.bind(slot, pin, payload)? {
            Bound::Created => self.bring_up(slot),
            Bound::Existing => {
                let state = self.pwm_state(slot, pin)?;
                self.update_pwm(slot, pin, state, frequency_hz, state.duty)
            }
        }
    }

    /// Take one ADC sample from a pin, binding it as analog input if needed
    pub fn analog_read(&mut self, pin: PinId) -> Result<u16, HalError<P::Error>> {
        let slot = self.slot(pin)?;
        let payload = self.payload_for(pin, Mode::AnalogInput, Level::Low, 0)?;
        if self.registry.bind(slot, pin, payload)? == Bound::Created {
            self.bring_up(slot)?;
        }

        let channel = self.adc_state(slot, pin)?.channel;
        self.backend
            .configure_sequencer(SINGLE_SAMPLE_SEQUENCER, &[channel])
            .map_err(HalError::Backend)?;

        let mut sample = [0u16; 1];
        match adc::convert(&mut self.backend, SINGLE_SAMPLE_SEQUENCER, &mut sample)? {
            0 => Err(HalError::NoSamples),
            _ => Ok(sample[0]),
        }
    }

    /// Program the multi-channel sequence sampled by `analog_read_sequence`
    ///
    /// All pins are validated before anything is bound or programmed. If a
    /// later step fails, pins bound by this call are released again. The
    /// sequencer is chosen by channel count.
    pub fn configure_adc_sequence(
        &mut self,
        pins: &[PinId],
    ) -> Result<Sequencer, HalError<P::Error>> {
        adc::select_sequencer(pins.len())?;

        let mut steps: Vec<_, MAX_SEQUENCE> = Vec::new();
        for &pin in pins {
            let slot = self.slot(pin)?;
            let channel = self.board.adc_channel(pin).ok_or(HalError::Unsupported {
                pin,
                kind: PeripheralKind::Adc,
            })?;
            if let Some(ctx) = self.registry.get(slot) {
                if ctx.kind() != PeripheralKind::Adc {
                    return Err(HalError::TypeConflict {
                        pin,
                        bound: ctx.kind(),
                        requested: PeripheralKind::Adc,
                    });
                }
            }
            steps
                .push((pin, channel))
                .map_err(|_| HalError::SequenceTooLong(pins.len()))?;
        }
        let plan = SequencePlan::new(&steps)?;

        let mut created: Vec<usize, MAX_SEQUENCE> = Vec::new();
        for &(pin, channel) in &steps {
            let slot = self.slot(pin)?;
            let payload = Payload::Adc(AdcState { channel });
            if self.registry.bind(slot, pin, payload)? == Bound::Created {
                if let Err(err) = self.bring_up(slot) {
                    self.unwind(&created);
                    return Err(err);
                }
                // One entry per step at most
                let _ = created.push(slot);
            }
        }

        let sequencer = plan.sequencer();
        if let Err(err) = self.backend.configure_sequencer(sequencer, plan.channels()) {
            self.unwind(&created);
            return Err(HalError::Backend(err));
        }

        crate::info!(
            "{}: ADC sequence of {} channels on {}",
            self.board.name(),
            plan.len(),
            sequencer
        );
        self.sequence = Some(plan);
        Ok(sequencer)
    }

    /// Sample the configured sequence into `out`, in configuration order
    pub fn analog_read_sequence(&mut self, out: &mut [u16]) -> Result<usize, HalError<P::Error>> {
        let plan = self.sequence.as_ref().ok_or(HalError::SequenceNotConfigured)?;
        let sequencer = plan.sequencer();

        // Single-sample reads share SS3, so a one-channel sequence is reloaded
        if sequencer == SINGLE_SAMPLE_SEQUENCER {
            self.backend
                .configure_sequencer(sequencer, plan.channels())
                .map_err(HalError::Backend)?;
        }

        adc::convert(&mut self.backend, sequencer, out)
    }

    /// Block for `ms` milliseconds
    pub fn wait_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    /// Block for `us` microseconds
    pub fn wait_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    /// Abort on an unrecoverable error
    pub fn failure<E: core::fmt::Debug>(&self, err: E) -> ! {
        crate::error!("{}: unrecoverable HAL failure", self.board.name());
        panic!("{}: unrecoverable HAL failure: {:?}", self.board.name(), err)
    }

    /// Bind and configure every pin listed in `config`
    pub fn apply_config(&mut self, config: &BoardConfig) -> Result<(), HalError<P::Error>> {
        match config.pwm.divisor {
            Some(divisor) => self.set_pwm_divisor(divisor),
            None => {
                let clock_hz = self.board.pwm_clock_hz();
                self.pwm_clock = PwmClock::for_frequency(clock_hz, config.pwm.frequency_hz);
            }
        }
        self.set_default_pwm_frequency(config.pwm.frequency_hz)?;

        for pin_cfg in &config.pins {
            let pin = pin_cfg.pin;
            self.pin_mode(pin, pin_cfg.mode)?;
            if let Some(polarity) = pin_cfg.polarity {
                self.set_polarity(pin, polarity)?;
            }
            match pin_cfg.mode {
                Mode::Output => {
                    if let Some(initial) = pin_cfg.initial {
                        self.digital_write(pin, Level::from(initial))?;
                    }
                }
                Mode::PwmOutput => {
                    if let Some(hz) = pin_cfg.frequency_hz {
                        self.pwm_set_frequency(pin, hz)?;
                    }
                    if let Some(duty) = pin_cfg.duty {
                        self.pwm_write(pin, duty)?;
                    }
                }
                _ => {}
            }
            crate::debug!(
                "{}: {} on {} as {}",
                self.board.name(),
                pin_cfg.name.as_str(),
                pin,
                pin_cfg.mode
            );
        }

        if !config.adc_sequence.is_empty() {
            self.configure_adc_sequence(&config.adc_sequence)?;
        }

        crate::info!(
            "{}: applied config with {} pins",
            self.board.name(),
            config.pins.len()
        );
        Ok(())
    }

    pub(crate) fn slot(&self, pin: PinId) -> Result<usize, HalError<P::Error>> {
        self.board
            .slot(pin)
            .filter(|&slot| slot < N)
            .ok_or(HalError::InvalidPin(pin))
    }

    fn payload_for(
        &self,
        pin: PinId,
        mode: Mode,
        level: Level,
        duty: u8,
    ) -> Result<Payload, HalError<P::Error>> {
        match mode.kind() {
            PeripheralKind::Digital => self.digital_payload(pin, mode, level),
            PeripheralKind::Pwm => self.pwm_payload(pin, self.default_pwm_hz, duty),
            PeripheralKind::Adc => {
                let channel = self.board.adc_channel(pin).ok_or(HalError::Unsupported {
                    pin,
                    kind: PeripheralKind::Adc,
                })?;
                Ok(Payload::Adc(AdcState { channel }))
            }
        }
    }

    fn digital_payload(
        &self,
        pin: PinId,
        mode: Mode,
        level: Level,
    ) -> Result<Payload, HalError<P::Error>> {
        if !self.board.supports_digital(pin) {
            return Err(HalError::Unsupported {
                pin,
                kind: PeripheralKind::Digital,
            });
        }
        Ok(Payload::Digital(DigitalState::for_mode(mode, level)))
    }

    fn pwm_payload(
        &self,
        pin: PinId,
        frequency_hz: u32,
        duty: u8,
    ) -> Result<Payload, HalError<P::Error>> {
        if !self.board.supports_pwm(pin) {
            return Err(HalError::Unsupported {
                pin,
                kind: PeripheralKind::Pwm,
            });
        }
        let timing = self.pwm_clock.timing(frequency_hz, duty)?;
        Ok(Payload::Pwm(PwmState {
            frequency_hz,
            duty,
            timing,
            running: false,
        }))
    }

    /// Program the hardware for a freshly created context
    ///
    /// On failure the context is removed again so the table never holds a
    /// pin the hardware does not know about.
    fn bring_up(&mut self, slot: usize) -> Result<(), HalError<P::Error>> {
        let Some(ctx) = self.registry.get(slot).copied() else {
            return Ok(());
        };
        let pin = ctx.pin();

        let result = match ctx.payload {
            Payload::Digital(state) => configure_digital(&mut self.backend, pin, &state),
            Payload::Pwm(mut state) => {
                let result = drive_pwm(&mut self.backend, pin, &mut state);
                if result.is_ok() {
                    self.store(slot, Payload::Pwm(state));
                }
                result
            }
            Payload::Adc(state) => self.backend.enable_adc(pin, state.channel),
        };

        if let Err(err) = result {
            self.registry.discard(slot);
            crate::error!("{}: bring-up of {} failed", self.board.name(), pin);
            return Err(HalError::Backend(err));
        }

        crate::debug!("{}: bound {} as {}", self.board.name(), pin, ctx.kind());
        Ok(())
    }

    fn teardown(&mut self, ctx: &Context) -> Result<(), HalError<P::Error>> {
        let pin = ctx.pin();
        if self.sequence.as_ref().is_some_and(|plan| plan.contains(pin)) {
            crate::warn!("{}: {} left the ADC sequence", self.board.name(), pin);
            self.sequence = None;
        }

        let result = match ctx.payload {
            Payload::Digital(_) => self.backend.release_digital(pin),
            Payload::Pwm(state) if state.running => self
                .backend
                .stop_pwm(pin)
                .and_then(|()| self.backend.release_pwm(pin)),
            Payload::Pwm(_) => self.backend.release_pwm(pin),
            Payload::Adc(state) => self.backend.release_adc(pin, state.channel),
        };
        result.map_err(HalError::Backend)?;

        crate::debug!("{}: freed {}", self.board.name(), pin);
        Ok(())
    }

    /// Free contexts bound by an operation that failed part way
    fn unwind(&mut self, slots: &[usize]) {
        for &slot in slots {
            let Some(ctx) = self.registry.discard(slot) else {
                continue;
            };
            if self.teardown(&ctx).is_err() {
                crate::warn!("{}: rollback of {} failed", self.board.name(), ctx.pin());
            }
        }
    }

    fn reconfigure_digital(
        &mut self,
        slot: usize,
        pin: PinId,
        mode: Mode,
    ) -> Result<(), HalError<P::Error>> {
        if mode.kind() != PeripheralKind::Digital {
            // Same non-digital kind already bound: nothing to change
            return Ok(());
        }

        let current = self.digital_state(slot, pin)?;
        let next = DigitalState::for_mode(mode, current.level);
        if next == current {
            return Ok(());
        }

        configure_digital(&mut self.backend, pin, &next).map_err(HalError::Backend)?;
        self.store(slot, Payload::Digital(next));
        Ok(())
    }

    fn update_pwm(
        &mut self,
        slot: usize,
        pin: PinId,
        mut state: PwmState,
        frequency_hz: u32,
        duty: u8,
    ) -> Result<(), HalError<P::Error>> {
        state.timing = self.pwm_clock.timing(frequency_hz, duty)?;
        state.frequency_hz = frequency_hz;
        state.duty = duty;

        drive_pwm(&mut self.backend, pin, &mut state).map_err(HalError::Backend)?;
        self.store(slot, Payload::Pwm(state));
        Ok(())
    }

    fn context_in(&self, slot: usize, pin: PinId) -> Result<&Context, HalError<P::Error>> {
        self.registry.get(slot).ok_or(HalError::NotBound(pin))
    }

    fn digital_state(&self, slot: usize, pin: PinId) -> Result<DigitalState, HalError<P::Error>> {
        let ctx = self.context_in(slot, pin)?;
        ctx.digital().copied().ok_or(HalError::TypeConflict {
            pin,
            bound: ctx.kind(),
            requested: PeripheralKind::Digital,
        })
    }

    fn pwm_state(&self, slot: usize, pin: PinId) -> Result<PwmState, HalError<P::Error>> {
        let ctx = self.context_in(slot, pin)?;
        ctx.pwm().copied().ok_or(HalError::TypeConflict {
            pin,
            bound: ctx.kind(),
            requested: PeripheralKind::Pwm,
        })
    }

    fn adc_state(&self, slot: usize, pin: PinId) -> Result<AdcState, HalError<P::Error>> {
        let ctx = self.context_in(slot, pin)?;
        ctx.adc().copied().ok_or(HalError::TypeConflict {
            pin,
            bound: ctx.kind(),
            requested: PeripheralKind::Adc,
        })
    }

    fn store(&mut self, slot: usize, payload: Payload) {
        if let Some(ctx) = self.registry.get_mut(slot) {
            ctx.payload = payload;
        }
    }
}

fn configure_digital<P: PeripheralBackend>(
    backend: &mut P,
    pin: PinId,
    state: &DigitalState,
) -> Result<(), P::Error> {
    match state.direction {
        Direction::Input => backend.configure_input(pin, state.pull),
        Direction::Output => backend.configure_output(pin, state.polarity.apply(state.level)),
    }
}

/// Load `state` into the generator, routing zero duty through the stop path
fn drive_pwm<P: PeripheralBackend>(
    backend: &mut P,
    pin: PinId,
    state: &mut PwmState,
) -> Result<(), P::Error> {
    if state.duty == 0 {
        backend.stop_pwm(pin)?;
        state.running = false;
    } else if state.running {
        backend.set_pwm_timing(pin, state.timing)?;
    } else {
        backend.enable_pwm(pin, state.timing)?;
        state.running = true;
    }
    Ok(())
}
