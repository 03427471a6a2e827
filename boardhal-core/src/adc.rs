//! ADC sequencer planning
//!
//! Multi-channel reads are batched on one sample sequencer. The sequencer
//! is picked by channel count so the smallest FIFO that fits is used:
//!
//! | channels | sequencer | depth |
//! |----------|-----------|-------|
//! | 1        | SS3       | 1     |
//! | 2-4      | SS1       | 4     |
//! | 5-8      | SS0       | 8     |

use boardhal_hal::{AdcBackend, AdcChannel, PinId, Sequencer};
use heapless::Vec;

use crate::error::{AdcError, HalError};

/// Deepest sequence supported (SS0 FIFO depth)
pub const MAX_SEQUENCE: usize = 8;

/// Completion-flag polls before a conversion is declared lost
pub const ADC_POLL_LIMIT: u32 = 100_000;

/// Sequencer used for single-sample reads
pub const SINGLE_SAMPLE_SEQUENCER: Sequencer = Sequencer::Ss3;

/// Pick the sequencer for a sequence of `count` channels
pub fn select_sequencer(count: usize) -> Result<Sequencer, AdcError> {
    match count {
        0 => Err(AdcError::EmptySequence),
        1 => Ok(Sequencer::Ss3),
        2..=4 => Ok(Sequencer::Ss1),
        5..=MAX_SEQUENCE => Ok(Sequencer::Ss0),
        n => Err(AdcError::SequenceTooLong(n)),
    }
}

/// A configured multi-channel sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencePlan {
    sequencer: Sequencer,
    pins: Vec<PinId, MAX_SEQUENCE>,
    channels: Vec<AdcChannel, MAX_SEQUENCE>,
}

impl SequencePlan {
    /// Plan a sequence over `(pin, channel)` steps, in sampling order
    pub fn new(steps: &[(PinId, AdcChannel)]) -> Result<Self, AdcError> {
        let sequencer = select_sequencer(steps.len())?;
        let mut pins = Vec::new();
        let mut channels = Vec::new();
        let too_long = AdcError::SequenceTooLong(steps.len());
        for &(pin, channel) in steps {
            pins.push(pin).map_err(|_| too_long)?;
            channels.push(channel).map_err(|_| too_long)?;
        }
        Ok(Self {
            sequencer,
            pins,
            channels,
        })
    }

    /// Selected sequencer
    pub fn sequencer(&self) -> Sequencer {
        self.sequencer
    }

    /// Pins in sampling order
    pub fn pins(&self) -> &[PinId] {
        &self.pins
    }

    /// Channels in sampling order
    pub fn channels(&self) -> &[AdcChannel] {
        &self.channels
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Check if the plan has no steps (never true for a built plan)
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Check if the sequence samples `pin`
    pub fn contains(&self, pin: PinId) -> bool {
        self.pins.contains(&pin)
    }
}

/// Trigger a sequencer and busy-poll its completion flag
pub fn convert<A: AdcBackend>(
    backend: &mut A,
    sequencer: Sequencer,
    out: &mut [u16],
) -> Result<usize, HalError<A::Error>> {
    backend.trigger(sequencer).map_err(HalError::Backend)?;

    let mut polls = 0;
    while !backend.is_complete(sequencer).map_err(HalError::Backend)? {
        polls += 1;
        if polls >= ADC_POLL_LIMIT {
            return Err(HalError::AdcTimeout);
        }
    }

    backend
        .read_samples(sequencer, out)
        .map_err(HalError::Backend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBackend;

    #[test]
    fn test_sequencer_selection() {
        assert_eq!(select_sequencer(0), Err(AdcError::EmptySequence));
        assert_eq!(select_sequencer(1), Ok(Sequencer::Ss3));
        assert_eq!(select_sequencer(2), Ok(Sequencer::Ss1));
        assert_eq!(select_sequencer(4), Ok(Sequencer::Ss1));
        assert_eq!(select_sequencer(5), Ok(Sequencer::Ss0));
        assert_eq!(select_sequencer(8), Ok(Sequencer::Ss0));
        assert_eq!(select_sequencer(9), Err(AdcError::SequenceTooLong(9)));
    }

    #[test]
    fn test_selected_sequencer_fits() {
        for n in 1..=MAX_SEQUENCE {
            let seq = select_sequencer(n).unwrap();
            assert!(seq.depth() >= n);
        }
    }

    #[test]
    fn test_plan_keeps_order() {
        let a = PinId::new(4, 3);
        let b = PinId::new(4, 2);
        let plan = SequencePlan::new(&[(a, AdcChannel(0)), (b, AdcChannel(1))]).unwrap();
        assert_eq!(plan.sequencer(), Sequencer::Ss1);
        assert_eq!(plan.pins(), &[a, b]);
        assert_eq!(plan.channels(), &[AdcChannel(0), AdcChannel(1)]);
        assert!(plan.contains(b));
        assert!(!plan.is_empty());
    }

    #[test]
    fn test_convert_polls_until_complete() {
        let mut backend = MockBackend::new();
        backend.adc_values.insert(3, 1234);
        backend.polls_until_complete = 5;
        backend
            .configure_sequencer(Sequencer::Ss3, &[AdcChannel(3)])
            .unwrap();

        let mut out = [0u16; 1];
        assert_eq!(convert(&mut backend, Sequencer::Ss3, &mut out), Ok(1));
        assert_eq!(out[0], 1234);
    }

    #[test]
    fn test_convert_times_out() {
        let mut backend = MockBackend::new();
        backend.polls_until_complete = u32::MAX;
        let mut out = [0u16; 1];
        assert_eq!(
            convert(&mut backend, Sequencer::Ss3, &mut out),
            Err(HalError::AdcTimeout)
        );
    }
}
