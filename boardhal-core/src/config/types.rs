//! Configuration type definitions

use boardhal_hal::{PinId, PwmDivisor};
use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::adc::MAX_SEQUENCE;
use crate::context::{Mode, Polarity};
use crate::pwm::DEFAULT_FREQUENCY_HZ;

/// Current configuration layout version
pub const CONFIG_VERSION: u8 = 1;

/// Maximum pin label length
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum pins per config
pub const MAX_PINS: usize = 32;

/// Named pin assignment
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// Label (e.g., "led", "button", "fan")
    pub name: String<MAX_LABEL_LEN>,
    /// Board pin
    pub pin: PinId,
    /// Mode the pin is configured in
    pub mode: Mode,
    /// Polarity override (default follows the pull setting)
    pub polarity: Option<Polarity>,
    /// Initial logical level for outputs
    pub initial: Option<bool>,
    /// PWM frequency override
    pub frequency_hz: Option<u32>,
    /// Initial PWM duty in percent
    pub duty: Option<u8>,
}

impl PinConfig {
    /// Create a pin assignment with no overrides
    pub fn new(name: &str, pin: PinId, mode: Mode) -> Option<Self> {
        Some(Self {
            name: String::try_from(name).ok()?,
            pin,
            mode,
            polarity: None,
            initial: None,
            frequency_hz: None,
            duty: None,
        })
    }
}

/// PWM generator settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PwmConfig {
    /// Peripheral clock divisor (board default when unset)
    pub divisor: Option<PwmDivisor>,
    /// Default output frequency
    pub frequency_hz: u32,
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self {
            divisor: None,
            frequency_hz: DEFAULT_FREQUENCY_HZ,
        }
    }
}

/// Complete board configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    /// Configuration version for compatibility checks
    pub version: u8,
    /// PWM settings
    pub pwm: PwmConfig,
    /// Pin assignments, applied in order
    pub pins: Vec<PinConfig, MAX_PINS>,
    /// ADC sequence, in sampling order
    pub adc_sequence: Vec<PinId, MAX_SEQUENCE>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            pwm: PwmConfig::default(),
            pins: Vec::new(),
            adc_sequence: Vec::new(),
        }
    }
}

impl BoardConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a pin assignment by label
    pub fn find_pin(&self, name: &str) -> Option<&PinConfig> {
        self.pins.iter().find(|p| p.name.as_str() == name)
    }

    /// Find the assignment for a board pin
    pub fn find_by_id(&self, pin: PinId) -> Option<&PinConfig> {
        self.pins.iter().find(|p| p.pin == pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config() {
        let config = BoardConfig::new();
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.pins.is_empty());
        assert_eq!(config.pwm.frequency_hz, DEFAULT_FREQUENCY_HZ);
        assert!(config.find_pin("led").is_none());
    }

    #[test]
    fn test_pin_config_label_limit() {
        let pin = PinId::new(5, 1);
        let cfg = PinConfig::new("led", pin, Mode::Output).unwrap();
        assert_eq!(cfg.name.as_str(), "led");
        assert!(cfg.polarity.is_none());

        assert!(PinConfig::new("a-label-longer-than-sixteen", pin, Mode::Output).is_none());
    }

    #[test]
    fn test_lookup() {
        let mut config = BoardConfig::new();
        let pin = PinId::new(5, 1);
        config
            .pins
            .push(PinConfig::new("led", pin, Mode::Output).unwrap())
            .unwrap();
        assert_eq!(config.find_pin("led").map(|p| p.pin), Some(pin));
        assert_eq!(
            config.find_by_id(pin).map(|p| p.name.as_str()),
            Some("led")
        );
    }
}
