//! Text configuration parser
//!
//! Handles the small TOML subset used for pin assignments:
//!
//! ```toml
//! [pwm]
//! divisor = 8
//! frequency = 1000
//!
//! [adc]
//! sequence = ["PE3", "PE2"]
//!
//! [pin led]
//! pin = "PF1"
//! mode = "output"
//! initial = true
//!
//! [pin button]
//! pin = "^PF4"    # pull-up, reads active-low
//! mode = "input"
//! ```
//!
//! Pin strings take the board's own names plus optional prefixes:
//! `!` (active-low), `^` (pull-up) and `~` (pull-down).
//!
//! NOT supported: multi-line values, nested tables, dotted keys.

use boardhal_hal::{PinId, Pull, PwmDivisor};
use heapless::String;

use super::types::{BoardConfig, PinConfig, CONFIG_VERSION, MAX_LABEL_LEN};
use crate::board::Board;
use crate::context::{Mode, Polarity};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in the current section
    UnknownKey,
    /// Value of the wrong type or out of range
    InvalidValue,
    /// Pin string not known to the board
    InvalidPin,
    /// `[pin]` section without a `pin` key
    MissingPin,
    /// Label or board pin assigned twice
    DuplicatePin,
    /// Too many items (exceeded heapless capacity)
    TooManyItems,
}

/// Pin string with its prefix flags resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinSpec {
    pub pin: PinId,
    /// `!` prefix: active-low
    pub inverted: bool,
    /// `^` / `~` prefix
    pub pull: Pull,
}

/// Parse a pin string such as "PF1", "!P1.0" or "^gpio4"
pub fn parse_pin_spec<B: Board + ?Sized>(s: &str, board: &B) -> Option<PinSpec> {
    let mut s = s.trim();
    let mut inverted = false;
    let mut pull = Pull::None;

    loop {
        if let Some(rest) = s.strip_prefix('!') {
            inverted = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            pull = Pull::Up;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('~') {
            pull = Pull::Down;
            s = rest;
        } else {
            break;
        }
    }

    let pin = board.parse_pin(s)?;
    Some(PinSpec {
        pin,
        inverted,
        pull,
    })
}

/// Pin section being built
struct PinBuilder {
    name: String<MAX_LABEL_LEN>,
    spec: Option<PinSpec>,
    mode: Option<Mode>,
    polarity: Option<Polarity>,
    initial: Option<bool>,
    frequency_hz: Option<u32>,
    duty: Option<u8>,
}

impl PinBuilder {
    fn new(name: &str) -> Result<Self, ParseError> {
        Ok(Self {
            name: String::try_from(name).map_err(|_| ParseError::InvalidSection)?,
            spec: None,
            mode: None,
            polarity: None,
            initial: None,
            frequency_hz: None,
            duty: None,
        })
    }

    fn finish(self) -> Result<PinConfig, ParseError> {
        let spec = self.spec.ok_or(ParseError::MissingPin)?;

        // Prefix pulls only refine a plain input
        let mode = match (self.mode.unwrap_or(Mode::Input), spec.pull) {
            (Mode::Input, Pull::Up) => Mode::InputPullUp,
            (Mode::Input, Pull::Down) => Mode::InputPullDown,
            (mode, _) => mode,
        };
        let polarity = self
            .polarity
            .or(spec.inverted.then_some(Polarity::ActiveLow));

        Ok(PinConfig {
            name: self.name,
            pin: spec.pin,
            mode,
            polarity,
            initial: self.initial,
            frequency_hz: self.frequency_hz,
            duty: self.duty,
        })
    }
}

/// Current parsing context
enum Section {
    Root,
    Pwm,
    Adc,
    Pin(PinBuilder),
}

/// Parse configuration text, resolving pin names against `board`
pub fn parse_config<B: Board + ?Sized>(input: &str, board: &B) -> Result<BoardConfig, ParseError> {
    let mut config = BoardConfig::new();
    let mut section = Section::Root;

    for raw in input.lines() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            finish_section(section, &mut config)?;
            section = parse_section_header(header)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        apply_value(&mut section, key, value, &mut config, board)?;
    }

    finish_section(section, &mut config)?;
    Ok(config)
}

/// Parse section header like "pwm", "pin led" or "pin.led"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    let header = header.trim();
    match header {
        "pwm" => return Ok(Section::Pwm),
        "adc" => return Ok(Section::Adc),
        _ => {}
    }

    let name = header
        .strip_prefix("pin ")
        .or_else(|| header.strip_prefix("pin."))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(ParseError::InvalidSection)?;
    Ok(Section::Pin(PinBuilder::new(name)?))
}

fn finish_section(section: Section, config: &mut BoardConfig) -> Result<(), ParseError> {
    let Section::Pin(builder) = section else {
        return Ok(());
    };
    let pin = builder.finish()?;
    if config.find_pin(pin.name.as_str()).is_some() || config.find_by_id(pin.pin).is_some() {
        return Err(ParseError::DuplicatePin);
    }
    config.pins.push(pin).map_err(|_| ParseError::TooManyItems)
}

fn apply_value<B: Board + ?Sized>(
    section: &mut Section,
    key: &str,
    value: &str,
    config: &mut BoardConfig,
    board: &B,
) -> Result<(), ParseError> {
    match section {
        Section::Root => match key {
            "version" => {
                if parse_int::<u8>(value)? != CONFIG_VERSION {
                    return Err(ParseError::InvalidValue);
                }
            }
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Pwm => match key {
            "divisor" => {
                config.pwm.divisor = Some(
                    PwmDivisor::from_ratio(parse_int(value)?).ok_or(ParseError::InvalidValue)?,
                );
            }
            "frequency" => config.pwm.frequency_hz = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Adc => match key {
            "sequence" => {
                config.adc_sequence.clear();
                for item in parse_array(value)? {
                    let spec = parse_pin_spec(parse_string(item)?, board)
                        .ok_or(ParseError::InvalidPin)?;
                    config
                        .adc_sequence
                        .push(spec.pin)
                        .map_err(|_| ParseError::TooManyItems)?;
                }
            }
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Pin(builder) => match key {
            "pin" => {
                builder.spec = Some(
                    parse_pin_spec(parse_string(value)?, board).ok_or(ParseError::InvalidPin)?,
                );
            }
            "mode" => builder.mode = Some(parse_mode(parse_string(value)?)?),
            "polarity" => builder.polarity = Some(parse_polarity(parse_string(value)?)?),
            "initial" => builder.initial = Some(parse_bool(value)?),
            "frequency" => builder.frequency_hz = Some(parse_int(value)?),
            "duty" => {
                let duty: u8 = parse_int(value)?;
                if duty > 100 {
                    return Err(ParseError::InvalidValue);
                }
                builder.duty = Some(duty);
            }
            _ => return Err(ParseError::UnknownKey),
        },
    }
    Ok(())
}

fn parse_mode(s: &str) -> Result<Mode, ParseError> {
    match s {
        "input" => Ok(Mode::Input),
        "input_pullup" => Ok(Mode::InputPullUp),
        "input_pulldown" => Ok(Mode::InputPullDown),
        "output" => Ok(Mode::Output),
        "analog" => Ok(Mode::AnalogInput),
        "pwm" => Ok(Mode::PwmOutput),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_polarity(s: &str) -> Result<Polarity, ParseError> {
    match s {
        "active_high" => Ok(Polarity::ActiveHigh),
        "active_low" => Ok(Polarity::ActiveLow),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Split `key = value`
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Cut a trailing `# comment`, ignoring `#` inside quotes
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_string(value: &str) -> Result<&str, ParseError> {
    value
        .trim()
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseError::InvalidValue)
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.trim().parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_array(value: &str) -> Result<impl Iterator<Item = &str>, ParseError> {
    let inner = value
        .trim()
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;
    Ok(inner.split(',').map(str::trim).filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{TestBoard, PA0, PA1, PA2, PB0, PB1};

    const SAMPLE: &str = r#"
# Test bench wiring
version = 1

[pwm]
divisor = 8
frequency = 2000

[adc]
sequence = ["PB1", "PB0"]   # sampling order matters

[pin led]
pin = "PA0"
mode = "output"
initial = true

[pin button]
pin = "^PA1"
mode = "input"

[pin.fan]
pin = "PA2"
mode = "pwm"
frequency = 25000
duty = 40
"#;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(SAMPLE, &TestBoard).unwrap();

        assert_eq!(config.pwm.divisor, Some(PwmDivisor::Div8));
        assert_eq!(config.pwm.frequency_hz, 2000);
        assert_eq!(config.adc_sequence.as_slice(), &[PB1, PB0]);
        assert_eq!(config.pins.len(), 3);

        let led = config.find_pin("led").unwrap();
        assert_eq!(led.pin, PA0);
        assert_eq!(led.mode, Mode::Output);
        assert_eq!(led.initial, Some(true));

        let button = config.find_pin("button").unwrap();
        assert_eq!(button.pin, PA1);
        assert_eq!(button.mode, Mode::InputPullUp);
        assert_eq!(button.polarity, None);

        let fan = config.find_pin("fan").unwrap();
        assert_eq!(fan.pin, PA2);
        assert_eq!(fan.mode, Mode::PwmOutput);
        assert_eq!(fan.frequency_hz, Some(25000));
        assert_eq!(fan.duty, Some(40));
    }

    #[test]
    fn test_pin_spec_prefixes() {
        let spec = parse_pin_spec("!PA0", &TestBoard).unwrap();
        assert_eq!(spec.pin, PA0);
        assert!(spec.inverted);
        assert_eq!(spec.pull, Pull::None);

        let spec = parse_pin_spec("!^pa1", &TestBoard).unwrap();
        assert!(spec.inverted);
        assert_eq!(spec.pull, Pull::Up);

        let spec = parse_pin_spec("~PA1", &TestBoard).unwrap();
        assert_eq!(spec.pull, Pull::Down);

        assert_eq!(parse_pin_spec("PQ7", &TestBoard), None);
        assert_eq!(parse_pin_spec("!", &TestBoard), None);
    }

    #[test]
    fn test_inverted_output_gets_active_low() {
        let config = parse_config("[pin relay]\npin = \"!PA0\"\nmode = \"output\"\n", &TestBoard)
            .unwrap();
        assert_eq!(config.pins[0].polarity, Some(Polarity::ActiveLow));
    }

    #[test]
    fn test_hash_inside_string_is_not_a_comment() {
        assert_eq!(strip_comment(r##"pin = "#1" # note"##), r##"pin = "#1" "##);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_config("[motor x]\n", &TestBoard),
            Err(ParseError::InvalidSection)
        );
        assert_eq!(
            parse_config("[pin led]\nmode = \"output\"\n", &TestBoard),
            Err(ParseError::MissingPin)
        );
        assert_eq!(
            parse_config("[pin led]\npin = \"PZ0\"\n", &TestBoard),
            Err(ParseError::InvalidPin)
        );
        assert_eq!(
            parse_config("[pin led]\npin = \"PA0\"\ncolour = 1\n", &TestBoard),
            Err(ParseError::UnknownKey)
        );
        assert_eq!(
            parse_config("[pwm]\ndivisor = 3\n", &TestBoard),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[pin fan]\npin = \"PA2\"\nduty = 101\n", &TestBoard),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("version = 9\n", &TestBoard),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[pin a]\npin = \"PA0\"\n[pin b]\npin = \"PA0\"\n", &TestBoard),
            Err(ParseError::DuplicatePin)
        );
    }

    #[test]
    fn test_sequence_too_long() {
        let text = r#"
[adc]
sequence = ["PB0", "PB0", "PB0", "PB0", "PB0", "PB0", "PB0", "PB0", "PB1"]
"#;
        assert_eq!(
            parse_config(text, &TestBoard),
            Err(ParseError::TooManyItems)
        );
    }
}
