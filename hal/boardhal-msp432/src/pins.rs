//! MSP432P401R LaunchPad pin map
//!
//! Pins are named the way TI prints them ("P1.0"); the port number is used
//! as-is in the identifier. Only pins brought out to the BoosterPack
//! headers or the on-board LEDs/switches are listed.

use boardhal_core::PinInfo;
use boardhal_hal::PinId;

macro_rules! pin {
    ($name:ident, $port:literal, $bit:literal) => {
        pub const $name: PinId = PinId::new($port, $bit);
    };
}

pin!(P1_0, 1, 0);
pin!(P1_1, 1, 1);
pin!(P1_2, 1, 2);
pin!(P1_3, 1, 3);
pin!(P1_4, 1, 4);
pin!(P1_5, 1, 5);
pin!(P1_6, 1, 6);
pin!(P1_7, 1, 7);
pin!(P2_0, 2, 0);
pin!(P2_1, 2, 1);
pin!(P2_2, 2, 2);
pin!(P2_3, 2, 3);
pin!(P2_4, 2, 4);
pin!(P2_5, 2, 5);
pin!(P2_6, 2, 6);
pin!(P2_7, 2, 7);
pin!(P3_0, 3, 0);
pin!(P3_2, 3, 2);
pin!(P3_3, 3, 3);
pin!(P3_5, 3, 5);
pin!(P3_6, 3, 6);
pin!(P3_7, 3, 7);
pin!(P4_0, 4, 0);
pin!(P4_1, 4, 1);
pin!(P4_2, 4, 2);
pin!(P4_3, 4, 3);
pin!(P4_4, 4, 4);
pin!(P4_5, 4, 5);
pin!(P4_6, 4, 6);
pin!(P4_7, 4, 7);
pin!(P5_0, 5, 0);
pin!(P5_1, 5, 1);
pin!(P5_2, 5, 2);
pin!(P5_3, 5, 3);
pin!(P5_4, 5, 4);
pin!(P5_5, 5, 5);
pin!(P5_6, 5, 6);
pin!(P5_7, 5, 7);
pin!(P6_0, 6, 0);
pin!(P6_1, 6, 1);
pin!(P6_4, 6, 4);
pin!(P6_5, 6, 5);
pin!(P6_6, 6, 6);
pin!(P6_7, 6, 7);

/// Red LED1
pub const LED1: PinId = P1_0;
/// RGB LED2
pub const LED2_RED: PinId = P2_0;
pub const LED2_GREEN: PinId = P2_1;
pub const LED2_BLUE: PinId = P2_2;
/// User switches (active-low, need pull-ups)
pub const S1: PinId = P1_1;
pub const S2: PinId = P1_4;

/// Number of pins in the table
pub const PIN_COUNT: usize = 44;

/// Pin table
///
/// PWM: Timer_A0 CCR1-4 on P2.4-P2.7, Timer_A2 CCR1-4 on P5.6/P5.7/P6.6/P6.7,
/// and the RGB LED pins through the port mapping controller.
/// ADC14: A0-A5 on P5.5-P5.0, A6-A13 on P4.7-P4.0, A14/A15 on P6.1/P6.0.
pub static PINS: [PinInfo; PIN_COUNT] = [
    PinInfo::gpio(P1_0, "P1.0"),
    PinInfo::gpio(P1_1, "P1.1"),
    PinInfo::gpio(P1_2, "P1.2"),
    PinInfo::gpio(P1_3, "P1.3"),
    PinInfo::gpio(P1_4, "P1.4"),
    PinInfo::gpio(P1_5, "P1.5"),
    PinInfo::gpio(P1_6, "P1.6"),
    PinInfo::gpio(P1_7, "P1.7"),
    PinInfo::gpio(P2_0, "P2.0").with_pwm(),
    PinInfo::gpio(P2_1, "P2.1").with_pwm(),
    PinInfo::gpio(P2_2, "P2.2").with_pwm(),
    PinInfo::gpio(P2_3, "P2.3"),
    PinInfo::gpio(P2_4, "P2.4").with_pwm(),
    PinInfo::gpio(P2_5, "P2.5").with_pwm(),
    PinInfo::gpio(P2_6, "P2.6").with_pwm(),
    PinInfo::gpio(P2_7, "P2.7").with_pwm(),
    PinInfo::gpio(P3_0, "P3.0"),
    PinInfo::gpio(P3_2, "P3.2"),
    PinInfo::gpio(P3_3, "P3.3"),
    PinInfo::gpio(P3_5, "P3.5"),
    PinInfo::gpio(P3_6, "P3.6"),
    PinInfo::gpio(P3_7, "P3.7"),
    PinInfo::gpio(P4_0, "P4.0").with_adc(13),
    PinInfo::gpio(P4_1, "P4.1").with_adc(12),
    PinInfo::gpio(P4_2, "P4.2").with_adc(11),
    PinInfo::gpio(P4_3, "P4.3").with_adc(10),
    PinInfo::gpio(P4_4, "P4.4").with_adc(9),
    PinInfo::gpio(P4_5, "P4.5").with_adc(8),
    PinInfo::gpio(P4_6, "P4.6").with_adc(7),
    PinInfo::gpio(P4_7, "P4.7").with_adc(6),
    PinInfo::gpio(P5_0, "P5.0").with_adc(5),
    PinInfo::gpio(P5_1, "P5.1").with_adc(4),
    PinInfo::gpio(P5_2, "P5.2").with_adc(3),
    PinInfo::gpio(P5_3, "P5.3").with_adc(2),
    PinInfo::gpio(P5_4, "P5.4").with_adc(1),
    PinInfo::gpio(P5_5, "P5.5").with_adc(0),
    PinInfo::gpio(P5_6, "P5.6").with_pwm(),
    PinInfo::gpio(P5_7, "P5.7").with_pwm(),
    PinInfo::gpio(P6_0, "P6.0").with_adc(15),
    PinInfo::gpio(P6_1, "P6.1").with_adc(14),
    PinInfo::gpio(P6_4, "P6.4"),
    PinInfo::gpio(P6_5, "P6.5"),
    PinInfo::gpio(P6_6, "P6.6").with_pwm(),
    PinInfo::gpio(P6_7, "P6.7").with_pwm(),
];

/// LaunchPad silkscreen aliases
pub static ALIASES: [(&str, PinId); 6] = [
    ("LED1", LED1),
    ("LED2_RED", LED2_RED),
    ("LED2_GREEN", LED2_GREEN),
    ("LED2_BLUE", LED2_BLUE),
    ("S1", S1),
    ("S2", S2),
];

/// Parse a pin string from config
///
/// Supports formats:
/// - "P1.0" / "p1.0" / "P1_0" -> port 1, pin 0
/// - "LED1", "S2" -> board aliases
pub fn parse_pin_string(s: &str) -> Option<PinId> {
    let s = s.trim();

    if let Some(&(_, pin)) = ALIASES.iter().find(|(name, _)| name.eq_ignore_ascii_case(s)) {
        return Some(pin);
    }

    let rest = s.strip_prefix('P').or_else(|| s.strip_prefix('p'))?;
    let (port, bit) = rest.split_once(['.', '_'])?;
    let port: u8 = port.parse().ok()?;
    let bit: u8 = bit.parse().ok()?;
    if bit > 7 {
        return None;
    }

    let pin = PinId::new(port, bit);
    PINS.iter().any(|p| p.id == pin).then_some(pin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_ids() {
        for p in PINS.iter() {
            assert_eq!(parse_pin_string(p.name), Some(p.id), "{}", p.name);
        }
    }

    #[test]
    fn test_parse_pin_string() {
        assert_eq!(parse_pin_string("P1.0"), Some(P1_0));
        assert_eq!(parse_pin_string("p2_4"), Some(P2_4));
        assert_eq!(parse_pin_string("led1"), Some(P1_0));
        assert_eq!(parse_pin_string("S2"), Some(P1_4));

        // Invalid
        assert_eq!(parse_pin_string("P3.1"), None);
        assert_eq!(parse_pin_string("P7.0"), None);
        assert_eq!(parse_pin_string("P1.8"), None);
        assert_eq!(parse_pin_string("P10"), None);
        assert_eq!(parse_pin_string("PA0"), None);
    }

    #[test]
    fn test_adc_map() {
        let channel = |pin: PinId| PINS.iter().find(|p| p.id == pin).and_then(|p| p.adc);
        assert_eq!(channel(P5_5).map(|c| c.index()), Some(0));
        assert_eq!(channel(P4_0).map(|c| c.index()), Some(13));
        assert_eq!(channel(P6_0).map(|c| c.index()), Some(15));
        assert_eq!(channel(P1_0), None);
    }
}
