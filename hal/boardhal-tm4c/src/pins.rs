//! TM4C123GXL LaunchPad pin map
//!
//! Ports A-F are numbered 0-5. PC0-PC3 carry JTAG and are left out of the
//! table so they can never be reconfigured.
//!
//! PWM routes (M0PWM/M1PWM generators):
//! - PB4-PB7, PC4, PC5, PD0, PD1, PE4, PE5 on PWM0
//! - PA6, PA7, PF0-PF3 on PWM1
//!
//! ADC0 inputs AIN0-AIN11 sit on ports B, D and E.

use boardhal_core::PinInfo;
use boardhal_hal::PinId;

const PORT_A: u8 = 0;
const PORT_B: u8 = 1;
const PORT_C: u8 = 2;
const PORT_D: u8 = 3;
const PORT_E: u8 = 4;
const PORT_F: u8 = 5;

pub const PA0: PinId = PinId::new(PORT_A, 0);
pub const PA1: PinId = PinId::new(PORT_A, 1);
pub const PA2: PinId = PinId::new(PORT_A, 2);
pub const PA3: PinId = PinId::new(PORT_A, 3);
pub const PA4: PinId = PinId::new(PORT_A, 4);
pub const PA5: PinId = PinId::new(PORT_A, 5);
pub const PA6: PinId = PinId::new(PORT_A, 6);
pub const PA7: PinId = PinId::new(PORT_A, 7);

pub const PB0: PinId = PinId::new(PORT_B, 0);
pub const PB1: PinId = PinId::new(PORT_B, 1);
pub const PB2: PinId = PinId::new(PORT_B, 2);
pub const PB3: PinId = PinId::new(PORT_B, 3);
pub const PB4: PinId = PinId::new(PORT_B, 4);
pub const PB5: PinId = PinId::new(PORT_B, 5);
pub const PB6: PinId = PinId::new(PORT_B, 6);
pub const PB7: PinId = PinId::new(PORT_B, 7);

pub const PC4: PinId = PinId::new(PORT_C, 4);
pub const PC5: PinId = PinId::new(PORT_C, 5);
pub const PC6: PinId = PinId::new(PORT_C, 6);
pub const PC7: PinId = PinId::new(PORT_C, 7);

pub const PD0: PinId = PinId::new(PORT_D, 0);
pub const PD1: PinId = PinId::new(PORT_D, 1);
pub const PD2: PinId = PinId::new(PORT_D, 2);
pub const PD3: PinId = PinId::new(PORT_D, 3);
pub const PD6: PinId = PinId::new(PORT_D, 6);
pub const PD7: PinId = PinId::new(PORT_D, 7);

pub const PE0: PinId = PinId::new(PORT_E, 0);
pub const PE1: PinId = PinId::new(PORT_E, 1);
pub const PE2: PinId = PinId::new(PORT_E, 2);
pub const PE3: PinId = PinId::new(PORT_E, 3);
pub const PE4: PinId = PinId::new(PORT_E, 4);
pub const PE5: PinId = PinId::new(PORT_E, 5);

pub const PF0: PinId = PinId::new(PORT_F, 0);
pub const PF1: PinId = PinId::new(PORT_F, 1);
pub const PF2: PinId = PinId::new(PORT_F, 2);
pub const PF3: PinId = PinId::new(PORT_F, 3);
pub const PF4: PinId = PinId::new(PORT_F, 4);

/// On-board RGB LED and user switches
pub const RED_LED: PinId = PF1;
pub const BLUE_LED: PinId = PF2;
pub const GREEN_LED: PinId = PF3;
pub const SW1: PinId = PF4;
pub const SW2: PinId = PF0;

/// Number of pins in the table
pub const PIN_COUNT: usize = 37;

pub static PINS: [PinInfo; PIN_COUNT] = [
    PinInfo::gpio(PA0, "PA0"),
    PinInfo::gpio(PA1, "PA1"),
    PinInfo::gpio(PA2, "PA2"),
    PinInfo::gpio(PA3, "PA3"),
    PinInfo::gpio(PA4, "PA4"),
    PinInfo::gpio(PA5, "PA5"),
    PinInfo::gpio(PA6, "PA6").with_pwm(),
    PinInfo::gpio(PA7, "PA7").with_pwm(),
    PinInfo::gpio(PB0, "PB0"),
    PinInfo::gpio(PB1, "PB1"),
    PinInfo::gpio(PB2, "PB2"),
    PinInfo::gpio(PB3, "PB3"),
    PinInfo::gpio(PB4, "PB4").with_pwm().with_adc(10),
    PinInfo::gpio(PB5, "PB5").with_pwm().with_adc(11),
    PinInfo::gpio(PB6, "PB6").with_pwm(),
    PinInfo::gpio(PB7, "PB7").with_pwm(),
    PinInfo::gpio(PC4, "PC4").with_pwm(),
    PinInfo::gpio(PC5, "PC5").with_pwm(),
    PinInfo::gpio(PC6, "PC6"),
    PinInfo::gpio(PC7, "PC7"),
    PinInfo::gpio(PD0, "PD0").with_pwm().with_adc(7),
    PinInfo::gpio(PD1, "PD1").with_pwm().with_adc(6),
    PinInfo::gpio(PD2, "PD2").with_adc(5),
    PinInfo::gpio(PD3, "PD3").with_adc(4),
    PinInfo::gpio(PD6, "PD6"),
    PinInfo::gpio(PD7, "PD7"),
    PinInfo::gpio(PE0, "PE0").with_adc(3),
    PinInfo::gpio(PE1, "PE1").with_adc(2),
    PinInfo::gpio(PE2, "PE2").with_adc(1),
    PinInfo::gpio(PE3, "PE3").with_adc(0),
    PinInfo::gpio(PE4, "PE4").with_pwm().with_adc(9),
    PinInfo::gpio(PE5, "PE5").with_pwm().with_adc(8),
    PinInfo::gpio(PF0, "PF0").with_pwm(),
    PinInfo::gpio(PF1, "PF1").with_pwm(),
    PinInfo::gpio(PF2, "PF2").with_pwm(),
    PinInfo::gpio(PF3, "PF3").with_pwm(),
    PinInfo::gpio(PF4, "PF4"),
];

/// LaunchPad silkscreen aliases
pub static ALIASES: [(&str, PinId); 5] = [
    ("RED_LED", RED_LED),
    ("BLUE_LED", BLUE_LED),
    ("GREEN_LED", GREEN_LED),
    ("SW1", SW1),
    ("SW2", SW2),
];

/// Parse a pin string from config
///
/// Supports formats:
/// - "PF1" / "pf1" -> port F, pin 1
/// - "RED_LED", "SW1" -> board aliases
///
/// Pins missing from the table (PC0-PC3, PD4/PD5) are rejected.
pub fn parse_pin_string(s: &str) -> Option<PinId> {
    let s = s.trim();

    if let Some(&(_, pin)) = ALIASES.iter().find(|(name, _)| name.eq_ignore_ascii_case(s)) {
        return Some(pin);
    }

    let mut chars = s.chars();
    if !matches!(chars.next(), Some('P' | 'p')) {
        return None;
    }
    let port = match chars.next()?.to_ascii_uppercase() {
        c @ 'A'..='F' => c as u8 - b'A',
        _ => return None,
    };
    let bit: u8 = chars.as_str().parse().ok()?;
    if bit > 7 {
        return None;
    }

    let pin = PinId::new(port, bit);
    PINS.iter().any(|p| p.id == pin).then_some(pin)
}
