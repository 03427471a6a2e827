//! BeagleBone Black expansion header map
//!
//! Digital pins are identified by GPIO bank (0-3) and bit, so `gpio1_18`
//! (P9_14) is `PinId::new(1, 18)`. The seven ADC inputs are not GPIOs;
//! they live on pseudo-bank 4 with the AIN number as the bit.
//!
//! Pins used by the on-board eMMC and HDMI framer are left out.

use boardhal_core::PinInfo;
use boardhal_hal::PinId;

/// Pseudo-bank holding AIN0-AIN6
pub const AIN_BANK: u8 = 4;

/// GPIO lines per bank
pub const BANK_WIDTH: u16 = 32;

// P8 header
pub const P8_3: PinId = PinId::new(1, 6);
pub const P8_4: PinId = PinId::new(1, 7);
pub const P8_5: PinId = PinId::new(1, 2);
pub const P8_6: PinId = PinId::new(1, 3);
pub const P8_7: PinId = PinId::new(2, 2);
pub const P8_8: PinId = PinId::new(2, 3);
pub const P8_9: PinId = PinId::new(2, 5);
pub const P8_10: PinId = PinId::new(2, 4);
pub const P8_11: PinId = PinId::new(1, 13);
pub const P8_12: PinId = PinId::new(1, 12);
pub const P8_13: PinId = PinId::new(0, 23);
pub const P8_14: PinId = PinId::new(0, 26);
pub const P8_15: PinId = PinId::new(1, 15);
pub const P8_16: PinId = PinId::new(1, 14);
pub const P8_17: PinId = PinId::new(0, 27);
pub const P8_18: PinId = PinId::new(2, 1);
pub const P8_19: PinId = PinId::new(0, 22);
pub const P8_26: PinId = PinId::new(1, 29);

// P9 header
pub const P9_11: PinId = PinId::new(0, 30);
pub const P9_12: PinId = PinId::new(1, 28);
pub const P9_13: PinId = PinId::new(0, 31);
pub const P9_14: PinId = PinId::new(1, 18);
pub const P9_15: PinId = PinId::new(1, 16);
pub const P9_16: PinId = PinId::new(1, 19);
pub const P9_17: PinId = PinId::new(0, 5);
pub const P9_18: PinId = PinId::new(0, 4);
pub const P9_21: PinId = PinId::new(0, 3);
pub const P9_22: PinId = PinId::new(0, 2);
pub const P9_23: PinId = PinId::new(1, 17);
pub const P9_24: PinId = PinId::new(0, 15);
pub const P9_25: PinId = PinId::new(3, 21);
pub const P9_26: PinId = PinId::new(0, 14);
pub const P9_27: PinId = PinId::new(3, 19);
pub const P9_28: PinId = PinId::new(3, 17);
pub const P9_30: PinId = PinId::new(3, 16);
pub const P9_41: PinId = PinId::new(0, 20);
pub const P9_42: PinId = PinId::new(0, 7);

// Analog inputs (1.8 V max)
pub const AIN0: PinId = PinId::new(AIN_BANK, 0);
pub const AIN1: PinId = PinId::new(AIN_BANK, 1);
pub const AIN2: PinId = PinId::new(AIN_BANK, 2);
pub const AIN3: PinId = PinId::new(AIN_BANK, 3);
pub const AIN4: PinId = PinId::new(AIN_BANK, 4);
pub const AIN5: PinId = PinId::new(AIN_BANK, 5);
pub const AIN6: PinId = PinId::new(AIN_BANK, 6);

/// Number of pins in the table
pub const PIN_COUNT: usize = 44;

/// Pin table
///
/// PWM: EHRPWM0A/B (P9_22/P9_21), EHRPWM1A/B (P9_14/P9_16),
/// EHRPWM2A/B (P8_19/P8_13), ECAP0 (P9_42), ECAP2 (P9_28).
/// The AIN inputs are analog-only and reject digital I/O and PWM.
pub static PINS: [PinInfo; PIN_COUNT] = [
    PinInfo::gpio(P8_3, "P8_3"),
    PinInfo::gpio(P8_4, "P8_4"),
    PinInfo::gpio(P8_5, "P8_5"),
    PinInfo::gpio(P8_6, "P8_6"),
    PinInfo::gpio(P8_7, "P8_7"),
    PinInfo::gpio(P8_8, "P8_8"),
    PinInfo::gpio(P8_9, "P8_9"),
    PinInfo::gpio(P8_10, "P8_10"),
    PinInfo::gpio(P8_11, "P8_11"),
    PinInfo::gpio(P8_12, "P8_12"),
    PinInfo::gpio(P8_13, "P8_13").with_pwm(),
    PinInfo::gpio(P8_14, "P8_14"),
    PinInfo::gpio(P8_15, "P8_15"),
    PinInfo::gpio(P8_16, "P8_16"),
    PinInfo::gpio(P8_17, "P8_17"),
    PinInfo::gpio(P8_18, "P8_18"),
    PinInfo::gpio(P8_19, "P8_19").with_pwm(),
    PinInfo::gpio(P8_26, "P8_26"),
    PinInfo::gpio(P9_11, "P9_11"),
    PinInfo::gpio(P9_12, "P9_12"),
    PinInfo::gpio(P9_13, "P9_13"),
    PinInfo::gpio(P9_14, "P9_14").with_pwm(),
    PinInfo::gpio(P9_15, "P9_15"),
    PinInfo::gpio(P9_16, "P9_16").with_pwm(),
    PinInfo::gpio(P9_17, "P9_17"),
    PinInfo::gpio(P9_18, "P9_18"),
    PinInfo::gpio(P9_21, "P9_21").with_pwm(),
    PinInfo::gpio(P9_22, "P9_22").with_pwm(),
    PinInfo::gpio(P9_23, "P9_23"),
    PinInfo::gpio(P9_24, "P9_24"),
    PinInfo::gpio(P9_25, "P9_25"),
    PinInfo::gpio(P9_26, "P9_26"),
    PinInfo::gpio(P9_27, "P9_27"),
    PinInfo::gpio(P9_28, "P9_28").with_pwm(),
    PinInfo::gpio(P9_30, "P9_30"),
    PinInfo::gpio(P9_41, "P9_41"),
    PinInfo::gpio(P9_42, "P9_42").with_pwm(),
    PinInfo::analog(AIN4, "P9_33", 4),
    PinInfo::analog(AIN6, "P9_35", 6),
    PinInfo::analog(AIN5, "P9_36", 5),
    PinInfo::analog(AIN2, "P9_37", 2),
    PinInfo::analog(AIN3, "P9_38", 3),
    PinInfo::analog(AIN0, "P9_39", 0),
    PinInfo::analog(AIN1, "P9_40", 1),
];

/// Split "P9_14" / "p9.14" into (header, position)
fn header_position(s: &str) -> Option<(u8, u8)> {
    let rest = s.strip_prefix('P').or_else(|| s.strip_prefix('p'))?;
    let (header, position) = rest.split_once(['_', '.'])?;
    let header: u8 = header.parse().ok()?;
    let position: u8 = position.parse().ok()?;
    if !(8..=9).contains(&header) || !(1..=46).contains(&position) {
        return None;
    }
    Some((header, position))
}

/// Parse a pin string from config
///
/// Supports formats:
/// - "P9_14" / "p9.14" -> header P9, position 14
/// - "gpio50" -> bank 1, bit 18 (kernel GPIO number)
/// - "AIN0" -> analog input 0
pub fn parse_pin_string(s: &str) -> Option<PinId> {
    let s = s.trim();

    let pin = if let Some(position) = header_position(s) {
        return PINS
            .iter()
            .find(|p| header_position(p.name) == Some(position))
            .map(|p| p.id);
    } else if let Some(num) = strip_prefix_ignore_case(s, "gpio") {
        let num: u16 = num.parse().ok()?;
        if num >= BANK_WIDTH * u16::from(AIN_BANK) {
            return None;
        }
        PinId::new((num / BANK_WIDTH) as u8, (num % BANK_WIDTH) as u8)
    } else if let Some(num) = strip_prefix_ignore_case(s, "ain") {
        PinId::new(AIN_BANK, num.parse().ok()?)
    } else {
        return None;
    };

    PINS.iter().any(|p| p.id == pin).then_some(pin)
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &s[prefix.len()..])
}
