//! Raspberry Pi 40-pin header map (BCM numbering)
//!
//! All user GPIOs sit in one bank, so `GPIO18` is `PinId::new(0, 18)`.
//! GPIO0/1 (HAT EEPROM I2C) are reserved and left out.

use boardhal_core::PinInfo;
use boardhal_hal::PinId;

/// Lowest user GPIO
pub const FIRST_GPIO: u8 = 2;
/// Highest GPIO on the header
pub const LAST_GPIO: u8 = 27;

/// GPIO by BCM number
pub const fn gpio(n: u8) -> PinId {
    PinId::new(0, n)
}

pub const GPIO2: PinId = gpio(2);
pub const GPIO3: PinId = gpio(3);
pub const GPIO4: PinId = gpio(4);
pub const GPIO5: PinId = gpio(5);
pub const GPIO6: PinId = gpio(6);
pub const GPIO7: PinId = gpio(7);
pub const GPIO8: PinId = gpio(8);
pub const GPIO9: PinId = gpio(9);
pub const GPIO10: PinId = gpio(10);
pub const GPIO11: PinId = gpio(11);
pub const GPIO12: PinId = gpio(12);
pub const GPIO13: PinId = gpio(13);
pub const GPIO14: PinId = gpio(14);
pub const GPIO15: PinId = gpio(15);
pub const GPIO16: PinId = gpio(16);
pub const GPIO17: PinId = gpio(17);
pub const GPIO18: PinId = gpio(18);
pub const GPIO19: PinId = gpio(19);
pub const GPIO20: PinId = gpio(20);
pub const GPIO21: PinId = gpio(21);
pub const GPIO22: PinId = gpio(22);
pub const GPIO23: PinId = gpio(23);
pub const GPIO24: PinId = gpio(24);
pub const GPIO25: PinId = gpio(25);
pub const GPIO26: PinId = gpio(26);
pub const GPIO27: PinId = gpio(27);

/// Number of pins in the table
pub const PIN_COUNT: usize = (LAST_GPIO - FIRST_GPIO + 1) as usize;

/// Pin table
///
/// PWM0 on GPIO12/GPIO18, PWM1 on GPIO13/GPIO19. The BCM2835 has no ADC.
pub static PINS: [PinInfo; PIN_COUNT] = [
    PinInfo::gpio(GPIO2, "GPIO2"),
    PinInfo::gpio(GPIO3, "GPIO3"),
    PinInfo::gpio(GPIO4, "GPIO4"),
    PinInfo::gpio(GPIO5, "GPIO5"),
    PinInfo::gpio(GPIO6, "GPIO6"),
    PinInfo::gpio(GPIO7, "GPIO7"),
    PinInfo::gpio(GPIO8, "GPIO8"),
    PinInfo::gpio(GPIO9, "GPIO9"),
    PinInfo::gpio(GPIO10, "GPIO10"),
    PinInfo::gpio(GPIO11, "GPIO11"),
    PinInfo::gpio(GPIO12, "GPIO12").with_pwm(),
    PinInfo::gpio(GPIO13, "GPIO13").with_pwm(),
    PinInfo::gpio(GPIO14, "GPIO14"),
    PinInfo::gpio(GPIO15, "GPIO15"),
    PinInfo::gpio(GPIO16, "GPIO16"),
    PinInfo::gpio(GPIO17, "GPIO17"),
    PinInfo::gpio(GPIO18, "GPIO18").with_pwm(),
    PinInfo::gpio(GPIO19, "GPIO19").with_pwm(),
    PinInfo::gpio(GPIO20, "GPIO20"),
    PinInfo::gpio(GPIO21, "GPIO21"),
    PinInfo::gpio(GPIO22, "GPIO22"),
    PinInfo::gpio(GPIO23, "GPIO23"),
    PinInfo::gpio(GPIO24, "GPIO24"),
    PinInfo::gpio(GPIO25, "GPIO25"),
    PinInfo::gpio(GPIO26, "GPIO26"),
    PinInfo::gpio(GPIO27, "GPIO27"),
];

/// Parse a pin string from config
///
/// Supports formats:
/// - "gpio18" / "GPIO18" -> GPIO 18
/// - "BCM18" -> GPIO 18
pub fn parse_pin_string(s: &str) -> Option<PinId> {
    let s = s.trim();

    let num = ["gpio", "bcm"].iter().find_map(|prefix| {
        let head = s.get(..prefix.len())?;
        head.eq_ignore_ascii_case(prefix)
            .then(|| &s[prefix.len()..])
    })?;

    let n: u8 = num.parse().ok()?;
    if !(FIRST_GPIO..=LAST_GPIO).contains(&n) {
        return None;
    }

    Some(gpio(n))
}
