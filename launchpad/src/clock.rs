//! System clock setup.
//!
//! The clock is derived from the 400MHz PLL output through a single divisor. The PWM
//! clock divider stays disabled, so PWM timers count at the system clock.

use crate::registers::Registers;

/// PLL output frequency in Hertz.
pub const PLL_SPEED: u32 = 400_000_000;

/// Raw oscillator frequency in Hertz (16MHz crystal, same as the internal oscillator).
pub const OSC_SPEED: u32 = 16_000_000;

/// Divisor applied to the 400MHz PLL output.
///
/// `SysDiv(5)` gives 80MHz, `SysDiv(8)` gives 50MHz. Valid range is `5..=128`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SysDiv(pub u8);

impl SysDiv {
    /// Resulting system clock in Hertz.
    #[inline]
    pub fn speed(self) -> u32 {
        PLL_SPEED / self.0 as u32
    }

    /// Split into the `SYSDIV2` field and the `SYSDIV2LSB` bit of `RCC2`.
    #[inline]
    pub fn fields(self) -> (u32, bool) {
        let raw = self.0 as u32 - 1;
        (raw >> 1, raw & 1 == 1)
    }
}

/// Supported system clock frequencies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SystemClock {
    #[default]
    Mhz80,
    Mhz66,
    Mhz50,
    Mhz40,
    Mhz33,
    Mhz28,
    Mhz25,
    Mhz22,
    Mhz20,
    Mhz18,
    Mhz16,
    Mhz15,
    Mhz14,
    Mhz13,
    Mhz12,
}

impl SystemClock {
    /// Nominal frequency in MHz, as accepted by [set].
    #[rustfmt::skip]
    pub fn from_mhz(mhz: u32) -> Option<Self> {
        Some(match mhz {
            80 => Self::Mhz80,
            66 => Self::Mhz66,
            50 => Self::Mhz50,
            40 => Self::Mhz40,
            33 => Self::Mhz33,
            28 => Self::Mhz28,
            25 => Self::Mhz25,
            22 => Self::Mhz22,
            20 => Self::Mhz20,
            18 => Self::Mhz18,
            16 => Self::Mhz16,
            15 => Self::Mhz15,
            14 => Self::Mhz14,
            13 => Self::Mhz13,
            12 => Self::Mhz12,
            _ => return None,
        })
    }

    #[inline]
    pub fn sysdiv(self) -> SysDiv {
        SysDiv(match self {
            Self::Mhz80 => 5,
            Self::Mhz66 => 6,
            Self::Mhz50 => 8,
            Self::Mhz40 => 10,
            Self::Mhz33 => 12,
            Self::Mhz28 => 14,
            Self::Mhz25 => 16,
            Self::Mhz22 => 18,
            Self::Mhz20 => 20,
            Self::Mhz18 => 22,
            Self::Mhz16 => 24,
            Self::Mhz15 => 26,
            Self::Mhz14 => 28,
            Self::Mhz13 => 30,
            Self::Mhz12 => 32,
        })
    }

    /// Exact frequency in Hertz, e.g. 66_666_666 for [SystemClock::Mhz66].
    #[inline]
    pub fn speed(self) -> u32 {
        self.sysdiv().speed()
    }
}

/// Setup of the system clock.
///
/// Unsupported frequencies fall back to 80MHz. Returns the clock actually selected.
pub fn set<R: Registers + ?Sized>(regs: &mut R, mhz: u32) -> SystemClock {
    let clock = SystemClock::from_mhz(mhz).unwrap_or_else(|| {
        log::warn!("unsupported system clock {}MHz, using 80MHz", mhz);
        SystemClock::default()
    });
    regs.set_system_clock(clock.sysdiv());
    log::debug!("system clock set to {}Hz", clock.speed());
    clock
}

/// Current system clock speed in Hertz, as read back from the hardware.
#[inline]
pub fn speed<R: Registers + ?Sized>(regs: &R) -> u32 {
    regs.system_clock()
}

/// `RCC` and `RCC2` encodings of the PLL setup.
#[cfg_attr(not(target_arch = "arm"), allow(dead_code))]
pub(crate) mod rcc {
    use super::{SysDiv, OSC_SPEED, PLL_SPEED};

    // RCC
    const MOSCDIS: u32 = 1 << 0;
    const XTAL_MASK: u32 = 0x1F << 6;
    const XTAL_16MHZ: u32 = 0x15 << 6;
    const BYPASS: u32 = 1 << 11;
    const USEPWMDIV: u32 = 1 << 20;
    const USESYSDIV: u32 = 1 << 22;
    const SYSDIV_SHIFT: u32 = 23;

    // RCC2
    const OSCSRC2_MASK: u32 = 0x7 << 4;
    const BYPASS2: u32 = 1 << 11;
    const PWRDN2: u32 = 1 << 13;
    const SYSDIV2LSB: u32 = 1 << 22;
    const SYSDIV2_SHIFT: u32 = 23;
    const SYSDIV2_MASK: u32 = 0x3F << SYSDIV2_SHIFT;
    const DIV400: u32 = 1 << 30;
    const USERCC2: u32 = 1 << 31;

    /// Whether the main oscillator is powered down.
    #[inline]
    pub fn oscillator_off(rcc: u32) -> bool {
        rcc & MOSCDIS != 0
    }

    /// `RCC2` in control, system clock bypassing the PLL.
    #[inline]
    pub fn bypass(rcc2: u32) -> u32 {
        rcc2 | USERCC2 | BYPASS2
    }

    /// `RCC2` with the system clock back on the PLL.
    #[inline]
    pub fn unbypass(rcc2: u32) -> u32 {
        rcc2 & !BYPASS2
    }

    /// 16MHz crystal on the main oscillator, PWM clock undivided.
    #[inline]
    pub fn pll_rcc(rcc: u32) -> u32 {
        (rcc & !(XTAL_MASK | MOSCDIS | USEPWMDIV)) | XTAL_16MHZ | USESYSDIV
    }

    /// Main oscillator feeding a powered PLL, divided by `sysdiv` from 400MHz.
    #[inline]
    pub fn pll_rcc2(rcc2: u32, sysdiv: SysDiv) -> u32 {
        let (div, lsb) = sysdiv.fields();
        let mut bits = (rcc2 & !(OSCSRC2_MASK | PWRDN2 | SYSDIV2_MASK | SYSDIV2LSB))
            | DIV400
            | (div << SYSDIV2_SHIFT);
        if lsb {
            bits |= SYSDIV2LSB;
        }
        bits
    }

    /// System clock in Hertz selected by the two registers.
    pub fn speed(rcc: u32, rcc2: u32) -> u32 {
        if rcc2 & USERCC2 != 0 {
            if rcc2 & BYPASS2 != 0 {
                return OSC_SPEED;
            }
            let div = (rcc2 & SYSDIV2_MASK) >> SYSDIV2_SHIFT;
            return if rcc2 & DIV400 != 0 {
                let lsb = (rcc2 & SYSDIV2LSB != 0) as u32;
                PLL_SPEED / (((div << 1) | lsb) + 1)
            } else {
                PLL_SPEED / 2 / (div + 1)
            };
        }

        let base = if rcc & BYPASS != 0 {
            OSC_SPEED
        } else {
            PLL_SPEED / 2
        };
        if rcc & USESYSDIV != 0 {
            base / (((rcc >> SYSDIV_SHIFT) & 0xF) + 1)
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESET_RCC: u32 = 0x078E_3AD1;
    const RESET_RCC2: u32 = 0x07C0_6810;

    const SUPPORTED: [u32; 15] = [80, 66, 50, 40, 33, 28, 25, 22, 20, 18, 16, 15, 14, 13, 12];

    #[test]
    fn supported_frequencies_truncate_to_nominal_mhz() {
        for mhz in SUPPORTED {
            let clock = SystemClock::from_mhz(mhz).unwrap();
            assert_eq!(clock.speed() / 1_000_000, mhz, "{:?}", clock);
        }
    }

    #[test]
    fn unsupported_frequencies_are_rejected_by_lookup() {
        for mhz in [0, 1, 17, 100, 120] {
            assert_eq!(SystemClock::from_mhz(mhz), None);
        }
    }

    #[test]
    fn sysdiv_fields_match_rcc2_encoding() {
        // 80MHz: SYSDIV2 = 2, LSB = 0.
        assert_eq!(SysDiv(5).fields(), (2, false));
        // 50MHz: SYSDIV2 = 3, LSB = 1.
        assert_eq!(SysDiv(8).fields(), (3, true));
        // 12.5MHz: SYSDIV2 = 15, LSB = 1.
        assert_eq!(SysDiv(32).fields(), (15, true));
    }

    #[test]
    fn default_clock_is_80mhz() {
        assert_eq!(SystemClock::default(), SystemClock::Mhz80);
    }

    #[test]
    fn reset_registers_run_from_the_oscillator() {
        assert_eq!(rcc::speed(RESET_RCC, RESET_RCC2), OSC_SPEED);
        assert_eq!(rcc::speed(RESET_RCC, rcc::bypass(RESET_RCC2)), OSC_SPEED);
    }

    #[test]
    fn pll_setup_powers_the_main_oscillator() {
        assert!(rcc::oscillator_off(RESET_RCC));
        let bits = rcc::pll_rcc(RESET_RCC);
        assert!(!rcc::oscillator_off(bits));
        // PWM divider off.
        assert_eq!(bits & (1 << 20), 0);
    }

    #[test]
    fn programmed_divisor_reads_back_as_the_clock_speed() {
        for mhz in SUPPORTED {
            let clock = SystemClock::from_mhz(mhz).unwrap();
            let rcc1 = rcc::pll_rcc(RESET_RCC);
            let rcc2 = rcc::pll_rcc2(rcc::bypass(RESET_RCC2), clock.sysdiv());
            assert_eq!(rcc::speed(rcc1, rcc2), OSC_SPEED, "{:?}", clock);
            assert_eq!(rcc::speed(rcc1, rcc::unbypass(rcc2)), clock.speed(), "{:?}", clock);
        }
    }

    #[test]
    fn exact_speeds() {
        assert_eq!(SystemClock::Mhz80.speed(), 80_000_000);
        assert_eq!(SystemClock::Mhz66.speed(), 66_666_666);
        assert_eq!(SystemClock::Mhz12.speed(), 12_500_000);
    }
}
