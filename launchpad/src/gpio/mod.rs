//! GPIO ports and pins used for PWM output.
//!
//! Only ports B and F carry the PWM pins this crate drives. A pin is routed to the
//! PWM peripheral by writing its port control (PCTL) nibble.

#[cfg(target_arch = "arm")]
pub(crate) mod pac;

/// GPIO ports owning PWM pins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Port {
    B,
    F,
}

/// GPIO pin bits within a port.
#[repr(u8)]
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pin {
    P0 = 0,
    P1 = 1,
    P2 = 2,
    P3 = 3,
    P4 = 4,
    P5 = 5,
    P6 = 6,
    P7 = 7,
}

/// Alternate function code written to the port control register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Function(pub u8);

/// PWM module 0 signals (`M0PWMn`).
pub const M0PWM: Function = Function(4);

/// PWM module 1 signals (`M1PWMn`).
pub const M1PWM: Function = Function(5);

/// GPIO pin tuple struct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Gpio(pub Port, pub Pin);

impl Port {
    /// Bit of this port in the clock gating and ready registers.
    #[inline]
    pub fn bit(self) -> u32 {
        match self {
            Port::B => 1 << 1,
            Port::F => 1 << 5,
        }
    }
}

impl Pin {
    /// Mask of this pin in the port data and configuration registers.
    #[inline]
    pub fn mask(self) -> u8 {
        1 << self as u8
    }
}

impl Gpio {
    #[inline]
    pub fn port(self) -> Port {
        self.0
    }

    #[inline]
    pub fn pin(self) -> Pin {
        self.1
    }

    /// PF0 doubles as the NMI input and must be unlocked before reconfiguring.
    #[inline]
    pub fn is_locked(self) -> bool {
        self == PF0
    }
}

pub const PB4: Gpio = Gpio(Port::B, Pin::P4);
pub const PB5: Gpio = Gpio(Port::B, Pin::P5);
pub const PB6: Gpio = Gpio(Port::B, Pin::P6);
pub const PB7: Gpio = Gpio(Port::B, Pin::P7);
pub const PF0: Gpio = Gpio(Port::F, Pin::P0);
pub const PF1: Gpio = Gpio(Port::F, Pin::P1);
pub const PF2: Gpio = Gpio(Port::F, Pin::P2);
pub const PF3: Gpio = Gpio(Port::F, Pin::P3);
