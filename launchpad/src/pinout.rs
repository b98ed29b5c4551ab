//! PWM capable pins and complementary couples.
//!
//! Pin identifiers are the LQFP-64 package pin numbers. Each one resolves to exactly
//! one [PinResource]; there is no shared configuration path between entries.
//!
//! | Id | Pin | Signal | Module | Generator |
//! |----|-----|--------|--------|-----------|
//! | 28 | PF0 | M1PWM4 | PWM1   | 2         |
//! | 29 | PF1 | M1PWM5 | PWM1   | 2         |
//! | 30 | PF2 | M1PWM6 | PWM1   | 3         |
//! | 31 | PF3 | M1PWM7 | PWM1   | 3         |
//! | 57 | PB5 | M0PWM3 | PWM0   | 1         |
//! | 58 | PB4 | M0PWM2 | PWM0   | 1         |
//! | 1  | PB6 | M0PWM0 | PWM0   | 0         |
//! | 4  | PB7 | M0PWM1 | PWM0   | 0         |

use crate::error::Error;
use crate::gpio::{self, Function, Gpio};
use crate::pwm::{Generator, Module, Output};

/// Hardware resources needed to drive one pin as PWM.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinResource {
    pub gpio: Gpio,
    pub function: Function,
    pub module: Module,
    pub generator: Generator,
    pub output: Output,
}

/// Single-ended PWM pins, numbered by package pin.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PwmPin {
    Pf0 = 28,
    Pf1 = 29,
    Pf2 = 30,
    Pf3 = 31,
    Pb5 = 57,
    Pb4 = 58,
    Pb6 = 1,
    Pb7 = 4,
}

impl PwmPin {
    pub const ALL: [PwmPin; 8] = [
        PwmPin::Pf0,
        PwmPin::Pf1,
        PwmPin::Pf2,
        PwmPin::Pf3,
        PwmPin::Pb5,
        PwmPin::Pb4,
        PwmPin::Pb6,
        PwmPin::Pb7,
    ];

    /// Package pin number.
    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    #[rustfmt::skip]
    pub fn resource(self) -> PinResource {
        let (gpio, module, generator, output) = match self {
            PwmPin::Pf0 => (gpio::PF0, Module::Pwm1, Generator::G2, Output::O4),
            PwmPin::Pf1 => (gpio::PF1, Module::Pwm1, Generator::G2, Output::O5),
            PwmPin::Pf2 => (gpio::PF2, Module::Pwm1, Generator::G3, Output::O6),
            PwmPin::Pf3 => (gpio::PF3, Module::Pwm1, Generator::G3, Output::O7),
            PwmPin::Pb5 => (gpio::PB5, Module::Pwm0, Generator::G1, Output::O3),
            PwmPin::Pb4 => (gpio::PB4, Module::Pwm0, Generator::G1, Output::O2),
            PwmPin::Pb6 => (gpio::PB6, Module::Pwm0, Generator::G0, Output::O0),
            PwmPin::Pb7 => (gpio::PB7, Module::Pwm0, Generator::G0, Output::O1),
        };
        PinResource {
            gpio,
            function: module.function(),
            module,
            generator,
            output,
        }
    }
}

impl TryFrom<u8> for PwmPin {
    type Error = Error;

    fn try_from(id: u8) -> Result<Self, Error> {
        PwmPin::ALL
            .iter()
            .copied()
            .find(|pin| pin.id() == id)
            .ok_or(Error::UnsupportedPin(id))
    }
}

/// Complementary pin pairs sharing one generator and its deadband unit.
///
/// The first pin carries the generator's A signal, the second its inverse.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Couple {
    /// PB6 / PB7 on PWM0 generator 0.
    C1 = 1,
    /// PB4 / PB5 on PWM0 generator 1.
    C2 = 2,
    /// PF0 / PF1 on PWM1 generator 2.
    C3 = 3,
    /// PF2 / PF3 on PWM1 generator 3.
    C4 = 4,
}

impl Couple {
    pub const ALL: [Couple; 4] = [Couple::C1, Couple::C2, Couple::C3, Couple::C4];

    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Driven and inverted pin of this couple.
    #[inline]
    pub fn pins(self) -> (PwmPin, PwmPin) {
        match self {
            Couple::C1 => (PwmPin::Pb6, PwmPin::Pb7),
            Couple::C2 => (PwmPin::Pb4, PwmPin::Pb5),
            Couple::C3 => (PwmPin::Pf0, PwmPin::Pf1),
            Couple::C4 => (PwmPin::Pf2, PwmPin::Pf3),
        }
    }

    #[inline]
    pub fn resources(self) -> (PinResource, PinResource) {
        let (a, b) = self.pins();
        (a.resource(), b.resource())
    }
}

impl TryFrom<u8> for Couple {
    type Error = Error;

    fn try_from(id: u8) -> Result<Self, Error> {
        Couple::ALL
            .iter()
            .copied()
            .find(|couple| couple.id() == id)
            .ok_or(Error::UnsupportedCouple(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio::{Pin, Port};

    #[test]
    fn ids_round_trip_through_table() {
        for pin in PwmPin::ALL {
            assert_eq!(PwmPin::try_from(pin.id()), Ok(pin));
        }
        for couple in Couple::ALL {
            assert_eq!(Couple::try_from(couple.id()), Ok(couple));
        }
    }

    #[test]
    fn unknown_ids_are_errors() {
        assert_eq!(PwmPin::try_from(0), Err(Error::UnsupportedPin(0)));
        assert_eq!(PwmPin::try_from(2), Err(Error::UnsupportedPin(2)));
        assert_eq!(PwmPin::try_from(59), Err(Error::UnsupportedPin(59)));
        assert_eq!(Couple::try_from(0), Err(Error::UnsupportedCouple(0)));
        assert_eq!(Couple::try_from(5), Err(Error::UnsupportedCouple(5)));
    }

    #[test]
    fn package_pins_map_to_datasheet_signals() {
        let pb5 = PwmPin::Pb5.resource();
        assert_eq!(pb5.gpio, Gpio(Port::B, Pin::P5));
        assert_eq!(pb5.output, Output::O3);

        let pb4 = PwmPin::Pb4.resource();
        assert_eq!(pb4.gpio, Gpio(Port::B, Pin::P4));
        assert_eq!(pb4.output, Output::O2);

        let pf0 = PwmPin::Pf0.resource();
        assert_eq!(pf0.module, Module::Pwm1);
        assert_eq!(pf0.function, gpio::M1PWM);
    }

    #[test]
    fn every_output_belongs_to_its_generator() {
        for pin in PwmPin::ALL {
            let res = pin.resource();
            assert_eq!(res.output.generator(), res.generator, "{:?}", pin);
            assert_eq!(res.module.function(), res.function);
        }
    }

    #[test]
    fn outputs_are_unique() {
        for (i, a) in PwmPin::ALL.iter().enumerate() {
            for b in &PwmPin::ALL[i + 1..] {
                let (ra, rb) = (a.resource(), b.resource());
                assert!(ra.gpio != rb.gpio);
                assert!((ra.module, ra.output) != (rb.module, rb.output));
            }
        }
    }

    #[test]
    fn couples_share_one_generator_as_a_and_b() {
        for couple in Couple::ALL {
            let (a, b) = couple.resources();
            assert_eq!(a.module, b.module);
            assert_eq!(a.generator, b.generator);
            assert!(a.output.is_a());
            assert!(!b.output.is_a());
        }
    }
}
