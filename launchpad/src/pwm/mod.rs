//! PWM outputs.
//!
//! Example usage:
//!
//! ```ignore
//! let mut pwm = pwm::Config::default().make(device);
//! pwm.set_system_clock(80);
//!
//! pwm.configure_single(PwmPin::Pb6);
//! pwm.write_single(PwmPin::Pb6, 5_000, 0.5)?;
//!
//! pwm.configure_couple(Couple::C3);
//! pwm.write_couple(Couple::C3, 20_000, 0.25, 1.0)?;
//! ```
//!
//! Both outputs of a generator share its period, so writing one pin also retimes its
//! sibling (e.g. PF0 and PF1).

mod channel;
#[cfg(target_arch = "arm")]
pub(crate) mod pac;

pub use channel::Channel;

use crate::clock::{self, SystemClock};
use crate::error::Error;
use crate::gpio::{self, Function};
use crate::pinout::{Couple, PinResource, PwmPin};
use crate::registers::Registers;

/// Largest period in up-down mode: twice the 16 bit load value.
pub const MAX_PERIOD: u32 = 2 * u16::MAX as u32;

/// Smallest period in up-down mode.
pub const MIN_PERIOD: u32 = 2;

/// Deadband delays are 12 bit counts.
pub const MAX_DEADBAND: u32 = 0xFFF;

/// PWM modules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Module {
    Pwm0,
    Pwm1,
}

/// Generator blocks within a module.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Generator {
    G0 = 0,
    G1 = 1,
    G2 = 2,
    G3 = 3,
}

/// Output signals of a module, two per generator.
#[repr(u8)]
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Output {
    O0 = 0,
    O1 = 1,
    O2 = 2,
    O3 = 3,
    O4 = 4,
    O5 = 5,
    O6 = 6,
    O7 = 7,
}

impl Module {
    /// Bit of this module in the clock gating and ready registers.
    #[inline]
    pub fn bit(self) -> u32 {
        match self {
            Module::Pwm0 => 1 << 0,
            Module::Pwm1 => 1 << 1,
        }
    }

    /// Pin function routing a pin to this module.
    #[inline]
    pub fn function(self) -> Function {
        match self {
            Module::Pwm0 => gpio::M0PWM,
            Module::Pwm1 => gpio::M1PWM,
        }
    }
}

impl Output {
    #[inline]
    pub fn generator(self) -> Generator {
        match self as u8 / 2 {
            0 => Generator::G0,
            1 => Generator::G1,
            2 => Generator::G2,
            _ => Generator::G3,
        }
    }

    /// Bit of this output in the output enable register.
    #[inline]
    pub fn bit(self) -> u8 {
        1 << self as u8
    }

    /// Whether this output is driven by the generator's A signal (compare A).
    #[inline]
    pub fn is_a(self) -> bool {
        self as u8 % 2 == 0
    }
}

/// Scaling of the deadband argument of [Pwm::write_couple].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeadbandScale {
    /// Deadband is given in microseconds.
    Microseconds,
    /// Deadband is multiplied by `clock * 1e-5`, i.e. ten times the microsecond value.
    ///
    /// For firmware tuned against the 1e-5 scaling. The deadband counters are 12 bit,
    /// so 10 us only fits at clocks up to 40.95MHz.
    Legacy,
}

impl DeadbandScale {
    #[inline]
    fn divisor(self) -> f32 {
        match self {
            DeadbandScale::Microseconds => 1_000_000.0,
            DeadbandScale::Legacy => 100_000.0,
        }
    }
}

/// PWM driver configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub deadband: DeadbandScale,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            deadband: DeadbandScale::Microseconds,
        }
    }
}

impl Config {
    #[inline]
    pub fn make<R: Registers>(self, regs: R) -> Pwm<R> {
        Pwm::new(regs, self)
    }
}

/// Timer period in ticks for `frequency` at `clock`.
pub fn period_ticks(clock: u32, frequency: u32) -> Result<u32, Error> {
    if frequency == 0 {
        return Err(Error::InvalidFrequency);
    }
    let ticks = clock / frequency;
    if !(MIN_PERIOD..=MAX_PERIOD).contains(&ticks) {
        return Err(Error::PeriodOutOfRange { ticks });
    }
    Ok(ticks)
}

/// Pulse width in ticks, `duty * period` rounded to the nearest tick.
pub fn pulse_ticks(period: u32, duty: f32) -> Result<u32, Error> {
    if !(0.0..=1.0).contains(&duty) {
        return Err(Error::InvalidDuty(duty));
    }
    Ok((duty * period as f32 + 0.5) as u32)
}

/// Deadband in ticks. A positive deadband is at least one tick.
pub fn deadband_ticks(clock: u32, deadband: f32, scale: DeadbandScale) -> Result<u16, Error> {
    if !(deadband >= 0.0) {
        return Err(Error::InvalidDeadband(deadband));
    }
    let exact = deadband * (clock as f32 / scale.divisor());
    let mut ticks = (exact + 0.5) as u32;
    if ticks == 0 && deadband > 0.0 {
        ticks = 1;
    }
    if ticks > MAX_DEADBAND {
        return Err(Error::DeadbandOutOfRange { ticks });
    }
    Ok(ticks as u16)
}

/// Load value counting up-down through `period` ticks.
///
/// The counter runs `2 * load` ticks per cycle, so an odd period loses its last tick.
#[inline]
pub fn load_value(period: u32) -> u16 {
    (period / 2).min(u16::MAX as u32) as u16
}

/// Period in ticks of an up-down counter loaded with `load`.
#[inline]
pub fn load_period(load: u16) -> u32 {
    2 * load as u32
}

/// Compare value giving a high time of `width` ticks within `period`.
///
/// The output is high while the counter is above the compare value, centred on the
/// load value.
#[inline]
pub fn compare_value(period: u32, width: u32) -> u16 {
    ((period - width.min(period)) / 2).min(u16::MAX as u32) as u16
}

/// High time in ticks of a compare value within `period`.
#[inline]
pub fn compare_width(period: u32, cmp: u16) -> u32 {
    period.saturating_sub(2 * cmp as u32)
}

/// PWM driver over a set of [Registers].
///
/// Holds no PWM state of its own: every write goes straight to the registers.
pub struct Pwm<R: Registers> {
    regs: R,
    config: Config,
}

impl<R: Registers> Pwm<R> {
    #[inline]
    pub fn new(regs: R, config: Config) -> Self {
        Self { regs, config }
    }

    /// Set the system clock, see [clock::set].
    ///
    /// Must be called before any write, periods are derived from the live clock.
    #[inline]
    pub fn set_system_clock(&mut self, mhz: u32) -> SystemClock {
        clock::set(&mut self.regs, mhz)
    }

    /// Configure a pin as single-ended PWM output.
    ///
    /// Enables the port and module owning the pin, routes the pin to the module and
    /// sets its generator to up-down counting without synchronisation.
    pub fn configure_single(&mut self, pin: PwmPin) {
        let res = pin.resource();
        log::debug!(
            "pin {}: {:?} on {:?} {:?} {:?}",
            pin.id(),
            res.gpio,
            res.module,
            res.generator,
            res.output
        );
        self.enable(&res);
        self.regs.configure_pin(res.gpio, res.function);
        self.regs.configure_generator(res.module, res.generator);
    }

    /// Drive a configured pin at `frequency` Hertz with the given duty ratio in `[0, 1]`.
    pub fn write_single(&mut self, pin: PwmPin, frequency: u32, duty: f32) -> Result<(), Error> {
        let res = pin.resource();
        let period = period_ticks(self.regs.system_clock(), frequency)?;
        let pulse = pulse_ticks(period, duty)?;
        log::debug!("pin {}: period {} pulse {}", pin.id(), period, pulse);

        self.regs.set_period(res.module, res.generator, period);
        self.regs.set_pulse_width(res.module, res.output, pulse);
        self.regs.enable_generator(res.module, res.generator);
        self.regs.set_output_state(res.module, res.output.bit(), true);
        Ok(())
    }

    /// Configure both pins of a couple for complementary output.
    pub fn configure_couple(&mut self, couple: Couple) {
        let (a, b) = couple.resources();
        log::debug!(
            "couple {}: {:?}/{:?} on {:?} {:?}",
            couple.id(),
            a.gpio,
            b.gpio,
            a.module,
            a.generator
        );
        self.enable(&a);
        self.regs.configure_pin(a.gpio, a.function);
        self.regs.configure_pin(b.gpio, b.function);
        self.regs.configure_generator(a.module, a.generator);
    }

    /// Drive a configured couple: the first pin at the given duty ratio, the second
    /// inverted, with `deadband` inserted before each rising edge.
    ///
    /// The deadband unit is what keeps both pins from being high at the same time.
    pub fn write_couple(
        &mut self,
        couple: Couple,
        frequency: u32,
        duty: f32,
        deadband: f32,
    ) -> Result<(), Error> {
        let (a, b) = couple.resources();
        let clock = self.regs.system_clock();
        let period = period_ticks(clock, frequency)?;
        let pulse = pulse_ticks(period, duty)?;
        let dead = deadband_ticks(clock, deadband, self.config.deadband)?;
        log::debug!(
            "couple {}: period {} pulse {} deadband {}",
            couple.id(),
            period,
            pulse,
            dead
        );

        self.regs.set_period(a.module, a.generator, period);
        self.regs.set_pulse_width(a.module, a.output, pulse);
        self.regs.enable_deadband(a.module, a.generator, dead, dead);
        self.regs.enable_generator(a.module, a.generator);
        self.regs
            .set_output_state(a.module, a.output.bit() | b.output.bit(), true);
        Ok(())
    }

    /// Handle on a single pin, see [Channel].
    #[inline]
    pub fn channel(&mut self, pin: PwmPin) -> Channel<'_, R> {
        Channel::new(&mut self.regs, pin)
    }

    #[inline]
    pub fn registers(&mut self) -> &mut R {
        &mut self.regs
    }

    #[inline]
    pub fn release(self) -> R {
        self.regs
    }

    #[inline]
    fn enable(&mut self, res: &PinResource) {
        self.regs.enable_port(res.gpio.port());
        self.regs.enable_module(res.module);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_is_truncated_clock_over_frequency() {
        assert_eq!(period_ticks(80_000_000, 5_000), Ok(16_000));
        assert_eq!(period_ticks(80_000_000, 1_000), Ok(80_000));
        assert_eq!(period_ticks(66_666_666, 20_000), Ok(3_333));
    }

    #[test]
    fn zero_frequency_is_rejected() {
        assert_eq!(period_ticks(80_000_000, 0), Err(Error::InvalidFrequency));
    }

    #[test]
    fn period_must_fit_the_counter() {
        assert_eq!(
            period_ticks(80_000_000, 100),
            Err(Error::PeriodOutOfRange { ticks: 800_000 })
        );
        assert_eq!(
            period_ticks(80_000_000, 80_000_000),
            Err(Error::PeriodOutOfRange { ticks: 1 })
        );
        assert_eq!(period_ticks(12_500_000, 200), Ok(62_500));
    }

    #[test]
    fn pulse_rounds_to_nearest_tick() {
        assert_eq!(pulse_ticks(16_000, 0.5), Ok(8_000));
        assert_eq!(pulse_ticks(3, 0.5), Ok(2));
        assert_eq!(pulse_ticks(3_333, 1.0), Ok(3_333));
        assert_eq!(pulse_ticks(3_333, 0.0), Ok(0));
    }

    #[test]
    fn duty_outside_unit_range_is_rejected() {
        assert_eq!(pulse_ticks(100, 1.5), Err(Error::InvalidDuty(1.5)));
        assert_eq!(pulse_ticks(100, -0.1), Err(Error::InvalidDuty(-0.1)));
        assert!(matches!(pulse_ticks(100, f32::NAN), Err(Error::InvalidDuty(_))));
    }

    #[test]
    fn deadband_scales() {
        let us = DeadbandScale::Microseconds;
        assert_eq!(deadband_ticks(80_000_000, 10.0, us), Ok(800));
        assert_eq!(deadband_ticks(16_000_000, 10.0, DeadbandScale::Legacy), Ok(1_600));
        assert_eq!(
            deadband_ticks(80_000_000, 10.0, DeadbandScale::Legacy),
            Err(Error::DeadbandOutOfRange { ticks: 8_000 })
        );
    }

    #[test]
    fn positive_deadband_never_rounds_to_zero() {
        let us = DeadbandScale::Microseconds;
        assert_eq!(deadband_ticks(12_500_000, 0.001, us), Ok(1));
        assert_eq!(deadband_ticks(12_500_000, 0.0, us), Ok(0));
    }

    #[test]
    fn negative_deadband_is_rejected() {
        let us = DeadbandScale::Microseconds;
        assert_eq!(
            deadband_ticks(80_000_000, -1.0, us),
            Err(Error::InvalidDeadband(-1.0))
        );
        assert!(matches!(
            deadband_ticks(80_000_000, f32::NAN, us),
            Err(Error::InvalidDeadband(_))
        ));
    }

    #[test]
    fn odd_periods_lose_one_tick_to_the_load_value() {
        // 66.67MHz / 20kHz
        assert_eq!(load_value(3_333), 1_666);
        assert_eq!(load_period(load_value(3_333)), 3_332);
        assert_eq!(load_period(load_value(16_000)), 16_000);
        assert_eq!(load_value(MAX_PERIOD), u16::MAX);
    }

    #[test]
    fn compare_value_centres_the_pulse() {
        assert_eq!(compare_value(16_000, 8_000), 4_000);
        assert_eq!(compare_value(16_000, 16_000), 0);
        assert_eq!(compare_value(16_000, 0), 8_000);
        assert_eq!(compare_value(16_000, 20_000), 0);
        assert_eq!(compare_width(16_000, 4_000), 8_000);
        assert_eq!(compare_width(16_000, 9_000), 0);
    }

    #[test]
    fn outputs_pair_up_per_generator() {
        assert_eq!(Output::O0.generator(), Generator::G0);
        assert_eq!(Output::O3.generator(), Generator::G1);
        assert_eq!(Output::O7.generator(), Generator::G3);
        assert!(Output::O4.is_a());
        assert!(!Output::O5.is_a());
        assert_eq!(Output::O5.bit(), 0x20);
    }
}
