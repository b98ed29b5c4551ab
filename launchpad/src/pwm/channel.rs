use crate::pinout::{PinResource, PwmPin};
use crate::registers::Registers;

/// A single PWM pin, borrowed from a [Pwm][super::Pwm].
///
/// Implements [embedded_hal::PwmPin] with the duty expressed in timer ticks. The
/// maximum duty is the generator period last written for the pin, so the pin must
/// have been written once before duty values are meaningful.
pub struct Channel<'a, R: Registers> {
    regs: &'a mut R,
    pin: PwmPin,
    res: PinResource,
}

impl<'a, R: Registers> Channel<'a, R> {
    #[inline]
    pub(crate) fn new(regs: &'a mut R, pin: PwmPin) -> Self {
        Self {
            regs,
            pin,
            res: pin.resource(),
        }
    }

    #[inline]
    pub fn pin(&self) -> PwmPin {
        self.pin
    }

    /// Generator period in ticks.
    #[inline]
    pub fn read_period(&self) -> u32 {
        self.regs.period(self.res.module, self.res.generator)
    }

    /// Pulse width in ticks.
    #[inline]
    pub fn read_pulse_width(&self) -> u32 {
        self.regs.pulse_width(self.res.module, self.res.output)
    }

    /// Current duty ratio, `0.0` while the generator has no period.
    pub fn duty_ratio(&self) -> f32 {
        match self.read_period() {
            0 => 0.0,
            period => self.read_pulse_width() as f32 / period as f32,
        }
    }
}

impl<'a, R: Registers> embedded_hal::PwmPin for Channel<'a, R> {
    type Duty = u32;

    fn disable(&mut self) {
        self.regs
            .set_output_state(self.res.module, self.res.output.bit(), false);
    }

    fn enable(&mut self) {
        self.regs
            .set_output_state(self.res.module, self.res.output.bit(), true);
    }

    fn get_duty(&self) -> u32 {
        self.read_pulse_width()
    }

    fn get_max_duty(&self) -> u32 {
        self.read_period()
    }

    /// Values above [get_max_duty][embedded_hal::PwmPin::get_max_duty] are clamped.
    fn set_duty(&mut self, duty: u32) {
        let duty = duty.min(self.read_period());
        self.regs
            .set_pulse_width(self.res.module, self.res.output, duty);
    }
}
