//! [Registers] implementation for the TM4C123GH6PM.

use tm4c123x::{GPIO_PORTB, GPIO_PORTF, PWM0, PWM1, SYSCTL};

use crate::clock::{rcc, SysDiv};
use crate::gpio::{self, Function, Gpio, Port};
use crate::pwm::{self, Generator, Module, Output};
use crate::registers::Registers;

// RIS, and the matching clear bits of MISC
const PLLL: u32 = 1 << 6;
const MOSCPUP: u32 = 1 << 8;

/// The PWM capable part of the microcontroller.
///
/// Owns the peripherals it writes to, so no other driver can reconfigure them.
pub struct Device {
    _sysctl: SYSCTL,
    _portb: GPIO_PORTB,
    _portf: GPIO_PORTF,
    _pwm0: PWM0,
    _pwm1: PWM1,
}

impl Device {
    pub fn new(
        sysctl: SYSCTL,
        portb: GPIO_PORTB,
        portf: GPIO_PORTF,
        pwm0: PWM0,
        pwm1: PWM1,
    ) -> Self {
        Self {
            _sysctl: sysctl,
            _portb: portb,
            _portf: portf,
            _pwm0: pwm0,
            _pwm1: pwm1,
        }
    }

    /// Take the peripherals from the device crate.
    ///
    /// Returns `None` if they were taken before.
    pub fn take() -> Option<Self> {
        let dp = tm4c123x::Peripherals::take()?;
        Some(Self::new(
            dp.SYSCTL,
            dp.GPIO_PORTB,
            dp.GPIO_PORTF,
            dp.PWM0,
            dp.PWM1,
        ))
    }

    #[inline]
    fn sysctl(&self) -> &tm4c123x::sysctl::RegisterBlock {
        unsafe { &*SYSCTL::ptr() }
    }
}

impl Registers for Device {
    fn set_system_clock(&mut self, sysdiv: SysDiv) {
        let sysctl = self.sysctl();

        // Run from the raw oscillator while the PLL relocks.
        sysctl
            .rcc2
            .modify(|r, w| unsafe { w.bits(rcc::bypass(r.bits())) });

        // Power up the main oscillator before the PLL uses it.
        let powering_up = rcc::oscillator_off(sysctl.rcc.read().bits());
        if powering_up {
            sysctl.misc.write(|w| unsafe { w.bits(MOSCPUP) });
        }
        sysctl
            .rcc
            .modify(|r, w| unsafe { w.bits(rcc::pll_rcc(r.bits())) });
        if powering_up {
            while sysctl.ris.read().bits() & MOSCPUP == 0 {}
        }

        sysctl.misc.write(|w| unsafe { w.bits(PLLL) });
        sysctl
            .rcc2
            .modify(|r, w| unsafe { w.bits(rcc::pll_rcc2(r.bits(), sysdiv)) });

        // Wait for the PLL to lock.
        while sysctl.ris.read().bits() & PLLL == 0 {}

        // Switch to the PLL.
        sysctl
            .rcc2
            .modify(|r, w| unsafe { w.bits(rcc::unbypass(r.bits())) });
    }

    fn system_clock(&self) -> u32 {
        let sysctl = self.sysctl();
        rcc::speed(sysctl.rcc.read().bits(), sysctl.rcc2.read().bits())
    }

    fn enable_port(&mut self, port: Port) {
        let sysctl = self.sysctl();
        sysctl
            .rcgcgpio
            .modify(|r, w| unsafe { w.bits(r.bits() | port.bit()) });
        while sysctl.prgpio.read().bits() & port.bit() == 0 {}
    }

    fn enable_module(&mut self, module: Module) {
        let sysctl = self.sysctl();
        sysctl
            .rcgcpwm
            .modify(|r, w| unsafe { w.bits(r.bits() | module.bit()) });
        while sysctl.prpwm.read().bits() & module.bit() == 0 {}
    }

    #[inline]
    fn configure_pin(&mut self, gpio: Gpio, function: Function) {
        gpio::pac::configure(gpio, function);
    }

    #[inline]
    fn configure_generator(&mut self, module: Module, generator: Generator) {
        pwm::pac::configure(module, generator);
    }

    #[inline]
    fn set_period(&mut self, module: Module, generator: Generator, ticks: u32) {
        pwm::pac::set_period(module, generator, ticks);
    }

    #[inline]
    fn period(&self, module: Module, generator: Generator) -> u32 {
        pwm::pac::period(module, generator)
    }

    #[inline]
    fn set_pulse_width(&mut self, module: Module, output: Output, ticks: u32) {
        pwm::pac::set_pulse_width(module, output, ticks);
    }

    #[inline]
    fn pulse_width(&self, module: Module, output: Output) -> u32 {
        pwm::pac::pulse_width(module, output)
    }

    #[inline]
    fn enable_generator(&mut self, module: Module, generator: Generator) {
        pwm::pac::enable_generator(module, generator);
    }

    #[inline]
    fn enable_deadband(&mut self, module: Module, generator: Generator, rise: u16, fall: u16) {
        pwm::pac::enable_deadband(module, generator, rise, fall);
    }

    #[inline]
    fn set_output_state(&mut self, module: Module, outputs: u8, enable: bool) {
        pwm::pac::set_output_state(module, outputs, enable);
    }
}
