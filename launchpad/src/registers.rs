//! Register access primitives.
//!
//! The PWM driver only talks to hardware through this trait. [Device][crate::device::Device]
//! implements it on the real chip; tests substitute a recording fake.

use crate::clock::SysDiv;
use crate::gpio::{Function, Gpio, Port};
use crate::pwm::{Generator, Module, Output};

/// Clock control, GPIO and PWM register primitives.
///
/// Periods and pulse widths are full-period timer ticks. Translating them to the
/// load and compare values of an up-down counter is up to the implementation.
/// The hardware period is even, so [Registers::period] reads back one tick less
/// than an odd period written with [Registers::set_period], see
/// [load_value][crate::pwm::load_value].
pub trait Registers {
    /// Run the system clock from the PLL through `sysdiv`, PWM clock undivided.
    fn set_system_clock(&mut self, sysdiv: SysDiv);

    /// Live system clock in Hertz.
    fn system_clock(&self) -> u32;

    /// Enable the clock of a GPIO port.
    fn enable_port(&mut self, port: Port);

    /// Enable the clock of a PWM module.
    fn enable_module(&mut self, module: Module);

    /// Route a pin to an alternate function.
    fn configure_pin(&mut self, gpio: Gpio, function: Function);

    /// Set a generator to up-down counting, A and B high above their compare values.
    fn configure_generator(&mut self, module: Module, generator: Generator);

    fn set_period(&mut self, module: Module, generator: Generator, ticks: u32);

    fn period(&self, module: Module, generator: Generator) -> u32;

    fn set_pulse_width(&mut self, module: Module, output: Output, ticks: u32);

    fn pulse_width(&self, module: Module, output: Output) -> u32;

    fn enable_generator(&mut self, module: Module, generator: Generator);

    /// Program rising and falling edge delays and enable the deadband unit.
    fn enable_deadband(&mut self, module: Module, generator: Generator, rise: u16, fall: u16);

    /// Enable or disable the outputs in `outputs`, a mask of [Output::bit] values.
    fn set_output_state(&mut self, module: Module, outputs: u8, enable: bool);
}

impl<T: Registers + ?Sized> Registers for &mut T {
    #[inline]
    fn set_system_clock(&mut self, sysdiv: SysDiv) {
        (**self).set_system_clock(sysdiv)
    }

    #[inline]
    fn system_clock(&self) -> u32 {
        (**self).system_clock()
    }

    #[inline]
    fn enable_port(&mut self, port: Port) {
        (**self).enable_port(port)
    }

    #[inline]
    fn enable_module(&mut self, module: Module) {
        (**self).enable_module(module)
    }

    #[inline]
    fn configure_pin(&mut self, gpio: Gpio, function: Function) {
        (**self).configure_pin(gpio, function)
    }

    #[inline]
    fn configure_generator(&mut self, module: Module, generator: Generator) {
        (**self).configure_generator(module, generator)
    }

    #[inline]
    fn set_period(&mut self, module: Module, generator: Generator, ticks: u32) {
        (**self).set_period(module, generator, ticks)
    }

    #[inline]
    fn period(&self, module: Module, generator: Generator) -> u32 {
        (**self).period(module, generator)
    }

    #[inline]
    fn set_pulse_width(&mut self, module: Module, output: Output, ticks: u32) {
        (**self).set_pulse_width(module, output, ticks)
    }

    #[inline]
    fn pulse_width(&self, module: Module, output: Output) -> u32 {
        (**self).pulse_width(module, output)
    }

    #[inline]
    fn enable_generator(&mut self, module: Module, generator: Generator) {
        (**self).enable_generator(module, generator)
    }

    #[inline]
    fn enable_deadband(&mut self, module: Module, generator: Generator, rise: u16, fall: u16) {
        (**self).enable_deadband(module, generator, rise, fall)
    }

    #[inline]
    fn set_output_state(&mut self, module: Module, outputs: u8, enable: bool) {
        (**self).set_output_state(module, outputs, enable)
    }
}
