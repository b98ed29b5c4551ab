//! Recording fake of the register primitives.

#![allow(dead_code)]

use std::collections::HashMap;

use launchpad::clock::{SysDiv, OSC_SPEED};
use launchpad::gpio::{Function, Gpio, Port};
use launchpad::pwm::{Generator, Module, Output};
use launchpad::Registers;

/// One register primitive call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    SystemClock(SysDiv),
    EnablePort(Port),
    EnableModule(Module),
    ConfigurePin(Gpio, Function),
    ConfigureGenerator(Module, Generator),
    Period(Module, Generator, u32),
    PulseWidth(Module, Output, u32),
    EnableGenerator(Module, Generator),
    Deadband(Module, Generator, u16, u16),
    OutputState(Module, u8, bool),
}

impl Op {
    /// GPIO port written by this call, if any.
    pub fn port(&self) -> Option<Port> {
        match self {
            Op::EnablePort(port) => Some(*port),
            Op::ConfigurePin(gpio, _) => Some(gpio.port()),
            _ => None,
        }
    }

    /// PWM module written by this call, if any.
    pub fn module(&self) -> Option<Module> {
        match self {
            Op::EnableModule(module)
            | Op::ConfigureGenerator(module, ..)
            | Op::Period(module, ..)
            | Op::PulseWidth(module, ..)
            | Op::EnableGenerator(module, ..)
            | Op::Deadband(module, ..)
            | Op::OutputState(module, ..) => Some(*module),
            _ => None,
        }
    }

    /// Generator written by this call, if any.
    pub fn generator(&self) -> Option<Generator> {
        match self {
            Op::ConfigureGenerator(_, generator)
            | Op::Period(_, generator, _)
            | Op::EnableGenerator(_, generator)
            | Op::Deadband(_, generator, ..) => Some(*generator),
            Op::PulseWidth(_, output, _) => Some(output.generator()),
            _ => None,
        }
    }
}

/// Registers backed by plain memory. Starts at the 16MHz reset clock.
pub struct FakeRegisters {
    pub ops: Vec<Op>,
    clock: u32,
    periods: HashMap<(Module, Generator), u32>,
    widths: HashMap<(Module, Output), u32>,
    outputs: HashMap<Module, u8>,
}

impl FakeRegisters {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            clock: OSC_SPEED,
            periods: HashMap::new(),
            widths: HashMap::new(),
            outputs: HashMap::new(),
        }
    }

    /// Fake already running at the given system clock, with no recorded calls.
    pub fn at(sysdiv: SysDiv) -> Self {
        let mut regs = Self::new();
        regs.clock = sysdiv.speed();
        regs
    }

    pub fn enabled_outputs(&self, module: Module) -> u8 {
        self.outputs.get(&module).copied().unwrap_or(0)
    }
}

impl Registers for FakeRegisters {
    fn set_system_clock(&mut self, sysdiv: SysDiv) {
        self.clock = sysdiv.speed();
        self.ops.push(Op::SystemClock(sysdiv));
    }

    fn system_clock(&self) -> u32 {
        self.clock
    }

    fn enable_port(&mut self, port: Port) {
        self.ops.push(Op::EnablePort(port));
    }

    fn enable_module(&mut self, module: Module) {
        self.ops.push(Op::EnableModule(module));
    }

    fn configure_pin(&mut self, gpio: Gpio, function: Function) {
        self.ops.push(Op::ConfigurePin(gpio, function));
    }

    fn configure_generator(&mut self, module: Module, generator: Generator) {
        self.ops.push(Op::ConfigureGenerator(module, generator));
    }

    fn set_period(&mut self, module: Module, generator: Generator, ticks: u32) {
        self.periods.insert((module, generator), ticks);
        self.ops.push(Op::Period(module, generator, ticks));
    }

    fn period(&self, module: Module, generator: Generator) -> u32 {
        self.periods.get(&(module, generator)).copied().unwrap_or(0)
    }

    fn set_pulse_width(&mut self, module: Module, output: Output, ticks: u32) {
        self.widths.insert((module, output), ticks);
        self.ops.push(Op::PulseWidth(module, output, ticks));
    }

    fn pulse_width(&self, module: Module, output: Output) -> u32 {
        self.widths.get(&(module, output)).copied().unwrap_or(0)
    }

    fn enable_generator(&mut self, module: Module, generator: Generator) {
        self.ops.push(Op::EnableGenerator(module, generator));
    }

    fn enable_deadband(&mut self, module: Module, generator: Generator, rise: u16, fall: u16) {
        self.ops.push(Op::Deadband(module, generator, rise, fall));
    }

    fn set_output_state(&mut self, module: Module, outputs: u8, enable: bool) {
        let bits = self.outputs.entry(module).or_insert(0);
        if enable {
            *bits |= outputs;
        } else {
            *bits &= !outputs;
        }
        self.ops.push(Op::OutputState(module, outputs, enable));
    }
}
