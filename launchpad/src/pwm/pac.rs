//! PWM module register access.

use tm4c123x::{pwm0::RegisterBlock as PwmRegisterBlock, PWM0, PWM1};

use super::{compare_value, compare_width, load_period, load_value, Generator, Module, Output};

const CTL_ENABLE: u32 = 1 << 0;
const CTL_MODE: u32 = 1 << 1;
/// Debug, update mode and fault configuration bits replaced by [configure].
const CTL_CONFIG: u32 = 0x0007_FFFE;

const DBCTL_ENABLE: u32 = 1 << 0;

/// Action codes of the generator control registers.
const ACT_ZERO: u32 = 2;
const ACT_ONE: u32 = 3;

/// Output high on compare while counting up, low on compare while counting down.
const GENA_UP_DOWN: u32 = (ACT_ONE << 4) | (ACT_ZERO << 6);
const GENB_UP_DOWN: u32 = (ACT_ONE << 8) | (ACT_ZERO << 10);

/// Run `$body` with `$reg` bound to the register of `$generator` among the four listed.
///
/// Each generator has its own register types, so every arm is expanded separately.
macro_rules! generator {
    ($pwm:expr, $generator:expr, [$g0:ident, $g1:ident, $g2:ident, $g3:ident], |$reg:ident| $body:expr) => {
        match $generator {
            Generator::G0 => {
                let $reg = &$pwm.$g0;
                $body
            }
            Generator::G1 => {
                let $reg = &$pwm.$g1;
                $body
            }
            Generator::G2 => {
                let $reg = &$pwm.$g2;
                $body
            }
            Generator::G3 => {
                let $reg = &$pwm.$g3;
                $body
            }
        }
    };
}

impl Module {
    #[inline]
    fn ptr(self) -> *const PwmRegisterBlock {
        match self {
            Module::Pwm0 => PWM0::ptr(),
            Module::Pwm1 => PWM1::ptr(),
        }
    }

    #[inline]
    fn regs(self) -> &'static PwmRegisterBlock {
        unsafe { &*self.ptr() }
    }
}

/// Up-down counting, load and compare updates at the next zero count.
pub(crate) fn configure(module: Module, generator: Generator) {
    let pwm = module.regs();
    unsafe {
        generator!(pwm, generator, [_0_ctl, _1_ctl, _2_ctl, _3_ctl], |ctl| ctl
            .modify(|r, w| w.bits((r.bits() & !CTL_CONFIG) | CTL_MODE)));
        generator!(pwm, generator, [_0_gena, _1_gena, _2_gena, _3_gena], |reg| reg
            .write(|w| w.bits(GENA_UP_DOWN)));
        generator!(pwm, generator, [_0_genb, _1_genb, _2_genb, _3_genb], |reg| reg
            .write(|w| w.bits(GENB_UP_DOWN)));
    }
}

pub(crate) fn set_period(module: Module, generator: Generator, ticks: u32) {
    let pwm = module.regs();
    let load = load_value(ticks) as u32;
    generator!(pwm, generator, [_0_load, _1_load, _2_load, _3_load], |reg| reg
        .write(|w| unsafe { w.bits(load) }));
}

pub(crate) fn period(module: Module, generator: Generator) -> u32 {
    let pwm = module.regs();
    let load = generator!(pwm, generator, [_0_load, _1_load, _2_load, _3_load], |reg| reg
        .read()
        .bits());
    load_period(load as u16)
}

pub(crate) fn set_pulse_width(module: Module, output: Output, ticks: u32) {
    let pwm = module.regs();
    let generator = output.generator();
    let cmp = compare_value(period(module, generator), ticks) as u32;
    if output.is_a() {
        generator!(pwm, generator, [_0_cmpa, _1_cmpa, _2_cmpa, _3_cmpa], |reg| reg
            .write(|w| unsafe { w.bits(cmp) }));
    } else {
        generator!(pwm, generator, [_0_cmpb, _1_cmpb, _2_cmpb, _3_cmpb], |reg| reg
            .write(|w| unsafe { w.bits(cmp) }));
    }
}

pub(crate) fn pulse_width(module: Module, output: Output) -> u32 {
    let pwm = module.regs();
    let generator = output.generator();
    let cmp = if output.is_a() {
        generator!(pwm, generator, [_0_cmpa, _1_cmpa, _2_cmpa, _3_cmpa], |reg| reg
            .read()
            .bits())
    } else {
        generator!(pwm, generator, [_0_cmpb, _1_cmpb, _2_cmpb, _3_cmpb], |reg| reg
            .read()
            .bits())
    };
    compare_width(period(module, generator), cmp as u16)
}

pub(crate) fn enable_generator(module: Module, generator: Generator) {
    let pwm = module.regs();
    generator!(pwm, generator, [_0_ctl, _1_ctl, _2_ctl, _3_ctl], |ctl| ctl
        .modify(|r, w| unsafe { w.bits(r.bits() | CTL_ENABLE) }));
}

pub(crate) fn enable_deadband(module: Module, generator: Generator, rise: u16, fall: u16) {
    let pwm = module.regs();
    let (rise, fall) = (rise as u32 & 0xFFF, fall as u32 & 0xFFF);
    unsafe {
        generator!(pwm, generator, [_0_dbrise, _1_dbrise, _2_dbrise, _3_dbrise], |reg| reg
            .write(|w| w.bits(rise)));
        generator!(pwm, generator, [_0_dbfall, _1_dbfall, _2_dbfall, _3_dbfall], |reg| reg
            .write(|w| w.bits(fall)));
        generator!(pwm, generator, [_0_dbctl, _1_dbctl, _2_dbctl, _3_dbctl], |reg| reg
            .modify(|r, w| w.bits(r.bits() | DBCTL_ENABLE)));
    }
}

pub(crate) fn set_output_state(module: Module, outputs: u8, enable: bool) {
    let outputs = outputs as u32;
    module.regs().enable.modify(|r, w| unsafe {
        w.bits(if enable {
            r.bits() | outputs
        } else {
            r.bits() & !outputs
        })
    });
}
