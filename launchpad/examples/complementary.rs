#![no_main]
#![no_std]

extern crate panic_halt;

use cortex_m_rt::entry;
use cortex_m_semihosting::hprintln;
use embedded_hal::PwmPin as _;

use launchpad::{device::Device, logger, pwm, Couple};

/// Half bridge on PB6 (high side) and PB7 (low side).
const BRIDGE: Couple = Couple::C1;

/// Switching frequency in Hertz.
const FREQUENCY: u32 = 20_000;

/// Gap between one switch turning off and the other turning on, in microseconds.
const DEADBAND: f32 = 1.0;

#[entry]
fn main() -> ! {
    if cfg!(debug_assertions) {
        hprintln!("Hello! This is the complementary PWM example.");
        logger::init(log::LevelFilter::Debug);
    }

    let device = Device::take().unwrap();
    let mut pwm = pwm::Config::default().make(device);

    pwm.set_system_clock(50);
    pwm.configure_couple(BRIDGE);
    pwm.write_couple(BRIDGE, FREQUENCY, 0.5, DEADBAND).unwrap();

    let (high, _) = BRIDGE.pins();
    let channel = pwm.channel(high);
    hprintln!(
        "period = {} ticks, pulse = {} ticks",
        channel.get_max_duty(),
        channel.get_duty()
    );

    loop {
        cortex_m::asm::wfi();
    }
}
