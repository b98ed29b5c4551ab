#![no_main]
#![no_std]

extern crate panic_halt;

use cortex_m_rt::entry;
use cortex_m_semihosting::hprintln;

use launchpad::{clock, device::Device, logger, pwm, PwmPin};

/// Red LED of the LaunchPad, PF1 (package pin 29).
const LED_PIN: u8 = 29;

/// PWM frequency in Hertz.
const FREQUENCY: u32 = 5_000;

#[entry]
fn main() -> ! {
    if cfg!(debug_assertions) {
        hprintln!("Hello! This is the PWM example.");
        logger::init(log::LevelFilter::Debug);
    }

    let device = Device::take().unwrap();
    let mut pwm = pwm::Config::default().make(device);

    // System setup.
    pwm.set_system_clock(80);
    let speed = clock::speed(pwm.registers());

    let led = PwmPin::try_from(LED_PIN).unwrap();
    pwm.configure_single(led);

    // Fade the LED in and out.
    let mut duty = 0.0f32;
    let mut step = 0.01f32;
    loop {
        pwm.write_single(led, FREQUENCY, duty).unwrap();

        duty += step;
        if !(0.0..=1.0).contains(&duty) {
            step = -step;
            duty = duty.max(0.0).min(1.0);
        }

        // Roughly 10ms per step.
        cortex_m::asm::delay(speed / 100);
    }
}
