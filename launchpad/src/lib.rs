//! Minimal PWM crate for the TM4C123GH6PM (Tiva C LaunchPad).
//!
//! Drives package pins as PWM outputs, single-ended or as complementary pairs with a
//! hardware deadband, without direct interaction with registers. All register access
//! goes through the [Registers][registers::Registers] trait, so the logic runs against
//! the real chip ([device::Device]) or against a fake in tests.
//!
//! ```ignore
//! let mut pwm = pwm::Config::default().make(device);
//! pwm.set_system_clock(80);
//! pwm.configure_single(PwmPin::Pb6);
//! pwm.write_single(PwmPin::Pb6, 5_000, 0.5)?;
//! ```

#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod error;
pub mod gpio;
pub mod pinout;
pub mod pwm;
pub mod registers;

#[cfg(target_arch = "arm")]
pub mod device;
#[cfg(target_arch = "arm")]
pub mod logger;

pub use error::Error;
pub use pinout::{Couple, PwmPin};
pub use registers::Registers;
