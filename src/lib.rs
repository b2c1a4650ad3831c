#![warn(clippy::pedantic, clippy::nursery, clippy::cargo)]
#![deny(clippy::use_self, rust_2018_idioms)]
#![allow(
    clippy::multiple_crate_versions,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

//! A bedside alarm for the Raspberry Pi: the alarm time and a running clock
//! on a 16x2 LCD, and a DRV2605 driven vibration motor instead of a buzzer.

pub mod alarm;
pub mod alarm_loop;
pub mod config;
pub mod drv2605;
pub mod error;
/// Raspberry Pi GPIO access through rppal
pub mod gpio;
pub mod lcd;
pub mod peripherals;

#[cfg(test)]
mod fake_bus;

pub use alarm::{AlarmConfig, Strength};
pub use alarm_loop::AlarmLoop;
pub use error::{Error, Result};

/// Opens `/dev/i2c-{bus}`.
pub fn open_i2c(bus: u8) -> Result<rppal::i2c::I2c> {
    rppal::i2c::I2c::with_bus(bus).map_err(|source| Error::Bus { bus, source })
}
