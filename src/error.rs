use std::{io, path::PathBuf};

use embedded_hal::i2c::ErrorKind;
use thiserror::Error;

/// Every fault the alarm can run into. None of them are recovered from:
/// they bubble up to `main` and end the process.
#[derive(Debug, Error)]
pub enum Error {
    #[error("couldn't open i2c bus {bus}: {source}")]
    Bus {
        bus: u8,
        #[source]
        source: rppal::i2c::Error,
    },

    #[error("i2c transfer to device {address:#04x} failed: {kind:?}")]
    Transfer { address: u8, kind: ErrorKind },

    #[error("no DRV2605 found at {address:#04x} (device id {id}), check wiring")]
    DeviceNotFound { address: u8, id: u8 },

    #[error("haptic effect {0} is outside 1..=123")]
    InvalidEffect(u8),

    #[error("haptic sequence slot {0} is outside 0..=7")]
    InvalidSlot(u8),

    #[error("gpio: {0}")]
    Gpio(#[from] rppal::gpio::Error),

    #[error("couldn't install the interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("couldn't parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("couldn't serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("no home directory to keep the config in")]
    NoConfigDir,

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Wraps an `embedded-hal` bus error together with the device it was talking to.
    pub fn transfer<E: embedded_hal::i2c::Error>(address: u8, err: &E) -> Self {
        Self::Transfer {
            address,
            kind: err.kind(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
