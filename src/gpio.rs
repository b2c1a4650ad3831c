use log::debug;

use crate::{error::Result, peripherals::Gpio};

/// The Raspberry Pi GPIO block. Opening it up front means a board without
/// `/dev/gpiomem` fails at startup instead of halfway through the night.
/// The block is released when this is dropped.
pub struct RpiGpio {
    _gpio: rppal::gpio::Gpio,
}

impl RpiGpio {
    pub fn new() -> Result<Self> {
        let gpio = rppal::gpio::Gpio::new()?;
        debug!("gpio opened");
        Ok(Self { _gpio: gpio })
    }
}

impl Gpio for RpiGpio {
    // rppal never prints pin-in-use warnings, so there is nothing to switch
    fn set_warnings(&mut self, enabled: bool) {
        debug!("gpio warnings {}", if enabled { "on" } else { "off" });
    }
}
