//! TI DRV2605 / DRV2605L haptic motor driver.
//!
//! The chip holds up to eight waveform effects in a sequence; writing GO
//! plays them in order until it meets an empty slot. Effects are picked by
//! number from one of the built-in TouchSense libraries.

use embedded_hal::i2c::I2c;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    peripherals::Haptic,
};

pub const DEFAULT_ADDRESS: u8 = 0x5A;

const REG_STATUS: u8 = 0x00;
const REG_MODE: u8 = 0x01;
const REG_RTPIN: u8 = 0x02;
const REG_LIBRARY: u8 = 0x03;
const REG_WAVESEQ1: u8 = 0x04;
const REG_WAVESEQ2: u8 = 0x05;
const REG_GO: u8 = 0x0C;
const REG_OVERDRIVE: u8 = 0x0D;
const REG_SUSTAINPOS: u8 = 0x0E;
const REG_SUSTAINNEG: u8 = 0x0F;
const REG_BREAK: u8 = 0x10;
const REG_AUDIOMAX: u8 = 0x13;
const REG_FEEDBACK: u8 = 0x1A;

const MODE_INTERNAL_TRIGGER: u8 = 0x00;
const FEEDBACK_LRA: u8 = 0x80;

const DRV2605_ID: u8 = 3;
const DRV2605L_ID: u8 = 7;

const SEQUENCE_SLOTS: u8 = 8;
const MAX_EFFECT: u8 = 123;

/// Kind of motor hanging off the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Actuator {
    /// eccentric rotating mass, the common coin / pancake motor
    #[default]
    Erm,
    /// linear resonant actuator
    Lra,
}

/// Built-in waveform library, see the DRV2605 datasheet section 11.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Library {
    Empty,
    #[default]
    TouchSenseA,
    TouchSenseB,
    TouchSenseC,
    TouchSenseD,
    TouchSenseE,
    Lra,
}

impl From<Library> for u8 {
    fn from(library: Library) -> Self {
        match library {
            Library::Empty => 0,
            Library::TouchSenseA => 1,
            Library::TouchSenseB => 2,
            Library::TouchSenseC => 3,
            Library::TouchSenseD => 4,
            Library::TouchSenseE => 5,
            Library::Lra => 6,
        }
    }
}

impl TryFrom<u8> for Library {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Empty,
            1 => Self::TouchSenseA,
            2 => Self::TouchSenseB,
            3 => Self::TouchSenseC,
            4 => Self::TouchSenseD,
            5 => Self::TouchSenseE,
            6 => Self::Lra,
            other => return Err(format!("no waveform library {other}, expected 0..=6")),
        })
    }
}

#[derive(Debug)]
pub struct Drv2605<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Drv2605<I2C> {
    /// Checks that a DRV2605 answers at `address` and brings it out of standby,
    /// ready to play effects on demand. Sequence slot 0 starts out as effect 1.
    pub fn new(i2c: I2C, address: u8, actuator: Actuator, library: Library) -> Result<Self> {
        let mut drv = Self { i2c, address };

        let id = drv.read(REG_STATUS)? >> 5;
        if id != DRV2605_ID && id != DRV2605L_ID {
            return Err(Error::DeviceNotFound { address, id });
        }
        debug!("found DRV2605 (id {id}) at {address:#04x}");

        drv.write(REG_MODE, MODE_INTERNAL_TRIGGER)?;
        drv.write(REG_RTPIN, 0x00)?;
        drv.write(REG_WAVESEQ1, 1)?;
        drv.write(REG_WAVESEQ2, 0)?;
        drv.write(REG_OVERDRIVE, 0)?;
        drv.write(REG_SUSTAINPOS, 0)?;
        drv.write(REG_SUSTAINNEG, 0)?;
        drv.write(REG_BREAK, 0)?;
        drv.write(REG_AUDIOMAX, 0x64)?;

        drv.set_actuator(actuator)?;
        drv.write(REG_LIBRARY, library.into())?;
        info!("haptic driver ready: {actuator:?} motor, {library:?} library");
        Ok(drv)
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    pub fn set_actuator(&mut self, actuator: Actuator) -> Result<()> {
        let feedback = self.read(REG_FEEDBACK)?;
        let feedback = match actuator {
            Actuator::Erm => feedback & !FEEDBACK_LRA,
            Actuator::Lra => feedback | FEEDBACK_LRA,
        };
        self.write(REG_FEEDBACK, feedback)
    }

    fn read(&mut self, register: u8) -> Result<u8> {
        let mut buf = [0];
        self.i2c
            .write_read(self.address, &[register], &mut buf)
            .map_err(|e| Error::transfer(self.address, &e))?;
        Ok(buf[0])
    }

    fn write(&mut self, register: u8, value: u8) -> Result<()> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(|e| Error::transfer(self.address, &e))
    }
}

impl<I2C: I2c> Haptic for Drv2605<I2C> {
    fn configure_effect(&mut self, slot: u8, effect: u8) -> Result<()> {
        if slot >= SEQUENCE_SLOTS {
            return Err(Error::InvalidSlot(slot));
        }
        if !(1..=MAX_EFFECT).contains(&effect) {
            return Err(Error::InvalidEffect(effect));
        }
        self.write(REG_WAVESEQ1 + slot, effect)
    }

    fn play(&mut self) -> Result<()> {
        self.write(REG_GO, 1)
    }

    fn stop(&mut self) -> Result<()> {
        self.write(REG_GO, 0)
    }
}
