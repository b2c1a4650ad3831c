//! HD44780 character LCD wired through a PCF8574 I2C backpack, the usual
//! "I2C 16x2 display" sold for the Raspberry Pi.
//!
//! The expander drives the LCD in 4-bit mode: every byte goes out as two
//! nibbles on P4..P7, each latched by pulsing EN.

use embedded_hal::{delay::DelayNs, i2c::I2c};
use log::debug;

use crate::{
    error::{Error, Result},
    peripherals::{Display, Line},
};

pub const DEFAULT_ADDRESS: u8 = 0x27;
pub const DEFAULT_COLUMNS: u8 = 16;

// commands
const CLEAR_DISPLAY: u8 = 0x01;
const RETURN_HOME: u8 = 0x02;
const ENTRY_MODE_SET: u8 = 0x04;
const DISPLAY_CONTROL: u8 = 0x08;
const FUNCTION_SET: u8 = 0x20;
const SET_DDRAM_ADDR: u8 = 0x80;

// flags
const ENTRY_LEFT: u8 = 0x02;
const DISPLAY_ON: u8 = 0x04;
const TWO_LINE: u8 = 0x08;
const FOUR_BIT_MODE: u8 = 0x00;
const FIVE_BY_EIGHT_DOTS: u8 = 0x00;

// PCF8574 pins
const BACKLIGHT: u8 = 0x08;
const ENABLE: u8 = 0x04;
const REGISTER_SELECT: u8 = 0x01;

const LINE_TWO_OFFSET: u8 = 0x40;

#[derive(Debug)]
pub struct I2cLcd<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    columns: u8,
    backlight: u8,
}

impl<I2C: I2c, D: DelayNs> I2cLcd<I2C, D> {
    /// Resets the controller into 4-bit, two line mode and clears it.
    pub fn new(i2c: I2C, delay: D, address: u8, columns: u8, backlight: bool) -> Result<Self> {
        let mut lcd = Self {
            i2c,
            delay,
            address,
            columns,
            backlight: if backlight { BACKLIGHT } else { 0 },
        };
        // the 0x03 0x03 0x03 0x02 dance forces 4-bit mode from any state
        lcd.command(0x03)?;
        lcd.command(0x03)?;
        lcd.command(0x03)?;
        lcd.command(0x02)?;

        lcd.command(FUNCTION_SET | TWO_LINE | FIVE_BY_EIGHT_DOTS | FOUR_BIT_MODE)?;
        lcd.command(DISPLAY_CONTROL | DISPLAY_ON)?;
        lcd.command(CLEAR_DISPLAY)?;
        lcd.command(ENTRY_MODE_SET | ENTRY_LEFT)?;
        lcd.delay.delay_ms(200);
        debug!("lcd ready at {address:#04x}, {columns} columns");
        Ok(lcd)
    }

    /// Gives back the bus, e.g. to inspect what was sent.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn expander_write(&mut self, data: u8) -> Result<()> {
        self.i2c
            .write(self.address, &[data | self.backlight])
            .map_err(|e| Error::transfer(self.address, &e))?;
        self.delay.delay_us(100);
        Ok(())
    }

    fn strobe(&mut self, data: u8) -> Result<()> {
        self.expander_write(data | ENABLE)?;
        self.delay.delay_us(500);
        self.expander_write(data & !ENABLE)
    }

    fn write_four_bits(&mut self, data: u8) -> Result<()> {
        self.expander_write(data)?;
        self.strobe(data)
    }

    fn write(&mut self, byte: u8, mode: u8) -> Result<()> {
        self.write_four_bits(mode | (byte & 0xF0))?;
        self.write_four_bits(mode | ((byte << 4) & 0xF0))
    }

    fn command(&mut self, command: u8) -> Result<()> {
        self.write(command, 0)
    }

    fn data(&mut self, byte: u8) -> Result<()> {
        self.write(byte, REGISTER_SELECT)
    }
}

/// Lays `text` out over exactly `columns` cells: cut off when too long,
/// space padded when short so nothing from the previous contents survives.
fn fit_to_width(text: &str, columns: u8) -> impl Iterator<Item = u8> + '_ {
    text.chars()
        .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
        .chain(std::iter::repeat(b' '))
        .take(usize::from(columns))
}

impl<I2C: I2c, D: DelayNs> Display for I2cLcd<I2C, D> {
    fn write_line(&mut self, text: &str, line: Line) -> Result<()> {
        let offset = match line {
            Line::Top => 0,
            Line::Bottom => LINE_TWO_OFFSET,
        };
        self.command(SET_DDRAM_ADDR | offset)?;
        let columns = self.columns;
        for byte in fit_to_width(text, columns) {
            self.data(byte)?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.command(CLEAR_DISPLAY)?;
        self.command(RETURN_HOME)?;
        // clear and home take ~1.5ms on the controller
        self.delay.delay_ms(2);
        Ok(())
    }
}
