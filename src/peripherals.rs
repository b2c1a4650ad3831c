//! The hardware the alarm talks to, seen through the smallest interface that
//! the alarm loop needs. Real implementations live in [`crate::lcd`],
//! [`crate::drv2605`] and [`crate::gpio`]; tests swap in recording fakes.

use chrono::NaiveTime;

use crate::error::Result;

/// A row on the two line character display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    /// holds the alarm time, written once at startup
    Top,
    /// holds the running clock
    Bottom,
}

pub trait Display {
    /// Replaces the contents of `line` with `text`.
    fn write_line(&mut self, text: &str, line: Line) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

pub trait Haptic {
    /// Loads `effect` into sequence position `slot`.
    fn configure_effect(&mut self, slot: u8, effect: u8) -> Result<()>;
    /// Starts the loaded sequence. Fire and forget.
    fn play(&mut self) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
}

pub trait Gpio {
    fn set_warnings(&mut self, enabled: bool);
}

/// Source of wall clock samples.
pub trait Clock {
    fn now(&mut self) -> NaiveTime;
}

/// Local time as reported by the OS.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&mut self) -> NaiveTime {
        chrono::Local::now().naive_local().time()
    }
}
