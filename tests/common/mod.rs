//! Recording fakes for the peripherals, so the alarm loop can run against a
//! scripted clock and every display / motor call can be asserted on afterwards.

#![allow(dead_code)]

use std::{collections::VecDeque, sync::mpsc::Sender};

use chrono::NaiveTime;
use haptic_alarm::{
    peripherals::{Clock, Display, Gpio, Haptic, Line},
    Error, Result,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayCall {
    WriteLine(String, Line),
    Clear,
}

#[derive(Debug, Default)]
pub struct MockDisplay {
    pub calls: Vec<DisplayCall>,
}

impl MockDisplay {
    pub fn lines(&self, line: Line) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DisplayCall::WriteLine(text, l) if *l == line => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn clears(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| **c == DisplayCall::Clear)
            .count()
    }
}

impl Display for MockDisplay {
    fn write_line(&mut self, text: &str, line: Line) -> Result<()> {
        self.calls.push(DisplayCall::WriteLine(text.to_string(), line));
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.calls.push(DisplayCall::Clear);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticCall {
    Configure { slot: u8, effect: u8 },
    Play,
    Stop,
}

#[derive(Debug, Default)]
pub struct MockHaptic {
    pub calls: Vec<HapticCall>,
    /// `stop` records the call and then fails as if the chip had dropped off the bus
    pub fail_stop: bool,
}

impl MockHaptic {
    pub fn failing_stop() -> Self {
        Self {
            fail_stop: true,
            ..Self::default()
        }
    }

    pub fn plays(&self) -> usize {
        self.calls.iter().filter(|c| **c == HapticCall::Play).count()
    }
}

impl Haptic for MockHaptic {
    fn configure_effect(&mut self, slot: u8, effect: u8) -> Result<()> {
        self.calls.push(HapticCall::Configure { slot, effect });
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.calls.push(HapticCall::Play);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.calls.push(HapticCall::Stop);
        if self.fail_stop {
            return Err(Error::DeviceNotFound {
                address: 0x5A,
                id: 0,
            });
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct MockGpio {
    pub warnings: bool,
}

impl Default for MockGpio {
    fn default() -> Self {
        Self { warnings: true }
    }
}

impl Gpio for MockGpio {
    fn set_warnings(&mut self, enabled: bool) {
        self.warnings = enabled;
    }
}

/// Hands out the given times in order and raises the interrupt when it gives
/// out the last one, so the loop stops right after that tick.
#[derive(Debug)]
pub struct ScriptedClock {
    times: VecDeque<NaiveTime>,
    interrupt: Option<Sender<()>>,
}

impl ScriptedClock {
    pub fn new(times: impl IntoIterator<Item = NaiveTime>, interrupt: Sender<()>) -> Self {
        Self {
            times: times.into_iter().collect(),
            interrupt: Some(interrupt),
        }
    }

    /// for tests that never get as far as reading the time
    pub fn unused() -> Self {
        Self::without_interrupt(Vec::<NaiveTime>::new())
    }

    /// never raises the interrupt, for driving `tick` by hand
    pub fn without_interrupt(times: impl IntoIterator<Item = NaiveTime>) -> Self {
        Self {
            times: times.into_iter().collect(),
            interrupt: None,
        }
    }
}

impl Clock for ScriptedClock {
    fn now(&mut self) -> NaiveTime {
        let now = self.times.pop_front().expect("clock script ran out");
        if self.times.is_empty() {
            if let Some(interrupt) = &self.interrupt {
                interrupt.send(()).unwrap();
            }
        }
        now
    }
}

/// Every second from `start` (inclusive) to `end` (exclusive), each with a
/// non zero microsecond part.
pub fn seconds_between(start: NaiveTime, end: NaiveTime) -> Vec<NaiveTime> {
    let mut times = Vec::new();
    let mut t = start;
    while t < end {
        times.push(t + chrono::Duration::microseconds(250_001));
        t += chrono::Duration::seconds(1);
    }
    times
}

pub fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}
