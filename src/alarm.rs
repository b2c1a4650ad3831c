use std::{
    fmt,
    io::{BufRead, Write},
};

use chrono::{NaiveTime, Timelike};

use crate::error::Result;

/// DRV2605 library effect played for [`Strength::Low`] ("soft fuzz 60%")
pub const LOW_EFFECT: u8 = 119;
/// DRV2605 library effect played for [`Strength::Medium`] ("strong click 100%")
pub const MEDIUM_EFFECT: u8 = 1;
/// DRV2605 library effect played for [`Strength::High`] ("strong buzz 100%")
pub const HIGH_EFFECT: u8 = 47;

/// number of leading characters of a clock sample compared against the alarm time
const HOUR_MINUTE_LEN: usize = "HH:MM".len();

pub const TIME_PROMPT: &str = "Enter Alarm Time:";
pub const STRENGTH_PROMPT: &str = "How strong do you want the alarm? (Low, Medium, High)";

/// how hard the motor should buzz when the alarm goes off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strength {
    Low,
    Medium,
    #[default]
    High,
}

impl Strength {
    /// Only the exact strings `Low` and `Medium` select those levels,
    /// anything else (including `High`, a typo or nothing at all) buzzes at full strength.
    #[must_use]
    pub fn from_input(input: &str) -> Self {
        match input {
            "Low" => Self::Low,
            "Medium" => Self::Medium,
            _ => Self::High,
        }
    }

    #[must_use]
    pub const fn effect(self) -> u8 {
        match self {
            Self::Low => LOW_EFFECT,
            Self::Medium => MEDIUM_EFFECT,
            Self::High => HIGH_EFFECT,
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Low => stringify!(Low),
                Self::Medium => stringify!(Medium),
                Self::High => stringify!(High),
            }
        )
    }
}

/// The single alarm of a run. Built once from what the user typed and never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmConfig {
    /// meant to be `HH:MM` but taken verbatim, a malformed value just never rings
    target_time: String,
    strength: Strength,
}

impl AlarmConfig {
    #[must_use]
    pub fn new(target_time: impl Into<String>, strength: Strength) -> Self {
        Self {
            target_time: target_time.into(),
            strength,
        }
    }

    /// Asks for the alarm time and the strength, one line each.
    pub fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Self> {
        let target_time = ask(TIME_PROMPT, input, output)?;
        let strength = ask(STRENGTH_PROMPT, input, output)?;
        Ok(Self::new(target_time, Strength::from_input(&strength)))
    }

    #[must_use]
    pub fn target_time(&self) -> &str {
        &self.target_time
    }

    #[must_use]
    pub const fn strength(&self) -> Strength {
        self.strength
    }

    /// text for the top line of the display
    #[must_use]
    pub fn banner(&self) -> String {
        format!("Alarm: {}", self.target_time)
    }

    /// Whether a formatted clock sample falls in the alarm minute.
    /// Plain string comparison, so `7:30` never matches `07:30:12`.
    #[must_use]
    pub fn matches(&self, sample: &str) -> bool {
        sample
            .get(..HOUR_MINUTE_LEN)
            .is_some_and(|hour_minute| hour_minute == self.target_time)
    }
}

/// Formats a clock sample as `HH:MM:SS.ffffff`.
/// The fraction is left off entirely on a whole second.
#[must_use]
pub fn format_clock(time: NaiveTime) -> String {
    if time.nanosecond() / 1_000 == 0 {
        time.format("%H:%M:%S").to_string()
    } else {
        format!(
            "{}.{:06}",
            time.format("%H:%M:%S"),
            // leap seconds are reported as nanosecond >= 1_000_000_000
            (time.nanosecond() % 1_000_000_000) / 1_000
        )
    }
}

fn ask<R: BufRead, W: Write>(prompt: &str, input: &mut R, output: &mut W) -> Result<String> {
    write!(output, "{prompt}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    // only the line ending goes, the rest is compared as typed
    let answer = line.strip_suffix('\n').unwrap_or(&line);
    let answer = answer.strip_suffix('\r').unwrap_or(answer);
    Ok(answer.to_string())
}
