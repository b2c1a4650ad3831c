use std::{
    io::Write,
    sync::mpsc::{Receiver, RecvTimeoutError},
    time::Duration,
};

use log::{debug, info, warn};

use crate::{
    alarm::{format_clock, AlarmConfig},
    error::Result,
    peripherals::{Clock, Display, Gpio, Haptic, Line},
};

/// how often the clock is sampled and the display refreshed
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);
/// sequence position the alarm effect is loaded into
pub const EFFECT_SLOT: u8 = 0;

/// Owns every peripheral for the life of the process and keeps the
/// bottom display line ticking, buzzing whenever the clock is in the alarm minute.
#[derive(Debug)]
pub struct AlarmLoop<D, H, G, C> {
    alarm: AlarmConfig,
    display: D,
    haptic: H,
    gpio: G,
    clock: C,
    poll_interval: Duration,
}

impl<D, H, G, C> AlarmLoop<D, H, G, C>
where
    D: Display,
    H: Haptic,
    G: Gpio,
    C: Clock,
{
    /// Puts the alarm time on the top line, then brings up the haptic driver
    /// and loads the effect for the chosen strength.
    ///
    /// `connect_haptic` runs after the display has been written so a missing
    /// motor board still leaves the alarm time on screen.
    pub fn start(
        alarm: AlarmConfig,
        mut display: D,
        connect_haptic: impl FnOnce() -> Result<H>,
        mut gpio: G,
        clock: C,
    ) -> Result<Self> {
        display.write_line(&alarm.banner(), Line::Top)?;

        let mut haptic = connect_haptic()?;
        let effect = alarm.strength().effect();
        haptic.configure_effect(EFFECT_SLOT, effect)?;
        info!(
            "alarm set for {:?}, strength {} (effect {effect})",
            alarm.target_time(),
            alarm.strength()
        );

        gpio.set_warnings(false);

        Ok(Self {
            alarm,
            display,
            haptic,
            gpio,
            clock,
            poll_interval: POLL_INTERVAL,
        })
    }

    /// Runs the loop at `interval` instead of once a second, for driving it from a simulated clock.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// One poll: sample the clock, buzz if it is alarm time, show the time.
    /// Returns whether the motor was triggered.
    pub fn tick(&mut self) -> Result<bool> {
        let now = format_clock(self.clock.now());
        let ringing = self.alarm.matches(&now);
        if ringing {
            info!("{now}: alarm!");
            self.haptic.play()?;
        }
        debug!("{now}");
        self.display.write_line(&now, Line::Bottom)?;
        Ok(ringing)
    }

    /// Polls until something arrives on `shutdown` (or every sender is gone),
    /// tells the user on `notice`, then stops the motor and blanks the display.
    ///
    /// The display is cleared even if the motor or `notice` can't be reached;
    /// only a failed clear is reported.
    pub fn run<W: Write>(&mut self, shutdown: &Receiver<()>, notice: &mut W) -> Result<()> {
        loop {
            self.tick()?;
            match shutdown.recv_timeout(self.poll_interval) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        info!("interrupted, cleaning up");
        if let Err(e) = writeln!(notice, "Cleaning up!").and_then(|()| notice.flush()) {
            warn!("couldn't announce shutdown: {e}");
        }
        if let Err(e) = self.haptic.stop() {
            warn!("couldn't stop the motor: {e}");
        }
        self.display.clear()
    }

    #[must_use]
    pub const fn display(&self) -> &D {
        &self.display
    }

    #[must_use]
    pub const fn haptic(&self) -> &H {
        &self.haptic
    }

    #[must_use]
    pub const fn gpio(&self) -> &G {
        &self.gpio
    }
}
