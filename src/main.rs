#![warn(clippy::pedantic, clippy::nursery, clippy::cargo)]
#![deny(clippy::use_self, rust_2018_idioms)]
#![allow(clippy::multiple_crate_versions)]

use std::{error::Error, io, sync::mpsc};

use clap::{Parser, Subcommand};
use haptic_alarm::{
    config::Config, drv2605::Drv2605, gpio::RpiGpio, lcd::I2cLcd, open_i2c,
    peripherals::SystemClock, AlarmConfig, AlarmLoop,
};
use log::{error, info};
use rppal::hal::Delay;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// write the default wiring config
    Init {
        #[clap(long, short)]
        force: bool,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    // initilize the logger
    simple_file_logger::init_logger!("haptic_alarm").expect("couldn't initialize logger");

    let args = Args::parse();
    let config_path = Config::config_path()?;
    if let Some(Command::Init { force }) = args.command {
        if force || !config_path.exists() {
            Config::new().save(&config_path)?;
            println!("wrote {}", config_path.display());
        } else {
            println!(
                "{} already exists, use --force to overwrite it",
                config_path.display()
            );
        }
        return Ok(());
    }

    run(&Config::load_or_default(&config_path)?).map_err(|e| {
        error!("{e}");
        e.into()
    })
}

fn run(config: &Config) -> haptic_alarm::Result<()> {
    let display = I2cLcd::new(
        open_i2c(config.display.bus)?,
        Delay::new(),
        config.display.address,
        config.display.columns,
        config.display.backlight,
    )?;
    let gpio = RpiGpio::new()?;

    let alarm = AlarmConfig::prompt(&mut io::stdin().lock(), &mut io::stdout())?;

    let (interrupt, shutdown) = mpsc::channel();
    ctrlc::set_handler(move || {
        // a second ctrl+c or SIGTERM while cleaning up has nowhere to go
        let _ = interrupt.send(());
    })?;

    let haptic = &config.haptic;
    let mut alarm_loop = AlarmLoop::start(
        alarm,
        display,
        || {
            Drv2605::new(
                open_i2c(haptic.bus)?,
                haptic.address,
                haptic.actuator,
                haptic.library,
            )
        },
        gpio,
        SystemClock,
    )?;
    alarm_loop.run(&shutdown, &mut io::stdout())?;
    info!("display cleared, exiting");
    Ok(())
}
