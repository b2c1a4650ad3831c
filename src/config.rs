use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    drv2605::{self, Actuator, Library},
    error::{Error, Result},
    lcd,
};

/// Where the peripherals hang off the Pi. Everything has a default matching the
/// reference build, so the file only needs to exist when the wiring differs.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub haptic: HapticConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// `/dev/i2c-N`
    pub bus: u8,
    pub address: u8,
    pub columns: u8,
    pub backlight: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            bus: 1,
            address: lcd::DEFAULT_ADDRESS,
            columns: lcd::DEFAULT_COLUMNS,
            backlight: true,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct HapticConfig {
    /// `/dev/i2c-N`, the driver board sits on a software bus of its own
    pub bus: u8,
    pub address: u8,
    pub actuator: Actuator,
    pub library: Library,
}

impl Default for HapticConfig {
    fn default() -> Self {
        Self {
            bus: 3,
            address: drv2605::DEFAULT_ADDRESS,
            actuator: Actuator::default(),
            library: Library::default(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let config = std::fs::read_to_string(path)?;
        toml::from_str(&config).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`Config::load`] but falls back to the defaults when there is no file.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            info!("loading config from {}", path.display());
            Self::load(path)
        } else {
            info!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let config = toml::to_string(self)?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, config)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let mut path = directories::ProjectDirs::from("", "", "haptic_alarm")
            .ok_or(Error::NoConfigDir)?
            .config_dir()
            .to_path_buf();
        path.push("config.toml");
        Ok(path)
    }
}
