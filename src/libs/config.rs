//! Configuration management.
//!
//! Settings live in `config.json` inside the application data directory. Each
//! section is optional so a fresh install runs with defaults, and `cxshift
//! init` walks the user through the sections they pick:
//!
//! - **crosschex**: account email, API endpoint, timeouts, paging and the
//!   devices' UTC offset
//! - **shifts**: width of the shift grouping window
//!
//! The password is never written here; see [`crate::libs::secret`].
//!
//! ```rust,no_run
//! use cxshift::libs::config::Config;
//!
//! let config = Config::read()?;
//! let window = config.shift_window()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::api::crosschex::CrossChexConfig;
use crate::libs::messages::Message;
use crate::libs::shift::{window_from_hours, DEFAULT_WINDOW_HOURS};
use crate::{msg_error_anyhow, msg_print};
use anyhow::Result;
use chrono::Duration;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// A section offered by the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

fn default_window_hours() -> i64 {
    DEFAULT_WINDOW_HOURS
}

/// Shift reconstruction settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ShiftConfig {
    /// Punches at most this many hours apart may form one shift.
    #[serde(default = "default_window_hours")]
    pub window_hours: i64,
}

impl Default for ShiftConfig {
    fn default() -> Self {
        Self {
            window_hours: DEFAULT_WINDOW_HOURS,
        }
    }
}

impl ShiftConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "shifts".to_string(),
            name: "Shifts".to_string(),
        }
    }

    /// The grouping window, or `InvalidWindow` for a non-positive or
    /// out-of-range `window_hours`.
    pub fn window(&self) -> Result<Duration> {
        window_from_hours(self.window_hours).ok_or_else(|| msg_error_anyhow!(Message::InvalidWindow(self.window_hours)))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crosschex: Option<CrossChexConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shifts: Option<ShiftConfig>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        DataStorage::new().get_path(CONFIG_FILE_NAME)
    }

    /// Loads the configuration, or the defaults when no file exists yet.
    pub fn read() -> Result<Config> {
        Self::read_from(&Self::path()?)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file. Returns whether there was one.
    pub fn delete() -> Result<bool> {
        Self::delete_at(&Self::path()?)
    }

    pub fn delete_at(path: &Path) -> Result<bool> {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(false),
            Err(error) => Err(error.into()),
        }
    }

    /// The CrossChex section, which every remote command needs.
    pub fn crosschex(&self) -> Result<&CrossChexConfig> {
        self.crosschex.as_ref().ok_or_else(|| msg_error_anyhow!(Message::CrossChexConfigNotFound))
    }

    pub fn shift_window(&self) -> Result<Duration> {
        self.shifts.clone().unwrap_or_default().window()
    }

    /// Interactive setup wizard, pre-filled with the current values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![CrossChexConfig::module(), ShiftConfig::module()];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "crosschex" => config.crosschex = Some(CrossChexConfig::init(&config.crosschex)?),
                "shifts" => {
                    let default = config.shifts.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleShifts);
                    config.shifts = Some(ShiftConfig {
                        window_hours: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptWindowHours.to_string())
                            .default(default.window_hours)
                            .validate_with(|input: &i64| -> Result<(), String> {
                                if window_from_hours(*input).is_some() {
                                    Ok(())
                                } else {
                                    Err(Message::InvalidWindow(*input).to_string())
                                }
                            })
                            .interact_text()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
