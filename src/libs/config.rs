//! Configuration management.
//!
//! Settings live in `config.json` inside the platform data directory. A
//! missing file is not an error: every section falls back to its defaults,
//! so the tool works without running `timesheet init` first.
//!
//! ## Sections
//!
//! - **database**: optional override of the SQLite file location
//! - **entry**: defaults used when logging time (increment, day start, user)
//!
//! ```rust,no_run
//! use timesheet::libs::config::Config;
//!
//! let config = Config::read()?;
//! println!("Increment: {} min", config.entry().time_increment_minutes);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use chrono::NaiveTime;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct DatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EntryConfig {
    /// Granularity, in minutes, that entry times snap to.
    pub time_increment_minutes: u32,

    /// Start time ("HH:MM") proposed for the first entry of a day.
    pub default_start: String,

    pub user_id: i64,
}

impl Default for EntryConfig {
    fn default() -> Self {
        EntryConfig {
            time_increment_minutes: 15,
            default_start: "09:00".to_string(),
            user_id: 1,
        }
    }
}

impl EntryConfig {
    pub fn default_start_time(&self) -> Result<NaiveTime> {
        Ok(NaiveTime::parse_from_str(&self.default_start, "%H:%M")?)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<EntryConfig>,
}

impl Config {
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Entry settings, or the defaults when the section is absent.
    pub fn entry(&self) -> EntryConfig {
        self.entry.clone().unwrap_or_default()
    }

    /// Interactive setup wizard; existing values are offered as defaults.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = [Message::ConfigModuleDatabase.to_string(), Message::ConfigModuleEntry.to_string()];
        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules)
            .interact()?;

        for &selection in &selected {
            match selection {
                0 => {
                    msg_print!(Message::ConfigModuleDatabase);
                    let default = config
                        .database
                        .as_ref()
                        .and_then(|d| d.path.as_ref())
                        .map(|p| p.display().to_string())
                        .unwrap_or_default();
                    let path: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptDatabasePath.to_string())
                        .default(default)
                        .allow_empty(true)
                        .interact_text()?;
                    config.database = Some(DatabaseConfig {
                        path: (!path.trim().is_empty()).then(|| PathBuf::from(path.trim())),
                    });
                }
                _ => {
                    msg_print!(Message::ConfigModuleEntry);
                    let default = config.entry();
                    config.entry = Some(EntryConfig {
                        time_increment_minutes: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptTimeIncrement.to_string())
                            .default(default.time_increment_minutes)
                            .interact_text()?,
                        default_start: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptDefaultStart.to_string())
                            .default(default.default_start)
                            .validate_with(|input: &String| -> Result<(), String> {
                                NaiveTime::parse_from_str(input, "%H:%M")
                                    .map(|_| ())
                                    .map_err(|_| Message::InvalidTimeFormat(input.clone()).to_string())
                            })
                            .interact_text()?,
                        user_id: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptUserId.to_string())
                            .default(default.user_id)
                            .interact_text()?,
                    });
                }
            }
        }

        Ok(config)
    }
}
