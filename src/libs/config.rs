//! Configuration management for the vigil application.
//!
//! Settings are stored as JSON in the platform application data directory
//! and loaded lazily; a missing file yields the default configuration. The
//! monitor thresholds configured here arrive at the core already parsed —
//! the state machine itself never reads files.
//!
//! `Config::init()` runs the interactive setup wizard used by `vigil init`.

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

/// Configuration file name used for storing application settings.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Activity monitor configuration settings.
///
/// Thresholds are kept in milliseconds here and converted to microseconds
/// when handed to the state machine. The defaults mirror the monitor's own:
/// events closer than one second form a burst, a burst of two seconds
/// confirms activity, and five quiet seconds lapse it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MonitorConfig {
    /// Max gap between consecutive events still considered one burst (ms).
    pub noise_threshold: u64,

    /// Minimum burst duration before noise escalates to activity (ms).
    pub activity_threshold: u64,

    /// Max gap since the last event before activity lapses to idle (ms).
    pub idle_threshold: u64,

    /// Minimum pointer displacement per axis to count as motion (px).
    pub sensitivity: i32,

    /// Interval between state queries in the watch loop (ms).
    ///
    /// Idle detection is lazy, so the observed state can lag real idleness
    /// by up to one poll interval. Keep this well below the idle threshold.
    pub poll_interval: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            noise_threshold: 1000,
            activity_threshold: 2000,
            idle_threshold: 5000,
            sensitivity: 3,
            poll_interval: 1000,
        }
    }
}

/// Main configuration container for the application.
///
/// Each field is an optional module so users configure only what they need;
/// unset modules are omitted from the JSON file.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    /// Activity monitoring thresholds and polling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor: Option<MonitorConfig>,
}

impl Config {
    /// Reads the configuration file, falling back to defaults when none
    /// exists.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Saves the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file if present.
    pub fn delete() -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if config_file_path.exists() {
            fs::remove_file(config_file_path)?;
        }
        Ok(())
    }

    /// Runs the interactive configuration setup wizard.
    ///
    /// Presents the available modules, prompts for each selected one with
    /// current values as defaults, and returns the updated configuration
    /// for saving.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let module_names = vec!["Monitor"];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&module_names)
            .interact()?;

        for &selection in &selected {
            if module_names[selection] == "Monitor" {
                let default = config.monitor.clone().unwrap_or_default();
                msg_print!(Message::ConfigModuleMonitor);
                config.monitor = Some(MonitorConfig {
                    noise_threshold: Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptNoiseThreshold.to_string())
                        .default(default.noise_threshold)
                        .interact_text()?,

                    activity_threshold: Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptActivityThreshold.to_string())
                        .default(default.activity_threshold)
                        .interact_text()?,

                    idle_threshold: Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptIdleThreshold.to_string())
                        .default(default.idle_threshold)
                        .interact_text()?,

                    sensitivity: Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptSensitivity.to_string())
                        .default(default.sensitivity)
                        .interact_text()?,

                    poll_interval: Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptPollInterval.to_string())
                        .default(default.poll_interval)
                        .interact_text()?,
                });
            }
        }

        Ok(config)
    }
}
