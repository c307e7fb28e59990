//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Where records and settings are read from.
    #[serde(default)]
    pub input: InputConfig,
    /// How summaries are rendered.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Input configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Workspace the records belong to.
    #[serde(default = "default_workspace_id")]
    pub workspace_id: String,
    /// JSON file holding the workspace records.
    #[serde(default = "default_records_path")]
    pub records_path: PathBuf,
    /// JSON file holding the settings for the requested year.
    #[serde(default = "default_settings_path")]
    pub settings_path: PathBuf,
}

fn default_workspace_id() -> String {
    "local".to_string()
}

fn default_records_path() -> PathBuf {
    PathBuf::from("data/records.json")
}

fn default_settings_path() -> PathBuf {
    PathBuf::from("data/settings.json")
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            workspace_id: default_workspace_id(),
            records_path: default_records_path(),
            settings_path: default_settings_path(),
        }
    }
}

/// Summary granularity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Twelve month summaries.
    #[default]
    Month,
    /// Four quarter summaries.
    Quarter,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Month or quarter summaries.
    #[serde(default)]
    pub granularity: Granularity,
    /// Pretty-print the JSON response.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            granularity: Granularity::default(),
            pretty: default_pretty(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("AUTONOMO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
