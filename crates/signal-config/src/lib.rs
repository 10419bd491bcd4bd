//! Configuration management.
//!
//! Settings come from an optional TOML file, overridden by environment
//! variables such as `SIGNAL_ENGINE__POLICY__RSI_PERIOD=21`.

mod settings;

pub use settings::{AppConfig, AppSettings, LoggingConfig};

use config::{Config, ConfigError, Environment, File};
use signal_core::error::PolicyError;
use std::path::Path;
use thiserror::Error;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "SIGNAL_ENGINE";

/// Errors while loading or checking settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("{0}")]
    Load(#[from] ConfigError),

    #[error("Invalid policy settings: {0}")]
    Policy(#[from] PolicyError),

    #[error("Cannot render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Load configuration from file and environment.
///
/// With `required == false` a missing file just yields the defaults.
pub fn load_config(path: &Path, required: bool) -> Result<AppConfig, SettingsError> {
    let config = Config::builder()
        .add_source(File::from(path).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}

impl AppConfig {
    /// Check the settings that can be wrong after deserialization.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.policy.validate()?;
        Ok(())
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
