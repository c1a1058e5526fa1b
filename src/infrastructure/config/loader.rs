use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;
use crate::services::matchers::{Matchers, PatternError};

/// Directory holding project-local configuration
pub const CONFIG_DIR: &str = ".need-cla";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("GitHub API URL cannot be empty")]
    EmptyApiUrl,

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid pr_page_size: {0}. Must be between 1 and 100")]
    InvalidPageSize(u8),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] PatternError),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration relative to the current directory.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .need-cla/config.yaml
    /// 3. .need-cla/local.yaml
    /// 4. Environment variables (CLA_* prefix, `__` separates sections)
    /// 5. GITHUB_TOKEN, then CLA_TOKEN, for `github.token`
    pub fn load() -> Result<Config> {
        Self::load_from_dir(".")
    }

    /// Same as [`load`](Self::load) with project files looked up under `root`.
    pub fn load_from_dir(root: impl AsRef<Path>) -> Result<Config> {
        let dir = root.as_ref().join(CONFIG_DIR);
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(dir.join("config.yaml")))
            .merge(Yaml::file(dir.join("local.yaml")));

        let config: Config = Self::with_env(figment)
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file. Environment overrides still apply.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.is_file() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path));

        let config: Config = Self::with_env(figment)
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn with_env(figment: Figment) -> Figment {
        figment
            .merge(Env::prefixed("CLA_").ignore(&["TOKEN"]).split("__"))
            .merge(Env::raw().only(&["GITHUB_TOKEN"]).map(|_| "github.token".into()))
            .merge(Env::raw().only(&["CLA_TOKEN"]).map(|_| "github.token".into()))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.github.api_url.trim().is_empty() {
            return Err(ConfigError::EmptyApiUrl);
        }

        if config.github.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.github.timeout_secs));
        }

        if !(1..=100).contains(&config.github.pr_page_size) {
            return Err(ConfigError::InvalidPageSize(config.github.pr_page_size));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        Matchers::from_config(&config.patterns)?;

        Ok(())
    }
}
