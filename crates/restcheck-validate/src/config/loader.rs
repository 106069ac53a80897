//! Configuration loader
//!
//! Merges configuration sources with Figment. Later sources override earlier:
//! 1. Default values from `LintConfig::default()`
//! 2. TOML configuration file (explicit path, or the first default location found)
//! 3. Environment variables with prefix (e.g., `RESTCHECK_API_PREFIX_ALLOWED`)

use super::LintConfig;
use crate::constants::{CONFIG_ENV_PREFIX, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME};
use crate::{Result, Severity, ValidationError};
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const USER_CONFIG_FILENAME: &str = "config.toml";

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file is not.
    pub fn load(&self) -> Result<LintConfig> {
        // Defaults come from `#[serde(default)]`, so the camelCase aliases
        // never collide with a serialized snake_case default.
        let mut figment = Figment::new();

        if let Some(config_path) = &self.config_path {
            if !config_path.exists() {
                log_config_loaded(config_path, false);
                return Err(ValidationError::Config(format!(
                    "configuration file not found: {}",
                    config_path.display()
                )));
            }
            figment = figment.merge(Toml::file(config_path));
            log_config_loaded(config_path, true);
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        figment = figment.merge(Env::prefixed(&format!("{}_", self.env_prefix)));

        let config: LintConfig = figment
            .extract()
            .map_err(|e| ValidationError::Config(e.to_string()))?;

        validate_lint_config(&config)?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &LintConfig, path: P) -> Result<()> {
        let toml_string = toml::to_string_pretty(config)
            .map_err(|e| ValidationError::Config(format!("failed to serialize config: {e}")))?;

        std::fs::write(path.as_ref(), toml_string)?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// First existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let mut candidates = Vec::new();
        if let Ok(current_dir) = env::current_dir() {
            candidates.push(current_dir.join(DEFAULT_CONFIG_FILENAME));
        }
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join(DEFAULT_CONFIG_DIR).join(USER_CONFIG_FILENAME));
        }

        candidates.into_iter().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_lint_config(config: &LintConfig) -> Result<()> {
    if config.min_severity_to_fail == Severity::Info {
        return Err(ValidationError::Config(
            "min_severity_to_fail must be 'error' or 'warning'".to_string(),
        ));
    }
    if config
        .singleton_resource_allow_list
        .iter()
        .any(|s| s.trim().is_empty())
    {
        return Err(ValidationError::Config(
            "singleton_resource_allow_list cannot contain empty names".to_string(),
        ));
    }
    Ok(())
}

fn log_config_loaded(config_path: &Path, success: bool) {
    if success {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        debug!(path = %config_path.display(), "Configuration file not found");
    }
}
