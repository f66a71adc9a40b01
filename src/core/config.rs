use crate::core::error::ConfigError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Persisted configuration snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default = "default_ratio_limit")]
    pub ratio_limit: f64,
    /// Container that runs deluge-console, unset when it runs on the host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    #[serde(default)]
    pub allowed_trackers: Vec<String>,
}

/// Values supplied on the command line. `None` keeps the persisted value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub ratio_limit: Option<f64>,
    pub container: Option<String>,
    pub allowed_trackers: Option<Vec<String>>,
}

/// Connection details that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub container: Option<String>,
}

fn default_ratio_limit() -> f64 {
    0.5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: None,
            port: None,
            user: None,
            password: None,
            ratio_limit: default_ratio_limit(),
            container: None,
            allowed_trackers: Vec::new(),
        }
    }
}

impl Config {
    /// Load the snapshot from a TOML file.
    ///
    /// Returns `None` when the file does not exist. A file that cannot be
    /// parsed is treated the same way so a broken snapshot gets rewritten.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        match toml::from_str::<Config>(&content) {
            Ok(config) => Ok(Some(config)),
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to parse config file, ignoring it"
                );
                Ok(None)
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, content)
            .context(format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Rewrite the snapshot at `path` when it differs from what was loaded.
    ///
    /// Returns whether the file was written.
    pub fn persist_if_changed(&self, loaded: Option<&Config>, path: &Path) -> Result<bool> {
        if loaded == Some(self) {
            return Ok(false);
        }

        self.save(path)?;
        Ok(true)
    }

    /// Apply command-line overrides on top of this snapshot
    pub fn merge(mut self, overrides: ConfigOverrides) -> Self {
        if overrides.host.is_some() {
            self.host = overrides.host;
        }
        if overrides.port.is_some() {
            self.port = overrides.port;
        }
        if overrides.user.is_some() {
            self.user = overrides.user;
        }
        if overrides.password.is_some() {
            self.password = overrides.password;
        }
        if let Some(ratio_limit) = overrides.ratio_limit {
            self.ratio_limit = ratio_limit;
        }
        if overrides.container.is_some() {
            self.container = overrides.container;
        }
        if let Some(allowed_trackers) = overrides.allowed_trackers {
            self.allowed_trackers = allowed_trackers;
        }
        self
    }

    /// Check that everything needed to reach the console is present
    pub fn validate(&self) -> Result<ConnectionSettings, ConfigError> {
        let mut missing = Vec::new();

        let host = non_empty(&self.host);
        if host.is_none() {
            missing.push("host");
        }
        if self.port.is_none() {
            missing.push("port");
        }
        let user = non_empty(&self.user);
        if user.is_none() {
            missing.push("user");
        }
        let password = non_empty(&self.password);
        if password.is_none() {
            missing.push("password");
        }

        if !missing.is_empty() {
            return Err(ConfigError::MissingRequired(missing));
        }

        let port = self.port.unwrap_or_default();
        if port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "port",
                reason: "must be greater than 0".to_string(),
            });
        }

        if !self.ratio_limit.is_finite() || self.ratio_limit < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "ratio_limit",
                reason: format!("must be a non-negative number, got {}", self.ratio_limit),
            });
        }

        Ok(ConnectionSettings {
            host: host.unwrap_or_default(),
            port,
            user: user.unwrap_or_default(),
            password: password.unwrap_or_default(),
            container: non_empty(&self.container),
        })
    }
}

/// Blank values count as missing; anything else is kept verbatim
fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}
