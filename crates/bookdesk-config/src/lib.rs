//! Configuration management for bookdesk
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. Environment variables (`BOOKDESK_*`, `__` between nested keys,
//!    e.g. `BOOKDESK_SESSION__LANDING_MODULE=reports`) (highest precedence)
//! 2. bookdesk.local.toml (gitignored, local overrides)
//! 3. bookdesk.toml (git-tracked, project config)
//! 4. ~/.config/bookdesk/config.toml (user defaults)
//! 5. Built-in defaults (lowest precedence)

use anyhow::Result;
use bookdesk_types::Module;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod error;
mod loader;
mod paths;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use paths::Paths;

/// Main bookdesk configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookdeskConfig {
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

/// How a console session behaves after sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Section to open after sign-in when the user may see it.
    pub landing_module: Module,

    /// Refuse sign-in for backend roles that are not staff roles, instead
    /// of signing the user in with no access.
    pub reject_unknown_roles: bool,

    /// Emit audit events for permission edits.
    pub audit: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            landing_module: Module::Dashboard,
            reject_unknown_roles: true,
            audit: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directives, e.g. `info,bookdesk_rbac=debug`.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    Pretty,
    Compact,
}

impl BookdeskConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        ConfigLoader::new().load()
    }

    /// Load configuration from specific project directory
    pub fn load_from_dir(project_dir: impl AsRef<Path>) -> Result<Self> {
        ConfigLoader::new().with_project_dir(project_dir).load()
    }

    /// Create a development configuration
    pub fn development() -> Self {
        Self {
            logging: LoggingConfig {
                filter: "debug".to_string(),
                format: LogFormat::Pretty,
            },
            ..Default::default()
        }
    }

    /// Create a production configuration
    pub fn production() -> Self {
        Self {
            logging: LoggingConfig {
                filter: "info".to_string(),
                format: LogFormat::Compact,
            },
            ..Default::default()
        }
    }

    /// Parse a single TOML document, filling gaps with defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|source| ConfigError::ParseError { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a single TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.filter must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
