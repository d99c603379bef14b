//! Configuration types for Scopewise.
//!
//! Configuration is loaded from a single YAML file (`scopewise.yaml` by
//! default). Every section is optional and falls back to its defaults, so an
//! empty file is a valid configuration.
//!
//! ```yaml
//! database:
//!   database_url_env: DATABASE_URL
//! server:
//!   port: 8080
//!   admin_token_env: SCOPEWISE_ADMIN_TOKEN
//! report:
//!   brand_name: Acme Data Partners
//!   currency_symbol: "$"
//! wizard:
//!   default_locale: de
//! ```

pub mod database;
pub mod report;
pub mod server;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use database::{DatabaseConfig, PoolConfig};
pub use report::ReportConfig;
pub use server::ServerConfig;

use crate::locale::Locale;

/// Complete Scopewise configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScopewiseConfig {
    /// Project name, used in log lines only.
    #[serde(default)]
    pub project: Option<String>,

    /// Hosted backend connection.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// HTTP API settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Report branding.
    #[serde(default)]
    pub report: ReportConfig,

    /// Wizard behaviour.
    #[serde(default)]
    pub wizard: WizardConfig,
}

/// Wizard settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Locale a new wizard starts in.
    #[serde(default)]
    pub default_locale: Locale,
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScopewiseConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when it exists, otherwise return the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Reject values that would only fail later at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Config("server.port must be non-zero".to_string()));
        }
        if self.database.pool.max_connections == 0 {
            return Err(ConfigError::Config(
                "database.pool.max_connections must be at least 1".to_string(),
            ));
        }
        if self.report.currency_symbol.chars().count() > 3 {
            return Err(ConfigError::Config(format!(
                "report.currency_symbol '{}' is longer than three characters",
                self.report.currency_symbol
            )));
        }
        Ok(())
    }
}
