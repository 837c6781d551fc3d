use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{ConfigError, DatabaseConfig, DnsConfig, LoggingConfig, PatternsConfig};

const DEFAULT_CONFIG_FILE: &str = "gtld-census.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub dns: DnsConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub patterns: PatternsConfig,
}

/// Command-line values that win over the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub upstream_servers: Vec<String>,
    pub database_path: Option<String>,
    pub log_level: Option<String>,
    pub log_json: Option<bool>,
    pub parked_nameservers: Option<String>,
    pub blocked_nameservers: Option<String>,
    pub parked_ptr: Option<String>,
    pub expired_ptr: Option<String>,
    pub other_inactive_nameservers: Option<String>,
}

impl Config {
    /// Loads `config_path` (or `gtld-census.toml` when present) and applies
    /// the CLI overrides on top.
    ///
    /// An explicit path that cannot be read is an error; the default file is
    /// optional.
    pub fn load(config_path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Config::default(),
        };

        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse { reason, .. } => ConfigError::Parse {
                path: path.to_string(),
                reason,
            },
            other => other,
        })
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: "<inline>".to_string(),
            reason: e.to_string(),
        })
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if !overrides.upstream_servers.is_empty() {
            self.dns.upstream_servers = overrides.upstream_servers;
        }
        if let Some(path) = overrides.database_path {
            self.database.path = path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = json;
        }

        let patterns = &mut self.patterns;
        for (slot, value) in [
            (&mut patterns.parked_nameservers, overrides.parked_nameservers),
            (&mut patterns.blocked_nameservers, overrides.blocked_nameservers),
            (&mut patterns.parked_ptr, overrides.parked_ptr),
            (&mut patterns.expired_ptr, overrides.expired_ptr),
            (
                &mut patterns.other_inactive_nameservers,
                overrides.other_inactive_nameservers,
            ),
        ] {
            if value.is_some() {
                *slot = value;
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dns.upstream_servers.is_empty() {
            return Err(ConfigError::Validation(
                "dns.upstream_servers cannot be empty".to_string(),
            ));
        }
        self.dns.upstream_addrs()?;

        if self.dns.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "dns.query_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.dns.enrichment_concurrency == 0 {
            return Err(ConfigError::Validation(
                "dns.enrichment_concurrency must be greater than zero".to_string(),
            ));
        }
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "database.path cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
