use serde::{Deserialize, Serialize};

use super::analytics::AnalyticsConfig;
use super::database::DatabaseConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;

/// Main configuration structure for pollpulse
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Server configuration (port, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// Analytics engine tunables (TTLs, weights, thresholds)
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. pollpulse.toml in current directory
    /// 3. /etc/pollpulse/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("pollpulse.toml").exists() {
            Self::from_file("pollpulse.toml")?
        } else if std::path::Path::new("/etc/pollpulse/config.toml").exists() {
            Self::from_file("/etc/pollpulse/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.web_port {
            self.server.web_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(db) = overrides.database_path {
            self.database.path = db;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.web_port == 0 {
            return Err(ConfigError::Validation("Web port cannot be 0".to_string()));
        }

        let analytics = &self.analytics;
        if analytics.ttl_realtime_secs == 0 || analytics.ttl_historical_secs == 0 {
            return Err(ConfigError::Validation(
                "Metric TTLs must be nonzero".to_string(),
            ));
        }

        if analytics.ttl_historical_secs < analytics.ttl_realtime_secs {
            return Err(ConfigError::Validation(
                "Historical TTL must be >= realtime TTL".to_string(),
            ));
        }

        if analytics.trend_change_threshold <= 0.0 || analytics.trend_change_threshold >= 1.0 {
            return Err(ConfigError::Validation(format!(
                "trend_change_threshold must be in (0, 1), got {}",
                analytics.trend_change_threshold
            )));
        }

        if analytics.max_popular_limit == 0 {
            return Err(ConfigError::Validation(
                "max_popular_limit cannot be 0".to_string(),
            ));
        }

        if analytics.decay_days <= 0.0 {
            return Err(ConfigError::Validation(
                "decay_days must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub web_port: Option<u16>,
    pub bind_address: Option<String>,
    pub database_path: Option<String>,
    pub log_level: Option<String>,
}
