//! Environment-driven settings
//!
//! Settings load from the process environment with the `LEDGER_` prefix,
//! after an optional `.env` file has been read. Only the database URL is
//! required; pool sizing falls back to the [`DatabaseConfig`] defaults.

use serde::Deserialize;

use crate::pool::DatabaseConfig;

/// Database settings loaded from the environment
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// PostgreSQL connection string (`LEDGER_DATABASE_URL`)
    pub database_url: String,
    /// Maximum pool size (`LEDGER_MAX_CONNECTIONS`)
    #[serde(default)]
    pub max_connections: Option<u32>,
    /// Minimum pool size (`LEDGER_MIN_CONNECTIONS`)
    #[serde(default)]
    pub min_connections: Option<u32>,
}

impl DatabaseSettings {
    /// Loads settings from `.env` (if present) and the environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        config::Config::builder()
            .add_source(config::Environment::with_prefix("LEDGER"))
            .build()?
            .try_deserialize()
    }

    /// Converts into a pool configuration
    pub fn pool_config(&self) -> DatabaseConfig {
        let mut config = DatabaseConfig::new(&self.database_url);
        if let Some(max) = self.max_connections {
            config = config.max_connections(max);
        }
        if let Some(min) = self.min_connections {
            config = config.min_connections(min);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_config_applies_overrides() {
        let settings = DatabaseSettings {
            database_url: "postgres://test/ledger".to_string(),
            max_connections: Some(25),
            min_connections: None,
        };

        let config = settings.pool_config();
        assert_eq!(config.url, "postgres://test/ledger");
        assert_eq!(config.max_connections, 25);
        assert_eq!(config.min_connections, 2);
    }
}
