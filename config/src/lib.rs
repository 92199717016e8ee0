//! # Configuration Management for QueryHaus
//!
//! This crate provides the configuration structures for the QueryHaus
//! executor: the database connection pool and statement handling settings.
//!
//! ## Quick Start
//!
//! ### Programmatic Configuration
//! ```rust
//! use config::{DatabaseConfig, QueryConfig};
//!
//! let db_config = DatabaseConfig::new(
//!     "localhost".to_string(), 5432, "myapp".to_string(),
//!     "postgres".to_string(), "password".to_string(),
//!     1, 10, 30, 600, 3600,
//! );
//!
//! let query_config = QueryConfig::new(true, false, 65535);
//! ```
//!
//! ### TOML File Configuration
//! ```toml
//! [database]
//! host = "localhost"
//! port = 5432
//! database = "myapp"
//! username = "postgres"
//! password = "password"
//! min_connections = 1
//! max_connections = 10
//! connection_timeout_seconds = 30
//! idle_timeout_seconds = 600
//! max_lifetime_seconds = 3600
//!
//! [query]
//! log_statements = true
//! log_parameters = false
//! max_bound_parameters = 65535
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! // Load from queryhaus.toml
//! let config = AppConfig::load()?;
//!
//! // Or load from custom path
//! let config = AppConfig::from_file("config/production.toml")?;
//! # Ok::<(), config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::{env, path::Path};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./queryhaus.toml";

/// PostgreSQL limit on bind parameters per statement
pub const MAX_BIND_PARAMETERS: usize = 65535;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Environment variable error: {0}")]
    Env(#[from] env::VarError),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub query: QueryConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    pub min_connections: u32,
    pub max_connections: u32,
    pub connection_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
    pub max_lifetime_seconds: u64,
}

/// Statement handling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Log rendered statement text before execution
    #[serde(default)]
    pub log_statements: bool,
    /// Log bound parameter values; off by default since values may be sensitive
    #[serde(default)]
    pub log_parameters: bool,
    /// Upper bound on positional parameters after list expansion
    #[serde(default = "default_max_bound_parameters")]
    pub max_bound_parameters: usize,
}

fn default_max_bound_parameters() -> usize {
    MAX_BIND_PARAMETERS
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            log_statements: false,
            log_parameters: false,
            max_bound_parameters: MAX_BIND_PARAMETERS,
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML file specified in .env or defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config = {
            // A missing .env file is fine, the default path is tried next
            match dotenvy::dotenv() {
                Ok(_) => {}
                Err(err) if err.not_found() => {}
                Err(err) => return Err(err.into()),
            }

            // Try QUERYHAUS_CONFIG path from .env or the environment
            if let Ok(config_path) = env::var("QUERYHAUS_CONFIG") {
                Self::from_file(&config_path)
            }
            // Try to load config from DEFAULT_CONFIG_PATH
            else if Path::new(DEFAULT_CONFIG_PATH).exists() {
                Self::from_file(DEFAULT_CONFIG_PATH)
            }
            // Return error if neither is available
            else {
                Err(ConfigError::Invalid(format!(
                    "Config path must be specified in .env file as QUERYHAUS_CONFIG or in {} file",
                    DEFAULT_CONFIG_PATH
                )))
            }
        }?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        self.database.validate()?;
        self.query.validate()
    }
}

impl DatabaseConfig {
    /// Create a new database configuration
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        host: String,
        port: u16,
        database: String,
        username: String,
        password: String,
        min_connections: u32,
        max_connections: u32,
        connection_timeout_seconds: u64,
        idle_timeout_seconds: u64,
        max_lifetime_seconds: u64,
    ) -> Self {
        Self {
            host,
            port,
            database,
            username,
            password,
            min_connections,
            max_connections,
            connection_timeout_seconds,
            idle_timeout_seconds,
            max_lifetime_seconds,
        }
    }

    /// Build connection string
    pub fn connection_string(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database
        )
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::Invalid(
                "Database host cannot be empty".to_string(),
            ));
        }
        if self.port == 0 {
            return Err(ConfigError::Invalid(
                "Database port cannot be zero".to_string(),
            ));
        }
        if self.database.is_empty() {
            return Err(ConfigError::Invalid(
                "Database name cannot be empty".to_string(),
            ));
        }
        if self.username.is_empty() {
            return Err(ConfigError::Invalid(
                "Database username cannot be empty".to_string(),
            ));
        }
        if self.min_connections == 0 {
            return Err(ConfigError::Invalid(
                "Database min_connections must be greater than 0".to_string(),
            ));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "Database max_connections must be greater than 0".to_string(),
            ));
        }
        if self.min_connections > self.max_connections {
            return Err(ConfigError::Invalid(
                "Database min_connections cannot be greater than max_connections".to_string(),
            ));
        }
        if self.connection_timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "Database connection_timeout_seconds must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl QueryConfig {
    /// Create a new statement handling configuration
    pub fn new(log_statements: bool, log_parameters: bool, max_bound_parameters: usize) -> Self {
        Self {
            log_statements,
            log_parameters,
            max_bound_parameters,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bound_parameters == 0 {
            return Err(ConfigError::Invalid(
                "Query max_bound_parameters must be greater than 0".to_string(),
            ));
        }
        if self.max_bound_parameters > MAX_BIND_PARAMETERS {
            return Err(ConfigError::Invalid(format!(
                "Query max_bound_parameters cannot exceed {}",
                MAX_BIND_PARAMETERS
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATABASE_SECTION: &str = r#"
[database]
host = "localhost"
port = 5432
database = "shortlink"
username = "postgres"
password = "secret"
min_connections = 1
max_connections = 5
connection_timeout_seconds = 30
idle_timeout_seconds = 600
max_lifetime_seconds = 3600
"#;

    #[test]
    fn test_query_section_defaults() {
        let config = AppConfig::from_toml_str(DATABASE_SECTION).unwrap();

        assert!(!config.query.log_statements);
        assert!(!config.query.log_parameters);
        assert_eq!(config.query.max_bound_parameters, MAX_BIND_PARAMETERS);
    }

    #[test]
    fn test_query_section_parsed() {
        let content = format!(
            "{}\n[query]\nlog_statements = true\nmax_bound_parameters = 1000\n",
            DATABASE_SECTION
        );
        let config = AppConfig::from_toml_str(&content).unwrap();

        assert!(config.query.log_statements);
        assert!(!config.query.log_parameters);
        assert_eq!(config.query.max_bound_parameters, 1000);
    }

    #[test]
    fn test_rejects_parameter_limit_out_of_range() {
        let zero = format!("{}\n[query]\nmax_bound_parameters = 0\n", DATABASE_SECTION);
        assert!(matches!(
            AppConfig::from_toml_str(&zero),
            Err(ConfigError::Invalid(_))
        ));

        let too_many = format!("{}\n[query]\nmax_bound_parameters = 70000\n", DATABASE_SECTION);
        assert!(matches!(
            AppConfig::from_toml_str(&too_many),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_database_section() {
        let content = DATABASE_SECTION.replace("min_connections = 1", "min_connections = 9");
        assert!(matches!(
            AppConfig::from_toml_str(&content),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            AppConfig::from_toml_str("[database"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_connection_string() {
        let config = DatabaseConfig::new(
            "db.internal".to_string(),
            5433,
            "links".to_string(),
            "app".to_string(),
            "pw".to_string(),
            1,
            4,
            10,
            60,
            0,
        );
        assert_eq!(
            config.connection_string(),
            "postgresql://app:pw@db.internal:5433/links"
        );
    }
}
