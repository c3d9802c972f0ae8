//! API server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port.
    pub port: u16,

    /// Path to the SQLite catalog database file.
    pub database_path: PathBuf,
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable         | Default        |
    /// |------------------|----------------|
    /// | `PHARMA_PORT`    | `5000`         |
    /// | `PHARMA_DB_PATH` | `./pharma.db`  |
    pub fn load() -> Result<Self, ConfigError> {
        let config = ServerConfig {
            port: env::var("PHARMA_PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PHARMA_PORT".to_string()))?,

            database_path: env::var("PHARMA_DB_PATH")
                .unwrap_or_else(|_| "./pharma.db".to_string())
                .into(),
        };

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // Only assert defaults when the variables are unset in the test env
        if env::var("PHARMA_PORT").is_err() && env::var("PHARMA_DB_PATH").is_err() {
            let config = ServerConfig::load().unwrap();
            assert_eq!(config.port, 5000);
            assert_eq!(config.database_path, PathBuf::from("./pharma.db"));
        }
    }
}
