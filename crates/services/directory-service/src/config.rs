//! Directory service configuration.

use common::{DatabaseConfig, ServiceConfig};

/// Environment variable prefix of this service
const ENV_PREFIX: &str = "DIRECTORY_SERVICE";

/// Default gRPC port
pub const DEFAULT_PORT: u16 = 50052;

/// Directory service configuration.
#[derive(Debug, Clone)]
pub struct DirectoryServiceConfig {
    /// Bind address and service name
    pub service: ServiceConfig,
    /// Database connection settings
    pub database: DatabaseConfig,
}

impl DirectoryServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            service: ServiceConfig::from_env(ENV_PREFIX, "directory-service", DEFAULT_PORT),
            database: DatabaseConfig::from_env(ENV_PREFIX),
        }
    }
}

impl Default for DirectoryServiceConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "directory-service".to_string(),
                host: "0.0.0.0".to_string(),
                port: DEFAULT_PORT,
            },
            database: DatabaseConfig::default(),
        }
    }
}
