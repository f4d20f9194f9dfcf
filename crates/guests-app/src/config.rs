//! Guests app configuration.

use common::{GrpcClientConfig, ServiceConfig};

/// Environment variable prefix of the HTTP server
const ENV_PREFIX: &str = "GUESTS";

/// Environment variable prefix of the directory client
const DIRECTORY_ENV_PREFIX: &str = "DIRECTORY_SERVICE";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 3000;

/// Default directory-service endpoint
pub const DEFAULT_DIRECTORY_URL: &str = "http://localhost:50052";

/// Guests app configuration.
#[derive(Debug, Clone)]
pub struct GuestsAppConfig {
    /// HTTP bind address
    pub service: ServiceConfig,
    /// Directory service gRPC endpoint and timeouts
    pub directory: GrpcClientConfig,
}

impl GuestsAppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            service: ServiceConfig::from_env(ENV_PREFIX, "guests-app", DEFAULT_PORT),
            directory: GrpcClientConfig::from_env(DIRECTORY_ENV_PREFIX, DEFAULT_DIRECTORY_URL),
        }
    }
}

impl Default for GuestsAppConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "guests-app".to_string(),
                host: "0.0.0.0".to_string(),
                port: DEFAULT_PORT,
            },
            directory: GrpcClientConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_directory() {
        let config = GuestsAppConfig::default();
        assert_eq!(config.service.port, 3000);
        assert_eq!(config.directory.endpoint, DEFAULT_DIRECTORY_URL);
        assert_eq!(config.directory.connect_timeout_ms, 5000);
    }
}
