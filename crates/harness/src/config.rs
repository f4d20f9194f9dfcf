//! Harness configuration.

use std::env;

use crate::extract::DEFAULT_PLATFORM_NAME;

/// Where the harness finds the server and mailbox, and which credentials
/// it uses.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Root URL of the server hosting the guests app
    pub server_url: String,
    /// MailHog root URL
    pub mailhog_url: String,
    pub admin_user: String,
    pub admin_password: String,
    /// Password of regular users, also used as the guests' new password
    pub regular_user_password: String,
    /// Platform name in the activation email template
    pub platform_name: String,
}

impl HarnessConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_url: env::var("GUESTS_SERVER_URL").unwrap_or(defaults.server_url),
            mailhog_url: env::var("MAILHOG_URL").unwrap_or(defaults.mailhog_url),
            admin_user: env::var("ADMIN_USER").unwrap_or(defaults.admin_user),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or(defaults.admin_password),
            regular_user_password: env::var("REGULAR_USER_PASSWORD")
                .unwrap_or(defaults.regular_user_password),
            platform_name: env::var("PLATFORM_NAME").unwrap_or(defaults.platform_name),
        }
    }

    /// Server URL without a trailing slash.
    pub fn server_root(&self) -> &str {
        self.server_url.trim_end_matches('/')
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:3000".to_string(),
            mailhog_url: "http://127.0.0.1:8025".to_string(),
            admin_user: "admin".to_string(),
            admin_password: "admin".to_string(),
            regular_user_password: "123456".to_string(),
            platform_name: DEFAULT_PLATFORM_NAME.to_string(),
        }
    }
}
