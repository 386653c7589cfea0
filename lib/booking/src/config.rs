//! Reservations-platform connection settings.
//!
//! Loading these values (environment, vault, config file) is the embedding
//! application's concern; the core only consumes the populated struct.

use serde::{Deserialize, Serialize};

/// Default token endpoint for the reservations platform.
const DEFAULT_AUTH_URL: &str = "https://auth.roller.app/connect/token";

/// Default API base URL for the reservations platform.
const DEFAULT_BASE_URL: &str = "https://api.roller.app/v1";

/// Connection settings for the external reservations platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// OAuth2 client identifier.
    pub client_id: String,
    /// OAuth2 client secret.
    pub client_secret: String,
    /// OAuth2 token endpoint.
    pub auth_url: String,
    /// API base URL.
    pub base_url: String,
    /// OAuth2 scope requested with the client-credentials grant.
    pub scope: String,
    /// Timeout for remote calls, in seconds.
    pub timeout_secs: u64,
}

impl PlatformConfig {
    /// Creates a configuration with platform defaults.
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            scope: "api".to_string(),
            timeout_secs: 15,
        }
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the token endpoint.
    #[must_use]
    pub fn with_auth_url(mut self, auth_url: impl Into<String>) -> Self {
        self.auth_url = auth_url.into();
        self
    }

    /// Overrides the remote-call timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}
