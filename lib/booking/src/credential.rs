//! Access-token cache for the reservations platform.
//!
//! The platform uses an OAuth2 client-credentials grant. The token is
//! process-wide state shared by both gateways: acquisition is serialized so
//! concurrent sessions never trigger redundant authentication round-trips,
//! and tokens are treated as expired five minutes early to avoid racing a
//! just-expired credential.

use crate::config::PlatformConfig;
use crate::error::CredentialError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use oauth2::{
    AuthType, ClientId, ClientSecret, Scope, TokenResponse, TokenUrl, basic::BasicClient,
};
use std::time::Duration;
use tokio::sync::Mutex;

/// How long before the stated expiry a token is treated as expired.
const EXPIRY_MARGIN_SECS: i64 = 300;

/// Fallback token lifetime when the platform omits `expires_in`.
const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3600;

/// Source of bearer tokens for the reservations API.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Returns a currently-valid bearer token, refreshing if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if a fresh token cannot be acquired.
    async fn bearer_token(&self) -> Result<String, CredentialError>;

    /// Drops any cached token after the remote side rejected it, so the
    /// next call acquires a fresh one.
    async fn invalidate(&self) {}
}

/// A cached access token with its expiry.
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The bearer token value.
    pub bearer: String,
    /// When the platform says the token expires.
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Returns true if the token is still usable at `now`, honoring the
    /// proactive expiry margin.
    #[must_use]
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        now + chrono::Duration::seconds(EXPIRY_MARGIN_SECS) < self.expires_at
    }
}

/// Process-wide OAuth2 token cache with single-flight refresh.
///
/// Share one instance (behind `Arc`) across every gateway in the process.
pub struct OauthTokenCache {
    client_id: String,
    client_secret: String,
    token_url: String,
    scope: String,
    http: reqwest::Client,
    // Held across the refresh so at most one exchange is in flight; waiters
    // receive the shared result.
    state: Mutex<Option<CachedToken>>,
}

impl OauthTokenCache {
    /// Creates a token cache from platform configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing or the token URL is
    /// invalid.
    pub fn new(config: &PlatformConfig) -> Result<Self, CredentialError> {
        if config.client_id.is_empty() || config.client_secret.is_empty() {
            return Err(CredentialError::NotConfigured);
        }
        // Validate the URL up front so refresh can rely on it.
        let _ = TokenUrl::new(config.auth_url.clone()).map_err(|e| {
            CredentialError::Configuration {
                reason: format!("invalid token URL: {e}"),
            }
        })?;
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CredentialError::Configuration {
                reason: format!("HTTP client error: {e}"),
            })?;

        Ok(Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            token_url: config.auth_url.clone(),
            scope: config.scope.clone(),
            http,
            state: Mutex::new(None),
        })
    }

    async fn exchange(&self) -> Result<CachedToken, CredentialError> {
        let client = BasicClient::new(ClientId::new(self.client_id.clone()))
            .set_client_secret(ClientSecret::new(self.client_secret.clone()))
            .set_auth_type(AuthType::RequestBody)
            .set_token_uri(TokenUrl::new(self.token_url.clone()).expect("validated token URL"));

        let token = client
            .exchange_client_credentials()
            .add_scope(Scope::new(self.scope.clone()))
            .request_async(&self.http)
            .await
            .map_err(|e| CredentialError::ExchangeFailed {
                reason: e.to_string(),
            })?;

        let lifetime = token
            .expires_in()
            .unwrap_or(Duration::from_secs(DEFAULT_TOKEN_LIFETIME_SECS));
        let lifetime = chrono::Duration::from_std(lifetime)
            .unwrap_or_else(|_| chrono::Duration::seconds(DEFAULT_TOKEN_LIFETIME_SECS as i64));

        Ok(CachedToken {
            bearer: token.access_token().secret().clone(),
            expires_at: Utc::now() + lifetime,
        })
    }
}

#[async_trait]
impl TokenProvider for OauthTokenCache {
    async fn bearer_token(&self) -> Result<String, CredentialError> {
        let mut state = self.state.lock().await;
        if let Some(token) = state.as_ref() {
            if token.is_fresh_at(Utc::now()) {
                return Ok(token.bearer.clone());
            }
        }

        tracing::debug!("refreshing reservations-platform access token");
        let fresh = self.exchange().await?;
        let bearer = fresh.bearer.clone();
        *state = Some(fresh);
        Ok(bearer)
    }

    async fn invalidate(&self) {
        tracing::debug!("dropping rejected reservations-platform access token");
        *self.state.lock().await = None;
    }
}
