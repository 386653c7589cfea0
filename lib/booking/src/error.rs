//! Error types for the booking crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `CredentialError`: Errors acquiring the platform access token
//! - `RemoteError`: Errors from the reservations API (internal; the gateways
//!   convert these to mock fallback rather than propagating them)
//! - `AvailabilityError` / `BookingError`: What the gateways surface
//!
//! Credential failures are deliberately never absorbed into mock fallback.

use std::fmt;

/// Errors acquiring the platform access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// Client id/secret are not configured.
    NotConfigured,
    /// Configuration is invalid.
    Configuration { reason: String },
    /// The token exchange itself failed.
    ExchangeFailed { reason: String },
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "platform credentials are not configured"),
            Self::Configuration { reason } => {
                write!(f, "invalid credential configuration: {reason}")
            }
            Self::ExchangeFailed { reason } => {
                write!(f, "token exchange failed: {reason}")
            }
        }
    }
}

impl std::error::Error for CredentialError {}

/// Errors from the reservations API.
///
/// Internal to this crate's gateways: any variant other than `Credential`
/// triggers the mock-fallback path and is logged, never propagated raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// Timeout waiting for the platform.
    Timeout,
    /// Transport-level failure.
    Transport { reason: String },
    /// Non-success HTTP status.
    UnexpectedStatus { status: u16 },
    /// Response body did not match the expected shape.
    MalformedBody { reason: String },
    /// Credential acquisition failed. Propagated, never mocked.
    Credential(CredentialError),
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "reservations platform timed out"),
            Self::Transport { reason } => {
                write!(f, "reservations platform unreachable: {reason}")
            }
            Self::UnexpectedStatus { status } => {
                write!(f, "reservations platform returned status {status}")
            }
            Self::MalformedBody { reason } => {
                write!(f, "malformed reservations response: {reason}")
            }
            Self::Credential(err) => {
                write!(f, "credential acquisition failed: {err}")
            }
        }
    }
}

impl std::error::Error for RemoteError {}

impl From<CredentialError> for RemoteError {
    fn from(err: CredentialError) -> Self {
        Self::Credential(err)
    }
}

/// Errors surfaced by the availability gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    /// The package cannot be booked on the requested weekday. Detected
    /// locally; the platform is never consulted.
    RestrictedDay {
        package: String,
        weekday: String,
        allowed: String,
    },
    /// Credential acquisition failed.
    Credential(CredentialError),
}

impl fmt::Display for AvailabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RestrictedDay {
                package,
                weekday,
                allowed,
            } => {
                write!(
                    f,
                    "the {package} package is only available on {allowed}, not {weekday}"
                )
            }
            Self::Credential(err) => write!(f, "credential acquisition failed: {err}"),
        }
    }
}

impl std::error::Error for AvailabilityError {}

/// Errors surfaced by the booking gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// Credential acquisition failed.
    Credential(CredentialError),
}

impl fmt::Display for BookingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Credential(err) => write!(f, "credential acquisition failed: {err}"),
        }
    }
}

impl std::error::Error for BookingError {}
