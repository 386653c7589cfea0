//! Reservations-platform integration for the party-line platform.
//!
//! This crate provides:
//!
//! - **Credential cache**: Process-wide OAuth2 client-credentials token with
//!   single-flight refresh
//! - **Reservations API**: The HTTP client for the external booking service
//! - **Gateways**: Availability and booking operations with deterministic
//!   mock fallback when the remote side misbehaves
//! - **Notification payload**: What the core hands to the (external)
//!   confirmation-delivery collaborator
//!
//! Mock fallback is a deliberate availability/consistency trade-off: the
//! conversation keeps moving, and every result carries an origin flag so
//! downstream consumers can tell a real reservation from a placeholder.

pub mod api;
pub mod config;
pub mod credential;
pub mod error;
pub mod gateway;
pub mod notification;

pub use api::{AvailabilitySlot, HttpReservationsApi, RemoteReservation, ReservationsApi};
pub use config::PlatformConfig;
pub use credential::{CachedToken, OauthTokenCache, TokenProvider};
pub use error::{AvailabilityError, BookingError, CredentialError, RemoteError};
pub use gateway::{
    AvailabilityGateway, AvailabilityQuery, AvailabilityReport, BookingGateway, BookingRequest,
    BookingResult, BookingStatus, ContactInfo, ResultOrigin,
};
pub use notification::{ConfirmationNotice, NotificationError, NotificationSink};
