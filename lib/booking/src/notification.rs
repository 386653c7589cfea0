//! Confirmation notification payload.
//!
//! The core decides *that* a confirmation should go out and *what* it says;
//! delivery (email, SMS) belongs to an external collaborator implementing
//! `NotificationSink`.

use crate::gateway::{BookingResult, ContactInfo};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything the notification collaborator needs to confirm a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationNotice {
    /// The reservation that was created.
    pub result: BookingResult,
    /// Who to notify.
    pub contact: ContactInfo,
    /// Display name of the booked package.
    pub package_name: String,
    /// Whether the private room upgrade was included.
    pub private_room: bool,
    /// Total committed price in cents.
    pub total_cents: u32,
}

/// Errors from notification delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    /// Delivery failed.
    DeliveryFailed { reason: String },
}

impl fmt::Display for NotificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeliveryFailed { reason } => {
                write!(f, "notification delivery failed: {reason}")
            }
        }
    }
}

impl std::error::Error for NotificationError {}

/// Trait for the external confirmation-delivery collaborator.
///
/// The notice is handed over by value; the core never mutates or re-reads it
/// afterwards.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Delivers a booking confirmation.
    ///
    /// # Errors
    ///
    /// Returns an error if delivery fails. Callers log and continue; a
    /// failed confirmation never fails the booking itself.
    async fn deliver(&self, notice: ConfirmationNotice) -> Result<(), NotificationError>;
}
