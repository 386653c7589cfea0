//! HTTP client for the reservations platform.
//!
//! `ReservationsApi` is the seam between the gateways and the wire: the
//! gateways only see domain types and `RemoteError`, so tests can substitute
//! doubles and the mock-fallback policy stays in one place.

use crate::config::PlatformConfig;
use crate::credential::TokenProvider;
use crate::error::RemoteError;
use crate::gateway::BookingRequest;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// An open party slot on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    /// When the slot starts.
    pub start_time: NaiveTime,
    /// How many jumpers the slot can still take.
    pub remaining_capacity: u32,
}

/// A reservation as created on the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteReservation {
    /// Platform-assigned reservation identifier.
    pub id: String,
    /// Checkout URL for completing payment.
    pub checkout_url: String,
}

/// Operations offered by the reservations platform.
#[async_trait]
pub trait ReservationsApi: Send + Sync {
    /// Lists open slots for a date and package.
    async fn availability(
        &self,
        date: NaiveDate,
        package_name: &str,
    ) -> Result<Vec<AvailabilitySlot>, RemoteError>;

    /// Creates a reservation and returns its checkout reference.
    async fn create_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<RemoteReservation, RemoteError>;

    /// Fetches the current status of a reservation.
    async fn booking_status(&self, reservation_id: &str) -> Result<String, RemoteError>;
}

/// The real HTTP-backed reservations client.
pub struct HttpReservationsApi {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl HttpReservationsApi {
    /// Creates a client from platform configuration and a token source.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        config: &PlatformConfig,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RemoteError::Transport {
                reason: format!("HTTP client error: {e}"),
            })?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    async fn bearer(&self) -> Result<String, RemoteError> {
        Ok(self.tokens.bearer_token().await?)
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, RemoteError> {
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            // The platform rejected the credential; drop it so the next
            // call acquires a fresh one.
            self.tokens.invalidate().await;
            return Err(RemoteError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(RemoteError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }
        let raw = response.text().await.map_err(transport_error)?;
        serde_json::from_str(&raw).map_err(|e| RemoteError::MalformedBody {
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl ReservationsApi for HttpReservationsApi {
    async fn availability(
        &self,
        date: NaiveDate,
        package_name: &str,
    ) -> Result<Vec<AvailabilitySlot>, RemoteError> {
        let bearer = self.bearer().await?;
        let response = self
            .http
            .get(format!("{}/availability", self.base_url))
            .bearer_auth(bearer)
            .query(&[
                ("date", date.format("%Y-%m-%d").to_string()),
                ("package", package_name.to_string()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        let body: WireAvailability = self.decode(response).await?;
        body.available_slots
            .into_iter()
            .map(WireSlot::into_slot)
            .collect()
    }

    async fn create_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<RemoteReservation, RemoteError> {
        let bearer = self.bearer().await?;
        let payload = WireBookingPayload::from_request(request);
        let response = self
            .http
            .post(format!("{}/bookings", self.base_url))
            .bearer_auth(bearer)
            .json(&payload)
            .send()
            .await
            .map_err(transport_error)?;

        let body: WireBookingCreated = self.decode(response).await?;
        let checkout_url = body
            .checkout_url
            .or(body.payment_url)
            .ok_or_else(|| RemoteError::MalformedBody {
                reason: "reservation response carried no checkout URL".to_string(),
            })?;
        Ok(RemoteReservation {
            id: body.id,
            checkout_url,
        })
    }

    async fn booking_status(&self, reservation_id: &str) -> Result<String, RemoteError> {
        let bearer = self.bearer().await?;
        let response = self
            .http
            .get(format!("{}/bookings/{reservation_id}", self.base_url))
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(transport_error)?;

        let body: WireBookingStatus = self.decode(response).await?;
        Ok(body.status)
    }
}

fn transport_error(err: reqwest::Error) -> RemoteError {
    if err.is_timeout() {
        RemoteError::Timeout
    } else {
        RemoteError::Transport {
            reason: err.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireAvailability {
    #[serde(rename = "availableSlots", default)]
    available_slots: Vec<WireSlot>,
}

#[derive(Debug, Deserialize)]
struct WireSlot {
    time: String,
    #[serde(default)]
    remaining: u32,
}

impl WireSlot {
    fn into_slot(self) -> Result<AvailabilitySlot, RemoteError> {
        let start_time = NaiveTime::parse_from_str(&self.time, "%H:%M").map_err(|e| {
            RemoteError::MalformedBody {
                reason: format!("bad slot time '{}': {e}", self.time),
            }
        })?;
        Ok(AvailabilitySlot {
            start_time,
            remaining_capacity: self.remaining,
        })
    }
}

#[derive(Debug, Serialize)]
struct WireBookingPayload<'a> {
    package: &'a str,
    num_jumpers: u32,
    date: String,
    time: String,
    customer: WireCustomer<'a>,
    private_room: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    birthday_child: Option<&'a str>,
    total_cents: u32,
}

#[derive(Debug, Serialize)]
struct WireCustomer<'a> {
    name: &'a str,
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
}

impl<'a> WireBookingPayload<'a> {
    fn from_request(request: &'a BookingRequest) -> Self {
        Self {
            package: request.package.display_name(),
            num_jumpers: request.jumpers,
            date: request.date.format("%Y-%m-%d").to_string(),
            time: request.slot.format("%H:%M").to_string(),
            customer: WireCustomer {
                name: &request.contact.name,
                email: &request.contact.email,
                phone: request.contact.phone.as_deref(),
            },
            private_room: request.private_room,
            birthday_child: request.contact.birthday_child.as_deref(),
            total_cents: request.price.total_cents,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireBookingCreated {
    id: String,
    #[serde(default)]
    checkout_url: Option<String>,
    #[serde(default)]
    payment_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireBookingStatus {
    status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::ContactInfo;
    use party_line_catalog::{PackageKind, PriceBreakdown};

    #[test]
    fn wire_slot_parses_times() {
        let slot = WireSlot {
            time: "14:00".to_string(),
            remaining: 20,
        }
        .into_slot()
        .expect("should parse");
        assert_eq!(
            slot.start_time,
            NaiveTime::from_hms_opt(14, 0, 0).expect("valid time")
        );
        assert_eq!(slot.remaining_capacity, 20);
    }

    #[test]
    fn wire_slot_rejects_bad_times() {
        let err = WireSlot {
            time: "2 o'clock".to_string(),
            remaining: 20,
        }
        .into_slot()
        .expect_err("should reject");
        assert!(matches!(err, RemoteError::MalformedBody { .. }));
    }

    #[test]
    fn availability_body_tolerates_missing_slots() {
        let body: WireAvailability = serde_json::from_str("{}").expect("deserialize");
        assert!(body.available_slots.is_empty());
    }

    #[test]
    fn booking_payload_mirrors_the_request() {
        let request = BookingRequest {
            package: PackageKind::AllStar,
            jumpers: 12,
            date: NaiveDate::from_ymd_opt(2026, 9, 5).expect("valid date"),
            slot: NaiveTime::from_hms_opt(16, 0, 0).expect("valid time"),
            private_room: true,
            contact: ContactInfo {
                name: "Jamie Park".to_string(),
                email: "jamie@example.com".to_string(),
                phone: None,
                birthday_child: Some("Sam".to_string()),
            },
            price: PriceBreakdown {
                base_cents: 36000,
                room_cents: 6000,
                total_cents: 42000,
            },
        };
        let value =
            serde_json::to_value(WireBookingPayload::from_request(&request)).expect("serialize");

        assert_eq!(value["package"], "All-Star");
        assert_eq!(value["num_jumpers"], 12);
        assert_eq!(value["date"], "2026-09-05");
        assert_eq!(value["time"], "16:00");
        assert_eq!(value["customer"]["name"], "Jamie Park");
        assert!(value["customer"].get("phone").is_none());
        assert_eq!(value["birthday_child"], "Sam");
        assert_eq!(value["total_cents"], 42000);
    }

    #[test]
    fn created_body_accepts_either_checkout_field() {
        let body: WireBookingCreated =
            serde_json::from_str(r#"{"id": "res_1", "payment_url": "https://pay.example/1"}"#)
                .expect("deserialize");
        assert_eq!(body.checkout_url.or(body.payment_url).as_deref(), Some("https://pay.example/1"));
    }
}
