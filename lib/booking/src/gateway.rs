//! Availability and booking gateways.
//!
//! Both gateways share the same discipline: credential failures propagate,
//! every other remote failure is logged and replaced by a deterministic mock
//! result so the conversation can continue. Results carry an origin flag so
//! nothing downstream mistakes a placeholder for a real reservation.

use crate::api::{AvailabilitySlot, ReservationsApi};
use crate::error::{AvailabilityError, BookingError, RemoteError};
use chrono::{Datelike, NaiveDate, NaiveTime};
use party_line_catalog::package::weekday_name;
use party_line_catalog::{PackageKind, PartyPackage, PriceBreakdown};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use ulid::Ulid;

/// Checkout reference used for mock reservations.
const MOCK_CHECKOUT_URL: &str = "https://checkout.roller.app/mock-payment-link";

/// Whether a result came from the platform or the local mock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultOrigin {
    /// The platform answered.
    Live,
    /// The platform failed; this is locally synthesized data.
    Mock,
}

/// A request for open slots.
#[derive(Debug, Clone)]
pub struct AvailabilityQuery {
    /// The date the party should happen.
    pub date: NaiveDate,
    /// The package being booked. Checked against its day restriction before
    /// any network traffic.
    pub package: PartyPackage,
}

/// Open slots for a query, flagged with their origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityReport {
    /// Where the slots came from.
    pub origin: ResultOrigin,
    /// Open slots, in platform order.
    pub slots: Vec<AvailabilitySlot>,
}

impl AvailabilityReport {
    /// Returns true if the report was synthesized locally.
    #[must_use]
    pub fn is_mock(&self) -> bool {
        self.origin == ResultOrigin::Mock
    }
}

/// Who is booking the party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Name of the person booking.
    pub name: String,
    /// Email address for the confirmation.
    pub email: String,
    /// Phone number, if provided.
    pub phone: Option<String>,
    /// Birthday child's name, if provided.
    pub birthday_child: Option<String>,
}

/// Everything needed to create a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    /// Which package is being booked.
    pub package: PackageKind,
    /// Number of jumpers.
    pub jumpers: u32,
    /// Party date.
    pub date: NaiveDate,
    /// Selected slot start time.
    pub slot: NaiveTime,
    /// Whether the private room upgrade is included.
    pub private_room: bool,
    /// Contact details for the booking.
    pub contact: ContactInfo,
    /// The quoted price being committed to.
    pub price: PriceBreakdown,
}

/// Status of a created reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Reservation exists on the platform; payment still outstanding.
    ConfirmedPendingPayment,
    /// Platform was unreachable; this is a locally synthesized placeholder.
    Mock,
}

/// The outcome of creating a reservation.
///
/// Owned by the conversation turn that created it and immutable thereafter;
/// hand it to the notification collaborator by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingResult {
    /// Reservation identifier (platform-assigned, or `MOCK-*`).
    pub reservation_id: String,
    /// Checkout URL for completing payment.
    pub checkout_url: String,
    /// Whether the reservation is real or a placeholder.
    pub status: BookingStatus,
    /// Package that was booked.
    pub package: PackageKind,
    /// Jumper count that was booked.
    pub jumpers: u32,
    /// Party date.
    pub date: NaiveDate,
    /// Slot start time.
    pub slot: NaiveTime,
}

impl BookingResult {
    /// Returns true if this is a locally synthesized placeholder.
    #[must_use]
    pub fn is_mock(&self) -> bool {
        self.status == BookingStatus::Mock
    }
}

/// Queries the platform for open slots.
#[derive(Clone)]
pub struct AvailabilityGateway {
    api: Arc<dyn ReservationsApi>,
}

impl AvailabilityGateway {
    /// Creates a gateway over a reservations API.
    #[must_use]
    pub fn new(api: Arc<dyn ReservationsApi>) -> Self {
        Self { api }
    }

    /// Checks availability for a date and package.
    ///
    /// The day restriction is enforced locally first, so a restricted query
    /// never reaches the platform and a misbehaving remote response cannot
    /// bypass it.
    ///
    /// # Errors
    ///
    /// Returns `RestrictedDay` for a package booked outside its permitted
    /// weekdays, or `Credential` if no access token could be acquired.
    pub async fn check(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<AvailabilityReport, AvailabilityError> {
        let weekday = query.date.weekday();
        if !query.package.bookable_on(weekday) {
            return Err(restricted_day(&query.package, weekday));
        }

        match self.api.availability(query.date, query.package.name).await {
            Ok(slots) => Ok(AvailabilityReport {
                origin: ResultOrigin::Live,
                slots,
            }),
            Err(RemoteError::Credential(err)) => Err(AvailabilityError::Credential(err)),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    date = %query.date,
                    package = query.package.name,
                    "availability lookup failed, serving mock slots"
                );
                Ok(AvailabilityReport {
                    origin: ResultOrigin::Mock,
                    slots: mock_slots(),
                })
            }
        }
    }
}

/// Creates reservations on the platform.
#[derive(Clone)]
pub struct BookingGateway {
    api: Arc<dyn ReservationsApi>,
}

impl BookingGateway {
    /// Creates a gateway over a reservations API.
    #[must_use]
    pub fn new(api: Arc<dyn ReservationsApi>) -> Self {
        Self { api }
    }

    /// Creates a reservation.
    ///
    /// Never retried: reservation creation is not idempotent without a
    /// remote idempotency key. A remote failure falls back to a mock result
    /// exactly once; re-prompting the user is the orchestrator's call.
    ///
    /// # Errors
    ///
    /// Returns `Credential` if no access token could be acquired.
    pub async fn create(&self, request: BookingRequest) -> Result<BookingResult, BookingError> {
        match self.api.create_booking(&request).await {
            Ok(remote) => Ok(BookingResult {
                reservation_id: remote.id,
                checkout_url: remote.checkout_url,
                status: BookingStatus::ConfirmedPendingPayment,
                package: request.package,
                jumpers: request.jumpers,
                date: request.date,
                slot: request.slot,
            }),
            Err(RemoteError::Credential(err)) => Err(BookingError::Credential(err)),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    package = request.package.display_name(),
                    "booking create failed, issuing mock reservation"
                );
                Ok(BookingResult {
                    reservation_id: format!("MOCK-{}", Ulid::new()),
                    checkout_url: MOCK_CHECKOUT_URL.to_string(),
                    status: BookingStatus::Mock,
                    package: request.package,
                    jumpers: request.jumpers,
                    date: request.date,
                    slot: request.slot,
                })
            }
        }
    }

    /// Fetches the current status of a reservation.
    ///
    /// # Errors
    ///
    /// Returns `Credential` if no access token could be acquired. Other
    /// remote failures fall back to `"unknown"`.
    pub async fn status(&self, reservation_id: &str) -> Result<String, BookingError> {
        match self.api.booking_status(reservation_id).await {
            Ok(status) => Ok(status),
            Err(RemoteError::Credential(err)) => Err(BookingError::Credential(err)),
            Err(err) => {
                tracing::warn!(error = %err, reservation_id, "booking status lookup failed");
                Ok("unknown".to_string())
            }
        }
    }
}

fn restricted_day(package: &PartyPackage, weekday: chrono::Weekday) -> AvailabilityError {
    let allowed = package
        .open_days
        .unwrap_or(&[])
        .iter()
        .map(|d| weekday_name(*d))
        .collect::<Vec<_>>()
        .join(" and ");
    AvailabilityError::RestrictedDay {
        package: package.name.to_string(),
        weekday: weekday_name(weekday).to_string(),
        allowed,
    }
}

/// The deterministic slot sequence served when the platform is unavailable.
fn mock_slots() -> Vec<AvailabilitySlot> {
    [14, 16, 18]
        .into_iter()
        .map(|hour| AvailabilitySlot {
            start_time: NaiveTime::from_hms_opt(hour, 0, 0).expect("valid time"),
            remaining_capacity: 20,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RemoteReservation;
    use crate::error::CredentialError;
    use async_trait::async_trait;
    use party_line_catalog::PackageCatalog;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// API double that counts calls and returns a scripted outcome.
    struct ScriptedApi {
        calls: AtomicUsize,
        outcome: Result<Vec<AvailabilitySlot>, RemoteError>,
        booking_outcome: Result<RemoteReservation, RemoteError>,
    }

    impl ScriptedApi {
        fn slots(slots: Vec<AvailabilitySlot>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                outcome: Ok(slots),
                booking_outcome: Ok(reservation()),
            }
        }

        fn failing(err: RemoteError) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                outcome: Err(err.clone()),
                booking_outcome: Err(err),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    fn reservation() -> RemoteReservation {
        RemoteReservation {
            id: "res_42".to_string(),
            checkout_url: "https://checkout.example/res_42".to_string(),
        }
    }

    #[async_trait]
    impl ReservationsApi for ScriptedApi {
        async fn availability(
            &self,
            _date: NaiveDate,
            _package_name: &str,
        ) -> Result<Vec<AvailabilitySlot>, RemoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }

        async fn create_booking(
            &self,
            _request: &BookingRequest,
        ) -> Result<RemoteReservation, RemoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.booking_outcome.clone()
        }

        async fn booking_status(&self, _reservation_id: &str) -> Result<String, RemoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.booking_outcome {
                Ok(_) => Ok("pending_payment".to_string()),
                Err(err) => Err(err.clone()),
            }
        }
    }

    fn live_slot() -> AvailabilitySlot {
        AvailabilitySlot {
            start_time: NaiveTime::from_hms_opt(15, 0, 0).expect("valid time"),
            remaining_capacity: 8,
        }
    }

    // 2026-09-02 is a Wednesday; 2026-09-04 a Friday; 2026-09-05 a Saturday.
    fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 2).expect("valid date")
    }

    fn saturday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 5).expect("valid date")
    }

    fn booking_request() -> BookingRequest {
        BookingRequest {
            package: PackageKind::GloParty,
            jumpers: 12,
            date: saturday(),
            slot: NaiveTime::from_hms_opt(18, 0, 0).expect("valid time"),
            private_room: true,
            contact: ContactInfo {
                name: "Jamie Park".to_string(),
                email: "jamie@example.com".to_string(),
                phone: Some("256-555-0142".to_string()),
                birthday_child: Some("Sam".to_string()),
            },
            price: PriceBreakdown {
                base_cents: 48000,
                room_cents: 6000,
                total_cents: 54000,
            },
        }
    }

    #[tokio::test]
    async fn restricted_day_fails_without_touching_the_platform() {
        let api = Arc::new(ScriptedApi::slots(vec![live_slot()]));
        let gateway = AvailabilityGateway::new(api.clone());
        let catalog = PackageCatalog::new();

        let query = AvailabilityQuery {
            date: wednesday(),
            package: catalog.get(PackageKind::GloParty).clone(),
        };
        let err = gateway.check(&query).await.expect_err("should reject");

        match err {
            AvailabilityError::RestrictedDay { weekday, allowed, .. } => {
                assert_eq!(weekday, "Wednesday");
                assert_eq!(allowed, "Friday and Saturday");
            }
            other => panic!("expected RestrictedDay, got {other}"),
        }
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn permitted_day_reaches_the_platform() {
        let api = Arc::new(ScriptedApi::slots(vec![live_slot()]));
        let gateway = AvailabilityGateway::new(api.clone());
        let catalog = PackageCatalog::new();

        let query = AvailabilityQuery {
            date: saturday(),
            package: catalog.get(PackageKind::GloParty).clone(),
        };
        let report = gateway.check(&query).await.expect("should succeed");

        assert_eq!(report.origin, ResultOrigin::Live);
        assert_eq!(report.slots, vec![live_slot()]);
        assert_eq!(api.call_count(), 1);
    }

    #[tokio::test]
    async fn remote_failure_serves_mock_slots() {
        let api = Arc::new(ScriptedApi::failing(RemoteError::Timeout));
        let gateway = AvailabilityGateway::new(api);
        let catalog = PackageCatalog::new();

        let query = AvailabilityQuery {
            date: wednesday(),
            package: catalog.get(PackageKind::Rookie).clone(),
        };
        let report = gateway.check(&query).await.expect("should fall back");

        assert!(report.is_mock());
        assert_eq!(report.slots.len(), 3);
        assert_eq!(
            report.slots[0].start_time,
            NaiveTime::from_hms_opt(14, 0, 0).expect("valid time")
        );
        assert!(report.slots.iter().all(|s| s.remaining_capacity == 20));
    }

    #[tokio::test]
    async fn credential_failure_is_not_absorbed() {
        let api = Arc::new(ScriptedApi::failing(RemoteError::Credential(
            CredentialError::NotConfigured,
        )));
        let gateway = AvailabilityGateway::new(api);
        let catalog = PackageCatalog::new();

        let query = AvailabilityQuery {
            date: saturday(),
            package: catalog.get(PackageKind::Rookie).clone(),
        };
        let err = gateway.check(&query).await.expect_err("should propagate");
        assert!(matches!(err, AvailabilityError::Credential(_)));
    }

    #[tokio::test]
    async fn booking_success_is_pending_payment() {
        let api = Arc::new(ScriptedApi::slots(Vec::new()));
        let gateway = BookingGateway::new(api);

        let result = gateway.create(booking_request()).await.expect("should create");

        assert_eq!(result.status, BookingStatus::ConfirmedPendingPayment);
        assert_eq!(result.reservation_id, "res_42");
        assert_eq!(result.package, PackageKind::GloParty);
        assert_eq!(result.jumpers, 12);
    }

    #[tokio::test]
    async fn booking_failure_falls_back_to_mock_exactly_once() {
        let api = Arc::new(ScriptedApi::failing(RemoteError::UnexpectedStatus {
            status: 502,
        }));
        let gateway = BookingGateway::new(api.clone());

        let result = gateway.create(booking_request()).await.expect("should fall back");

        assert!(result.is_mock());
        assert!(result.reservation_id.starts_with("MOCK-"));
        assert_eq!(result.checkout_url, MOCK_CHECKOUT_URL);
        assert_eq!(result.package, PackageKind::GloParty);
        assert_eq!(result.jumpers, 12);
        // The create call is never retried.
        assert_eq!(api.call_count(), 1);
    }

    #[tokio::test]
    async fn booking_credential_failure_is_not_absorbed() {
        let api = Arc::new(ScriptedApi::failing(RemoteError::Credential(
            CredentialError::NotConfigured,
        )));
        let gateway = BookingGateway::new(api);

        let err = gateway
            .create(booking_request())
            .await
            .expect_err("should propagate");
        assert!(matches!(err, BookingError::Credential(_)));
    }

    #[tokio::test]
    async fn status_falls_back_to_unknown() {
        let api = Arc::new(ScriptedApi::failing(RemoteError::Timeout));
        let gateway = BookingGateway::new(api);

        let status = gateway.status("res_42").await.expect("should fall back");
        assert_eq!(status, "unknown");
    }

    #[test]
    fn booking_result_serde_roundtrip() {
        let result = BookingResult {
            reservation_id: "res_42".to_string(),
            checkout_url: "https://checkout.example/res_42".to_string(),
            status: BookingStatus::ConfirmedPendingPayment,
            package: PackageKind::Mvp,
            jumpers: 10,
            date: saturday(),
            slot: NaiveTime::from_hms_opt(16, 0, 0).expect("valid time"),
        };
        let json = serde_json::to_string(&result).expect("serialize");
        assert!(json.contains("confirmed_pending_payment"));
        let parsed: BookingResult = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, result);
    }
}
