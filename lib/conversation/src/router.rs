//! Tool-call routing.
//!
//! The router is the only place tool identifiers are resolved and arguments
//! are validated. Every outcome, success or failure, becomes a structured
//! tool result appended to the conversation; a bad tool call never aborts
//! the session. Deterministic validation failures (unknown package, below
//! minimum, restricted day) are surfaced so the model can explain the
//! constraint in natural language.

use crate::error::RouterError;
use crate::message::{ToolCall, ToolResult};
use crate::tools::{DocumentSearch, ToolName};
use chrono::{NaiveDate, NaiveTime};
use party_line_booking::{
    AvailabilityError, AvailabilityGateway, AvailabilityQuery, BookingError, BookingGateway,
    BookingRequest, ConfirmationNotice, ContactInfo, NotificationSink,
};
use party_line_catalog::{PackageCatalog, PriceBreakdown, PricingError, PricingRequest, quote};
use serde_json::{Value as JsonValue, json};
use std::sync::Arc;

/// Routes model-issued tool calls onto deterministic operations.
pub struct ToolRouter {
    catalog: Arc<PackageCatalog>,
    availability: AvailabilityGateway,
    booking: BookingGateway,
    documents: Option<Arc<dyn DocumentSearch>>,
    notifications: Option<Arc<dyn NotificationSink>>,
}

impl ToolRouter {
    /// Creates a router over the catalog and gateways.
    #[must_use]
    pub fn new(
        catalog: Arc<PackageCatalog>,
        availability: AvailabilityGateway,
        booking: BookingGateway,
    ) -> Self {
        Self {
            catalog,
            availability,
            booking,
            documents: None,
            notifications: None,
        }
    }

    /// Attaches the document-search collaborator.
    #[must_use]
    pub fn with_document_search(mut self, documents: Arc<dyn DocumentSearch>) -> Self {
        self.documents = Some(documents);
        self
    }

    /// Attaches the confirmation-notification collaborator.
    #[must_use]
    pub fn with_notification_sink(mut self, notifications: Arc<dyn NotificationSink>) -> Self {
        self.notifications = Some(notifications);
        self
    }

    /// Executes one tool call and returns its structured result.
    pub async fn dispatch(&self, call: &ToolCall) -> ToolResult {
        let Some(tool) = ToolName::resolve(&call.name) else {
            let err = RouterError::UnknownTool {
                name: call.name.clone(),
            };
            return ToolResult::failure(&call.id, "unknown_tool", err.to_string());
        };

        match tool {
            ToolName::CheckAvailability => self.check_availability(call).await,
            ToolName::GetPackageInfo => self.package_info(call),
            ToolName::CalculatePrice => self.calculate_price(call),
            ToolName::CreateBooking => self.create_booking(call).await,
            ToolName::SearchDocuments => self.search_documents(call).await,
        }
    }

    fn package_info(&self, call: &ToolCall) -> ToolResult {
        let package_name = match require_str(&call.arguments, "package_name") {
            Ok(value) => value,
            Err(err) => return invalid_arguments(call, ToolName::GetPackageInfo, err),
        };
        match self.catalog.lookup(package_name) {
            Ok(package) => ToolResult::success(
                &call.id,
                json!({
                    "package": package,
                    "summary": package.summary(),
                }),
            ),
            Err(err) => ToolResult::failure(&call.id, "unknown_package", err.to_string()),
        }
    }

    fn calculate_price(&self, call: &ToolCall) -> ToolResult {
        let tool = ToolName::CalculatePrice;
        let package_name = match require_str(&call.arguments, "package_name") {
            Ok(value) => value,
            Err(err) => return invalid_arguments(call, tool, err),
        };
        let jumpers = match require_count(&call.arguments, "num_jumpers") {
            Ok(value) => value,
            Err(err) => return invalid_arguments(call, tool, err),
        };
        let private_room = match flag(&call.arguments, "private_room") {
            Ok(value) => value,
            Err(err) => return invalid_arguments(call, tool, err),
        };

        let package = match self.catalog.lookup(package_name) {
            Ok(package) => package,
            Err(err) => return ToolResult::failure(&call.id, "unknown_package", err.to_string()),
        };

        match quote(package, &PricingRequest { jumpers, private_room }) {
            Ok(breakdown) => ToolResult::success(
                &call.id,
                json!({
                    "package": package.name,
                    "num_jumpers": jumpers,
                    "private_room": private_room,
                    "base_cents": breakdown.base_cents,
                    "room_cents": breakdown.room_cents,
                    "total_cents": breakdown.total_cents,
                    "total": PriceBreakdown::format_cents(breakdown.total_cents),
                }),
            ),
            Err(err @ PricingError::BelowMinimum { .. }) => {
                ToolResult::failure(&call.id, "below_minimum", err.to_string())
            }
            Err(err @ PricingError::InvalidCount { .. }) => {
                ToolResult::failure(&call.id, "invalid_count", err.to_string())
            }
        }
    }

    async fn check_availability(&self, call: &ToolCall) -> ToolResult {
        let tool = ToolName::CheckAvailability;
        let package_name = match require_str(&call.arguments, "package_name") {
            Ok(value) => value,
            Err(err) => return invalid_arguments(call, tool, err),
        };
        let date = match require_date(&call.arguments) {
            Ok(value) => value,
            Err(err) => return invalid_arguments(call, tool, err),
        };
        let package = match self.catalog.lookup(package_name) {
            Ok(package) => package.clone(),
            Err(err) => return ToolResult::failure(&call.id, "unknown_package", err.to_string()),
        };

        match self.availability.check(&AvailabilityQuery { date, package }).await {
            Ok(report) => ToolResult::success(
                &call.id,
                json!({
                    "date": date.format("%Y-%m-%d").to_string(),
                    "origin": report.origin,
                    "slots": report
                        .slots
                        .iter()
                        .map(|slot| json!({
                            "start_time": slot.start_time.format("%H:%M").to_string(),
                            "remaining_capacity": slot.remaining_capacity,
                        }))
                        .collect::<Vec<_>>(),
                }),
            ),
            Err(err @ AvailabilityError::RestrictedDay { .. }) => {
                ToolResult::failure(&call.id, "restricted_day", err.to_string())
            }
            Err(err @ AvailabilityError::Credential(_)) => {
                ToolResult::failure(&call.id, "credential", err.to_string())
            }
        }
    }

    async fn create_booking(&self, call: &ToolCall) -> ToolResult {
        let tool = ToolName::CreateBooking;
        let args = &call.arguments;
        let package_name = match require_str(args, "package_name") {
            Ok(value) => value,
            Err(err) => return invalid_arguments(call, tool, err),
        };
        let jumpers = match require_count(args, "num_jumpers") {
            Ok(value) => value,
            Err(err) => return invalid_arguments(call, tool, err),
        };
        let date = match require_date(args) {
            Ok(value) => value,
            Err(err) => return invalid_arguments(call, tool, err),
        };
        let slot = match require_time(args, "time_slot") {
            Ok(value) => value,
            Err(err) => return invalid_arguments(call, tool, err),
        };
        let customer_name = match require_str(args, "customer_name") {
            Ok(value) => value.to_string(),
            Err(err) => return invalid_arguments(call, tool, err),
        };
        let customer_email = match require_str(args, "customer_email") {
            Ok(value) => value.to_string(),
            Err(err) => return invalid_arguments(call, tool, err),
        };
        let private_room = match flag(args, "private_room") {
            Ok(value) => value,
            Err(err) => return invalid_arguments(call, tool, err),
        };

        let package = match self.catalog.lookup(package_name) {
            Ok(package) => package,
            Err(err) => return ToolResult::failure(&call.id, "unknown_package", err.to_string()),
        };

        // Pricing is re-validated here so a booking can never commit to a
        // head count the pricing rules would reject.
        let breakdown = match quote(package, &PricingRequest { jumpers, private_room }) {
            Ok(breakdown) => breakdown,
            Err(err @ PricingError::BelowMinimum { .. }) => {
                return ToolResult::failure(&call.id, "below_minimum", err.to_string());
            }
            Err(err @ PricingError::InvalidCount { .. }) => {
                return ToolResult::failure(&call.id, "invalid_count", err.to_string());
            }
        };

        let contact = ContactInfo {
            name: customer_name,
            email: customer_email,
            phone: optional_str(args, "customer_phone"),
            birthday_child: optional_str(args, "birthday_child_name"),
        };
        let request = BookingRequest {
            package: package.kind,
            jumpers,
            date,
            slot,
            private_room,
            contact: contact.clone(),
            price: breakdown,
        };

        match self.booking.create(request).await {
            Ok(result) => {
                if let Some(sink) = &self.notifications {
                    let notice = ConfirmationNotice {
                        result: result.clone(),
                        contact,
                        package_name: package.name.to_string(),
                        private_room,
                        total_cents: breakdown.total_cents,
                    };
                    if let Err(err) = sink.deliver(notice).await {
                        tracing::warn!(
                            error = %err,
                            reservation_id = %result.reservation_id,
                            "booking confirmation notification failed"
                        );
                    }
                }
                ToolResult::success(
                    &call.id,
                    json!({
                        "reservation_id": result.reservation_id,
                        "checkout_url": result.checkout_url,
                        "status": result.status,
                        "package": result.package,
                        "num_jumpers": result.jumpers,
                        "total": PriceBreakdown::format_cents(breakdown.total_cents),
                    }),
                )
            }
            Err(err @ BookingError::Credential(_)) => {
                ToolResult::failure(&call.id, "credential", err.to_string())
            }
        }
    }

    async fn search_documents(&self, call: &ToolCall) -> ToolResult {
        let query = match require_str(&call.arguments, "query") {
            Ok(value) => value,
            Err(err) => return invalid_arguments(call, ToolName::SearchDocuments, err),
        };
        let Some(documents) = &self.documents else {
            return ToolResult::failure(
                &call.id,
                "search_unavailable",
                "document search is not available for this deployment",
            );
        };
        match documents.search(query).await {
            Ok(snippets) => ToolResult::success(&call.id, json!({ "snippets": snippets })),
            Err(err) => ToolResult::failure(&call.id, "search_failed", err.to_string()),
        }
    }
}

struct ArgError {
    field: &'static str,
    reason: String,
}

fn invalid_arguments(call: &ToolCall, tool: ToolName, err: ArgError) -> ToolResult {
    let router_err = RouterError::InvalidArguments {
        tool: tool.as_str().to_string(),
        field: err.field,
        reason: err.reason,
    };
    ToolResult::failure(&call.id, "invalid_arguments", router_err.to_string())
}

fn require_str<'a>(args: &'a JsonValue, field: &'static str) -> Result<&'a str, ArgError> {
    match args.get(field) {
        Some(JsonValue::String(value)) if !value.trim().is_empty() => Ok(value),
        Some(_) => Err(ArgError {
            field,
            reason: "expected a non-empty string".to_string(),
        }),
        None => Err(ArgError {
            field,
            reason: "missing".to_string(),
        }),
    }
}

fn optional_str(args: &JsonValue, field: &str) -> Option<String> {
    args.get(field)
        .and_then(JsonValue::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn require_count(args: &JsonValue, field: &'static str) -> Result<u32, ArgError> {
    match args.get(field) {
        Some(value) => value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or(ArgError {
                field,
                reason: "expected a non-negative integer".to_string(),
            }),
        None => Err(ArgError {
            field,
            reason: "missing".to_string(),
        }),
    }
}

fn flag(args: &JsonValue, field: &'static str) -> Result<bool, ArgError> {
    match args.get(field) {
        None | Some(JsonValue::Null) => Ok(false),
        Some(JsonValue::Bool(value)) => Ok(*value),
        Some(_) => Err(ArgError {
            field,
            reason: "expected a boolean".to_string(),
        }),
    }
}

fn require_date(args: &JsonValue) -> Result<NaiveDate, ArgError> {
    let raw = require_str(args, "date")?;
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| ArgError {
        field: "date",
        reason: format!("'{raw}' is not a YYYY-MM-DD date"),
    })
}

fn require_time(args: &JsonValue, field: &'static str) -> Result<NaiveTime, ArgError> {
    let raw = require_str(args, field)?;
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%I:%M %p"))
        .map_err(|_| ArgError {
            field,
            reason: format!("'{raw}' is not a recognizable time"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::tools::SearchSnippet;
    use async_trait::async_trait;
    use party_line_booking::{
        AvailabilitySlot, NotificationError, RemoteError, RemoteReservation, ReservationsApi,
    };
    use party_line_catalog::PackageKind;
    use tokio::sync::Mutex;

    struct StubApi {
        fail: bool,
    }

    #[async_trait]
    impl ReservationsApi for StubApi {
        async fn availability(
            &self,
            _date: NaiveDate,
            _package_name: &str,
        ) -> Result<Vec<AvailabilitySlot>, RemoteError> {
            if self.fail {
                return Err(RemoteError::Timeout);
            }
            Ok(vec![AvailabilitySlot {
                start_time: NaiveTime::from_hms_opt(16, 0, 0).expect("valid time"),
                remaining_capacity: 12,
            }])
        }

        async fn create_booking(
            &self,
            request: &BookingRequest,
        ) -> Result<RemoteReservation, RemoteError> {
            if self.fail {
                return Err(RemoteError::Timeout);
            }
            Ok(RemoteReservation {
                id: format!("res_{}", request.jumpers),
                checkout_url: "https://checkout.example/res".to_string(),
            })
        }

        async fn booking_status(&self, _reservation_id: &str) -> Result<String, RemoteError> {
            Ok("pending_payment".to_string())
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        notices: Mutex<Vec<ConfirmationNotice>>,
    }

    #[async_trait]
    impl NotificationSink for RecordingSink {
        async fn deliver(&self, notice: ConfirmationNotice) -> Result<(), NotificationError> {
            self.notices.lock().await.push(notice);
            Ok(())
        }
    }

    struct StubDocs;

    #[async_trait]
    impl DocumentSearch for StubDocs {
        async fn search(&self, query: &str) -> Result<Vec<SearchSnippet>, SearchError> {
            Ok(vec![SearchSnippet {
                source: "park-rules.pdf".to_string(),
                excerpt: format!("matched: {query}"),
            }])
        }
    }

    fn router(fail: bool) -> ToolRouter {
        let api = Arc::new(StubApi { fail });
        ToolRouter::new(
            Arc::new(PackageCatalog::new()),
            AvailabilityGateway::new(api.clone()),
            BookingGateway::new(api),
        )
    }

    fn call(name: &str, arguments: JsonValue) -> ToolCall {
        ToolCall::new("call_1", name, arguments)
    }

    // 2026-09-05 is a Saturday, 2026-09-02 a Wednesday.

    #[tokio::test]
    async fn unknown_tool_becomes_a_structured_result() {
        let result = router(false)
            .dispatch(&call("send_invoice", json!({})))
            .await;
        assert!(!result.is_success());
        assert_eq!(result.error_kind(), Some("unknown_tool"));
        assert_eq!(result.tool_call_id, "call_1");
    }

    #[tokio::test]
    async fn unknown_package_surfaces_not_drops() {
        let result = router(false)
            .dispatch(&call("get_package_info", json!({"package_name": "Platinum"})))
            .await;
        assert!(!result.is_success());
        assert_eq!(result.error_kind(), Some("unknown_package"));
        assert!(result.error.as_deref().unwrap_or("").contains("Platinum"));
    }

    #[tokio::test]
    async fn package_info_includes_the_summary() {
        let result = router(false)
            .dispatch(&call("get_package_info", json!({"package_name": "glo party"})))
            .await;
        assert!(result.is_success());
        let summary = result.result["summary"].as_str().expect("summary text");
        assert!(summary.contains("$40.00 per jumper"));
    }

    #[tokio::test]
    async fn calculate_price_itemizes() {
        let result = router(false)
            .dispatch(&call(
                "calculate_price",
                json!({"package_name": "MVP", "num_jumpers": 12, "private_room": true}),
            ))
            .await;
        assert!(result.is_success());
        assert_eq!(result.result["base_cents"], 42000);
        assert_eq!(result.result["room_cents"], 6000);
        assert_eq!(result.result["total_cents"], 48000);
        assert_eq!(result.result["total"], "$480.00");
    }

    #[tokio::test]
    async fn calculate_price_below_minimum() {
        let result = router(false)
            .dispatch(&call(
                "calculate_price",
                json!({"package_name": "Rookie", "num_jumpers": 6}),
            ))
            .await;
        assert_eq!(result.error_kind(), Some("below_minimum"));
    }

    #[tokio::test]
    async fn missing_argument_names_the_field() {
        let result = router(false)
            .dispatch(&call("calculate_price", json!({"package_name": "Rookie"})))
            .await;
        assert_eq!(result.error_kind(), Some("invalid_arguments"));
        assert!(result.error.as_deref().unwrap_or("").contains("num_jumpers"));
    }

    #[tokio::test]
    async fn malformed_argument_names_the_field() {
        let result = router(false)
            .dispatch(&call(
                "check_availability",
                json!({"package_name": "Rookie", "date": "next saturday"}),
            ))
            .await;
        assert_eq!(result.error_kind(), Some("invalid_arguments"));
        assert!(result.error.as_deref().unwrap_or("").contains("date"));
    }

    #[tokio::test]
    async fn restricted_day_surfaces_through_the_router() {
        let result = router(false)
            .dispatch(&call(
                "check_availability",
                json!({"package_name": "Glo Party", "date": "2026-09-02"}),
            ))
            .await;
        assert_eq!(result.error_kind(), Some("restricted_day"));
        assert!(
            result
                .error
                .as_deref()
                .unwrap_or("")
                .contains("Friday and Saturday")
        );
    }

    #[tokio::test]
    async fn pricing_and_day_restriction_are_independent_checks() {
        // Glo Party, 12 jumpers, private room, on a Wednesday: the quote
        // succeeds while the availability check rejects the day. Neither
        // check consults the other.
        let router = router(false);

        let quoted = router
            .dispatch(&call(
                "calculate_price",
                json!({"package_name": "Glo Party", "num_jumpers": 12, "private_room": true}),
            ))
            .await;
        assert!(quoted.is_success());
        assert_eq!(quoted.result["total_cents"], 54000);

        let checked = router
            .dispatch(&call(
                "check_availability",
                json!({"package_name": "Glo Party", "date": "2026-09-02"}),
            ))
            .await;
        assert_eq!(checked.error_kind(), Some("restricted_day"));
    }

    #[tokio::test]
    async fn availability_falls_back_to_mock_on_remote_failure() {
        let result = router(true)
            .dispatch(&call(
                "check_availability",
                json!({"package_name": "Rookie", "date": "2026-09-02"}),
            ))
            .await;
        assert!(result.is_success());
        assert_eq!(result.result["origin"], "mock");
        assert_eq!(result.result["slots"].as_array().expect("slots").len(), 3);
    }

    #[tokio::test]
    async fn availability_live_path() {
        let result = router(false)
            .dispatch(&call(
                "check_availability",
                json!({"package_name": "Glo Party", "date": "2026-09-05"}),
            ))
            .await;
        assert!(result.is_success());
        assert_eq!(result.result["origin"], "live");
        assert_eq!(result.result["slots"][0]["start_time"], "16:00");
    }

    #[tokio::test]
    async fn create_booking_round_trip_matches_the_request() {
        let sink = Arc::new(RecordingSink::default());
        let router = router(false).with_notification_sink(sink.clone());

        // Price first, then check, then book, the way a turn would.
        let quote_result = router
            .dispatch(&call(
                "calculate_price",
                json!({"package_name": "Glo Party", "num_jumpers": 12, "private_room": true}),
            ))
            .await;
        assert!(quote_result.is_success());

        let availability = router
            .dispatch(&call(
                "check_availability",
                json!({"package_name": "Glo Party", "date": "2026-09-05"}),
            ))
            .await;
        assert!(availability.is_success());
        let slot = availability.result["slots"][0]["start_time"]
            .as_str()
            .expect("slot time")
            .to_string();

        let booked = router
            .dispatch(&call(
                "create_booking",
                json!({
                    "package_name": "Glo Party",
                    "num_jumpers": 12,
                    "date": "2026-09-05",
                    "time_slot": slot,
                    "customer_name": "Jamie Park",
                    "customer_email": "jamie@example.com",
                    "private_room": true
                }),
            ))
            .await;
        assert!(booked.is_success());
        assert_eq!(booked.result["package"], "glo_party");
        assert_eq!(booked.result["num_jumpers"], 12);
        assert_eq!(booked.result["status"], "confirmed_pending_payment");
        assert_eq!(booked.result["total"], "$540.00");

        let notices = sink.notices.lock().await;
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].result.package, PackageKind::GloParty);
        assert_eq!(notices[0].contact.email, "jamie@example.com");
        assert_eq!(notices[0].total_cents, 54000);
    }

    #[tokio::test]
    async fn create_booking_requires_contact_email() {
        let result = router(false)
            .dispatch(&call(
                "create_booking",
                json!({
                    "package_name": "Rookie",
                    "num_jumpers": 10,
                    "date": "2026-09-05",
                    "time_slot": "14:00",
                    "customer_name": "Jamie Park"
                }),
            ))
            .await;
        assert_eq!(result.error_kind(), Some("invalid_arguments"));
        assert!(
            result
                .error
                .as_deref()
                .unwrap_or("")
                .contains("customer_email")
        );
    }

    #[tokio::test]
    async fn create_booking_accepts_twelve_hour_times() {
        let result = router(false)
            .dispatch(&call(
                "create_booking",
                json!({
                    "package_name": "Rookie",
                    "num_jumpers": 10,
                    "date": "2026-09-05",
                    "time_slot": "2:00 PM",
                    "customer_name": "Jamie Park",
                    "customer_email": "jamie@example.com"
                }),
            ))
            .await;
        assert!(result.is_success());
    }

    #[tokio::test]
    async fn create_booking_mock_fallback_still_confirms() {
        let result = router(true)
            .dispatch(&call(
                "create_booking",
                json!({
                    "package_name": "All-Star",
                    "num_jumpers": 10,
                    "date": "2026-09-05",
                    "time_slot": "16:00",
                    "customer_name": "Jamie Park",
                    "customer_email": "jamie@example.com"
                }),
            ))
            .await;
        assert!(result.is_success());
        assert_eq!(result.result["status"], "mock");
        assert!(
            result.result["reservation_id"]
                .as_str()
                .expect("reservation id")
                .starts_with("MOCK-")
        );
    }

    #[tokio::test]
    async fn search_documents_without_collaborator() {
        let result = router(false)
            .dispatch(&call("search_documents", json!({"query": "waivers"})))
            .await;
        assert_eq!(result.error_kind(), Some("search_unavailable"));
    }

    #[tokio::test]
    async fn search_documents_passes_through() {
        let router = router(false).with_document_search(Arc::new(StubDocs));
        let result = router
            .dispatch(&call("search_documents", json!({"query": "socks"})))
            .await;
        assert!(result.is_success());
        assert_eq!(
            result.result["snippets"][0]["excerpt"],
            "matched: socks"
        );
    }
}
