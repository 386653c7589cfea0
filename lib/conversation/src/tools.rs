//! The closed set of tools the model may call.
//!
//! Tool identifiers resolve to a tagged enum once, at the router boundary;
//! nothing deeper in the stack dispatches on strings.

use crate::error::SearchError;
use async_trait::async_trait;
use party_line_ai::ToolSpec;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// The tools available during a booking conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    /// Check open slots for a date and package.
    CheckAvailability,
    /// Describe a package.
    GetPackageInfo,
    /// Price a package selection.
    CalculatePrice,
    /// Create the reservation and get the checkout link.
    CreateBooking,
    /// Search uploaded documents (waivers, rules, FAQs).
    SearchDocuments,
}

impl ToolName {
    /// Returns the wire name of the tool.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CheckAvailability => "check_availability",
            Self::GetPackageInfo => "get_package_info",
            Self::CalculatePrice => "calculate_price",
            Self::CreateBooking => "create_booking",
            Self::SearchDocuments => "search_documents",
        }
    }

    /// Resolves a wire name to a tool, if it is one of ours.
    #[must_use]
    pub fn resolve(name: &str) -> Option<Self> {
        match name {
            "check_availability" => Some(Self::CheckAvailability),
            "get_package_info" => Some(Self::GetPackageInfo),
            "calculate_price" => Some(Self::CalculatePrice),
            "create_booking" => Some(Self::CreateBooking),
            "search_documents" => Some(Self::SearchDocuments),
            _ => None,
        }
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ranked snippet from the document-search collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSnippet {
    /// Which document the snippet came from.
    pub source: String,
    /// The matching text.
    pub excerpt: String,
}

/// Trait for the external document-search collaborator.
///
/// Invoked only as a tool pass-through; the core has no search logic.
#[async_trait]
pub trait DocumentSearch: Send + Sync {
    /// Searches uploaded documents for a free-text query.
    ///
    /// # Errors
    ///
    /// Returns an error if the search backend fails.
    async fn search(&self, query: &str) -> Result<Vec<SearchSnippet>, SearchError>;
}

/// Tool definitions sent to the model each turn.
#[must_use]
pub fn builtin_tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            ToolName::CheckAvailability.as_str(),
            "Check open party slots for a specific date and package. Always call this before \
             confirming any booking.",
        )
        .with_parameters(json!({
            "type": "object",
            "properties": {
                "package_name": {
                    "type": "string",
                    "description": "One of: Rookie, All-Star, MVP, Glo Party"
                },
                "date": {
                    "type": "string",
                    "description": "Date in YYYY-MM-DD format"
                }
            },
            "required": ["package_name", "date"]
        })),
        ToolSpec::new(
            ToolName::GetPackageInfo.as_str(),
            "Get detailed information about a party package.",
        )
        .with_parameters(json!({
            "type": "object",
            "properties": {
                "package_name": {
                    "type": "string",
                    "description": "One of: Rookie, All-Star, MVP, Glo Party"
                }
            },
            "required": ["package_name"]
        })),
        ToolSpec::new(
            ToolName::CalculatePrice.as_str(),
            "Calculate the total price for a party booking, itemized.",
        )
        .with_parameters(json!({
            "type": "object",
            "properties": {
                "package_name": {
                    "type": "string",
                    "description": "One of: Rookie, All-Star, MVP, Glo Party"
                },
                "num_jumpers": {
                    "type": "integer",
                    "description": "Number of jumpers (minimum 10)"
                },
                "private_room": {
                    "type": "boolean",
                    "description": "Include the private room upgrade ($5 per jumper)"
                }
            },
            "required": ["package_name", "num_jumpers"]
        })),
        ToolSpec::new(
            ToolName::CreateBooking.as_str(),
            "Create the party booking and get the payment checkout link. Only call this after \
             the user has explicitly confirmed they want to book.",
        )
        .with_parameters(json!({
            "type": "object",
            "properties": {
                "package_name": {
                    "type": "string",
                    "description": "One of: Rookie, All-Star, MVP, Glo Party"
                },
                "num_jumpers": { "type": "integer" },
                "date": {
                    "type": "string",
                    "description": "Date in YYYY-MM-DD format"
                },
                "time_slot": {
                    "type": "string",
                    "description": "Slot start time, e.g. 14:00 or 2:00 PM"
                },
                "customer_name": { "type": "string" },
                "customer_email": { "type": "string" },
                "customer_phone": { "type": "string" },
                "birthday_child_name": { "type": "string" },
                "private_room": { "type": "boolean" }
            },
            "required": [
                "package_name",
                "num_jumpers",
                "date",
                "time_slot",
                "customer_name",
                "customer_email"
            ]
        })),
        ToolSpec::new(
            ToolName::SearchDocuments.as_str(),
            "Search uploaded documents (waivers, park rules, FAQs) for information.",
        )
        .with_parameters(json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The question or search query"
                }
            },
            "required": ["query"]
        })),
    ]
}
