//! Price computation for party bookings.
//!
//! Pricing is pure and deterministic: no I/O, no clock. Day-of-week
//! restrictions are deliberately not checked here; availability and pricing
//! are independent rules that each surface their own failures.

use crate::error::PricingError;
use crate::package::PartyPackage;
use serde::{Deserialize, Serialize};

/// Private room upgrade, flat per-jumper amount applied uniformly to every
/// package. Keep this uniform even if individual base rates change.
pub const PRIVATE_ROOM_PER_JUMPER_CENTS: u32 = 500;

/// A request to price a package selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRequest {
    /// Number of jumpers attending.
    pub jumpers: u32,
    /// Whether the private room upgrade is included.
    pub private_room: bool,
}

/// An itemized price for a package selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Base package subtotal in cents.
    pub base_cents: u32,
    /// Private room surcharge in cents (zero when not selected).
    pub room_cents: u32,
    /// Grand total in cents.
    pub total_cents: u32,
}

/// Computes the itemized price for a package selection.
///
/// Validation order, first failure wins:
/// 1. jumper count below the package minimum
/// 2. jumper count of zero
///
/// # Errors
///
/// Returns `PricingError::BelowMinimum` or `PricingError::InvalidCount`.
pub fn quote(
    package: &PartyPackage,
    request: &PricingRequest,
) -> Result<PriceBreakdown, PricingError> {
    if request.jumpers < package.min_jumpers {
        return Err(PricingError::BelowMinimum {
            package: package.name.to_string(),
            minimum: package.min_jumpers,
            requested: request.jumpers,
        });
    }
    if request.jumpers == 0 {
        return Err(PricingError::InvalidCount {
            requested: request.jumpers,
        });
    }

    let base_cents = package.per_jumper_cents * request.jumpers;
    let room_cents = if request.private_room {
        PRIVATE_ROOM_PER_JUMPER_CENTS * request.jumpers
    } else {
        0
    };

    Ok(PriceBreakdown {
        base_cents,
        room_cents,
        total_cents: base_cents + room_cents,
    })
}

impl PriceBreakdown {
    /// Renders a dollars-and-cents display string for a cent amount.
    #[must_use]
    pub fn format_cents(cents: u32) -> String {
        format!("${}.{:02}", cents / 100, cents % 100)
    }
}
