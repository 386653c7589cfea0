//! Party package catalog and pricing rules for the party-line platform.
//!
//! This crate provides:
//!
//! - **Package catalog**: The fixed table of bookable party packages
//! - **Pricing engine**: Deterministic price computation with add-ons
//!
//! Both are pure and perform no I/O; the conversation layer surfaces their
//! validation failures to the model as structured tool results.

pub mod catalog;
pub mod error;
pub mod package;
pub mod pricing;

pub use catalog::PackageCatalog;
pub use error::{CatalogError, PricingError};
pub use package::{PackageKind, PartyPackage};
pub use pricing::{PriceBreakdown, PricingRequest, quote, PRIVATE_ROOM_PER_JUMPER_CENTS};
