//! Error types for the catalog crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `CatalogError`: Errors from package lookup
//! - `PricingError`: Errors from price computation
//!
//! Both are deterministic validation failures; the conversation layer
//! serializes them into tool results rather than dropping them.

use std::fmt;

/// Errors from package lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The requested package name is not in the catalog.
    UnknownPackage {
        name: String,
        available: Vec<String>,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPackage { name, available } => {
                write!(
                    f,
                    "unknown package '{name}', available packages: {}",
                    available.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Errors from price computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Jumper count is below the package minimum.
    BelowMinimum {
        package: String,
        minimum: u32,
        requested: u32,
    },
    /// Jumper count is not a positive number.
    InvalidCount { requested: u32 },
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BelowMinimum {
                package,
                minimum,
                requested,
            } => {
                write!(
                    f,
                    "minimum {minimum} jumpers required for the {package} package, got {requested}"
                )
            }
            Self::InvalidCount { requested } => {
                write!(f, "jumper count must be positive, got {requested}")
            }
        }
    }
}

impl std::error::Error for PricingError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_error_display() {
        let err = CatalogError::UnknownPackage {
            name: "Platinum".to_string(),
            available: vec!["Rookie".to_string(), "MVP".to_string()],
        };
        assert!(err.to_string().contains("Platinum"));
        assert!(err.to_string().contains("Rookie, MVP"));
    }

    #[test]
    fn pricing_error_display() {
        let err = PricingError::BelowMinimum {
            package: "Glo Party".to_string(),
            minimum: 10,
            requested: 6,
        };
        assert!(err.to_string().contains("minimum 10"));
        assert!(err.to_string().contains("got 6"));
    }
}
