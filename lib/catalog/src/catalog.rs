//! The package catalog.
//!
//! A read-only reference table of the four bookable packages. `list` always
//! presents packages in ascending price order so the assistant offers choices
//! deterministically regardless of how the table is defined.

use crate::error::CatalogError;
use crate::package::{PackageKind, PartyPackage};
use chrono::Weekday;

/// Days the Glo Party can run.
const GLO_PARTY_DAYS: &[Weekday] = &[Weekday::Fri, Weekday::Sat];

/// The fixed catalog of party packages.
#[derive(Debug, Clone)]
pub struct PackageCatalog {
    packages: Vec<PartyPackage>,
}

impl PackageCatalog {
    /// Builds the catalog.
    #[must_use]
    pub fn new() -> Self {
        let mut packages = vec![
            PartyPackage {
                kind: PackageKind::Rookie,
                name: "Rookie",
                per_jumper_cents: 2500,
                min_jumpers: 10,
                duration_hours: 2,
                includes: &[
                    "Jump time",
                    "Table time",
                    "Party host",
                    "Setup and cleanup",
                    "Plates, napkins, utensils, tablecloth",
                    "Altitude grip socks",
                ],
                excludes: &["Pizza", "Soda", "Arcade cards", "Birthday gift", "Free return pass"],
                open_days: None,
                notes: "Basic package with no food, drinks, or extras included",
            },
            PartyPackage {
                kind: PackageKind::AllStar,
                name: "All-Star",
                per_jumper_cents: 3000,
                min_jumpers: 10,
                duration_hours: 2,
                includes: &["Everything in Rookie", "Large pizza per 5 jumpers"],
                excludes: &[],
                open_days: None,
                notes: "Includes pizza for everyone",
            },
            PartyPackage {
                kind: PackageKind::Mvp,
                name: "MVP",
                per_jumper_cents: 3500,
                min_jumpers: 10,
                duration_hours: 2,
                includes: &["Everything in All-Star", "Arcade card per jumper"],
                excludes: &[],
                open_days: None,
                notes: "Includes arcade cards for all jumpers",
            },
            PartyPackage {
                kind: PackageKind::GloParty,
                name: "Glo Party",
                per_jumper_cents: 4000,
                min_jumpers: 10,
                duration_hours: 3,
                includes: &[
                    "Everything in MVP",
                    "Gift for birthday child",
                    "Glow lights and DJ atmosphere",
                ],
                excludes: &[],
                open_days: Some(GLO_PARTY_DAYS),
                notes: "Friday and Saturday nights only, 3 hours total party time",
            },
        ];
        // Present cheapest-first no matter how the table above is ordered.
        packages.sort_by_key(|p| p.per_jumper_cents);
        Self { packages }
    }

    /// Looks up a package by display name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownPackage` if the name is not one of the
    /// four catalog entries.
    pub fn lookup(&self, name: &str) -> Result<&PartyPackage, CatalogError> {
        let trimmed = name.trim();
        self.packages
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CatalogError::UnknownPackage {
                name: name.to_string(),
                available: self.packages.iter().map(|p| p.name.to_string()).collect(),
            })
    }

    /// Returns the package for a kind. Infallible: every kind is in the table.
    #[must_use]
    pub fn get(&self, kind: PackageKind) -> &PartyPackage {
        self.packages
            .iter()
            .find(|p| p.kind == kind)
            .expect("every package kind is in the catalog")
    }

    /// Returns all packages in ascending price order.
    #[must_use]
    pub fn list(&self) -> &[PartyPackage] {
        &self.packages
    }
}

impl Default for PackageCatalog {
    fn default() -> Self {
        Self::new()
    }
}
