//! Party package definitions.
//!
//! Packages are a fixed reference table defined at process start. Prices and
//! inclusions follow the park's published rate card; the day restriction on
//! the Glo Party is a hard operating constraint, not a preference.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of bookable party packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageKind {
    /// Entry-level package, no food included.
    Rookie,
    /// Rookie plus pizza.
    AllStar,
    /// All-Star plus arcade cards.
    Mvp,
    /// MVP plus glow lights and DJ atmosphere, Friday/Saturday only.
    GloParty,
}

impl PackageKind {
    /// Returns the canonical display name for this package.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Rookie => "Rookie",
            Self::AllStar => "All-Star",
            Self::Mvp => "MVP",
            Self::GloParty => "Glo Party",
        }
    }
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A bookable party package.
///
/// Immutable once constructed; the catalog hands out shared references and
/// is safe for unsynchronized concurrent reads.
#[derive(Debug, Clone, Serialize)]
pub struct PartyPackage {
    /// Which package this is.
    pub kind: PackageKind,
    /// Canonical display name.
    pub name: &'static str,
    /// Base price per jumper, in cents.
    pub per_jumper_cents: u32,
    /// Minimum number of jumpers required to book.
    pub min_jumpers: u32,
    /// Total party duration in hours.
    pub duration_hours: u32,
    /// What the package includes.
    pub includes: &'static [&'static str],
    /// What the package explicitly does not include.
    pub excludes: &'static [&'static str],
    /// Days the package can be booked, if restricted. `None` means any day.
    pub open_days: Option<&'static [Weekday]>,
    /// Free-form note shown alongside the package.
    pub notes: &'static str,
}

impl PartyPackage {
    /// Returns true if this package can be booked on the given weekday.
    #[must_use]
    pub fn bookable_on(&self, weekday: Weekday) -> bool {
        match self.open_days {
            Some(days) => days.contains(&weekday),
            None => true,
        }
    }

    /// Renders a human-readable summary of the package.
    ///
    /// Used verbatim as the `get_package_info` tool result so the model can
    /// present packages consistently.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = format!(
            "{} Package\nPrice: ${}.{:02} per jumper (minimum {} jumpers)\nParty time: {} hours\n\nIncludes:\n",
            self.name,
            self.per_jumper_cents / 100,
            self.per_jumper_cents % 100,
            self.min_jumpers,
            self.duration_hours,
        );
        for item in self.includes {
            out.push_str("  - ");
            out.push_str(item);
            out.push('\n');
        }
        if !self.excludes.is_empty() {
            out.push_str("\nNot included:\n");
            for item in self.excludes {
                out.push_str("  - ");
                out.push_str(item);
                out.push('\n');
            }
        }
        out.push_str("\nPrivate room upgrade: $5 per jumper\n");
        out.push_str("Note: ");
        out.push_str(self.notes);
        out.push('\n');
        if let Some(days) = self.open_days {
            let names: Vec<&str> = days.iter().map(|d| weekday_name(*d)).collect();
            out.push_str(&format!("Restriction: available {} only\n", names.join(" and ")));
        }
        out
    }
}

/// Full weekday name for user-facing text.
#[must_use]
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
