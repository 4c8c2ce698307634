//! Subject validation predicates
//!
//! Three distinct notions of a "usable" subject coexist and are kept separate:
//! - [`GradingBounds::is_countable`]: grade within bounds and units > 0, used for GWA.
//! - [`has_positive_units`]: units > 0 regardless of grade, used for total units.
//! - [`is_active_subject`]: grade parses and units > 0, grade bounds ignored,
//!   used for the active semester count.

use crate::core::models::{parse_number, SubjectEntry};
use serde::{Deserialize, Serialize};

/// Default lowest accepted grade
pub const DEFAULT_MIN_GRADE: f64 = 0.0;
/// Default highest accepted grade
pub const DEFAULT_MAX_GRADE: f64 = 5.0;
/// Default lowest accepted units in the editor
pub const DEFAULT_MIN_UNITS: f64 = 0.1;
/// Default highest accepted units in the editor
pub const DEFAULT_MAX_UNITS: f64 = 10.0;

/// Inclusive grade and units bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradingBounds {
    /// Lowest valid grade
    pub min_grade: f64,
    /// Highest valid grade
    pub max_grade: f64,
    /// Lowest units accepted by the editor
    pub min_units: f64,
    /// Highest units accepted by the editor
    pub max_units: f64,
}

impl Default for GradingBounds {
    fn default() -> Self {
        Self {
            min_grade: DEFAULT_MIN_GRADE,
            max_grade: DEFAULT_MAX_GRADE,
            min_units: DEFAULT_MIN_UNITS,
            max_units: DEFAULT_MAX_UNITS,
        }
    }
}

impl GradingBounds {
    /// Whether `raw` parses to a grade within `[min_grade, max_grade]`
    #[must_use]
    pub fn is_valid_grade(&self, raw: &str) -> bool {
        parse_number(raw).is_some_and(|g| self.grade_in_bounds(g))
    }

    /// Whether `raw` parses to units within `[min_units, max_units]`
    #[must_use]
    pub fn is_valid_units(&self, raw: &str) -> bool {
        parse_number(raw).is_some_and(|u| u >= self.min_units && u <= self.max_units)
    }

    /// Whether the entry counts toward GWA.
    ///
    /// Only positivity is required of the units here; the editor's units upper
    /// bound is not applied.
    #[must_use]
    pub fn is_countable(&self, entry: &SubjectEntry) -> bool {
        entry.grade_value().is_some_and(|g| self.grade_in_bounds(g)) && has_positive_units(entry)
    }

    fn grade_in_bounds(&self, grade: f64) -> bool {
        grade >= self.min_grade && grade <= self.max_grade
    }
}

/// Whether name, grade and units are all blank or whitespace-only
#[must_use]
pub fn is_empty_subject(entry: &SubjectEntry) -> bool {
    entry.name.trim().is_empty() && entry.grade.trim().is_empty() && entry.units.trim().is_empty()
}

/// Whether the units parse to a positive number (grade not considered)
#[must_use]
pub fn has_positive_units(entry: &SubjectEntry) -> bool {
    entry.units_value().is_some_and(|u| u > 0.0)
}

/// Whether the grade parses and the units parse to a positive number
#[must_use]
pub fn is_active_subject(entry: &SubjectEntry) -> bool {
    entry.grade_value().is_some() && has_positive_units(entry)
}
