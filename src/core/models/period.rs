//! Academic period and structure models

use serde::{Deserialize, Serialize};
use std::fmt;

/// A (year, semester) pair, both 0-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AcademicPeriod {
    /// Year index (0 = first year)
    pub year: usize,
    /// Semester index within the year (0 = first semester)
    pub semester: usize,
}

impl AcademicPeriod {
    /// Create a new period
    #[must_use]
    pub const fn new(year: usize, semester: usize) -> Self {
        Self { year, semester }
    }

    /// The first period of any structure
    #[must_use]
    pub const fn first() -> Self {
        Self::new(0, 0)
    }
}

impl fmt::Display for AcademicPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.semester)
    }
}

/// The fixed ordered year and semester labels of a program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicStructure {
    /// Year labels in order (e.g., "1st Year")
    pub years: Vec<String>,
    /// Semester labels in order (e.g., "1st Semester")
    pub semesters: Vec<String>,
}

impl Default for AcademicStructure {
    fn default() -> Self {
        Self::new(
            &["1st Year", "2nd Year", "3rd Year", "4th Year"],
            &["1st Semester", "2nd Semester"],
        )
    }
}

impl AcademicStructure {
    /// Create a structure from year and semester labels
    #[must_use]
    pub fn new(years: &[&str], semesters: &[&str]) -> Self {
        Self {
            years: years.iter().map(ToString::to_string).collect(),
            semesters: semesters.iter().map(ToString::to_string).collect(),
        }
    }

    /// Number of years
    #[must_use]
    pub fn year_count(&self) -> usize {
        self.years.len()
    }

    /// Number of semesters per year
    #[must_use]
    pub fn semester_count(&self) -> usize {
        self.semesters.len()
    }

    /// Linear order value of a period: `year * semester_count + semester`.
    ///
    /// Saturates at `usize::MAX`, so indices read back from a damaged file
    /// still order after every real period.
    #[must_use]
    pub fn linear_order(&self, period: AcademicPeriod) -> usize {
        period
            .year
            .saturating_mul(self.semester_count())
            .saturating_add(period.semester)
    }

    /// Inverse of [`linear_order`](Self::linear_order) for in-structure values
    #[must_use]
    pub fn period_at(&self, order: usize) -> Option<AcademicPeriod> {
        let per_year = self.semester_count();
        if per_year == 0 {
            return None;
        }
        let period = AcademicPeriod::new(order / per_year, order % per_year);
        self.contains(period).then_some(period)
    }

    /// Whether the period lies inside the configured years and semesters
    #[must_use]
    pub fn contains(&self, period: AcademicPeriod) -> bool {
        period.year < self.year_count() && period.semester < self.semester_count()
    }

    /// All periods in linear order
    pub fn periods(&self) -> impl Iterator<Item = AcademicPeriod> + '_ {
        (0..self.year_count()).flat_map(move |year| {
            (0..self.semester_count()).map(move |semester| AcademicPeriod::new(year, semester))
        })
    }

    /// Label for a year index, with a numeric fallback outside the structure
    #[must_use]
    pub fn year_label(&self, year: usize) -> String {
        self.years
            .get(year)
            .cloned()
            .unwrap_or_else(|| format!("Year {}", year.saturating_add(1)))
    }

    /// Label for a semester index, with a numeric fallback outside the structure
    #[must_use]
    pub fn semester_label(&self, semester: usize) -> String {
        self.semesters
            .get(semester)
            .cloned()
            .unwrap_or_else(|| format!("Semester {}", semester.saturating_add(1)))
    }

    /// Abbreviated semester label ("1st Semester" -> "1st Sem")
    #[must_use]
    pub fn semester_short_label(&self, semester: usize) -> String {
        self.semester_label(semester).replace("Semester", "Sem")
    }

    /// Full label for a period (e.g., "2nd Year - 1st Semester")
    #[must_use]
    pub fn period_label(&self, period: AcademicPeriod) -> String {
        format!(
            "{} - {}",
            self.year_label(period.year),
            self.semester_label(period.semester)
        )
    }
}
