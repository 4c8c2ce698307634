//! Semester and cumulative GWA metrics
//!
//! GWA is the units-weighted mean `Σ(grade × units) / Σ(units)` over countable
//! subjects. Every average returns `None` instead of dividing by zero.

use crate::core::models::{AcademicPeriod, AcademicStructure, RecordStore, SubjectEntry};
use crate::core::range_filter::RangeFilter;
use crate::core::validation::{has_positive_units, is_active_subject, GradingBounds};

/// Cumulative figures under one range selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryMetrics {
    /// Cumulative GWA over in-range countable subjects
    pub cumulative_gwa: Option<f64>,
    /// Sum of positive units over in-range subjects (grade not required)
    pub total_units: f64,
    /// In-range periods with at least one active subject
    pub active_semesters: usize,
}

/// Running weighted sum of grade points
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct WeightedSum {
    points: f64,
    units: f64,
}

impl WeightedSum {
    fn add_countable<'a>(
        &mut self,
        subjects: impl IntoIterator<Item = &'a SubjectEntry>,
        bounds: &GradingBounds,
    ) {
        for subject in subjects {
            if !bounds.is_countable(subject) {
                continue;
            }
            if let (Some(grade), Some(units)) = (subject.grade_value(), subject.units_value()) {
                self.points += grade * units;
                self.units += units;
            }
        }
    }

    fn average(self) -> Option<f64> {
        if self.units > 0.0 {
            Some(self.points / self.units)
        } else {
            None
        }
    }
}

/// GWA of one period, `None` when it has no countable units
#[must_use]
pub fn semester_gwa(
    records: &RecordStore,
    bounds: &GradingBounds,
    period: AcademicPeriod,
) -> Option<f64> {
    let mut sum = WeightedSum::default();
    sum.add_countable(records.subjects(period), bounds);
    sum.average()
}

/// Units of the countable subjects of one period
#[must_use]
pub fn semester_units(records: &RecordStore, bounds: &GradingBounds, period: AcademicPeriod) -> f64 {
    let mut sum = WeightedSum::default();
    sum.add_countable(records.subjects(period), bounds);
    sum.units
}

/// Σ(grade × units) over the countable subjects of one period
#[must_use]
pub fn semester_grade_points(
    records: &RecordStore,
    bounds: &GradingBounds,
    period: AcademicPeriod,
) -> f64 {
    let mut sum = WeightedSum::default();
    sum.add_countable(records.subjects(period), bounds);
    sum.points
}

/// GWA pooled over every touched period the filter includes
#[must_use]
pub fn cumulative_gwa(
    records: &RecordStore,
    structure: &AcademicStructure,
    bounds: &GradingBounds,
    filter: &RangeFilter,
) -> Option<f64> {
    let mut sum = WeightedSum::default();
    for (_, subjects) in in_range(records, structure, filter) {
        sum.add_countable(subjects, bounds);
    }
    sum.average()
}

/// Sum of units over in-range subjects whose units are positive.
///
/// Grade validity is not required, so a subject with units but no grade counts.
#[must_use]
pub fn total_units(records: &RecordStore, structure: &AcademicStructure, filter: &RangeFilter) -> f64 {
    in_range(records, structure, filter)
        .flat_map(|(_, subjects)| subjects)
        .filter(|subject| has_positive_units(subject))
        .filter_map(SubjectEntry::units_value)
        .sum()
}

/// Number of in-range periods with at least one subject whose grade parses and
/// whose units are positive. Grade bounds are not applied.
#[must_use]
pub fn active_semester_count(
    records: &RecordStore,
    structure: &AcademicStructure,
    filter: &RangeFilter,
) -> usize {
    in_range(records, structure, filter)
        .filter(|(_, subjects)| subjects.iter().any(is_active_subject))
        .count()
}

/// Compute all cumulative figures for the current selection
#[must_use]
pub fn compute_summary(
    records: &RecordStore,
    structure: &AcademicStructure,
    bounds: &GradingBounds,
    filter: &RangeFilter,
) -> SummaryMetrics {
    SummaryMetrics {
        cumulative_gwa: cumulative_gwa(records, structure, bounds, filter),
        total_units: total_units(records, structure, filter),
        active_semesters: active_semester_count(records, structure, filter),
    }
}

/// Touched periods selected by the filter
fn in_range<'a>(
    records: &'a RecordStore,
    structure: &'a AcademicStructure,
    filter: &'a RangeFilter,
) -> impl Iterator<Item = (AcademicPeriod, &'a [SubjectEntry])> + 'a {
    records
        .periods()
        .filter(move |(period, _)| filter.contains(structure, *period))
}

/// Render a GWA with two decimals; no value renders as `0.00`
#[must_use]
pub fn format_gwa(gwa: Option<f64>) -> String {
    match gwa {
        Some(value) if value.is_finite() => format!("{value:.2}"),
        _ => "0.00".to_string(),
    }
}

/// Render units rounded to one decimal, dropping a trailing `.0`; no value renders as `0`
#[must_use]
pub fn format_units(units: Option<f64>) -> String {
    match units {
        Some(value) if value.is_finite() => {
            let rounded = (value * 10.0).round() / 10.0;
            format!("{rounded}")
        }
        _ => "0".to_string(),
    }
}

/// Render a subject's grade × units with two decimals, `0.00` when not computable
#[must_use]
pub fn format_grade_units(subject: &SubjectEntry) -> String {
    format_gwa(subject.grade_units())
}
