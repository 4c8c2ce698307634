//! Semester range selection for cumulative metrics
//!
//! A range is an inclusive span of periods compared by linear order. The
//! persisted form is either `all` or `sy-ssem-ey-esem` with 0-based indices.
//! Descriptors that cannot be read fall back to [`RangeFilter::All`].

use crate::core::models::{AcademicPeriod, AcademicStructure};
use std::fmt;
use std::str::FromStr;

/// Persisted descriptor for [`RangeFilter::All`]
pub const ALL_DESCRIPTOR: &str = "all";

/// Label of the "all periods" option
pub const ALL_LABEL: &str = "All Semesters";

/// Which periods feed the cumulative metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeFilter {
    /// Every period
    #[default]
    All,
    /// Periods whose linear order lies within `[start, end]`
    Range {
        /// First included period
        start: AcademicPeriod,
        /// Last included period
        end: AcademicPeriod,
    },
}

/// One selectable cumulative window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeOption {
    /// The filter this option selects
    pub filter: RangeFilter,
    /// Human-readable description
    pub label: String,
}

impl RangeFilter {
    /// Build a range between two periods
    #[must_use]
    pub const fn between(start: AcademicPeriod, end: AcademicPeriod) -> Self {
        Self::Range { start, end }
    }

    /// Whether `period` is part of the selection
    #[must_use]
    pub fn contains(&self, structure: &AcademicStructure, period: AcademicPeriod) -> bool {
        match self {
            Self::All => true,
            Self::Range { start, end } => {
                let value = structure.linear_order(period);
                value >= structure.linear_order(*start) && value <= structure.linear_order(*end)
            }
        }
    }

    /// Parse a persisted descriptor, failing open to [`RangeFilter::All`].
    #[must_use]
    pub fn parse_lenient(descriptor: &str) -> Self {
        descriptor.parse().unwrap_or_else(|e| {
            logger::warn!("Ignoring range filter '{descriptor}': {e}; using all semesters");
            Self::All
        })
    }

    /// Human-readable description of the selection
    #[must_use]
    pub fn label(&self, structure: &AcademicStructure) -> String {
        match self {
            Self::All => ALL_LABEL.to_string(),
            Self::Range { start, end } if *start == AcademicPeriod::first() => {
                window_label(structure, *end)
            }
            Self::Range { start, end } => format!(
                "{} {} to {} {}",
                structure.year_label(start.year),
                structure.semester_short_label(start.semester),
                structure.year_label(end.year),
                structure.semester_short_label(end.semester)
            ),
        }
    }
}

impl FromStr for RangeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_DESCRIPTOR) {
            return Ok(Self::All);
        }

        let parts: Vec<&str> = trimmed.split('-').collect();
        if parts.len() != 4 {
            return Err(format!("expected 4 parts, found {}", parts.len()));
        }

        let mut values = [0usize; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .trim()
                .parse()
                .map_err(|_| format!("'{part}' is not a period index"))?;
        }

        let [start_year, start_sem, end_year, end_sem] = values;
        Ok(Self::between(
            AcademicPeriod::new(start_year, start_sem),
            AcademicPeriod::new(end_year, end_sem),
        ))
    }
}

impl fmt::Display for RangeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_DESCRIPTOR),
            Self::Range { start, end } => write!(f, "{start}-{end}"),
        }
    }
}

/// Every cumulative window starting at the first period, in linear order.
///
/// The "all periods" choice is not included; front ends list it first.
#[must_use]
pub fn generate_range_options(structure: &AcademicStructure) -> Vec<RangeOption> {
    structure
        .periods()
        .map(|end| RangeOption {
            filter: RangeFilter::between(AcademicPeriod::first(), end),
            label: window_label(structure, end),
        })
        .collect()
}

/// Label for the window from the first period through `end`
fn window_label(structure: &AcademicStructure, end: AcademicPeriod) -> String {
    let first_year = structure.year_label(0);
    let last_semester = structure.semester_count().saturating_sub(1);

    if end == AcademicPeriod::first() {
        format!("{first_year} {} only", structure.semester_label(0))
    } else if end.year == 0 && end.semester == last_semester {
        let span = if structure.semester_count() == 2 {
            "Both Semesters"
        } else {
            "All Semesters"
        };
        format!("{first_year} ({span})")
    } else {
        format!(
            "{first_year} {} to {} {}",
            structure.semester_short_label(0),
            structure.year_label(end.year),
            structure.semester_short_label(end.semester)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(year: usize, semester: usize) -> AcademicPeriod {
        AcademicPeriod::new(year, semester)
    }

    #[test]
    fn test_all_contains_everything() {
        let structure = AcademicStructure::default();
        assert!(structure
            .periods()
            .all(|p| RangeFilter::All.contains(&structure, p)));
        assert!(RangeFilter::All.contains(&structure, period(9, 9)));
    }

    #[test]
    fn test_range_is_inclusive() {
        let structure = AcademicStructure::default();
        let range = RangeFilter::between(period(0, 0), period(1, 0));

        assert!(range.contains(&structure, period(0, 0)));
        assert!(range.contains(&structure, period(0, 1)));
        assert!(range.contains(&structure, period(1, 0)));
        assert!(!range.contains(&structure, period(1, 1)));
        assert!(!range.contains(&structure, period(3, 0)));
    }

    #[test]
    fn test_range_with_later_start() {
        let structure = AcademicStructure::default();
        let range = RangeFilter::between(period(1, 1), period(2, 1));

        assert!(!range.contains(&structure, period(1, 0)));
        assert!(range.contains(&structure, period(1, 1)));
        assert!(range.contains(&structure, period(2, 0)));
        assert!(range.contains(&structure, period(2, 1)));
        assert!(!range.contains(&structure, period(3, 0)));
    }

    #[test]
    fn test_huge_persisted_indices_do_not_overflow() {
        let structure = AcademicStructure::default();

        let huge_start = RangeFilter::parse_lenient(&format!("{}-0-0-0", usize::MAX));
        assert_eq!(huge_start, RangeFilter::between(period(usize::MAX, 0), period(0, 0)));
        assert!(structure.periods().all(|p| !huge_start.contains(&structure, p)));
        assert!(huge_start
            .label(&structure)
            .contains(&format!("Year {}", usize::MAX)));

        let huge_end = RangeFilter::parse_lenient(&format!("0-0-{}-1", usize::MAX));
        assert!(structure.periods().all(|p| huge_end.contains(&structure, p)));
        assert!(huge_end.contains(&structure, period(usize::MAX, usize::MAX)));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let structure = AcademicStructure::default();
        let range = RangeFilter::between(period(2, 0), period(1, 0));
        assert!(!structure.periods().any(|p| range.contains(&structure, p)));
    }

    #[test]
    fn test_contiguity() {
        let structure = AcademicStructure::default();
        for option in generate_range_options(&structure) {
            let included: Vec<usize> = structure
                .periods()
                .filter(|p| option.filter.contains(&structure, *p))
                .map(|p| structure.linear_order(p))
                .collect();
            let expected: Vec<usize> = (0..included.len()).collect();
            assert_eq!(included, expected, "gap in {}", option.label);
        }
    }

    #[test]
    fn test_parse_descriptors() {
        assert_eq!("all".parse::<RangeFilter>(), Ok(RangeFilter::All));
        assert_eq!(
            "0-0-1-0".parse::<RangeFilter>(),
            Ok(RangeFilter::between(period(0, 0), period(1, 0)))
        );
        assert!("0-0-1".parse::<RangeFilter>().is_err());
        assert!("0-0-1-0-1".parse::<RangeFilter>().is_err());
        assert!("a-b-c-d".parse::<RangeFilter>().is_err());
    }

    #[test]
    fn test_lenient_parse_fails_open() {
        assert_eq!(RangeFilter::parse_lenient("0-1"), RangeFilter::All);
        assert_eq!(RangeFilter::parse_lenient("x-0-1-1"), RangeFilter::All);
        assert_eq!(RangeFilter::parse_lenient(""), RangeFilter::All);
        assert_eq!(
            RangeFilter::parse_lenient("0-0-3-1"),
            RangeFilter::between(period(0, 0), period(3, 1))
        );
    }

    #[test]
    fn test_display_round_trip() {
        let range = RangeFilter::between(period(0, 0), period(2, 1));
        assert_eq!(range.to_string(), "0-0-2-1");
        assert_eq!(range.to_string().parse::<RangeFilter>(), Ok(range));
        assert_eq!(RangeFilter::All.to_string(), "all");
    }

    #[test]
    fn test_generated_options() {
        let structure = AcademicStructure::default();
        let options = generate_range_options(&structure);
        assert_eq!(options.len(), 8);

        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels[0], "1st Year 1st Semester only");
        assert_eq!(labels[1], "1st Year (Both Semesters)");
        assert_eq!(labels[2], "1st Year 1st Sem to 2nd Year 1st Sem");
        assert_eq!(labels[7], "1st Year 1st Sem to 4th Year 2nd Sem");

        assert_eq!(options[3].filter.to_string(), "0-0-1-1");
        assert!(options
            .iter()
            .all(|o| matches!(o.filter, RangeFilter::Range { start, .. } if start == AcademicPeriod::first())));
    }

    #[test]
    fn test_labels() {
        let structure = AcademicStructure::default();
        assert_eq!(RangeFilter::All.label(&structure), "All Semesters");
        assert_eq!(
            RangeFilter::between(period(1, 0), period(2, 1)).label(&structure),
            "2nd Year 1st Sem to 3rd Year 2nd Sem"
        );
    }
}
