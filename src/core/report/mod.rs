//! Report generation for GWA summaries
//!
//! A [`ReportContext`] is a fully computed snapshot of the session under its
//! current range filter. Format-specific generators turn it into Markdown,
//! HTML or PDF.

pub mod formats;

use crate::core::metrics::{self, format_gwa, format_units, SummaryMetrics};
use crate::core::models::{AcademicPeriod, SubjectEntry};
use crate::core::session::GwaSession;
use crate::core::storage::KeyValueStore;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub use formats::{HtmlReporter, MarkdownReporter, PdfReporter, ReportFormat};

/// Report title
pub const REPORT_TITLE: &str = "Cumulative GWA Summary Report";

/// Closing line of every report
pub const REPORT_FOOTER: &str =
    "This report was generated using the Cumulative GWA Calculator System.";

/// Errors raised while exporting a report
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Export requires a student name
    #[error("Please enter the student name before exporting the report")]
    MissingStudentName,

    /// Template rendering failed
    #[error("failed to render report: {0}")]
    Render(#[from] askama::Error),

    /// Writing the output failed
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// Output path
        path: PathBuf,
        /// Original error
        #[source]
        source: std::io::Error,
    },

    /// HTML to PDF conversion failed
    #[error("PDF conversion failed: {0}")]
    Pdf(String),
}

/// One subject row, already formatted for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectRow {
    /// Subject name or `-`
    pub name: String,
    /// Grade to two decimals or `-`
    pub grade: String,
    /// Units to one decimal or `-`
    pub units: String,
    /// Grade × units to two decimals or `-`
    pub grade_units: String,
}

impl SubjectRow {
    fn from_entry(entry: &SubjectEntry) -> Self {
        let grade = entry.grade_value().filter(|g| *g > 0.0);
        let units = entry.units_value().filter(|u| *u > 0.0);
        let dash = || "-".to_string();

        Self {
            name: if entry.name.trim().is_empty() {
                dash()
            } else {
                entry.name.clone()
            },
            grade: grade.map_or_else(dash, |g| format!("{g:.2}")),
            units: units.map_or_else(dash, |u| format!("{u:.1}")),
            grade_units: grade
                .zip(units)
                .map_or_else(dash, |(g, u)| format!("{:.2}", g * u)),
        }
    }
}

/// One in-range period with at least one countable subject
#[derive(Debug, Clone, PartialEq)]
pub struct SemesterReport {
    /// Period this section describes
    pub period: AcademicPeriod,
    /// "Year - Semester" heading
    pub label: String,
    /// Countable subjects in entry order
    pub rows: Vec<SubjectRow>,
    /// Semester GWA
    pub gwa: Option<f64>,
    /// Units of the countable subjects
    pub units: f64,
    /// Σ(grade × units) of the countable subjects
    pub grade_points: f64,
}

impl SemesterReport {
    /// Semester GWA as displayed
    #[must_use]
    pub fn gwa_text(&self) -> String {
        format_gwa(self.gwa)
    }

    /// Semester units to one decimal
    #[must_use]
    pub fn units_text(&self) -> String {
        format!("{:.1}", self.units)
    }

    /// Semester grade points to two decimals
    #[must_use]
    pub fn grade_points_text(&self) -> String {
        format!("{:.2}", self.grade_points)
    }
}

/// Everything a report shows, computed once
#[derive(Debug, Clone, PartialEq)]
pub struct ReportContext {
    /// Student name (non-blank)
    pub student_name: String,
    /// School name, when given
    pub school_name: Option<String>,
    /// Date printed in the header
    pub generated_on: NaiveDate,
    /// Description of the range filter
    pub range_label: String,
    /// Cumulative figures under the range filter
    pub summary: SummaryMetrics,
    /// Semester sections in linear order
    pub semesters: Vec<SemesterReport>,
}

impl ReportContext {
    /// Snapshot `session` for a report dated `generated_on`
    ///
    /// # Errors
    /// Returns [`ExportError::MissingStudentName`] when the student name is blank
    pub fn from_session<S: KeyValueStore>(
        session: &GwaSession<S>,
        generated_on: NaiveDate,
    ) -> Result<Self, ExportError> {
        if !session.can_export() {
            return Err(ExportError::MissingStudentName);
        }

        let structure = session.structure();
        let bounds = session.bounds();
        let records = session.records();
        let range = session.range();

        let semesters = structure
            .periods()
            .filter(|period| range.contains(structure, *period))
            .filter_map(|period| {
                let rows: Vec<SubjectRow> = records
                    .subjects(period)
                    .iter()
                    .filter(|s| bounds.is_countable(s))
                    .map(SubjectRow::from_entry)
                    .collect();
                (!rows.is_empty()).then(|| SemesterReport {
                    period,
                    label: structure.period_label(period),
                    rows,
                    gwa: metrics::semester_gwa(records, bounds, period),
                    units: metrics::semester_units(records, bounds, period),
                    grade_points: metrics::semester_grade_points(records, bounds, period),
                })
            })
            .collect();

        let school = session.school_name().trim();

        Ok(Self {
            student_name: session.student_name().trim().to_string(),
            school_name: (!school.is_empty()).then(|| school.to_string()),
            generated_on,
            range_label: range.label(structure),
            summary: session.summary(),
            semesters,
        })
    }

    /// Header date, e.g. "March 5, 2025"
    #[must_use]
    pub fn generated_on_text(&self) -> String {
        self.generated_on.format("%B %-d, %Y").to_string()
    }

    /// Cumulative GWA as displayed
    #[must_use]
    pub fn cumulative_gwa_text(&self) -> String {
        format_gwa(self.summary.cumulative_gwa)
    }

    /// Total units as displayed
    #[must_use]
    pub fn total_units_text(&self) -> String {
        format_units(Some(self.summary.total_units))
    }
}

/// Default output file name: `GWA_Report_<YYYY-MM-DD>.<ext>`
#[must_use]
pub fn default_file_name(date: NaiveDate, format: ReportFormat) -> String {
    format!(
        "GWA_Report_{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), ExportError>;

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, ExportError>;
}

/// Write rendered content to `path`
pub(crate) fn write_report(path: &Path, content: &str) -> Result<(), ExportError> {
    std::fs::write(path, content).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
