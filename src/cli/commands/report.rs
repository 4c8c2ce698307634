//! Report command handler
//!
//! Exports the GWA summary of the current session as Markdown, HTML or PDF.

use super::open_session;
use gwa_calc::config::Config;
use gwa_calc::core::metrics::{format_gwa, format_units};
use gwa_calc::core::report::{default_file_name, ExportError, ReportContext, ReportFormat};
use logger::{error, info};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Run the report command.
///
/// # Errors
/// Returns a user-facing message when the format is unknown, the student name
/// is missing, or the report cannot be written
pub fn run(
    output_file: Option<&Path>,
    format_str: &str,
    pdf_converter: Option<&str>,
    config: &Config,
) -> Result<(), String> {
    let format = ReportFormat::from_str(format_str)
        .map_err(|e| format!("✗ {e}. Use: markdown, html, or pdf"))?;

    let session = open_session(config);
    let today = chrono::Local::now().date_naive();

    let ctx = ReportContext::from_session(&session, today).map_err(|e| match e {
        ExportError::MissingStudentName => format!(
            "✗ {e}.\n  Set it with: gwacalc profile student \"<NAME>\""
        ),
        other => format!("✗ {other}"),
    })?;

    let output_path = resolve_output_path(output_file, config, &default_file_name(today, format))?;

    format
        .generator(pdf_converter)
        .generate(&ctx, &output_path)
        .map_err(|e| {
            error!("Report generation failed for {}: {e}", output_path.display());
            format!("✗ Failed to generate {format} report: {e}")
        })?;

    println!("✓ Report generated: {}", output_path.display());
    info!("Report exported to: {}", output_path.display());

    println!("\n=== Summary ===");
    println!("Student: {}", ctx.student_name);
    if let Some(school) = &ctx.school_name {
        println!("School: {school}");
    }
    println!("Range: {}", ctx.range_label);
    println!("Cumulative GWA: {}", format_gwa(ctx.summary.cumulative_gwa));
    println!("Total Units: {}", format_units(Some(ctx.summary.total_units)));
    println!("Semesters in report: {}", ctx.semesters.len());

    Ok(())
}

/// Explicit output path, or the default file name inside the reports directory
fn resolve_output_path(
    output_file: Option<&Path>,
    config: &Config,
    default_name: &str,
) -> Result<PathBuf, String> {
    let path = match output_file {
        Some(output) => output.to_path_buf(),
        None => config.reports_dir().join(default_name),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            format!("✗ Failed to create reports directory {}: {e}", parent.display())
        })?;
    }

    Ok(path)
}
