//! Summary command handler

use super::open_session;
use gwa_calc::config::Config;
use gwa_calc::core::metrics::{format_gwa, format_units};

/// Print every semester GWA followed by the cumulative figures
pub fn run(config: &Config) {
    let session = open_session(config);
    let structure = session.structure();

    println!("\n=== Semesters ===\n");
    for period in structure.periods() {
        if session.records().subjects(period).is_empty() {
            continue;
        }
        let included = if session.range().contains(structure, period) {
            ""
        } else {
            "  (outside range)"
        };
        println!(
            "  {:<28} GWA {:>5}  Units {:>5}{included}",
            structure.period_label(period),
            format_gwa(session.semester_gwa(period)),
            format_units(Some(session.semester_units(period)))
        );
    }

    let summary = session.summary();
    println!("\n=== Cumulative ({}) ===\n", session.range().label(structure));
    println!("  Cumulative GWA:   {}", format_gwa(summary.cumulative_gwa));
    println!("  Total Units:      {}", format_units(Some(summary.total_units)));
    println!("  Active Semesters: {}", summary.active_semesters);
}
