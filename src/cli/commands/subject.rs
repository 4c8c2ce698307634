//! Subject command handler

use super::open_session;
use crate::args::SubjectSubcommand;
use gwa_calc::config::Config;
use gwa_calc::core::metrics::{format_gwa, format_grade_units, format_units};
use gwa_calc::core::storage::KeyValueStore;
use gwa_calc::models::{AcademicPeriod, SubjectEntry, SubjectField};
use gwa_calc::GwaSession;

/// Dispatch subject subcommands
///
/// # Errors
/// Returns a user-facing message when the period, subject or value is rejected
pub fn run(subcommand: SubjectSubcommand, config: &Config) -> Result<(), String> {
    let mut session = open_session(config);

    match subcommand {
        SubjectSubcommand::Add { period } => {
            let period = period.period();
            let index = session.add_subject(period).map_err(|e| format!("✗ {e}"))?;
            println!(
                "✓ Added subject #{} to {}",
                index + 1,
                session.structure().period_label(period)
            );
        }
        SubjectSubcommand::Remove { period, index } => {
            let period = period.period();
            let label = session.structure().period_label(period);
            match session.remove_subject(period, usize::from(index) - 1) {
                Some(removed) => println!("✓ Removed {} from {label}", display_name(&removed)),
                None => println!("No subject #{index} in {label}; nothing removed"),
            }
        }
        SubjectSubcommand::Set {
            period,
            index,
            field,
            value,
        } => {
            let field = SubjectField::from(field);
            session
                .edit_field(period.period(), usize::from(index) - 1, field, &value)
                .map_err(|e| format!("✗ {e}"))?;
            println!("✓ Set {field} of subject #{index} to '{value}'");
        }
        SubjectSubcommand::List { year, semester } => match year.zip(semester) {
            Some((year, semester)) => {
                let period =
                    AcademicPeriod::new(usize::from(year) - 1, usize::from(semester) - 1);
                if !session.structure().contains(period) {
                    return Err(format!("✗ No such semester: year {year}, semester {semester}"));
                }
                print_semester(&session, period);
            }
            None => {
                let touched: Vec<AcademicPeriod> = session
                    .structure()
                    .periods()
                    .filter(|p| !session.records().subjects(*p).is_empty())
                    .collect();
                if touched.is_empty() {
                    println!("No subjects yet. Add one with `gwacalc subject add --year 1 --semester 1`.");
                }
                for period in touched {
                    print_semester(&session, period);
                }
            }
        },
    }

    Ok(())
}

fn display_name(entry: &SubjectEntry) -> String {
    if entry.name.trim().is_empty() {
        "unnamed subject".to_string()
    } else {
        format!("'{}'", entry.name)
    }
}

/// Print one semester as a table followed by its GWA line
fn print_semester<S: KeyValueStore>(session: &GwaSession<S>, period: AcademicPeriod) {
    let subjects = session.records().subjects(period);
    println!("\n=== {} ===", session.structure().period_label(period));

    if subjects.is_empty() {
        println!("  (no subjects)");
        return;
    }

    let name_width = subjects
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Subject".len());

    println!(
        "  {:>3}  {:<name_width$}  {:>6}  {:>6}  {:>12}",
        "#", "Subject", "Grade", "Units", "Grade×Units"
    );
    for (i, subject) in subjects.iter().enumerate() {
        let marker = if session.bounds().is_countable(subject) {
            ' '
        } else {
            '*'
        };
        println!(
            "  {:>3}{marker} {:<name_width$}  {:>6}  {:>6}  {:>12}",
            i + 1,
            subject.name,
            subject.grade,
            subject.units,
            format_grade_units(subject)
        );
    }

    println!(
        "  Semester GWA: {}   Units: {}",
        format_gwa(session.semester_gwa(period)),
        format_units(Some(session.semester_units(period)))
    );
    if subjects.iter().any(|s| !session.bounds().is_countable(s)) {
        logger::verbose!("  * not counted toward GWA (grade or units missing or out of range)");
    }
}
