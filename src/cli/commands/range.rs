//! Range command handler

use super::open_session;
use crate::args::RangeSubcommand;
use gwa_calc::config::Config;
use gwa_calc::core::range_filter::{generate_range_options, RangeFilter, ALL_DESCRIPTOR, ALL_LABEL};

/// Dispatch range subcommands
///
/// # Errors
/// Returns a user-facing message when the descriptor is malformed or leaves
/// the configured structure
pub fn run(subcommand: RangeSubcommand, config: &Config) -> Result<(), String> {
    let mut session = open_session(config);

    match subcommand {
        RangeSubcommand::Show => {
            let range = session.range();
            println!("{} ({range})", range.label(session.structure()));
        }
        RangeSubcommand::Options => {
            let current = *session.range();
            let mark = |filter: RangeFilter| if filter == current { '*' } else { ' ' };

            println!("{} {ALL_DESCRIPTOR:<9} {ALL_LABEL}", mark(RangeFilter::All));
            for option in generate_range_options(session.structure()) {
                println!(
                    "{} {:<9} {}",
                    mark(option.filter),
                    option.filter.to_string(),
                    option.label
                );
            }
        }
        RangeSubcommand::Set { descriptor } => {
            let range: RangeFilter = descriptor
                .parse()
                .map_err(|e| format!("✗ Invalid range '{descriptor}': {e}"))?;

            if let RangeFilter::Range { start, end } = range {
                let structure = session.structure();
                if !structure.contains(start) || !structure.contains(end) {
                    return Err(format!(
                        "✗ Range '{descriptor}' is outside the configured {} years × {} semesters",
                        structure.year_count(),
                        structure.semester_count()
                    ));
                }
            }

            session.set_range_filter(range);
            println!("✓ Range set to {}", range.label(session.structure()));
        }
    }

    Ok(())
}
