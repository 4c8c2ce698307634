//! Profile command handler

use super::open_session;
use crate::args::ProfileSubcommand;
use gwa_calc::config::Config;

/// Dispatch profile subcommands
///
/// # Errors
/// Returns a user-facing message when the student name is blank
pub fn run(subcommand: ProfileSubcommand, config: &Config) -> Result<(), String> {
    let mut session = open_session(config);

    match subcommand {
        ProfileSubcommand::Show => {
            let or_unset = |s: &str| {
                if s.trim().is_empty() {
                    "(not set)".to_string()
                } else {
                    s.to_string()
                }
            };
            println!("Student: {}", or_unset(session.student_name()));
            println!("School:  {}", or_unset(session.school_name()));
        }
        ProfileSubcommand::Student { name } => {
            if name.trim().is_empty() {
                return Err("✗ Student name cannot be blank".to_string());
            }
            session.set_student_name(&name);
            println!("✓ Student name set to '{}'", session.student_name());
        }
        ProfileSubcommand::School { name } => {
            session.set_school_name(&name);
            if name.trim().is_empty() {
                println!("✓ School name cleared");
            } else {
                println!("✓ School name set to '{name}'");
            }
        }
    }

    Ok(())
}
