//! Config command handler

use super::{confirm, open_session};
use crate::args::ConfigSubcommand;
use gwa_calc::config::{Config, CONFIG_KEYS};
use gwa_calc::models::AcademicStructure;

/// Dispatch config subcommands
///
/// `config` is the file as stored, without one-run CLI overrides.
///
/// # Errors
/// Returns a user-facing message when the key is unknown, the value is
/// rejected or the config file cannot be written
pub fn run(
    subcommand: Option<ConfigSubcommand>,
    config: &mut Config,
    defaults: &Config,
) -> Result<(), String> {
    match subcommand {
        None | Some(ConfigSubcommand::Get { key: None }) => {
            println!("\n=== Configuration ===\n");
            print!("{config}");
            Ok(())
        }
        Some(ConfigSubcommand::Get { key: Some(key) }) => {
            let value = config.get(&key).ok_or_else(|| unknown_key(&key))?;
            println!("{value}");
            Ok(())
        }
        Some(ConfigSubcommand::Set { key, value }) => {
            let previous = config.academic_structure();
            config.set(&key, &value).map_err(|e| rejected(&key, &e))?;
            save(config)?;
            println!("✓ Set {key} = {}", config.get(&key).unwrap_or_default());
            report_stranded_subjects(config, &previous);
            Ok(())
        }
        Some(ConfigSubcommand::Unset { key }) => {
            let previous = config.academic_structure();
            config.unset(&key, defaults).map_err(|e| rejected(&key, &e))?;
            save(config)?;
            println!("✓ Reset {key} to {}", config.get(&key).unwrap_or_default());
            report_stranded_subjects(config, &previous);
            Ok(())
        }
        Some(ConfigSubcommand::Reset) => reset(),
    }
}

fn unknown_key(key: &str) -> String {
    format!(
        "✗ Unknown config key: '{key}'\n  Known keys: {}",
        CONFIG_KEYS.join(", ")
    )
}

fn rejected(key: &str, message: &str) -> String {
    if CONFIG_KEYS.contains(&key.replace('-', "_").as_str()) {
        logger::error!("config {key}: {message}");
        format!("✗ {message}")
    } else {
        unknown_key(key)
    }
}

fn save(config: &Config) -> Result<(), String> {
    config
        .save()
        .map_err(|e| format!("✗ Failed to save config: {e}"))
}

/// Tell the user when a smaller structure leaves stored subjects outside it
fn report_stranded_subjects(config: &Config, previous: &AcademicStructure) {
    let structure = config.academic_structure();
    if structure == *previous {
        return;
    }

    let session = open_session(config);
    let stranded = session
        .records()
        .periods()
        .filter(|(period, subjects)| !structure.contains(*period) && !subjects.is_empty())
        .count();

    if stranded > 0 {
        println!(
            "! {stranded} semester(s) with subjects are outside the {} years × {} semesters now configured.",
            structure.year_count(),
            structure.semester_count()
        );
        println!("  They are kept and still count toward \"All Semesters\".");
    }
}

fn reset() -> Result<(), String> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    if !confirm("Reset the configuration to defaults?") {
        println!("✗ Reset cancelled");
        return Ok(());
    }

    Config::reset().map_err(|e| format!("✗ Failed to remove config file: {e}"))?;
    println!("✓ Config reset to defaults");
    Ok(())
}
