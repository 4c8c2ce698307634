//! Command-line interface entry point for `gwacalc`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use gwa_calc::config::Config;
use logger::{enable_debug, enable_verbose, info, init_file_logging, set_level, Level};

fn main() {
    let args = Cli::parse();

    // Config commands edit the file as stored; everything else sees CLI overrides
    let mut file_config = Config::load();
    let defaults = Config::from_defaults();
    let mut config = file_config.clone();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let effective_level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    let mut level = effective_level;
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // File logging: CLI flag wins, otherwise config logging.file if set
    let config_log_path: Option<std::path::PathBuf> = if config.logging.file.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(&config.logging.file))
    };

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let result = match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut file_config, &defaults)
        }
        Command::Subject { subcommand } => commands::subject::run(subcommand, &config),
        Command::Range { subcommand } => commands::range::run(subcommand, &config),
        Command::Profile { subcommand } => commands::profile::run(subcommand, &config),
        Command::Summary => {
            commands::summary::run(&config);
            Ok(())
        }
        Command::Report {
            output,
            format,
            pdf_converter,
        } => commands::report::run(
            output.as_deref(),
            &format,
            pdf_converter.as_deref(),
            &config,
        ),
        Command::Clear { yes } => {
            commands::clear::run(&config, yes);
            Ok(())
        }
    };

    if let Err(message) = result {
        eprintln!("{message}");
        std::process::exit(1);
    }
}
