//! CLI argument definitions for `gwacalc`

use clap::{builder::BoolishValueParser, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use gwa_calc::config::ConfigOverrides;
use gwa_calc::models::{AcademicPeriod, SubjectField};
use logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level`
/// for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Level::from(*self))
    }
}

/// Field selector for `subject set`
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum FieldArg {
    /// Subject name
    Name,
    /// Grade
    Grade,
    /// Units
    Units,
}

impl From<FieldArg> for SubjectField {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::Name => Self::Name,
            FieldArg::Grade => Self::Grade,
            FieldArg::Units => Self::Units,
        }
    }
}

/// A semester selected by 1-based year and semester numbers
#[derive(Debug, Clone, Copy, Args)]
pub struct PeriodArgs {
    /// Year number, starting at 1
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub year: u16,

    /// Semester number within the year, starting at 1
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub semester: u16,
}

impl PeriodArgs {
    /// The 0-based period these numbers refer to
    pub fn period(self) -> AcademicPeriod {
        AcademicPeriod::new(usize::from(self.year) - 1, usize::from(self.semester) - 1)
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `max_grade`, `years`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set (label lists are comma-separated)
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum SubjectSubcommand {
    /// Append a blank subject to a semester.
    Add {
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Remove a subject; later subjects move up by one.
    Remove {
        #[command(flatten)]
        period: PeriodArgs,
        /// Subject number within the semester, starting at 1
        #[arg(value_name = "INDEX", value_parser = clap::value_parser!(u16).range(1..))]
        index: u16,
    },
    /// Set the name, grade or units of a subject.
    ///
    /// Grades and units must lie within the configured bounds; an empty VALUE
    /// clears the field.
    Set {
        #[command(flatten)]
        period: PeriodArgs,
        /// Subject number within the semester, starting at 1
        #[arg(value_name = "INDEX", value_parser = clap::value_parser!(u16).range(1..))]
        index: u16,
        /// Field to change
        #[arg(long, value_enum)]
        field: FieldArg,
        /// New value
        #[arg(value_name = "VALUE", allow_hyphen_values = true)]
        value: String,
    },
    /// List subjects of one semester, or of every semester.
    List {
        /// Year number, starting at 1 (requires --semester)
        #[arg(long, value_name = "N", requires = "semester", value_parser = clap::value_parser!(u16).range(1..))]
        year: Option<u16>,
        /// Semester number, starting at 1 (requires --year)
        #[arg(long, value_name = "N", requires = "year", value_parser = clap::value_parser!(u16).range(1..))]
        semester: Option<u16>,
    },
}

#[derive(Debug, Subcommand)]
pub enum RangeSubcommand {
    /// Show the current range.
    Show,
    /// List selectable ranges.
    Options,
    /// Select the range: `all` or `START_YEAR-START_SEM-END_YEAR-END_SEM` (0-based).
    Set {
        /// Range descriptor
        #[arg(value_name = "RANGE")]
        descriptor: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProfileSubcommand {
    /// Show the student and school names.
    Show,
    /// Set the student name (required for reports).
    Student {
        /// Student name
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Set the school name.
    School {
        /// School name (empty to clear)
        #[arg(value_name = "NAME")]
        name: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Add, edit, remove and list subjects.
    Subject {
        #[command(subcommand)]
        subcommand: SubjectSubcommand,
    },
    /// Choose which semesters the cumulative figures cover.
    Range {
        #[command(subcommand)]
        subcommand: RangeSubcommand,
    },
    /// Manage the student and school names.
    Profile {
        #[command(subcommand)]
        subcommand: ProfileSubcommand,
    },
    /// Show semester GWAs and the cumulative summary.
    Summary,
    /// Export a GWA summary report.
    Report {
        /// Output file path (defaults to `GWA_Report_<date>.<ext>` in the reports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Report format: markdown (md), html, or pdf
        #[arg(short, long, value_name = "FORMAT", default_value = "pdf")]
        format: String,

        /// Chrome/Chromium executable used for PDF conversion
        #[arg(long, value_name = "PATH")]
        pdf_converter: Option<String>,
    },
    /// Delete all subjects, names and the range selection.
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "gwacalc",
    about = "Cumulative GWA calculator",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level for this run
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override the data directory holding saved grades
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the reports directory
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides, `None` meaning no override
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let path_string = |p: &PathBuf| p.to_string_lossy().to_string();
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self.config_log_file.as_ref().map(path_string),
            verbose: self.config_verbose,
            data_dir: self.data_dir.as_ref().map(path_string),
            reports_dir: self.reports_dir.as_ref().map(path_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let cli = Cli::parse_from(["gwacalc", "summary"]);
        let overrides = cli.to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.data_dir.is_none());
        assert!(overrides.reports_dir.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = Cli::parse_from([
            "gwacalc",
            "--config-level",
            "debug",
            "--config-log-file",
            "/tmp/test.log",
            "--config-verbose",
            "yes",
            "--data-dir",
            "/srv/grades",
            "--reports-dir",
            "/srv/reports",
            "summary",
        ]);

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.data_dir, Some("/srv/grades".to_string()));
        assert_eq!(overrides.reports_dir, Some("/srv/reports".to_string()));
    }

    #[test]
    fn test_subject_set_is_one_based() {
        let cli = Cli::parse_from([
            "gwacalc", "subject", "set", "--year", "2", "--semester", "1", "3", "--field",
            "grade", "1.75",
        ]);

        let Command::Subject {
            subcommand:
                SubjectSubcommand::Set {
                    period,
                    index,
                    field,
                    value,
                },
        } = cli.command
        else {
            panic!("expected subject set");
        };
        assert_eq!(period.period(), AcademicPeriod::new(1, 0));
        assert_eq!(index, 3);
        assert_eq!(SubjectField::from(field), SubjectField::Grade);
        assert_eq!(value, "1.75");
    }

    #[test]
    fn test_zero_year_rejected() {
        let result = Cli::try_parse_from(["gwacalc", "subject", "add", "--year", "0", "--semester", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_list_needs_both_period_flags() {
        assert!(Cli::try_parse_from(["gwacalc", "subject", "list", "--year", "1"]).is_err());
        assert!(Cli::try_parse_from(["gwacalc", "subject", "list"]).is_ok());
    }
}
