//! Configuration module for `gwacalc`

use crate::core::models::AcademicStructure;
use crate::core::validation::{
    GradingBounds, DEFAULT_MAX_GRADE, DEFAULT_MAX_UNITS, DEFAULT_MIN_GRADE, DEFAULT_MIN_UNITS,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the configuration directory in path values
const DIR_VARIABLE: &str = "$GWA_CALC";

/// Keys accepted by [`Config::get`], [`Config::set`] and [`Config::unset`]
pub const CONFIG_KEYS: [&str; 11] = [
    "level",
    "file",
    "verbose",
    "data_dir",
    "reports_dir",
    "min_grade",
    "max_grade",
    "min_units",
    "max_units",
    "years",
    "semesters",
];

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path (empty disables file logging)
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the persisted calculator state
    #[serde(default)]
    pub data_dir: String,
    /// Directory for exported reports
    #[serde(default)]
    pub reports_dir: String,
}

/// Grade and units bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Lowest valid grade
    #[serde(default = "default_min_grade")]
    pub min_grade: f64,
    /// Highest valid grade
    #[serde(default = "default_max_grade")]
    pub max_grade: f64,
    /// Lowest units accepted when editing
    #[serde(default = "default_min_units")]
    pub min_units: f64,
    /// Highest units accepted when editing
    #[serde(default = "default_max_units")]
    pub max_units: f64,
}

const fn default_min_grade() -> f64 {
    DEFAULT_MIN_GRADE
}

const fn default_max_grade() -> f64 {
    DEFAULT_MAX_GRADE
}

const fn default_min_units() -> f64 {
    DEFAULT_MIN_UNITS
}

const fn default_max_units() -> f64 {
    DEFAULT_MAX_UNITS
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            min_grade: DEFAULT_MIN_GRADE,
            max_grade: DEFAULT_MAX_GRADE,
            min_units: DEFAULT_MIN_UNITS,
            max_units: DEFAULT_MAX_UNITS,
        }
    }
}

/// Year and semester labels
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructureConfig {
    /// Year labels in order
    #[serde(default)]
    pub years: Vec<String>,
    /// Semester labels in order
    #[serde(default)]
    pub semesters: Vec<String>,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Grading bounds
    #[serde(default)]
    pub grading: GradingConfig,
    /// Academic structure labels
    #[serde(default)]
    pub structure: StructureConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override data directory
    pub data_dir: Option<String>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
}

impl Config {
    /// Get the `$GWA_CALC` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/gwacalc`
    /// - macOS: `~/Library/Application Support/gwacalc`
    /// - Windows: `%APPDATA%\gwacalc`
    #[must_use]
    pub fn get_gwacalc_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gwacalc")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Empty strings and empty label lists are filled from `defaults` so that
    /// fields added in newer versions show up in old config files. Numeric
    /// grading fields are filled by serde when absent.
    ///
    /// Returns `true` if any field changed.
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        for (value, default) in [
            (&mut self.logging.level, &defaults.logging.level),
            (&mut self.paths.data_dir, &defaults.paths.data_dir),
            (&mut self.paths.reports_dir, &defaults.paths.reports_dir),
        ] {
            if value.is_empty() && !default.is_empty() {
                value.clone_from(default);
                changed = true;
            }
        }

        for (labels, default) in [
            (&mut self.structure.years, &defaults.structure.years),
            (&mut self.structure.semesters, &defaults.structure.semesters),
        ] {
            if labels.is_empty() && !default.is_empty() {
                labels.clone_from(default);
                changed = true;
            }
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Only non-`None` values replace config values; the file is not touched.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file = Self::expand_variables(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(data_dir) = &overrides.data_dir {
            self.paths.data_dir = Self::expand_variables(data_dir);
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir = Self::expand_variables(reports_dir);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_gwacalc_dir`](Self::get_gwacalc_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_gwacalc_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$GWA_CALC` to the configuration directory
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_gwacalc_dir();
            value.replace(DIR_VARIABLE, &dir.to_string_lossy())
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// `$GWA_CALC` in path values is expanded. Missing fields use their serde
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.data_dir = Self::expand_variables(&config.paths.data_dir);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// Debug builds embed `DefaultCLIConfigDebug.toml`, release builds
    /// `DefaultCLIConfigRelease.toml`. Should the embedded text ever fail to
    /// parse, built-in values are used instead.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).unwrap_or_else(|e| {
            logger::error!("Compiled-in default configuration is invalid: {e}");
            let mut config = Self::default();
            let structure = AcademicStructure::default();
            config.logging.level = "info".to_string();
            config.structure.years = structure.years;
            config.structure.semesters = structure.semesters;
            config
        })
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// An existing file is merged with defaults (and rewritten when that added
    /// anything). On first run the defaults are written out. Any read or parse
    /// error falls back to defaults.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_file_path())
    }

    /// [`load`](Self::load) against an explicit file
    #[must_use]
    pub fn load_from(config_file: &Path) -> Self {
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            if let Err(e) = defaults.save_to(config_file) {
                logger::warn!("Could not write {}: {e}", config_file.display());
            }
            return defaults;
        }

        let parsed = fs::read_to_string(config_file)
            .map_err(|e| e.to_string())
            .and_then(|content| Self::from_toml(&content).map_err(|e| e.to_string()));

        match parsed {
            Ok(mut config) => {
                if config.merge_defaults(&defaults) {
                    if let Err(e) = config.save_to(config_file) {
                        logger::warn!("Could not update {}: {e}", config_file.display());
                    }
                }
                config
            }
            Err(e) => {
                logger::warn!(
                    "Ignoring unreadable config {}: {e}",
                    config_file.display()
                );
                defaults
            }
        }
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, or the file cannot
    /// be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save configuration to `config_file`
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, or the file cannot
    /// be written
    pub fn save_to(&self, config_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `data_dir`, `reports_dir`,
    /// `min_grade`, `max_grade`, `min_units`, `max_units`, `years`, `semesters`.
    /// Label lists are returned comma-separated.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "data_dir" | "data-dir" => Some(self.paths.data_dir.clone()),
            "reports_dir" | "reports-dir" => Some(self.paths.reports_dir.clone()),
            "min_grade" | "min-grade" => Some(self.grading.min_grade.to_string()),
            "max_grade" | "max-grade" => Some(self.grading.max_grade.to_string()),
            "min_units" | "min-units" => Some(self.grading.min_units.to_string()),
            "max_units" | "max-units" => Some(self.grading.max_units.to_string()),
            "years" => Some(self.structure.years.join(", ")),
            "semesters" => Some(self.structure.semesters.join(", ")),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Values are validated: `level` must be a known log level, `verbose` a
    /// boolean, grading keys finite numbers that keep each minimum at or below
    /// its maximum, and label lists comma-separated with no blank label.
    ///
    /// Note: This method updates the in-memory config. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value is rejected
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => {
                value
                    .parse::<logger::Level>()
                    .map_err(|e| format!("Invalid value for 'level': {e}"))?;
                self.logging.level = value.to_lowercase();
            }
            "file" => self.logging.file = Self::expand_variables(value),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "data_dir" | "data-dir" => self.paths.data_dir = Self::expand_variables(value),
            "reports_dir" | "reports-dir" => {
                self.paths.reports_dir = Self::expand_variables(value);
            }
            "min_grade" | "min-grade" | "max_grade" | "max-grade" | "min_units" | "min-units"
            | "max_units" | "max-units" => self.set_bound(key, value)?,
            "years" => self.structure.years = parse_labels(key, value)?,
            "semesters" => self.structure.semesters = parse_labels(key, value)?,
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    fn set_bound(&mut self, key: &str, value: &str) -> Result<(), String> {
        let number = value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| format!("Invalid number for '{key}': '{value}'"))?;

        let mut grading = self.grading;
        match key.replace('-', "_").as_str() {
            "min_grade" => grading.min_grade = number,
            "max_grade" => grading.max_grade = number,
            "min_units" => grading.min_units = number,
            _ => grading.max_units = number,
        }

        if grading.min_grade > grading.max_grade {
            return Err(format!(
                "min_grade ({}) must not exceed max_grade ({})",
                grading.min_grade, grading.max_grade
            ));
        }
        if grading.min_units > grading.max_units {
            return Err(format!(
                "min_units ({}) must not exceed max_units ({})",
                grading.min_units, grading.max_units
            ));
        }

        self.grading = grading;
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// Note: This method updates the in-memory config. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "data_dir" | "data-dir" => self.paths.data_dir.clone_from(&defaults.paths.data_dir),
            "reports_dir" | "reports-dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            "min_grade" | "min-grade" => self.grading.min_grade = defaults.grading.min_grade,
            "max_grade" | "max-grade" => self.grading.max_grade = defaults.grading.max_grade,
            "min_units" | "min-units" => self.grading.min_units = defaults.grading.min_units,
            "max_units" | "max-units" => self.grading.max_units = defaults.grading.max_units,
            "years" => self.structure.years.clone_from(&defaults.structure.years),
            "semesters" => self
                .structure
                .semesters
                .clone_from(&defaults.structure.semesters),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds when there is no file.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Grading bounds used by validation and metrics
    #[must_use]
    pub const fn grading_bounds(&self) -> GradingBounds {
        GradingBounds {
            min_grade: self.grading.min_grade,
            max_grade: self.grading.max_grade,
            min_units: self.grading.min_units,
            max_units: self.grading.max_units,
        }
    }

    /// Academic structure built from the configured labels, with the built-in
    /// labels standing in for an empty list
    #[must_use]
    pub fn academic_structure(&self) -> AcademicStructure {
        let fallback = AcademicStructure::default();
        AcademicStructure {
            years: if self.structure.years.is_empty() {
                fallback.years
            } else {
                self.structure.years.clone()
            },
            semesters: if self.structure.semesters.is_empty() {
                fallback.semesters
            } else {
                self.structure.semesters.clone()
            },
        }
    }

    /// Directory of the persisted calculator state
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        if self.paths.data_dir.is_empty() {
            Self::get_gwacalc_dir().join("data")
        } else {
            PathBuf::from(&self.paths.data_dir)
        }
    }

    /// Directory for exported reports
    #[must_use]
    pub fn reports_dir(&self) -> PathBuf {
        if self.paths.reports_dir.is_empty() {
            Self::get_gwacalc_dir().join("reports")
        } else {
            PathBuf::from(&self.paths.reports_dir)
        }
    }
}

/// Split a comma-separated label list
fn parse_labels(key: &str, value: &str) -> Result<Vec<String>, String> {
    let labels: Vec<String> = value.split(',').map(|s| s.trim().to_string()).collect();
    if labels.iter().any(String::is_empty) {
        return Err(format!(
            "Invalid list for '{key}': '{value}' (expected comma-separated, non-empty labels)"
        ));
    }
    Ok(labels)
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  data_dir = \"{}\"", self.paths.data_dir)?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        writeln!(f, "\n[grading]")?;
        writeln!(f, "  min_grade = {}", self.grading.min_grade)?;
        writeln!(f, "  max_grade = {}", self.grading.max_grade)?;
        writeln!(f, "  min_units = {}", self.grading.min_units)?;
        writeln!(f, "  max_units = {}", self.grading.max_units)?;

        writeln!(f, "\n[structure]")?;
        writeln!(f, "  years = {:?}", self.structure.years)?;
        writeln!(f, "  semesters = {:?}", self.structure.semesters)?;

        Ok(())
    }
}
