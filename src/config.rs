//! Configuration module for `cgpacalc`

use crate::core::collection::DEFAULT_SEMESTER_PREFIX;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

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

/// Placeholder expanded to the config directory in path-like values
const DIR_VARIABLE: &str = "$CGPA_CALC";

/// Decimal places used when nothing is configured
pub const DEFAULT_PRECISION: usize = 2;

/// Largest accepted display precision
const MAX_PRECISION: usize = 6;

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// How GPA values and semesters are presented
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Decimal places for GPA/CGPA output
    #[serde(default = "default_precision")]
    pub precision: usize,
    /// Label prefix for new semesters ("Semester" gives "Semester 1", "Semester 2", ...)
    #[serde(default)]
    pub semester_prefix: String,
    /// Ask before removing a semester
    #[serde(default = "default_true")]
    pub confirm_removal: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            semester_prefix: String::new(),
            confirm_removal: true,
        }
    }
}

const fn default_precision() -> usize {
    DEFAULT_PRECISION
}

const fn default_true() -> bool {
    true
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,
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
    /// Override display precision
    pub precision: Option<usize>,
    /// Override semester label prefix
    pub semester_prefix: Option<String>,
}

impl Config {
    /// Get the `$CGPA_CALC` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/cgpacalc`
    /// - macOS: `~/Library/Application Support/cgpacalc`
    /// - Windows: `%APPDATA%\cgpacalc`
    #[must_use]
    pub fn get_cgpacalc_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cgpacalc")
    }

    /// Get the user config file path (`config.toml`, or `dconfig.toml` in debug builds)
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_cgpacalc_dir().join(CONFIG_FILE_NAME)
    }

    /// Semester label prefix, falling back to "Semester" when unset
    #[must_use]
    pub fn semester_prefix(&self) -> &str {
        if self.display.semester_prefix.trim().is_empty() {
            DEFAULT_SEMESTER_PREFIX
        } else {
            &self.display.semester_prefix
        }
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields that are empty here and non-empty in `defaults` are
    /// filled in, so upgrading picks up new settings without clobbering user values.
    ///
    /// # Returns
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }
        if self.display.semester_prefix.is_empty() && !defaults.display.semester_prefix.is_empty()
        {
            self.display
                .semester_prefix
                .clone_from(&defaults.display.semester_prefix);
            changed = true;
        }

        changed
    }

    /// Expand `$CGPA_CALC` in a string
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_cgpacalc_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields take their serde defaults and `$CGPA_CALC` is expanded in
    /// the log file path. A hand-edited `precision` is capped the same way
    /// `set` caps it.
    ///
    /// # Errors
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;
        config.logging.file = Self::expand_variables(&config.logging.file);
        config.display.precision = config.display.precision.min(MAX_PRECISION);
        Ok(config)
    }

    /// Load configuration from the compiled-in defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is not valid TOML. The
    /// defaults are covered by tests, so this cannot happen in a released build.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - If the config file exists: load it, merge missing fields from defaults, save if anything changed
    /// - Otherwise (first run): write the defaults to the config file and return them
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            if let Err(e) = defaults.save() {
                crate::warn!("Could not write default config to {}: {e}", config_file.display());
            }
            return defaults;
        }

        match fs::read_to_string(&config_file) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(mut config) => {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    config
                }
                Err(e) => {
                    crate::warn!("Ignoring malformed config {}: {e}", config_file.display());
                    defaults
                }
            },
            Err(e) => {
                crate::warn!("Could not read config {}: {e}", config_file.display());
                defaults
            }
        }
    }

    /// Save configuration to the user config file, creating its directory if needed
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save configuration to an explicit path
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot be written
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(path, toml_str)?;
        Ok(())
    }

    /// Apply CLI overrides on top of loaded values (runtime only, not saved)
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
        if let Some(precision) = overrides.precision {
            self.display.precision = precision.min(MAX_PRECISION);
        }
        if let Some(prefix) = &overrides.semester_prefix {
            self.display.semester_prefix.clone_from(prefix);
        }
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `precision`,
    /// `semester_prefix` (or `semester-prefix`), `confirm_removal` (or `confirm-removal`).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "precision" => Some(self.display.precision.to_string()),
            "semester_prefix" | "semester-prefix" => Some(self.display.semester_prefix.clone()),
            "confirm_removal" | "confirm-removal" => {
                Some(self.display.confirm_removal.to_string())
            }
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value cannot be parsed
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => {
                if crate::logger::Level::parse(value).is_none() {
                    return Err(format!(
                        "Invalid log level '{value}' (expected error, warn, info or debug)"
                    ));
                }
                self.logging.level = value.to_ascii_lowercase();
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "precision" => {
                let precision = value
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid number for 'precision': '{value}'"))?;
                if precision > MAX_PRECISION {
                    return Err(format!("'precision' must be at most {MAX_PRECISION}"));
                }
                self.display.precision = precision;
            }
            "semester_prefix" | "semester-prefix" => {
                self.display.semester_prefix = value.to_string();
            }
            "confirm_removal" | "confirm-removal" => {
                self.display.confirm_removal = value.parse::<bool>().map_err(|_| {
                    format!("Invalid boolean value for 'confirm_removal': '{value}'")
                })?;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "precision" => self.display.precision = defaults.display.precision,
            "semester_prefix" | "semester-prefix" => self
                .display
                .semester_prefix
                .clone_from(&defaults.display.semester_prefix),
            "confirm_removal" | "confirm-removal" => {
                self.display.confirm_removal = defaults.display.confirm_removal;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// Succeeds without doing anything if there is no config file.
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
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[display]")?;
        writeln!(f, "  precision = {}", self.display.precision)?;
        writeln!(f, "  semester_prefix = \"{}\"", self.display.semester_prefix)?;
        writeln!(f, "  confirm_removal = {}", self.display.confirm_removal)?;

        Ok(())
    }
}
