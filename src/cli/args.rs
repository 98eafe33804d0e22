//! CLI argument definitions for `cgpacalc`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use cgpa_calc::config::ConfigOverrides;
use cgpa_calc::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level` for runtime use.
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
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `precision`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
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
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Start an interactive editing session.
    ///
    /// Semesters and courses are edited line by line; GPA and CGPA are
    /// recomputed after every change. Type `help` inside the session.
    Session,
    /// Compute GPA and CGPA for courses given on the command line.
    ///
    /// Each --semester takes comma-separated `NAME:CREDITS:GRADE` entries,
    /// e.g. --semester "Math:3:A,Physics:4:B" --semester "History:2:C".
    Calc {
        /// One semester's courses (repeat for each semester)
        #[arg(short, long = "semester", value_name = "COURSES", required = true)]
        semesters: Vec<String>,
    },
    /// Show the grading scale and credit-hour options.
    Scale,
}

#[derive(Parser, Debug)]
#[command(
    name = "cgpacalc",
    about = "Record courses by semester and compute GPA/CGPA on a 5-point scale",
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

    /// Decimal places for GPA output (runtime only)
    #[arg(long, value_name = "DIGITS")]
    pub precision: Option<usize>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override the semester label prefix
    #[arg(long = "semester-prefix", value_name = "TEXT")]
    pub semester_prefix: Option<String>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `None` in the returned struct means the flag was not given.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            precision: self.precision,
            semester_prefix: self.semester_prefix.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(command: Command) -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            precision: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            semester_prefix: None,
            command,
        }
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
        let overrides = bare(Command::Scale).to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.precision.is_none());
        assert!(overrides.semester_prefix.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let mut cli = bare(Command::Session);
        cli.config_level = Some(LogLevelArg::Debug);
        cli.config_log_file = Some(PathBuf::from("/tmp/cgpa.log"));
        cli.config_verbose = Some(true);
        cli.precision = Some(3);
        cli.semester_prefix = Some("Term".to_string());

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/cgpa.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.precision, Some(3));
        assert_eq!(overrides.semester_prefix, Some("Term".to_string()));
    }

    #[test]
    fn test_parse_calc_semesters() {
        let cli = Cli::try_parse_from([
            "cgpacalc",
            "calc",
            "--semester",
            "Math:3:A,Physics:4:B",
            "-s",
            "History:2:C",
        ])
        .unwrap();
        match cli.command {
            Command::Calc { semesters } => {
                assert_eq!(semesters, vec!["Math:3:A,Physics:4:B", "History:2:C"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_calc_requires_semester() {
        assert!(Cli::try_parse_from(["cgpacalc", "calc"]).is_err());
    }
}
