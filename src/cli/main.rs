//! Command-line interface entry point for `cgpacalc`

mod args;
mod commands;
mod view;

use args::{Cli, Command};
use cgpa_calc::config::Config;
use cgpa_calc::info;
use cgpa_calc::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config; otherwise use config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| Level::parse(&config.logging.level))
        .unwrap_or(Level::Warn);

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
    let config_log_path = (!config.logging.file.is_empty())
        .then(|| std::path::PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            info!("File logging initialized at: {display_path}");
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let ok = match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults)
        }
        Command::Session => {
            commands::session::run(&config);
            true
        }
        Command::Calc { semesters } => commands::calc::run(&semesters, &config),
        Command::Scale => {
            let stdout = std::io::stdout();
            view::write_scale(&mut stdout.lock()).is_ok()
        }
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
