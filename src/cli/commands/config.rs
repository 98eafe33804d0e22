//! Config command handler

use crate::args::ConfigSubcommand;
use cgpa_calc::config::Config;
use std::io::{self, Write};

/// Dispatch config subcommands. Returns `false` if the command failed.
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) -> bool {
    match subcommand {
        None => handle_config_get(config, None),
        Some(ConfigSubcommand::Get { key }) => handle_config_get(config, key),
        Some(ConfigSubcommand::Set { key, value }) => {
            let change = config.set(&key, &value);
            persist(config, change, &format!("Set {key} = {value}"))
        }
        Some(ConfigSubcommand::Unset { key }) => {
            let change = config.unset(&key, defaults);
            persist(config, change, &format!("Reset {key} to default"))
        }
        Some(ConfigSubcommand::Reset) => handle_config_reset(),
    }
}

/// Print one value, or the whole config when no key is given
fn handle_config_get(config: &Config, key: Option<String>) -> bool {
    let Some(k) = key else {
        println!("\n=== Configuration ({}) ===\n", Config::get_config_file_path().display());
        print!("{config}");
        return true;
    };
    config.get(&k).map_or_else(
        || {
            eprintln!("Unknown config key: '{k}'");
            false
        },
        |value| {
            println!("{value}");
            true
        },
    )
}

/// Save after a successful in-memory change
fn persist(config: &Config, change: Result<(), String>, done: &str) -> bool {
    if let Err(e) = change {
        eprintln!("✗ {e}");
        return false;
    }
    if let Err(e) = config.save() {
        eprintln!("✗ Failed to save config: {e}");
        return false;
    }
    println!("✓ {done}");
    true
}

/// Delete the config file after confirmation
fn handle_config_reset() -> bool {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return true;
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    if response.trim().eq_ignore_ascii_case("y") || response.trim().eq_ignore_ascii_case("yes") {
        if let Err(e) = Config::reset() {
            eprintln!("✗ Failed to remove config file: {e}");
            return false;
        }
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    true
}
