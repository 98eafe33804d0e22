//! Integration tests for logger behavior.

use cgpa_calc::logger::{set_level, set_level_from_str, Level};
use cgpa_calc::{debug, error, info, warn};

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("warn"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("DEBUG"));
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
}

#[cfg(feature = "file-logging")]
#[test]
fn file_logging_captures_tagged_messages() {
    use cgpa_calc::logger::init_file_logging;
    use std::fs;

    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let log_path = dir.path().join("logs").join("cgpacalc.log");

    assert!(init_file_logging(&log_path));
    // Other tests change the level concurrently; errors always pass the filter.
    error!("semester list is empty");
    error!("could not render CGPA");

    let contents = fs::read_to_string(&log_path).expect("Failed to read log file");
    assert!(contents.contains("[ERROR] semester list is empty"));
    assert!(contents.contains("[ERROR] could not render CGPA"));
}
