//! CLI command handlers for `cgpacalc`.
//!
//! Each subcommand is implemented in its own submodule.

pub mod calc;
pub mod config;
pub mod session;
