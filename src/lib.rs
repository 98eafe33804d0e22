//! Shared library for `cgpacalc`
//! Contains the grade model, GPA/CGPA aggregation and semester bookkeeping used by the CLI

pub mod config;
pub mod core;
pub mod logger;

pub use crate::core::get_version;
