//! Data models for `cgpacalc`

pub mod course;
pub mod semester;

pub use course::{parse_credit_hours, Course, CourseField, DEFAULT_CREDIT_HOURS};
pub use semester::Semester;
