//! Core module: grade scale, course records, aggregation and the semester collection

pub mod collection;
pub mod error;
pub mod gpa;
pub mod grade_scale;
pub mod models;
pub mod session;
pub mod view;

pub use collection::SemesterCollection;
pub use error::CollectionError;
pub use grade_scale::GradeScale;
pub use models::{Course, CourseField, Semester};
pub use session::Session;
pub use view::GradeView;

/// Returns the current version of the `cgpa-calc` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
