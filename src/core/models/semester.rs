//! Semester model

use super::Course;

/// An ordered list of courses taken in one term
///
/// A semester's identity is its position in the collection; `label` is only
/// what gets shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Semester {
    /// Display label (e.g., "Semester 3")
    pub label: String,

    /// Courses in entry order
    pub courses: Vec<Course>,
}

impl Semester {
    /// Create an empty semester with the given label
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            courses: Vec::new(),
        }
    }

    /// Total credit hours across all courses
    #[must_use]
    pub fn total_credit_hours(&self) -> u64 {
        self.courses.iter().map(|c| u64::from(c.credit_hours)).sum()
    }
}

impl AsRef<[Course]> for Semester {
    fn as_ref(&self) -> &[Course] {
        &self.courses
    }
}
