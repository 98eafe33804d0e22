//! Errors raised by semester and course operations.
//!
//! All of these are recoverable: the operation is refused, state is left
//! untouched, and the message is meant to be shown to the user as-is.

use thiserror::Error;

/// Errors from [`SemesterCollection`](super::SemesterCollection) operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// Tried to remove the only remaining semester.
    #[error("You must have at least one semester.")]
    LastSemester,

    /// A semester index past the end of the collection.
    #[error("semester {index} does not exist ({count} semesters)")]
    SemesterOutOfRange {
        /// Requested position
        index: usize,
        /// Semesters in the collection
        count: usize,
    },

    /// A course index past the end of its semester.
    #[error("course {index} does not exist in semester {semester} ({count} courses)")]
    CourseOutOfRange {
        /// Semester that was searched
        semester: usize,
        /// Requested course position
        index: usize,
        /// Courses in that semester
        count: usize,
    },

    /// A course removal with no course selected.
    #[error("Please select a course to remove.")]
    NoSelection,

    /// An edit named a field that courses do not have.
    #[error("unknown course field: '{0}' (expected name, credits or grade)")]
    UnknownField(String),
}

impl CollectionError {
    /// Returns `true` for stale or missing semester/course indices.
    #[must_use]
    pub const fn is_index(&self) -> bool {
        matches!(
            self,
            Self::SemesterOutOfRange { .. } | Self::CourseOutOfRange { .. } | Self::NoSelection
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(!CollectionError::LastSemester.is_index());
        assert!(CollectionError::NoSelection.is_index());
        assert!(CollectionError::SemesterOutOfRange { index: 4, count: 2 }.is_index());
        assert!(!CollectionError::UnknownField("x".into()).is_index());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            CollectionError::LastSemester.to_string(),
            "You must have at least one semester."
        );
        assert_eq!(
            CollectionError::CourseOutOfRange {
                semester: 0,
                index: 3,
                count: 2
            }
            .to_string(),
            "course 3 does not exist in semester 0 (2 courses)"
        );
    }
}
