//! Semester collection: the single owner of all course data.
//!
//! Semesters and courses are addressed by position (0-based). Removing an entry
//! shifts everything after it down by one. Derived values are never stored;
//! [`SemesterCollection::refresh_all`] recomputes them from current state.

use super::error::CollectionError;
use super::gpa::{calculate_cgpa, calculate_gpa, Totals};
use super::models::{Course, CourseField, Semester};
use super::view::GradeView;

/// Label prefix used when none is configured
pub const DEFAULT_SEMESTER_PREFIX: &str = "Semester";

/// Snapshot of every derived value produced by a refresh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Standing {
    /// GPA for each semester, by position
    pub semester_gpas: Vec<f64>,
    /// Pooled GPA across all semesters
    pub cgpa: f64,
}

/// Ordered semesters, each an ordered list of courses.
///
/// Always holds at least one semester.
#[derive(Debug, Clone)]
pub struct SemesterCollection {
    semesters: Vec<Semester>,
    label_prefix: String,
    /// Number of semesters ever created; drives labels and never decreases
    created: usize,
}

impl SemesterCollection {
    /// Create a collection holding one empty semester
    #[must_use]
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_SEMESTER_PREFIX)
    }

    /// Create a collection whose semester labels start with `prefix`
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        let mut collection = Self {
            semesters: Vec::new(),
            label_prefix: prefix.into(),
            created: 0,
        };
        collection.add_semester();
        collection
    }

    /// Append an empty semester and return its index
    pub fn add_semester(&mut self) -> usize {
        self.created += 1;
        let label = format!("{} {}", self.label_prefix, self.created);
        crate::debug!("Adding {label}");
        self.semesters.push(Semester::new(label));
        self.semesters.len() - 1
    }

    /// Remove the semester at `index` and return it.
    ///
    /// Any confirmation must already have been obtained by the caller.
    ///
    /// # Errors
    /// - [`CollectionError::LastSemester`] if this is the only semester
    /// - [`CollectionError::SemesterOutOfRange`] if `index` is past the end
    pub fn remove_semester(&mut self, index: usize) -> Result<Semester, CollectionError> {
        if self.semesters.len() <= 1 {
            crate::warn!("Refusing to remove the last remaining semester");
            return Err(CollectionError::LastSemester);
        }
        self.check_semester(index)?;
        let removed = self.semesters.remove(index);
        crate::debug!(
            "Removed {} with {} course(s)",
            removed.label,
            removed.courses.len()
        );
        Ok(removed)
    }

    /// Append a default course (empty name, first credit option, first grade)
    /// to a semester and return the course index.
    ///
    /// # Errors
    /// Returns [`CollectionError::SemesterOutOfRange`] if `semester` is past the end.
    pub fn add_course(&mut self, semester: usize) -> Result<usize, CollectionError> {
        let sem = self.semester_mut(semester)?;
        sem.courses.push(Course::default());
        crate::debug!("Added course {} to {}", sem.courses.len(), sem.label);
        Ok(sem.courses.len() - 1)
    }

    /// Append an already-filled course to a semester and return the course index.
    ///
    /// # Errors
    /// Returns [`CollectionError::SemesterOutOfRange`] if `semester` is past the end.
    pub fn push_course(&mut self, semester: usize, course: Course) -> Result<usize, CollectionError> {
        let sem = self.semester_mut(semester)?;
        sem.courses.push(course);
        Ok(sem.courses.len() - 1)
    }

    /// Remove a course from a semester and return it.
    ///
    /// `course` is `None` when nothing is selected.
    ///
    /// # Errors
    /// - [`CollectionError::SemesterOutOfRange`] if `semester` is past the end
    /// - [`CollectionError::NoSelection`] if `course` is `None`
    /// - [`CollectionError::CourseOutOfRange`] if `course` is past the end
    pub fn remove_course(
        &mut self,
        semester: usize,
        course: Option<usize>,
    ) -> Result<Course, CollectionError> {
        self.check_semester(semester)?;
        let index = course.ok_or(CollectionError::NoSelection)?;
        self.check_course(semester, index)?;
        let removed = self.semesters[semester].courses.remove(index);
        crate::debug!(
            "Removed course '{}' from {}",
            removed.name,
            self.semesters[semester].label
        );
        Ok(removed)
    }

    /// Apply a raw field edit to one course.
    ///
    /// Unparsable credit hours fall back to the default rather than failing.
    ///
    /// # Errors
    /// Returns an index error if either position is out of range.
    pub fn update_course(
        &mut self,
        semester: usize,
        course: usize,
        field: CourseField,
        value: &str,
    ) -> Result<(), CollectionError> {
        self.check_course(semester, course)?;
        self.semesters[semester].courses[course].apply_edit(field, value);
        crate::debug!("Set {field} of course {course} in semester {semester} to '{value}'");
        Ok(())
    }

    /// Recompute every semester GPA and the CGPA, push them to `view`, and
    /// return the same values.
    pub fn refresh_all(&self, view: &mut dyn GradeView) -> Standing {
        let standing = self.standing();
        view.render_semester_list(&self.semesters);
        for (index, gpa) in standing.semester_gpas.iter().enumerate() {
            view.render_semester_gpa(index, *gpa);
        }
        view.render_cgpa(standing.cgpa);
        standing
    }

    /// Compute all derived values without rendering them
    #[must_use]
    pub fn standing(&self) -> Standing {
        Standing {
            semester_gpas: self
                .semesters
                .iter()
                .map(|s| calculate_gpa(&s.courses))
                .collect(),
            cgpa: calculate_cgpa(&self.semesters),
        }
    }

    /// GPA of the semester at `index`
    ///
    /// # Errors
    /// Returns [`CollectionError::SemesterOutOfRange`] if `index` is past the end.
    pub fn semester_gpa(&self, index: usize) -> Result<f64, CollectionError> {
        Ok(calculate_gpa(self.courses(index)?))
    }

    /// Pooled GPA across all semesters
    #[must_use]
    pub fn cgpa(&self) -> f64 {
        calculate_cgpa(&self.semesters)
    }

    /// Pooled totals across all semesters
    #[must_use]
    pub fn totals(&self) -> Totals {
        Totals::of(self.semesters.iter().flat_map(|s| s.courses.iter()))
    }

    /// Courses of the semester at `index`
    ///
    /// # Errors
    /// Returns [`CollectionError::SemesterOutOfRange`] if `index` is past the end.
    pub fn courses(&self, index: usize) -> Result<&[Course], CollectionError> {
        self.semester(index).map(|s| s.courses.as_slice())
    }

    /// The semester at `index`
    ///
    /// # Errors
    /// Returns [`CollectionError::SemesterOutOfRange`] if `index` is past the end.
    pub fn semester(&self, index: usize) -> Result<&Semester, CollectionError> {
        self.semesters
            .get(index)
            .ok_or(CollectionError::SemesterOutOfRange {
                index,
                count: self.semesters.len(),
            })
    }

    /// All semesters in order
    #[must_use]
    pub fn semesters(&self) -> &[Semester] {
        &self.semesters
    }

    /// Number of semesters (never zero)
    #[must_use]
    pub fn semester_count(&self) -> usize {
        self.semesters.len()
    }

    fn semester_mut(&mut self, index: usize) -> Result<&mut Semester, CollectionError> {
        let count = self.semesters.len();
        self.semesters
            .get_mut(index)
            .ok_or(CollectionError::SemesterOutOfRange { index, count })
    }

    fn check_semester(&self, index: usize) -> Result<(), CollectionError> {
        self.semester(index).map(|_| ())
    }

    fn check_course(&self, semester: usize, index: usize) -> Result<(), CollectionError> {
        let count = self.courses(semester)?.len();
        if index < count {
            Ok(())
        } else {
            Err(CollectionError::CourseOutOfRange {
                semester,
                index,
                count,
            })
        }
    }
}

impl Default for SemesterCollection {
    fn default() -> Self {
        Self::new()
    }
}
