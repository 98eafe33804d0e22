//! Editing session: a [`SemesterCollection`] bound to a [`GradeView`].
//!
//! Every mutating call is followed by exactly one `refresh_all`, so the view
//! always reflects the most recent completed edit. The session also tracks
//! which semester is currently selected, which is a presentation concept the
//! collection itself knows nothing about.

use super::collection::{SemesterCollection, Standing};
use super::error::CollectionError;
use super::models::{Course, CourseField, Semester};
use super::view::GradeView;

/// Collection plus the view it keeps up to date
#[derive(Debug)]
pub struct Session<V: GradeView> {
    collection: SemesterCollection,
    view: V,
    selected: usize,
}

impl<V: GradeView> Session<V> {
    /// Start a session with one empty semester and render it
    pub fn new(view: V) -> Self {
        Self::with_collection(SemesterCollection::new(), view)
    }

    /// Start a session over an existing collection and render it
    pub fn with_collection(collection: SemesterCollection, view: V) -> Self {
        let mut session = Self {
            collection,
            view,
            selected: 0,
        };
        session.refresh_all();
        session
    }

    /// Add a semester and select it
    pub fn add_semester(&mut self) -> usize {
        let index = self.collection.add_semester();
        self.selected = index;
        self.refresh_all();
        index
    }

    /// Remove a semester (confirmation already granted) and keep the selection in range
    ///
    /// # Errors
    /// See [`SemesterCollection::remove_semester`]. State is unchanged on error.
    pub fn remove_semester(&mut self, index: usize) -> Result<Semester, CollectionError> {
        let removed = self.collection.remove_semester(index)?;
        if self.selected > index || self.selected >= self.collection.semester_count() {
            self.selected = self.selected.saturating_sub(1);
        }
        self.refresh_all();
        Ok(removed)
    }

    /// Select the semester that course commands apply to
    ///
    /// # Errors
    /// Returns [`CollectionError::SemesterOutOfRange`] if `index` is past the end.
    pub fn select_semester(&mut self, index: usize) -> Result<(), CollectionError> {
        self.collection.semester(index)?;
        self.selected = index;
        Ok(())
    }

    /// Add a default course to a semester
    ///
    /// # Errors
    /// See [`SemesterCollection::add_course`].
    pub fn add_course(&mut self, semester: usize) -> Result<usize, CollectionError> {
        let index = self.collection.add_course(semester)?;
        self.refresh_all();
        Ok(index)
    }

    /// Add a filled-in course to a semester
    ///
    /// # Errors
    /// See [`SemesterCollection::push_course`].
    pub fn push_course(&mut self, semester: usize, course: Course) -> Result<usize, CollectionError> {
        let index = self.collection.push_course(semester, course)?;
        self.refresh_all();
        Ok(index)
    }

    /// Remove the selected course (`None` when nothing is selected)
    ///
    /// # Errors
    /// See [`SemesterCollection::remove_course`].
    pub fn remove_course(
        &mut self,
        semester: usize,
        course: Option<usize>,
    ) -> Result<Course, CollectionError> {
        let removed = self.collection.remove_course(semester, course)?;
        self.refresh_all();
        Ok(removed)
    }

    /// Apply a raw field edit
    ///
    /// # Errors
    /// See [`SemesterCollection::update_course`].
    pub fn update_course(
        &mut self,
        semester: usize,
        course: usize,
        field: CourseField,
        value: &str,
    ) -> Result<(), CollectionError> {
        self.collection
            .update_course(semester, course, field, value)?;
        self.refresh_all();
        Ok(())
    }

    /// Recompute and render all derived values
    pub fn refresh_all(&mut self) -> Standing {
        self.collection.refresh_all(&mut self.view)
    }

    /// Index of the currently selected semester
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Read access to the underlying collection
    #[must_use]
    pub const fn collection(&self) -> &SemesterCollection {
        &self.collection
    }

    /// Read access to the view
    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the view
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// GPA of the semester at `index`
    ///
    /// # Errors
    /// Returns [`CollectionError::SemesterOutOfRange`] if `index` is past the end.
    pub fn semester_gpa(&self, index: usize) -> Result<f64, CollectionError> {
        self.collection.semester_gpa(index)
    }

    /// Pooled GPA across all semesters
    #[must_use]
    pub fn cgpa(&self) -> f64 {
        self.collection.cgpa()
    }

    /// Courses of the semester at `index`
    ///
    /// # Errors
    /// Returns [`CollectionError::SemesterOutOfRange`] if `index` is past the end.
    pub fn courses(&self, index: usize) -> Result<&[Course], CollectionError> {
        self.collection.courses(index)
    }

    /// Number of semesters
    #[must_use]
    pub fn semester_count(&self) -> usize {
        self.collection.semester_count()
    }
}
