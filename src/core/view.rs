//! Presentation seam.
//!
//! The core pushes computed values out through [`GradeView`] and never reaches
//! into whatever renders them.

use super::models::Semester;

/// Receiver for recomputed display values
pub trait GradeView {
    /// Show the GPA of the semester at `index`
    fn render_semester_gpa(&mut self, index: usize, gpa: f64);

    /// Show the cumulative GPA
    fn render_cgpa(&mut self, cgpa: f64);

    /// Show the current list of semesters
    fn render_semester_list(&mut self, semesters: &[Semester]);
}

/// A view that discards everything, for callers that only read [`Standing`](super::collection::Standing)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl GradeView for NullView {
    fn render_semester_gpa(&mut self, _index: usize, _gpa: f64) {}
    fn render_cgpa(&mut self, _cgpa: f64) {}
    fn render_semester_list(&mut self, _semesters: &[Semester]) {}
}
