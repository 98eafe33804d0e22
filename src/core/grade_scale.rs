//! Fixed 5-point grading scale

/// Letter-grade to point conversion plus the choices offered to editors.
///
/// This is the only place point values are defined; everything else resolves
/// grades through [`GradeScale::point_of`].
#[derive(Debug, Clone, Copy)]
pub struct GradeScale;

impl GradeScale {
    /// Recognized letter grades, in the order editors should offer them.
    /// The first entry is the default for new courses.
    pub const GRADES: [&'static str; 6] = ["A", "B", "C", "D", "E", "F"];

    /// Permitted credit-hour values. The first entry is the default for new courses.
    pub const CREDIT_OPTIONS: [u32; 6] = [1, 2, 3, 4, 5, 6];

    /// Point value for each entry in [`GradeScale::GRADES`].
    const POINTS: [f64; 6] = [5.0, 4.0, 3.0, 2.0, 1.0, 0.0];

    /// Convert a letter grade to its point value.
    ///
    /// Matching is case-insensitive and exact: `"b"` resolves to `4.0` but
    /// `" B"` or `"B+"` do not. Anything unrecognized resolves to `0.0`.
    #[must_use]
    pub fn point_of(grade: &str) -> f64 {
        Self::GRADES
            .iter()
            .position(|g| g.eq_ignore_ascii_case(grade))
            .map_or(0.0, |idx| Self::POINTS[idx])
    }

    /// Default grade for a freshly added course
    #[must_use]
    pub const fn default_grade() -> &'static str {
        Self::GRADES[0]
    }

    /// Default credit hours for a freshly added course
    #[must_use]
    pub const fn default_credit_hours() -> u32 {
        Self::CREDIT_OPTIONS[0]
    }

    /// Iterate over `(grade, points)` pairs in display order
    pub fn entries() -> impl Iterator<Item = (&'static str, f64)> {
        Self::GRADES.into_iter().zip(Self::POINTS)
    }
}
