//! Course model

use crate::core::error::CollectionError;
use crate::core::grade_scale::GradeScale;
use std::fmt;
use std::str::FromStr;

/// Credit hours stored when a credit edit cannot be parsed
pub const DEFAULT_CREDIT_HOURS: u32 = 1;

/// A single graded course
///
/// No validation happens here: names may be empty, credit hours need not be one
/// of [`GradeScale::CREDIT_OPTIONS`], and any grade string is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// Course name (e.g., "Linear Algebra"), free-form
    pub name: String,

    /// Credit hours carried by the course
    pub credit_hours: u32,

    /// Letter grade, resolved through [`GradeScale::point_of`]
    pub grade: String,
}

impl Course {
    /// Create a new course
    ///
    /// # Arguments
    /// * `name` - Course name
    /// * `credit_hours` - Credit hours
    /// * `grade` - Letter grade
    #[must_use]
    pub fn new(name: impl Into<String>, credit_hours: u32, grade: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            credit_hours,
            grade: grade.into(),
        }
    }

    /// Credit hours multiplied by the grade's point value, computed on every call
    #[must_use]
    pub fn quality_points(&self) -> f64 {
        f64::from(self.credit_hours) * GradeScale::point_of(&self.grade)
    }

    /// Apply a raw edit to one field.
    ///
    /// Credit-hours values go through [`parse_credit_hours`], so this never fails.
    pub fn apply_edit(&mut self, field: CourseField, value: &str) {
        match field {
            CourseField::Name => self.name = value.to_string(),
            CourseField::CreditHours => self.credit_hours = parse_credit_hours(value),
            CourseField::Grade => self.grade = value.to_string(),
        }
    }
}

impl Default for Course {
    /// An unnamed course with the first credit option and the first grade
    fn default() -> Self {
        Self::new(
            String::new(),
            GradeScale::default_credit_hours(),
            GradeScale::default_grade(),
        )
    }
}

/// Editable fields of a [`Course`]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CourseField {
    /// The course name
    Name,
    /// The credit-hours value
    CreditHours,
    /// The letter grade
    Grade,
}

impl FromStr for CourseField {
    type Err = CollectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "credits" | "credit" | "credit_hours" | "credit-hours" | "hours" => {
                Ok(Self::CreditHours)
            }
            "grade" => Ok(Self::Grade),
            _ => Err(CollectionError::UnknownField(s.to_string())),
        }
    }
}

impl fmt::Display for CourseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let as_str = match self {
            Self::Name => "name",
            Self::CreditHours => "credits",
            Self::Grade => "grade",
        };
        write!(f, "{as_str}")
    }
}

/// Parse a credit-hours edit, falling back to [`DEFAULT_CREDIT_HOURS`].
///
/// Surrounding whitespace is ignored. Anything that is not a non-negative
/// integer (empty, negative, fractional, text, overflow) yields the default
/// so a stray keystroke never blocks editing.
#[must_use]
pub fn parse_credit_hours(value: &str) -> u32 {
    value.trim().parse::<u32>().unwrap_or_else(|_| {
        crate::warn!(
            "Could not parse credit hours '{value}', using {DEFAULT_CREDIT_HOURS}"
        );
        DEFAULT_CREDIT_HOURS
    })
}
