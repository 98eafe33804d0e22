//! GPA and CGPA aggregation.
//!
//! Both averages are pooled: total quality points over total credit hours.
//! CGPA is *not* the mean of semester GPAs; a semester with a heavier credit
//! load weighs proportionally more. Values are returned at full precision,
//! rounding happens only in [`format_gpa`].

use super::models::Course;

/// Running sums behind a pooled average
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    /// Sum of quality points
    pub quality_points: f64,
    /// Sum of credit hours
    pub credit_hours: u64,
}

impl Totals {
    /// Accumulate totals over a set of courses
    #[must_use]
    pub fn of<'a, I>(courses: I) -> Self
    where
        I: IntoIterator<Item = &'a Course>,
    {
        courses.into_iter().fold(Self::default(), |acc, course| Self {
            quality_points: acc.quality_points + course.quality_points(),
            credit_hours: acc.credit_hours + u64::from(course.credit_hours),
        })
    }

    /// Quality points divided by credit hours, or `0.0` when there are no credit hours
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average(&self) -> f64 {
        if self.credit_hours == 0 {
            0.0
        } else {
            self.quality_points / self.credit_hours as f64
        }
    }
}

/// GPA for a single semester's courses.
///
/// Returns `0.0` for an empty list or when every course carries zero credit hours.
#[must_use]
pub fn calculate_gpa(courses: &[Course]) -> f64 {
    Totals::of(courses).average()
}

/// CGPA across semesters, pooling every course of every semester.
///
/// Equivalent to [`calculate_gpa`] on the concatenation of all semesters.
#[must_use]
pub fn calculate_cgpa<S: AsRef<[Course]>>(semesters: &[S]) -> f64 {
    Totals::of(semesters.iter().flat_map(|s| s.as_ref().iter())).average()
}

/// Render an average with a fixed number of decimals (e.g., `3.67`)
#[must_use]
pub fn format_gpa(value: f64, precision: usize) -> String {
    format!("{value:.precision$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_gpa() {
        assert!(calculate_gpa(&[]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_credit_gpa() {
        let courses = vec![Course::new("A", 0, "A"), Course::new("B", 0, "F")];
        assert!(calculate_gpa(&courses).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_semester_gpa() {
        let courses = vec![Course::new("Math", 3, "A"), Course::new("Physics", 4, "B")];
        assert!(approx(calculate_gpa(&courses), 31.0 / 7.0));
    }

    #[test]
    fn test_gpa_order_independent() {
        let mut courses = vec![
            Course::new("Math", 3, "A"),
            Course::new("Physics", 4, "B"),
            Course::new("History", 2, "E"),
        ];
        let forward = calculate_gpa(&courses);
        courses.reverse();
        assert!(approx(forward, calculate_gpa(&courses)));
        courses.swap(0, 1);
        assert!(approx(forward, calculate_gpa(&courses)));
    }

    #[test]
    fn test_cgpa_is_pooled() {
        let sem1 = vec![Course::new("Math", 3, "A"), Course::new("Physics", 4, "B")];
        let sem2 = vec![Course::new("History", 2, "C")];
        let cgpa = calculate_cgpa(&[sem1.clone(), sem2.clone()]);

        assert!(approx(cgpa, 37.0 / 9.0));
        let naive_mean = (calculate_gpa(&sem1) + calculate_gpa(&sem2)) / 2.0;
        assert!(!approx(cgpa, naive_mean));
    }

    #[test]
    fn test_cgpa_matches_flattened_gpa() {
        let semesters = vec![
            vec![Course::new("a", 1, "B"), Course::new("b", 6, "D")],
            vec![],
            vec![Course::new("c", 5, "a"), Course::new("d", 0, "C")],
        ];
        let flat: Vec<Course> = semesters.iter().flatten().cloned().collect();
        assert!(approx(calculate_cgpa(&semesters), calculate_gpa(&flat)));
    }

    #[test]
    fn test_cgpa_empty_inputs() {
        let none: Vec<Vec<Course>> = Vec::new();
        assert!(calculate_cgpa(&none).abs() < f64::EPSILON);
        assert!(calculate_cgpa(&[Vec::<Course>::new(), Vec::new()]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_totals() {
        let courses = vec![Course::new("Math", 3, "A"), Course::new("Physics", 4, "B")];
        let totals = Totals::of(&courses);
        assert_eq!(totals.credit_hours, 7);
        assert!(approx(totals.quality_points, 31.0));
    }

    #[test]
    fn test_format_gpa() {
        assert_eq!(format_gpa(31.0 / 7.0, 2), "4.43");
        assert_eq!(format_gpa(37.0 / 9.0, 2), "4.11");
        assert_eq!(format_gpa(11.0 / 3.0, 2), "3.67");
        assert_eq!(format_gpa(0.0, 2), "0.00");
        assert_eq!(format_gpa(3.0, 1), "3.0");
    }
}
