//! One-shot GPA/CGPA computation from command-line arguments

use crate::view::TerminalView;
use cgpa_calc::config::Config;
use cgpa_calc::core::models::parse_credit_hours;
use cgpa_calc::core::{Course, SemesterCollection};
use cgpa_calc::{error, verbose};
use std::io::{self, Write};

/// Parse one semester given as comma-separated `NAME:CREDITS:GRADE` entries.
///
/// An empty string is an empty semester. Credit values that are not
/// non-negative integers fall back to the default like any other edit.
///
/// # Errors
/// Returns a message naming the entry that does not have all three parts
pub fn parse_semester(arg: &str) -> Result<Vec<Course>, String> {
    arg.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let mut parts = entry.rsplitn(3, ':');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(grade), Some(credits), Some(name)) => Ok(Course::new(
                    name.trim(),
                    parse_credit_hours(credits),
                    grade.trim(),
                )),
                _ => Err(format!(
                    "✗ Invalid course '{entry}' (expected NAME:CREDITS:GRADE)"
                )),
            }
        })
        .collect()
}

/// Build a collection from semester arguments, one semester per argument
///
/// # Errors
/// Returns the first parse error
pub fn build_collection(args: &[String], prefix: &str) -> Result<SemesterCollection, String> {
    let mut collection = SemesterCollection::with_prefix(prefix);
    for (idx, arg) in args.iter().enumerate() {
        let semester = if idx == 0 {
            0
        } else {
            collection.add_semester()
        };
        for course in parse_semester(arg)? {
            collection
                .push_course(semester, course)
                .map_err(|e| format!("✗ {e}"))?;
        }
    }
    Ok(collection)
}

/// Run the calc command. Returns `false` if the input was malformed.
pub fn run(args: &[String], config: &Config) -> bool {
    let stdout = io::stdout();
    match run_with(args, config, stdout.lock()) {
        Ok(()) => true,
        Err(e) => {
            error!("Calc failed: {e}");
            eprintln!("{e}");
            false
        }
    }
}

/// Run the calc command writing to `out`
///
/// # Errors
/// Returns a user-facing message for malformed input or output failures
pub fn run_with<W: Write>(args: &[String], config: &Config, out: W) -> Result<(), String> {
    let collection = build_collection(args, config.semester_prefix())?;
    let mut view = TerminalView::new(out, config.display.precision);
    let standing = collection.refresh_all(&mut view);

    let totals = collection.totals();
    verbose!(
        "Pooled {:.4} quality points over {} credit hours (CGPA {})",
        totals.quality_points,
        totals.credit_hours,
        view.format(standing.cgpa)
    );
    if let Some(e) = view.take_error() {
        return Err(format!("✗ Failed to write output: {e}"));
    }
    view.out()
        .flush()
        .map_err(|e| format!("✗ Failed to write output: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_semester() {
        let courses = parse_semester("Math:3:A, Physics:4:B").unwrap();
        assert_eq!(
            courses,
            vec![Course::new("Math", 3, "A"), Course::new("Physics", 4, "B")]
        );
    }

    #[test]
    fn test_parse_semester_edge_cases() {
        assert!(parse_semester("").unwrap().is_empty());
        assert_eq!(
            parse_semester("Intro: Logic:x:C").unwrap(),
            vec![Course::new("Intro: Logic", 1, "C")]
        );
        assert!(parse_semester("Math:3").is_err());
    }

    #[test]
    fn test_build_and_render() {
        let args = vec![
            "Math:3:A,Physics:4:B".to_string(),
            "History:2:C".to_string(),
            String::new(),
        ];
        let collection = build_collection(&args, "Term").unwrap();
        assert_eq!(collection.semester_count(), 3);
        assert_eq!(collection.semesters()[2].label, "Term 3");
        assert!((collection.cgpa() - 37.0 / 9.0).abs() < 1e-9);

        let mut buf = Vec::new();
        run_with(&args, &Config::default(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("CGPA: 4.11"));
        assert!(text.contains("Semester GPA: 0.00"));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_output_failure_is_an_error() {
        let args = vec!["Math:3:A".to_string()];
        let result = run_with(&args, &Config::default(), ClosedPipe);
        assert!(result.unwrap_err().contains("Failed to write output"));
    }
}
