//! Plain-text rendering of GPA/CGPA for the terminal

use cgpa_calc::core::gpa::format_gpa;
use cgpa_calc::core::{GradeScale, GradeView, Semester};
use std::io::{self, Write};

/// Per-semester line collected until the CGPA arrives
#[derive(Debug, Clone)]
struct Row {
    label: String,
    courses: usize,
    credits: u64,
    gpa: f64,
}

/// [`GradeView`] that prints a standing block to a writer.
///
/// Values arrive in the order list, semester GPAs, CGPA; the block is printed
/// once the CGPA is rendered. Rendering cannot return errors, so the first
/// write failure is kept until [`TerminalView::take_error`] collects it.
#[derive(Debug)]
pub struct TerminalView<W: Write> {
    out: W,
    precision: usize,
    rows: Vec<Row>,
    error: Option<io::Error>,
}

impl<W: Write> TerminalView<W> {
    /// Create a view printing GPAs with `precision` decimals
    pub const fn new(out: W, precision: usize) -> Self {
        Self {
            out,
            precision,
            rows: Vec::new(),
            error: None,
        }
    }

    /// First write error hit while rendering, if any. Clears it.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    fn write_standing(&mut self, cgpa: f64) -> io::Result<()> {
        let width = self.rows.iter().map(|r| r.label.len()).max().unwrap_or(0);
        for (idx, row) in self.rows.iter().enumerate() {
            let plural = if row.courses == 1 { "" } else { "s" };
            writeln!(
                self.out,
                "  {:>2}. {:<width$}  {} course{plural}, {} cr  Semester GPA: {}",
                idx + 1,
                row.label,
                row.courses,
                row.credits,
                format_gpa(row.gpa, self.precision),
            )?;
        }
        writeln!(self.out, "  CGPA: {}", format_gpa(cgpa, self.precision))
    }

    /// Writer used for everything else the CLI prints
    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    /// Format a value with the configured precision
    pub fn format(&self, value: f64) -> String {
        format_gpa(value, self.precision)
    }
}

impl<W: Write> GradeView for TerminalView<W> {
    fn render_semester_list(&mut self, semesters: &[Semester]) {
        self.rows = semesters
            .iter()
            .map(|s| Row {
                label: s.label.clone(),
                courses: s.courses.len(),
                credits: s.total_credit_hours(),
                gpa: 0.0,
            })
            .collect();
    }

    fn render_semester_gpa(&mut self, index: usize, gpa: f64) {
        if let Some(row) = self.rows.get_mut(index) {
            row.gpa = gpa;
        }
    }

    fn render_cgpa(&mut self, cgpa: f64) {
        if let Err(e) = self.write_standing(cgpa) {
            self.error.get_or_insert(e);
        }
    }
}

/// Write the grade scale table
///
/// # Errors
/// Returns any error from the writer
pub fn write_scale<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Grade  Points")?;
    for (grade, points) in GradeScale::entries() {
        writeln!(out, "  {grade}    {points:.1}")?;
    }
    let credits: Vec<String> = GradeScale::CREDIT_OPTIONS
        .iter()
        .map(ToString::to_string)
        .collect();
    writeln!(out, "Credit hours: {}", credits.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgpa_calc::core::{Course, SemesterCollection};

    #[test]
    fn test_renders_standing_block() {
        let mut collection = SemesterCollection::new();
        collection.push_course(0, Course::new("Math", 3, "A")).unwrap();
        collection.push_course(0, Course::new("Physics", 4, "B")).unwrap();
        collection.add_semester();

        let mut buf = Vec::new();
        let mut view = TerminalView::new(&mut buf, 2);
        collection.refresh_all(&mut view);

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Semester 1"));
        assert!(text.contains("2 courses, 7 cr"));
        assert!(text.contains("Semester GPA: 4.43"));
        assert!(text.contains("Semester GPA: 0.00"));
        assert!(text.contains("CGPA: 4.43"));
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
    fn test_write_failure_is_kept() {
        let collection = SemesterCollection::new();
        let mut view = TerminalView::new(ClosedPipe, 2);
        collection.refresh_all(&mut view);

        let err = view.take_error().expect("write error should be recorded");
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(view.take_error().is_none());
    }

    #[test]
    fn test_scale_table() {
        let mut buf = Vec::new();
        write_scale(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("A    5.0"));
        assert!(text.contains("F    0.0"));
        assert!(text.contains("Credit hours: 1, 2, 3, 4, 5, 6"));
    }
}
