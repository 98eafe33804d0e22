//! Interactive session command
//!
//! A line-oriented editor over any reader/writer pair. Indices typed by the
//! user are 1-based; the library works with 0-based positions.

use crate::view::{write_scale, TerminalView};
use cgpa_calc::config::Config;
use cgpa_calc::core::{CollectionError, Course, CourseField, SemesterCollection, Session};
use cgpa_calc::core::models::parse_credit_hours;
use cgpa_calc::{debug, info};
use std::io::{self, BufRead, Write};

const HELP: &str = "\
Commands (N is a 1-based number):
  add-semester                 add a semester and select it
  remove-semester [N]          remove semester N (default: selected)
  select N                     select semester N
  add-course [NAME CR GRADE]   add a course to the selected semester
  remove-course [N]            remove course N from the selected semester
  set N FIELD VALUE            edit course N (FIELD: name, credits, grade)
  list                         show courses in the selected semester
  show                         show GPA for every semester and the CGPA
  scale                        show grades and credit options
  help                         show this help
  quit                         leave the session";

/// One parsed line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Append a semester
    AddSemester,
    /// Remove a semester (selected when `None`)
    RemoveSemester(Option<usize>),
    /// Change the selected semester
    Select(usize),
    /// Append a course, optionally filled in
    AddCourse(Option<Course>),
    /// Remove a course (no selection when `None`)
    RemoveCourse(Option<usize>),
    /// Edit one field of one course
    Set {
        /// 0-based course index
        course: usize,
        /// Field to edit
        field: CourseField,
        /// Raw value
        value: String,
    },
    /// Print the selected semester's courses
    List,
    /// Print the standing block
    Show,
    /// Print the grade scale
    Scale,
    /// Print help
    Help,
    /// End the session
    Quit,
}

impl SessionCommand {
    /// Parse one input line. Returns `Ok(None)` for blank lines.
    ///
    /// # Errors
    /// Returns a user-facing message for unknown commands or bad arguments
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        let Some((word, rest)) = split_word(line) else {
            return Ok(None);
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "add-semester" | "as" => Self::AddSemester,
            "remove-semester" | "rs" => Self::RemoveSemester(optional_index(rest)?),
            "select" | "sel" => Self::Select(required_index(rest, "select N")?),
            "add-course" | "ac" => Self::AddCourse(parse_course(rest)?),
            "remove-course" | "rc" => Self::RemoveCourse(optional_index(rest)?),
            "set" => {
                let usage = "set N FIELD VALUE";
                let (num, rest) = split_word(rest).ok_or_else(|| format!("Usage: {usage}"))?;
                let course = required_index(num, usage)?;
                let (field, value) = split_word(rest).ok_or_else(|| format!("Usage: {usage}"))?;
                let field = field.parse::<CourseField>().map_err(|e| e.to_string())?;
                Self::Set {
                    course,
                    field,
                    value: value.to_string(),
                }
            }
            "list" | "ls" => Self::List,
            "show" => Self::Show,
            "scale" => Self::Scale,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(format!("Unknown command '{other}'. Type 'help' for a list.")),
        };
        Ok(Some(command))
    }
}

/// Split off the first whitespace-delimited word
fn split_word(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if text.is_empty() {
        return None;
    }
    Some(
        text.split_once(char::is_whitespace)
            .map_or((text, ""), |(word, rest)| (word, rest.trim_start())),
    )
}

/// Parse a 1-based number into a 0-based index
fn parse_index(text: &str) -> Result<usize, String> {
    match text.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("'{}' is not a valid number (counting starts at 1)", text.trim())),
    }
}

fn optional_index(text: &str) -> Result<Option<usize>, String> {
    if text.trim().is_empty() {
        Ok(None)
    } else {
        parse_index(text).map(Some)
    }
}

fn required_index(text: &str, usage: &str) -> Result<usize, String> {
    if text.trim().is_empty() {
        return Err(format!("Usage: {usage}"));
    }
    parse_index(text)
}

const COURSE_USAGE: &str = "Usage: add-course [NAME CREDITS GRADE]";

/// Split off the last word, ignoring the run of whitespace before it
fn last_word(text: &str) -> Option<(&str, &str)> {
    text.rsplit_once(char::is_whitespace)
        .map(|(head, word)| (head.trim_end(), word))
}

/// `NAME CREDITS GRADE`, where NAME may contain spaces
fn parse_course(text: &str) -> Result<Option<Course>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    let Some((head, grade)) = last_word(text) else {
        return Err(COURSE_USAGE.to_string());
    };
    let Some((name, credits)) = last_word(head).filter(|(name, _)| !name.is_empty()) else {
        return Err(COURSE_USAGE.to_string());
    };
    Ok(Some(Course::new(name, parse_credit_hours(credits), grade)))
}

/// Ask a yes/no question on `out` and read the answer from `input`
fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> io::Result<bool> {
    write!(out, "{question} (y/n): ")?;
    out.flush()?;
    let mut response = String::new();
    input.read_line(&mut response)?;
    let response = response.trim();
    Ok(response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes"))
}

/// Run the interactive session on stdin/stdout
pub fn run(config: &Config) {
    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = run_with(&mut stdin.lock(), stdout.lock(), config) {
        eprintln!("✗ Session ended: {e}");
    }
}

/// Run a session over arbitrary input and output.
///
/// Returns the finished session so callers can inspect the final state.
///
/// # Errors
/// Returns an error only if reading input or writing output fails
pub fn run_with<R: BufRead, W: Write>(
    input: &mut R,
    out: W,
    config: &Config,
) -> io::Result<Session<TerminalView<W>>> {
    let mut view = TerminalView::new(out, config.display.precision);
    writeln!(
        view.out(),
        "CGPA Calculator v{} (type 'help' for commands)",
        cgpa_calc::get_version()
    )?;
    let mut session = Session::with_collection(
        SemesterCollection::with_prefix(config.semester_prefix()),
        view,
    );
    check_output(&mut session)?;
    info!("Session started");

    let mut line = String::new();
    loop {
        prompt(&mut session)?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(session.view_mut().out())?;
            break;
        }
        let command = match SessionCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(msg) => {
                writeln!(session.view_mut().out(), "✗ {msg}")?;
                continue;
            }
        };
        debug!("Session command: {command:?}");
        if command == SessionCommand::Quit {
            break;
        }
        execute(&mut session, command, input, config)?;
        check_output(&mut session)?;
    }

    info!("Session finished with {} semester(s)", session.semester_count());
    Ok(session)
}

/// Surface a write error the view hit while rendering the standing
fn check_output<W: Write>(session: &mut Session<TerminalView<W>>) -> io::Result<()> {
    session.view_mut().take_error().map_or(Ok(()), Err)
}

fn prompt<W: Write>(session: &mut Session<TerminalView<W>>) -> io::Result<()> {
    let selected = session.selected();
    let label = session
        .collection()
        .semester(selected)
        .map(|s| s.label.clone())
        .unwrap_or_default();
    let out = session.view_mut().out();
    write!(out, "[{label}]> ")?;
    out.flush()
}

fn execute<R: BufRead, W: Write>(
    session: &mut Session<TerminalView<W>>,
    command: SessionCommand,
    input: &mut R,
    config: &Config,
) -> io::Result<()> {
    let selected = session.selected();
    let result = match command {
        SessionCommand::AddSemester => {
            session.add_semester();
            Ok(())
        }
        SessionCommand::RemoveSemester(index) => {
            let index = index.unwrap_or(selected);
            return remove_semester(session, index, input, config);
        }
        SessionCommand::Select(index) => session.select_semester(index),
        SessionCommand::AddCourse(course) => match course {
            Some(course) => session.push_course(selected, course).map(|_| ()),
            None => session.add_course(selected).map(|_| ()),
        },
        SessionCommand::RemoveCourse(index) => session.remove_course(selected, index).map(|_| ()),
        SessionCommand::Set {
            course,
            field,
            value,
        } => session.update_course(selected, course, field, &value),
        SessionCommand::List => return list_courses(session),
        SessionCommand::Show => {
            session.refresh_all();
            Ok(())
        }
        SessionCommand::Scale => return write_scale(session.view_mut().out()),
        SessionCommand::Help => return writeln!(session.view_mut().out(), "{HELP}"),
        SessionCommand::Quit => Ok(()),
    };

    match result {
        Err(e) => report(session.view_mut().out(), &e),
        Ok(()) => Ok(()),
    }
}

/// Print a refused operation, with a numbering hint for stale indices
fn report<W: Write>(out: &mut W, err: &CollectionError) -> io::Result<()> {
    writeln!(out, "✗ {err}")?;
    if err.is_index() {
        writeln!(out, "  (use 'list' for course numbers and 'show' for semesters)")?;
    }
    Ok(())
}

fn remove_semester<R: BufRead, W: Write>(
    session: &mut Session<TerminalView<W>>,
    index: usize,
    input: &mut R,
    config: &Config,
) -> io::Result<()> {
    if session.semester_count() <= 1 {
        return report(session.view_mut().out(), &CollectionError::LastSemester);
    }
    let label = match session.collection().semester(index) {
        Ok(semester) => semester.label.clone(),
        Err(e) => return report(session.view_mut().out(), &e),
    };

    if config.display.confirm_removal {
        let question = format!("Remove \"{label}\" and all its courses?");
        if !confirm(input, session.view_mut().out(), &question)? {
            return writeln!(session.view_mut().out(), "✗ Removal cancelled");
        }
    }

    match session.remove_semester(index) {
        Ok(removed) => writeln!(session.view_mut().out(), "✓ Removed {}", removed.label),
        Err(e) => report(session.view_mut().out(), &e),
    }
}

fn list_courses<W: Write>(session: &mut Session<TerminalView<W>>) -> io::Result<()> {
    let selected = session.selected();
    let courses: Vec<Course> = session
        .courses(selected)
        .map(<[Course]>::to_vec)
        .unwrap_or_default();
    let gpa = session.semester_gpa(selected).unwrap_or(0.0);
    let gpa = session.view().format(gpa);
    let out = session.view_mut().out();

    if courses.is_empty() {
        writeln!(out, "  (no courses)")?;
    }
    for (idx, course) in courses.iter().enumerate() {
        let name = if course.name.is_empty() {
            "(unnamed)"
        } else {
            &course.name
        };
        writeln!(
            out,
            "  {:>2}. {name:<30} {:>2} cr  {}",
            idx + 1,
            course.credit_hours,
            course.grade
        )?;
    }
    writeln!(out, "  Semester GPA: {gpa}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn test_config(confirm_removal: bool) -> Config {
        let mut config = Config::default();
        config.display.precision = 2;
        config.display.confirm_removal = confirm_removal;
        config
    }

    fn run_script(script: &str, confirm_removal: bool) -> (String, SemesterCollection) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut buf = Vec::new();
        let session = run_with(&mut input, &mut buf, &test_config(confirm_removal)).unwrap();
        let collection = session.collection().clone();
        drop(session);
        (String::from_utf8(buf).unwrap(), collection)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(SessionCommand::parse("   "), Ok(None));
        assert_eq!(
            SessionCommand::parse("add-semester"),
            Ok(Some(SessionCommand::AddSemester))
        );
        assert_eq!(
            SessionCommand::parse("remove-semester 2"),
            Ok(Some(SessionCommand::RemoveSemester(Some(1))))
        );
        assert_eq!(
            SessionCommand::parse("rc"),
            Ok(Some(SessionCommand::RemoveCourse(None)))
        );
        assert_eq!(
            SessionCommand::parse("set 1 name Linear Algebra II"),
            Ok(Some(SessionCommand::Set {
                course: 0,
                field: CourseField::Name,
                value: "Linear Algebra II".to_string(),
            }))
        );
        assert_eq!(
            SessionCommand::parse("add-course Organic Chemistry 4 b"),
            Ok(Some(SessionCommand::AddCourse(Some(Course::new(
                "Organic Chemistry",
                4,
                "b"
            )))))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(SessionCommand::parse("launch").is_err());
        assert!(SessionCommand::parse("select").is_err());
        assert!(SessionCommand::parse("select 0").is_err());
        assert!(SessionCommand::parse("set 1 colour red").is_err());
        assert!(SessionCommand::parse("add-course Math 3").is_err());
        assert!(SessionCommand::parse("add-course 3  A").is_err());
    }

    #[test]
    fn test_parse_course_tolerates_extra_spaces() {
        assert_eq!(
            SessionCommand::parse("add-course Math 3  A"),
            Ok(Some(SessionCommand::AddCourse(Some(Course::new("Math", 3, "A")))))
        );
        assert_eq!(
            SessionCommand::parse("ac  Linear  Algebra \t 4   B  "),
            Ok(Some(SessionCommand::AddCourse(Some(Course::new(
                "Linear  Algebra",
                4,
                "B"
            )))))
        );
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
    fn test_output_failure_ends_session() {
        let mut input = Cursor::new(b"add-course Math 3 A\n".to_vec());
        let result = run_with(&mut input, ClosedPipe, &test_config(true));
        assert_eq!(result.err().map(|e| e.kind()), Some(io::ErrorKind::BrokenPipe));
    }

    #[test]
    fn test_render_failure_is_surfaced() {
        let mut session = Session::with_collection(
            SemesterCollection::new(),
            TerminalView::new(ClosedPipe, 2),
        );
        let err = check_output(&mut session).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);

        session.add_semester();
        assert!(check_output(&mut session).is_err());
        assert!(check_output(&mut session).is_ok());
    }

    #[test]
    fn test_index_error_hint() {
        let (text, _) = run_script("remove-course 4\n", true);
        assert!(text.contains("course 3 does not exist"));
        assert!(text.contains("use 'list' for course numbers"));

        let (text, _) = run_script("remove-semester\n", true);
        assert!(!text.contains("use 'list'"));
    }

    #[test]
    fn test_scenario_two_semesters() {
        let script = "\
add-course Math 3 A
add-course Physics 4 B
add-semester
add-course History 2 C
quit
";
        let (text, collection) = run_script(script, true);
        assert_eq!(collection.semester_count(), 2);
        assert!((collection.cgpa() - 37.0 / 9.0).abs() < 1e-9);
        assert!(text.contains("Semester GPA: 4.43"));
        assert!(text.contains("Semester GPA: 3.00"));
        assert!(text.contains("CGPA: 4.11"));
    }

    #[test]
    fn test_bad_credit_edit_falls_back() {
        let script = "add-course\nset 1 credits abc\nset 1 grade B\n";
        let (_, collection) = run_script(script, true);
        let course = &collection.courses(0).unwrap()[0];
        assert_eq!(course.credit_hours, 1);
        assert!((collection.semester_gpa(0).unwrap() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_remove_last_semester_refused() {
        let (text, collection) = run_script("remove-semester\n", true);
        assert!(text.contains("You must have at least one semester."));
        assert_eq!(collection.semester_count(), 1);
    }

    #[test]
    fn test_remove_semester_confirmation() {
        let (text, collection) = run_script("add-semester\nremove-semester 1\nn\n", true);
        assert!(text.contains("Remove \"Semester 1\" and all its courses?"));
        assert!(text.contains("Removal cancelled"));
        assert_eq!(collection.semester_count(), 2);

        let (text, collection) = run_script("add-semester\nremove-semester 1\ny\n", true);
        assert!(text.contains("✓ Removed Semester 1"));
        assert_eq!(collection.semester_count(), 1);
        assert_eq!(collection.semesters()[0].label, "Semester 2");
    }

    #[test]
    fn test_remove_without_confirmation() {
        let (_, collection) = run_script("add-semester\nremove-semester\n", false);
        assert_eq!(collection.semester_count(), 1);
        assert_eq!(collection.semesters()[0].label, "Semester 1");
    }

    #[test]
    fn test_remove_course_without_selection() {
        let (text, collection) = run_script("add-course\nremove-course\n", true);
        assert!(text.contains("Please select a course to remove."));
        assert_eq!(collection.courses(0).unwrap().len(), 1);
    }

    #[test]
    fn test_empty_semester_leaves_cgpa() {
        let script = "add-course Math 3 A\nadd-semester\nshow\n";
        let (text, collection) = run_script(script, true);
        assert!(text.contains("Semester GPA: 0.00"));
        assert!((collection.cgpa() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_command_reported() {
        let (text, _) = run_script("frobnicate\n", true);
        assert!(text.contains("Unknown command 'frobnicate'"));
    }
}
