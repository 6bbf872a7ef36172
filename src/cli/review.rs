//! Interactive step review
//!
//! A line-oriented editor over the proposed step list, driving the session's
//! editing transitions. Reads commands from any `BufRead` so tests can feed a
//! scripted transcript; the real CLI passes stdin.
//!
//! Commands: `list`, `add <text>`, `edit <n> <text>`, `rm <n>`, `mv <n> <m>`,
//! `done`, `cancel`. Positions are 1-based as displayed.

use crate::session::Session;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// How the user left the review stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// Proceed with the full generation call.
    Confirmed,
    /// Abandon the session without generating.
    Cancelled,
}

const HELP: &str = "Commands:\n\
  list             show the current steps\n\
  add <text>       append a new step\n\
  edit <n> <text>  replace the description of step n\n\
  rm <n>           delete step n\n\
  mv <n> <m>       move step n to position m\n\
  done             confirm the plan and generate the playbook\n\
  cancel           quit without generating\n";

/// Runs the review loop until the user confirms or cancels.
///
/// Reaching end of input without an explicit decision counts as cancelling.
pub fn run_review<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    output: &mut W,
) -> io::Result<ReviewOutcome> {
    writeln!(output, "Proposed steps (edit, then `done` to generate):")?;
    print_steps(session, output)?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        debug!(command = line, "Review command");
        let (command, rest) = split_command(line);

        match command {
            "list" => print_steps(session, output)?,
            "add" => {
                if rest.is_empty() {
                    writeln!(output, "Usage: add <text>")?;
                } else {
                    session.add_step(rest);
                    print_steps(session, output)?;
                }
            }
            "edit" => match split_position(rest, session) {
                Some((id, text)) if !text.is_empty() => {
                    // The id was just resolved from the list, so this cannot fail.
                    let _ = session.update_step(&id, text);
                    print_steps(session, output)?;
                }
                _ => writeln!(output, "Usage: edit <n> <text>")?,
            },
            "rm" => match resolve_position(rest, session) {
                Some(id) => {
                    let _ = session.remove_step(&id);
                    print_steps(session, output)?;
                }
                None => writeln!(output, "Usage: rm <n>")?,
            },
            "mv" => match parse_move(rest, session) {
                Some((from, to)) => {
                    let _ = session.move_step(from, to);
                    print_steps(session, output)?;
                }
                None => writeln!(output, "Usage: mv <n> <m>")?,
            },
            "done" => return Ok(ReviewOutcome::Confirmed),
            "cancel" | "quit" | "exit" => return Ok(ReviewOutcome::Cancelled),
            "help" => write!(output, "{}", HELP)?,
            other => writeln!(output, "Unknown command '{}'. Try `help`.", other)?,
        }
    }

    Ok(ReviewOutcome::Cancelled)
}

fn print_steps<W: Write>(session: &Session, output: &mut W) -> io::Result<()> {
    if session.steps().is_empty() {
        writeln!(output, "  (no steps)")?;
        return Ok(());
    }
    for (index, step) in session.steps().iter().enumerate() {
        writeln!(output, "  {}. {}", index + 1, step.description)?;
    }
    Ok(())
}

fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    }
}

/// Resolves a 1-based display position to a step id.
fn resolve_position(arg: &str, session: &Session) -> Option<String> {
    let position: usize = arg.trim().parse().ok()?;
    let step = session.steps().get(position.checked_sub(1)?)?;
    Some(step.id.clone())
}

/// Splits "<n> <text>" into a resolved step id and the new description.
fn split_position<'a>(rest: &'a str, session: &Session) -> Option<(String, &'a str)> {
    let (position, text) = split_command(rest);
    let id = resolve_position(position, session)?;
    Some((id, text))
}

/// Parses "<n> <m>" into zero-based move positions.
fn parse_move(rest: &str, session: &Session) -> Option<(usize, usize)> {
    let (from, to) = split_command(rest);
    let from: usize = from.trim().parse().ok()?;
    let to: usize = to.trim().parse().ok()?;
    let len = session.steps().len();
    if from == 0 || to == 0 || from > len || to > len {
        return None;
    }
    Some((from - 1, to - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::types::{GenerationOptions, Step};
    use std::io::Cursor;

    fn session() -> Session {
        let mut session = Session::new("install nginx", GenerationOptions::default());
        session.apply_validation(vec![
            Step::new("1", "Set up playbook structure"),
            Step::new("2", "Define variables"),
            Step::new("3", "Implement tasks"),
        ]);
        session
    }

    fn run(script: &str, session: &mut Session) -> (ReviewOutcome, String) {
        let mut output = Vec::new();
        let outcome = run_review(session, Cursor::new(script), &mut output).unwrap();
        (outcome, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_done_confirms() {
        let mut session = session();
        let (outcome, output) = run("done\n", &mut session);

        assert_eq!(outcome, ReviewOutcome::Confirmed);
        assert!(output.contains("1. Set up playbook structure"));
    }

    #[test]
    fn test_end_of_input_cancels() {
        let mut session = session();
        let (outcome, _) = run("list\n", &mut session);
        assert_eq!(outcome, ReviewOutcome::Cancelled);
    }

    #[test]
    fn test_edit_by_display_position() {
        let mut session = session();
        run("edit 2 Define variables and handlers\ndone\n", &mut session);

        assert_eq!(session.steps()[1].description, "Define variables and handlers");
    }

    #[test]
    fn test_add_and_remove() {
        let mut session = session();
        run("add Verify nginx is serving\nrm 1\ndone\n", &mut session);

        let descriptions: Vec<_> = session
            .steps()
            .iter()
            .map(|s| s.description.as_str())
            .collect();
        assert_eq!(
            descriptions,
            vec![
                "Define variables",
                "Implement tasks",
                "Verify nginx is serving"
            ]
        );
    }

    #[test]
    fn test_move_reorders_with_one_based_positions() {
        let mut session = session();
        run("mv 3 1\ndone\n", &mut session);

        assert_eq!(session.steps()[0].description, "Implement tasks");
        assert_eq!(session.steps()[1].description, "Set up playbook structure");
    }

    #[test]
    fn test_bad_positions_print_usage() {
        let mut session = session();
        let (_, output) = run("rm 9\nmv 0 1\nedit x text\ndone\n", &mut session);

        assert!(output.contains("Usage: rm <n>"));
        assert!(output.contains("Usage: mv <n> <m>"));
        assert!(output.contains("Usage: edit <n> <text>"));
        assert_eq!(session.steps().len(), 3);
    }

    #[test]
    fn test_unknown_command_suggests_help() {
        let mut session = session();
        let (_, output) = run("frobnicate\ncancel\n", &mut session);
        assert!(output.contains("Unknown command 'frobnicate'"));
    }
}
