//! The interactive loop around the grush kernel.
//!
//! Owns only terminal concerns: line editing, persistent history, the
//! `> ` prompt, and the `< ` / `error: ` output prefixes. Everything
//! between a line and its result lives in the kernel.

use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;
use grush_kernel::{render, GraphStore, Shell, ShellError};
use grush_types::Value;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::warn;

/// Run one line and print its outcome with the same `< ` / `error: `
/// prefixes the interactive loop uses. Returns false when the line
/// failed.
pub fn run_line<S: GraphStore>(shell: &mut Shell<S>, line: &str) -> bool {
    match shell.eval_line(line) {
        Ok(value) => {
            print_result(&value);
            true
        }
        Err(err) => {
            println!("{}", error_line(&err));
            false
        }
    }
}

/// The interactive read-eval-print loop.
///
/// Empty input repeats the previous line. `exit` and `quit` terminate;
/// so does end of input. A failed line prints `error: ...` and the loop
/// keeps reading.
pub fn run_interactive<S: GraphStore>(shell: &mut Shell<S>) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    let history = history_path();
    if let Some(path) = &history {
        // Missing history is normal on first run.
        let _ = editor.load_history(path);
    }

    let mut previous: Option<String> = None;
    loop {
        let line = match editor.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        let line = line.trim();

        let line = if line.is_empty() {
            match &previous {
                Some(previous) => previous.clone(),
                None => continue,
            }
        } else {
            line.to_string()
        };

        if line == "exit" || line == "quit" {
            break;
        }

        let _ = editor.add_history_entry(&line);
        match shell.eval_line(&line) {
            Ok(value) => print_result(&value),
            Err(err) => println!("{}", error_line(&err)),
        }
        previous = Some(line);
    }

    if let Some(path) = &history {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(err) = editor.save_history(path) {
            warn!(%err, "could not save history");
        }
    }
    Ok(())
}

/// Print a result after the `< ` marker; continuation lines are indented
/// to stay visually inside the result.
fn print_result(value: &Value) {
    let rendered = render(value);
    for (i, line) in rendered.lines().enumerate() {
        if i == 0 {
            println!("< {line}");
        } else {
            println!("  {line}");
        }
    }
    if rendered.is_empty() {
        println!("< ");
    }
}

fn error_line(err: &ShellError) -> String {
    format!("error: {err}")
}

fn history_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "grush").map(|dirs| dirs.data_dir().join("history.txt"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use grush_kernel::MemoryStore;

    #[test]
    fn run_line_reports_success_and_failure() {
        let mut shell = Shell::new(MemoryStore::new());
        assert!(run_line(&mut shell, "echo 1"));
        assert!(!run_line(&mut shell, "unknown_cmd"));
    }

    #[test]
    fn failures_carry_the_error_prefix() {
        let mut shell = Shell::new(MemoryStore::new());
        let err = shell.eval_line("unknown_cmd").unwrap_err();
        assert_eq!(error_line(&err), "error: unknown command: 'unknown_cmd'");
    }
}
