//! Sequential execution of a rename plan.
//!
//! Items are processed strictly in plan order. Collisions are checked
//! against the live filesystem immediately before each move, so a rename
//! performed earlier in the run can create (or clear) the destination a
//! later item sees. A single failure never stops the batch; only the user
//! can, by answering `q` to a per-item prompt.

use std::fs;
use std::io::BufRead;
use tracing::{info, warn};

use crate::output::Reporter;
use crate::plan::{RenameItem, RenamePlan};

/// Answer to a per-item confirmation prompt.
enum Answer {
    Yes,
    No,
    Quit,
}

/// Counts accumulated over one execution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    pub renamed: usize,
    pub skipped: usize,
    pub errored: usize,
    /// Set when the user quit mid-run; later items were never reached.
    pub aborted: bool,
}

/// Walk the plan and perform the renames.
///
/// With `interactive` set, each item is confirmed on `input` before the
/// move; `q` stops the run immediately and the remaining items are neither
/// processed nor counted.
pub fn execute_plan(
    plan: &RenamePlan,
    interactive: bool,
    input: &mut dyn BufRead,
    reporter: &mut Reporter,
) -> ExecutionResult {
    let mut result = ExecutionResult::default();

    for item in &plan.items {
        if item.destination_path.exists() {
            warn!(destination = %item.destination_name, "Destination exists, skipping");
            reporter.collision(&item.source_name, &item.destination_name);
            result.skipped += 1;
            continue;
        }

        if interactive {
            match ask(item, input, reporter) {
                Answer::Quit => {
                    info!("Aborted by user");
                    result.aborted = true;
                    break;
                }
                Answer::No => {
                    info!(name = %item.source_name, "Declined, skipping");
                    result.skipped += 1;
                    continue;
                }
                Answer::Yes => {}
            }
        }

        match fs::rename(&item.source_path, &item.destination_path) {
            Ok(()) => {
                info!(from = %item.source_name, to = %item.destination_name, "Renamed");
                reporter.renamed(&item.source_name, &item.destination_name);
                result.renamed += 1;
            }
            Err(err) => {
                warn!(from = %item.source_name, error = %err, "Rename failed");
                reporter.rename_error(&item.source_name, &err);
                result.errored += 1;
            }
        }
    }

    result
}

/// Whole-batch confirmation before a non-interactive live run.
///
/// Anything other than `y`/`Y` declines; so does end of input.
pub fn confirm_batch(input: &mut dyn BufRead, reporter: &mut Reporter) -> bool {
    reporter.proceed_prompt();

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => false,
        Ok(_) => line.trim().eq_ignore_ascii_case("y"),
    }
}

fn ask(item: &RenameItem, input: &mut dyn BufRead, reporter: &mut Reporter) -> Answer {
    reporter.confirm_prompt(&item.source_name, &item.destination_name);

    let mut line = String::new();
    match input.read_line(&mut line) {
        // End of input: the user can no longer answer, stop asking.
        Ok(0) | Err(_) => Answer::Quit,
        Ok(_) => match line.trim().to_lowercase().as_str() {
            "q" => Answer::Quit,
            "y" => Answer::Yes,
            _ => Answer::No,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    struct TestWriter(Arc<Mutex<Vec<u8>>>);

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn test_reporter() -> (Reporter, Arc<Mutex<Vec<u8>>>) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let reporter = Reporter::with_writer(Box::new(TestWriter(buffer.clone())));
        (reporter, buffer)
    }

    fn plan_for(dir: &Path, pairs: &[(&str, &str)]) -> RenamePlan {
        RenamePlan {
            items: pairs
                .iter()
                .map(|(from, to)| RenameItem::new(dir.join(from), to.to_string()))
                .collect(),
        }
    }

    fn no_input() -> Cursor<&'static [u8]> {
        Cursor::new(b"")
    }

    #[test]
    fn test_renames_every_item() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();

        let plan = plan_for(dir.path(), &[("a.txt", "x.txt"), ("b.txt", "y.txt")]);
        let (mut reporter, _) = test_reporter();

        let result = execute_plan(&plan, false, &mut no_input(), &mut reporter);

        assert_eq!(result.renamed, 2);
        assert_eq!(result.skipped, 0);
        assert_eq!(result.errored, 0);
        assert!(!result.aborted);
        assert!(dir.path().join("x.txt").exists());
        assert!(dir.path().join("y.txt").exists());
        assert!(!dir.path().join("a.txt").exists());
    }

    #[test]
    fn test_existing_destination_is_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("taken.txt"), "t").unwrap();

        let plan = plan_for(dir.path(), &[("a.txt", "taken.txt")]);
        let (mut reporter, buffer) = test_reporter();

        let result = execute_plan(&plan, false, &mut no_input(), &mut reporter);

        assert_eq!(result.renamed, 0);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.errored, 0);
        // Neither file was touched.
        assert!(dir.path().join("a.txt").exists());
        assert_eq!(fs::read_to_string(dir.path().join("taken.txt")).unwrap(), "t");

        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Target already exists: taken.txt"));
    }

    #[test]
    fn test_collision_created_by_earlier_rename() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("x1.txt"), "1").unwrap();
        fs::write(dir.path().join("x2.txt"), "2").unwrap();

        // Both items target the same destination; only the first can land.
        let plan = plan_for(dir.path(), &[("x1.txt", "x.txt"), ("x2.txt", "x.txt")]);
        let (mut reporter, _) = test_reporter();

        let result = execute_plan(&plan, false, &mut no_input(), &mut reporter);

        assert_eq!(result.renamed, 1);
        assert_eq!(result.skipped, 1);
        assert_eq!(fs::read_to_string(dir.path().join("x.txt")).unwrap(), "1");
        assert!(dir.path().join("x2.txt").exists());
    }

    #[test]
    fn test_missing_source_counts_as_error() {
        let dir = tempdir().unwrap();

        let plan = plan_for(dir.path(), &[("ghost.txt", "real.txt")]);
        let (mut reporter, buffer) = test_reporter();

        let result = execute_plan(&plan, false, &mut no_input(), &mut reporter);

        assert_eq!(result.renamed, 0);
        assert_eq!(result.skipped, 0);
        assert_eq!(result.errored, 1);
        assert!(!result.aborted);

        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Error renaming ghost.txt"));
    }

    #[test]
    fn test_error_does_not_stop_batch() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();

        let plan = plan_for(dir.path(), &[("ghost.txt", "x.txt"), ("b.txt", "y.txt")]);
        let (mut reporter, _) = test_reporter();

        let result = execute_plan(&plan, false, &mut no_input(), &mut reporter);

        assert_eq!(result.errored, 1);
        assert_eq!(result.renamed, 1);
        assert!(dir.path().join("y.txt").exists());
    }

    #[test]
    fn test_interactive_yes_and_no() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();

        let plan = plan_for(dir.path(), &[("a.txt", "x.txt"), ("b.txt", "y.txt")]);
        let (mut reporter, _) = test_reporter();
        let mut input = Cursor::new(b"y\nn\n".to_vec());

        let result = execute_plan(&plan, true, &mut input, &mut reporter);

        assert_eq!(result.renamed, 1);
        assert_eq!(result.skipped, 1);
        assert!(!result.aborted);
        assert!(dir.path().join("x.txt").exists());
        assert!(dir.path().join("b.txt").exists());
    }

    #[test]
    fn test_interactive_quit_stops_immediately() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("c.txt"), "c").unwrap();

        let plan = plan_for(
            dir.path(),
            &[("a.txt", "x.txt"), ("b.txt", "y.txt"), ("c.txt", "z.txt")],
        );
        let (mut reporter, _) = test_reporter();
        let mut input = Cursor::new(b"y\nq\n".to_vec());

        let result = execute_plan(&plan, true, &mut input, &mut reporter);

        assert!(result.aborted);
        assert_eq!(result.renamed, 1);
        // The quit item and everything after it are uncounted.
        assert_eq!(result.skipped, 0);
        assert_eq!(result.errored, 0);
        assert!(dir.path().join("b.txt").exists());
        assert!(dir.path().join("c.txt").exists());
    }

    #[test]
    fn test_interactive_end_of_input_aborts() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();

        let plan = plan_for(dir.path(), &[("a.txt", "x.txt")]);
        let (mut reporter, _) = test_reporter();

        let result = execute_plan(&plan, true, &mut no_input(), &mut reporter);

        assert!(result.aborted);
        assert_eq!(result.renamed, 0);
        assert!(dir.path().join("a.txt").exists());
    }

    #[test]
    fn test_confirm_batch_answers() {
        let (mut reporter, _) = test_reporter();
        assert!(confirm_batch(&mut Cursor::new(b"y\n".to_vec()), &mut reporter));
        assert!(confirm_batch(&mut Cursor::new(b"Y\n".to_vec()), &mut reporter));
        assert!(!confirm_batch(&mut Cursor::new(b"n\n".to_vec()), &mut reporter));
        assert!(!confirm_batch(&mut Cursor::new(b"yes\n".to_vec()), &mut reporter));
        assert!(!confirm_batch(&mut no_input(), &mut reporter));
    }
}
