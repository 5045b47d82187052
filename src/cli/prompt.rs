//! Terminal confirmation prompts

use crate::client::Prompter;
use std::io::{self, BufRead, Write};
use tokio::runtime::{Handle, RuntimeFlavor};

/// Asks on stderr and reads the answer from stdin.
///
/// With `assume_yes` every confirmation is accepted without asking. Alerts
/// are logged; command handlers print their own result line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompter {
    assume_yes: bool,
}

impl TerminalPrompter {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }

    /// Write the question to `output` and read one answer line from `input`.
    pub fn ask<R: BufRead, W: Write>(&self, message: &str, mut input: R, mut output: W) -> bool {
        run_blocking(move || {
            if write!(output, "{} [y/N] ", message)
                .and_then(|_| output.flush())
                .is_err()
            {
                return false;
            }

            let mut answer = String::new();
            match input.read_line(&mut answer) {
                Ok(_) => is_affirmative(&answer),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read confirmation");
                    false
                }
            }
        })
    }
}

/// Run blocking terminal I/O, handing the worker thread back to the runtime
/// while it waits.
fn run_blocking<T>(f: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}

/// `y` or `yes`, case-insensitive; anything else declines.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        self.ask(message, io::stdin().lock(), io::stderr())
    }

    fn alert(&self, message: &str) {
        tracing::info!(message, "Alert");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::time::Duration;

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative("YES"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("yep"));
    }

    #[test]
    fn test_assume_yes_skips_prompt() {
        assert!(TerminalPrompter::new(true).confirm("Remove?"));
    }

    #[test]
    fn test_ask_writes_question_and_reads_answer() {
        let mut output = Vec::new();
        let accepted = TerminalPrompter::default().ask("Remove?", Cursor::new("yes\n"), &mut output);
        assert!(accepted);
        assert_eq!(String::from_utf8(output).unwrap(), "Remove? [y/N] ");

        let declined = TerminalPrompter::default().ask("Remove?", Cursor::new(""), Vec::new());
        assert!(!declined);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_ask_inside_runtime_keeps_other_tasks_running() {
        let ticker = tokio::spawn(async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            "ticked"
        });

        let accepted = TerminalPrompter::default().ask("Send?", Cursor::new("y\n"), Vec::new());
        assert!(accepted);
        assert_eq!(ticker.await.unwrap(), "ticked");
    }

    #[tokio::test]
    async fn test_ask_on_current_thread_runtime() {
        let accepted = TerminalPrompter::default().ask("Send?", Cursor::new("n\n"), Vec::new());
        assert!(!accepted);
    }
}
