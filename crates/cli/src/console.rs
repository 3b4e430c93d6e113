//! Terminal notification sink and confirmation prompt.

use std::io::{self, BufRead, Write};

use pantry_storefront::{Confirm, Notification, Notifier};

/// Prints notifications to stderr so stdout stays pipeable.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    #[allow(clippy::print_stderr)]
    fn notify(&self, notification: Notification) {
        eprintln!("{}", format_notification(&notification));
    }
}

fn format_notification(notification: &Notification) -> String {
    let marker = if notification.is_error() { "✗" } else { "✓" };
    format!("{marker} {}", notification.message)
}

/// Asks on stderr and reads the answer from stdin. Only `y`/`yes` confirms.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, question: &str) -> bool {
        let mut stderr = io::stderr().lock();
        if write!(stderr, "{question} [y/N] ").and_then(|()| stderr.flush()).is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read confirmation");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
