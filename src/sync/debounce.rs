//! Debouncing of rapidly changing search input.

use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;

/// Default quiet period before a search term is considered settled.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Yields a search term once it has stopped changing for `quiet`.
///
/// Input arrives through a `watch` channel, so intermediate keystrokes
/// collapse into the latest value.
#[derive(Debug)]
pub struct SearchDebouncer {
    rx: watch::Receiver<String>,
    quiet: Duration,
    pending: bool,
}

impl SearchDebouncer {
    pub fn new(rx: watch::Receiver<String>, quiet: Duration) -> Self {
        Self {
            rx,
            quiet,
            pending: false,
        }
    }

    /// Waits for the next settled term.
    ///
    /// Returns `None` once the sender is gone and nothing is pending. A
    /// change still pending when the sender closes is yielded first.
    ///
    /// Cancel-safe: a change seen before cancellation stays pending and
    /// the quiet period restarts on the next call.
    pub async fn next_settled(&mut self) -> Option<String> {
        if !self.pending {
            if self.rx.changed().await.is_err() {
                return None;
            }
            self.pending = true;
        }
        loop {
            tokio::select! {
                changed = self.rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = sleep(self.quiet) => break,
            }
        }
        self.pending = false;
        Some(self.rx.borrow_and_update().clone())
    }
}
