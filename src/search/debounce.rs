//! Keystroke debouncing
//!
//! Raw search-box input goes in through [`DebounceInput`]; the trimmed query
//! comes out of a `watch` receiver once the input has been quiet for the
//! configured delay. Every new keystroke restarts the timer.

use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

/// Quiescence delay used by the search box
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Sending half of a debouncer; dropping it flushes the pending value and
/// stops the background task
#[derive(Debug)]
pub struct DebounceInput {
    tx: watch::Sender<String>,
}

impl DebounceInput {
    pub fn push(&self, raw: impl Into<String>) {
        self.tx.send_replace(raw.into());
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    delay: Duration,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Start the debouncing task on the current tokio runtime.
    ///
    /// The receiver only sees a change when the settled query differs from
    /// the previous one.
    pub fn spawn(self) -> (DebounceInput, watch::Receiver<String>) {
        let (raw_tx, mut raw_rx) = watch::channel(String::new());
        let (settled_tx, settled_rx) = watch::channel(String::new());
        let delay = self.delay;

        tokio::spawn(async move {
            while raw_rx.changed().await.is_ok() {
                let mut closed = false;
                loop {
                    tokio::select! {
                        changed = raw_rx.changed() => {
                            if changed.is_err() {
                                closed = true;
                                break;
                            }
                        }
                        _ = tokio::time::sleep(delay) => break,
                    }
                }

                let settled = raw_rx.borrow_and_update().trim().to_string();
                let published = settled_tx.send_if_modified(|current| {
                    if *current == settled {
                        false
                    } else {
                        *current = settled.clone();
                        true
                    }
                });
                if published {
                    debug!("Settled query: '{}'", settled);
                }

                if closed {
                    break;
                }
            }
        });

        (DebounceInput { tx: raw_tx }, settled_rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Instant};

    #[tokio::test(start_paused = true)]
    async fn test_coalesces_rapid_input() {
        let (input, mut settled) = Debouncer::default().spawn();
        let start = Instant::now();

        input.push("c");
        sleep(Duration::from_millis(50)).await;
        input.push("ch");
        sleep(Duration::from_millis(50)).await;
        input.push("chicken ");

        settled.changed().await.unwrap();
        assert_eq!(*settled.borrow_and_update(), "chicken");
        assert!(start.elapsed() >= Duration::from_millis(300));

        sleep(Duration::from_millis(500)).await;
        assert!(!settled.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_pauses_settle_separately() {
        let (input, mut settled) = Debouncer::new(Duration::from_millis(100)).spawn();

        input.push("soup");
        settled.changed().await.unwrap();
        assert_eq!(*settled.borrow_and_update(), "soup");

        input.push("stew");
        settled.changed().await.unwrap();
        assert_eq!(*settled.borrow_and_update(), "stew");
    }

    #[tokio::test(start_paused = true)]
    async fn test_identical_settled_value_not_republished() {
        let (input, mut settled) = Debouncer::default().spawn();

        input.push("soup");
        settled.changed().await.unwrap();
        settled.borrow_and_update();

        input.push("  soup ");
        sleep(Duration::from_millis(400)).await;
        assert!(!settled.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_flushes_and_closes() {
        let (input, mut settled) = Debouncer::default().spawn();

        input.push("tea");
        drop(input);

        settled.changed().await.unwrap();
        assert_eq!(*settled.borrow_and_update(), "tea");
        assert!(settled.changed().await.is_err());
    }
}
