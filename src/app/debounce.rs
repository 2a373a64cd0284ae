//! Keystroke debouncing for search input.
//!
//! Every call to [`Debouncer::settle`] takes a ticket and sleeps for the
//! configured delay. Only the caller holding the newest ticket when its sleep
//! ends is told to proceed; everyone superseded in the meantime gets `false`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Default quiet period before a search term is applied.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: AtomicU64,
}

impl Debouncer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Waits out the quiet period.
    ///
    /// Returns `true` if no newer call started while this one was waiting.
    pub async fn settle(&self) -> bool {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.generation.load(Ordering::SeqCst) == ticket
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
