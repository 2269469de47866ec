use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::time::sleep;

pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Coalesces search keystrokes: a query is only emitted if no newer one
/// arrived within the window.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    window: Duration,
    generation: Arc<AtomicU64>,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE)
    }
}

impl SearchDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Waits out the window and returns the query if it is still the latest
    /// one, `None` if it was superseded meanwhile.
    pub async fn settle(&self, query: impl Into<String>) -> Option<String> {
        let query = query.into();
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        sleep(self.window).await;
        (self.generation.load(Ordering::SeqCst) == ticket).then_some(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn only_last_query_in_window_is_emitted() {
        let debouncer = SearchDebouncer::default();

        let mut typed = Vec::new();
        for (delay_ms, query) in [(0, "a"), (100, "an"), (100, "and")] {
            sleep(Duration::from_millis(delay_ms)).await;
            let d = debouncer.clone();
            typed.push(tokio::spawn(async move { d.settle(query).await }));
            tokio::task::yield_now().await;
        }

        let mut emitted = Vec::new();
        for handle in typed {
            emitted.push(handle.await.unwrap());
        }
        assert_eq!(emitted, vec![None, None, Some("and".to_string())]);
    }

    #[tokio::test(start_paused = true)]
    async fn spaced_queries_are_all_emitted() {
        let debouncer = SearchDebouncer::new(Duration::from_millis(50));
        assert_eq!(debouncer.settle("ani").await.as_deref(), Some("ani"));
        assert_eq!(debouncer.settle("budi").await.as_deref(), Some("budi"));
    }
}
