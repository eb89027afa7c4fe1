//! Background refresh tied to a screen's lifetime.
//!
//! Foreground fetches need no cancellation machinery: a screen's `load`
//! applies state after its await inside the same future, so dropping that
//! future (navigating away before the response lands) discards the partial
//! work with it. Only detached work outlives the call site, and [`Poller`]
//! covers that case by aborting its task on drop.

use std::time::Duration;

use tokio::task::JoinHandle;

/// A background refresh loop tied to a screen's lifetime.
///
/// Runs the closure on every interval tick until the poller is dropped.
/// Dropping aborts the task, so a torn-down screen stops refreshing
/// without an explicit shutdown call.
#[derive(Debug)]
pub struct Poller {
    handle: JoinHandle<()>,
}

impl Poller {
    /// Spawn a refresh loop with the given period.
    pub fn spawn<F, Fut>(interval: Duration, mut refresh: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                refresh().await;
            }
        });
        Self { handle }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_poller_ticks_until_dropped() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let poller = Poller::spawn(Duration::from_millis(5), move || {
            let seen = Arc::clone(&seen);
            async move {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_millis(30)).await;
        let before_drop = count.load(Ordering::SeqCst);
        assert!(before_drop >= 2);

        drop(poller);
        tokio::time::sleep(Duration::from_millis(30)).await;
        let after_drop = count.load(Ordering::SeqCst);
        // One in-flight tick may land, but the loop is gone.
        assert!(after_drop <= before_drop + 1);
    }
}
