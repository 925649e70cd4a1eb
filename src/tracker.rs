//! Count of in-flight operations, observed by the loading indicator.

use std::future::Future;

use tokio::sync::watch;

#[derive(Debug, Clone)]
pub struct Tracker {
    pending: watch::Sender<usize>,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Tracker {
    pub fn new() -> Self {
        let (pending, _) = watch::channel(0);

        Self { pending }
    }

    /// Counts `future` as pending until it completes or is dropped.
    pub async fn track<F: Future>(&self, future: F) -> F::Output {
        let _guard = self.begin();

        future.await
    }

    pub fn begin(&self) -> Pending {
        self.pending.send_modify(|count| *count += 1);

        Pending {
            pending: self.pending.clone(),
        }
    }

    pub fn pending(&self) -> usize {
        *self.pending.borrow()
    }

    pub fn in_progress(&self) -> bool {
        self.pending() > 0
    }

    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.pending.subscribe()
    }
}

/// Decrements the tracker when dropped.
#[derive(Debug)]
pub struct Pending {
    pending: watch::Sender<usize>,
}

impl Drop for Pending {
    fn drop(&mut self) {
        self.pending
            .send_modify(|count| *count = count.saturating_sub(1));
    }
}

pub struct LoadingIndicator;

impl LoadingIndicator {
    pub const SPINNER: &'static str = "● ● ●";

    pub fn render(tracker: &Tracker) -> Option<&'static str> {
        tracker.in_progress().then_some(Self::SPINNER)
    }
}
