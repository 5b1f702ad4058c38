//! Trailing-edge debounce on the tokio timer.

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{Instant, sleep_until},
};

/// Publishes a value only once it has stopped changing for `delay`.
///
/// The initial value is visible immediately. Each [`Debouncer::set`] with a
/// new value cancels the pending emission and arms another one `delay` later.
/// Dropping the debouncer cancels whatever is pending.
///
/// Must be used inside a tokio runtime.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    latest: T,
    output: Arc<watch::Sender<T>>,
    pending: Option<JoinHandle<()>>,
}

impl<T> Debouncer<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(initial: T, delay: Duration) -> Self {
        let (output, _) = watch::channel(initial.clone());
        Self { delay, latest: initial, output: Arc::new(output), pending: None }
    }

    pub fn set(&mut self, value: T) {
        if value == self.latest {
            return;
        }
        self.latest = value.clone();
        self.cancel();

        let deadline = Instant::now() + self.delay;
        let output = Arc::clone(&self.output);
        self.pending = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            output.send_replace(value);
        }));
    }

    /// Drop the pending emission, if any. The published value stays as is.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Last published value.
    pub fn current(&self) -> T {
        self.output.borrow().clone()
    }

    /// Last value passed in, published or not.
    pub fn latest(&self) -> &T {
        &self.latest
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.output.subscribe()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
