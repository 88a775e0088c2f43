//! Cancel-and-reschedule timer for coalescing bursts of input.
//!
//! Tasks are spawned with [`tokio::task::spawn_local`], so a [`Debouncer`]
//! must be used from within a [`tokio::task::LocalSet`].

use std::future::Future;
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::trace;

/// Default quiescence window before a debounced action fires.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(700);

/// Runs only the most recently scheduled action, once `window` has elapsed
/// without another call to [`Debouncer::schedule`].
///
/// Outstanding work (a waiting timer plus any fired action still running)
/// is counted so callers can wait for it with [`Debouncer::idle`].
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Option<JoinHandle<()>>,
    outstanding: Rc<watch::Sender<usize>>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    /// Creates a debouncer with the given quiescence window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        let (outstanding, _) = watch::channel(0);
        Self {
            window,
            pending: None,
            outstanding: Rc::new(outstanding),
        }
    }

    /// Returns the quiescence window.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Cancels any pending action and schedules `action` to run after the
    /// quiescence window.
    pub fn schedule<F>(&mut self, action: F)
    where
        F: Future<Output = ()> + 'static,
    {
        self.cancel();

        let window = self.window;
        let outstanding = Rc::clone(&self.outstanding);
        outstanding.send_modify(|count| *count += 1);
        self.pending = Some(tokio::task::spawn_local(async move {
            tokio::time::sleep(window).await;
            // Detached so that a later reschedule cannot abort a started action.
            tokio::task::spawn_local(async move {
                action.await;
                outstanding.send_modify(|count| *count -= 1);
            });
        }));
    }

    /// Cancels the pending action if its window has not elapsed yet. Actions
    /// that already started run to completion.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                trace!("Cancelling pending debounced action");
                handle.abort();
                self.outstanding.send_modify(|count| *count -= 1);
            }
        }
    }

    /// Returns whether an action is waiting for its window to elapse.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Subscribes to the count of outstanding work. It reads zero once no
    /// timer is waiting and no fired action is running.
    #[must_use]
    pub fn idle(&self) -> watch::Receiver<usize> {
        self.outstanding.subscribe()
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
