//! Lifetime of upstream subscriptions feeding a [`Store`](super::Store).

use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::reducer::Reducer;
use super::store::Store;

/// Grace window used when none is configured.
pub const DEFAULT_GRACE: Duration = Duration::from_millis(5_000);

/// When an upstream subscription is kept alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharingPolicy {
    /// Run while at least one renderer is subscribed, and for `grace`
    /// after the last one leaves. A brief detach keeps the upstream alive.
    WhileSubscribed { grace: Duration },
}

impl SharingPolicy {
    pub fn while_subscribed(grace: Duration) -> Self {
        Self::WhileSubscribed { grace }
    }

    pub fn grace(&self) -> Duration {
        match self {
            Self::WhileSubscribed { grace } => *grace,
        }
    }
}

impl Default for SharingPolicy {
    fn default() -> Self {
        Self::WhileSubscribed {
            grace: DEFAULT_GRACE,
        }
    }
}

/// Resolves once `store` has had no subscribers for a full `grace` window,
/// counted from the last one leaving.
pub async fn unobserved<R: Reducer>(store: &Store<R>, grace: Duration) {
    let mut attachments = store.attachments();
    loop {
        store.sender().closed().await;
        attachments.mark_unchanged();
        tokio::select! {
            _ = tokio::time::sleep(grace) => {
                if store.observer_count() == 0 {
                    return;
                }
            }
            // Someone came back; the window restarts when they leave.
            _ = attachments.changed() => {}
        }
    }
}

/// Dispatch every value of `upstream` into `store` until the stream closes
/// or the store goes unobserved for `grace`.
pub async fn forward_while_observed<T, R, F>(
    mut upstream: watch::Receiver<T>,
    store: Store<R>,
    grace: Duration,
    to_intent: F,
) where
    T: Clone,
    R: Reducer,
    F: Fn(T) -> R::Intent,
{
    let initial = upstream.borrow_and_update().clone();
    store.dispatch(to_intent(initial));

    let idle = unobserved(&store, grace);
    tokio::pin!(idle);

    loop {
        tokio::select! {
            changed = upstream.changed() => {
                if changed.is_err() {
                    tracing::debug!("Upstream closed");
                    break;
                }
                let value = upstream.borrow_and_update().clone();
                store.dispatch(to_intent(value));
            }
            _ = &mut idle => {
                tracing::debug!(grace_ms = grace.as_millis() as u64, "Unobserved, releasing upstream");
                break;
            }
        }
    }
}

/// Owns the task forwarding upstream emissions into a store.
///
/// The task is started lazily and restarted if it has ended. Dropping the
/// link aborts the task.
#[derive(Default)]
pub struct UpstreamLink {
    task: Mutex<Option<JoinHandle<()>>>,
}

impl UpstreamLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the forwarding task unless one is already running.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn ensure_running<F, Fut>(&self, start: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut task = self.task.lock();
        let running = task.as_ref().is_some_and(|handle| !handle.is_finished());
        if !running {
            *task = Some(tokio::spawn(start()));
        }
    }

    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Cancel the forwarding task now.
    pub fn cancel(&self) {
        if let Some(handle) = self.task.lock().take() {
            handle.abort();
        }
    }
}

impl Drop for UpstreamLink {
    fn drop(&mut self) {
        self.cancel();
    }
}
