//! Observable state holder driven by a [`Reducer`].

use std::marker::PhantomData;
use std::sync::Arc;

use tokio::sync::watch;

use super::reducer::Reducer;

/// Holds the current state of one screen and publishes every change.
///
/// Intents are applied under the channel lock, so readers never see a
/// partially applied transition. Clones share the same state.
pub struct Store<R: Reducer> {
    tx: Arc<watch::Sender<R::State>>,
    // Bumped on every subscribe, so a returning renderer can be noticed.
    attached: Arc<watch::Sender<u64>>,
    _reducer: PhantomData<fn() -> R>,
}

impl<R: Reducer> Store<R> {
    pub fn new() -> Self {
        Self::with_state(R::State::default())
    }

    pub fn with_state(state: R::State) -> Self {
        let (tx, _) = watch::channel(state);
        let (attached, _) = watch::channel(0);
        Self {
            tx: Arc::new(tx),
            attached: Arc::new(attached),
            _reducer: PhantomData,
        }
    }

    /// Apply an intent. Subscribers are notified only if the state changed.
    pub fn dispatch(&self, intent: R::Intent) {
        self.tx.send_if_modified(|state| {
            let next = R::reduce(std::mem::take(state), intent);
            let changed = *state != next;
            *state = next;
            changed
        });
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> R::State {
        self.tx.borrow().clone()
    }

    /// Receiver for renderers; always holds the latest state.
    pub fn subscribe(&self) -> watch::Receiver<R::State> {
        let rx = self.tx.subscribe();
        self.attached.send_modify(|count| *count = count.wrapping_add(1));
        rx
    }

    /// Number of live renderer subscriptions.
    pub fn observer_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub(crate) fn sender(&self) -> &watch::Sender<R::State> {
        &self.tx
    }

    /// Changes whenever [`subscribe`](Self::subscribe) is called.
    pub(crate) fn attachments(&self) -> watch::Receiver<u64> {
        self.attached.subscribe()
    }
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
            attached: Arc::clone(&self.attached),
            _reducer: PhantomData,
        }
    }
}

impl<R: Reducer> Default for Store<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::mvi::{Intent, UiState};

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Counter(u32);
    impl UiState for Counter {}

    enum Step {
        Add(u32),
        Keep,
    }
    impl Intent for Step {}

    struct CounterReducer;
    impl Reducer for CounterReducer {
        type State = Counter;
        type Intent = Step;

        fn reduce(state: Counter, intent: Step) -> Counter {
            match intent {
                Step::Add(n) => Counter(state.0 + n),
                Step::Keep => state,
            }
        }
    }

    #[test]
    fn dispatch_replaces_state() {
        let store: Store<CounterReducer> = Store::new();
        store.dispatch(Step::Add(2));
        store.dispatch(Step::Add(3));
        assert_eq!(store.state(), Counter(5));
    }

    #[test]
    fn unchanged_state_does_not_notify() {
        let store: Store<CounterReducer> = Store::new();
        let mut rx = store.subscribe();
        store.dispatch(Step::Keep);
        assert!(!rx.has_changed().unwrap());
        store.dispatch(Step::Add(1));
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), Counter(1));
    }
}
