use std::sync::Arc;

use tokio::sync::watch;

use crate::data::ItemsRepository;
use crate::ui::home::intent::HomeIntent;
use crate::ui::home::reducer::HomeReducer;
use crate::ui::home::state::HomeUiState;
use crate::ui::mvi::{forward_while_observed, SharingPolicy, Store, UpstreamLink};

/// Keeps the home screen in sync with the repository's collection.
pub struct HomeController {
    repository: Arc<dyn ItemsRepository>,
    store: Store<HomeReducer>,
    policy: SharingPolicy,
    upstream: UpstreamLink,
}

impl HomeController {
    pub fn new(repository: Arc<dyn ItemsRepository>, policy: SharingPolicy) -> Self {
        Self {
            repository,
            store: Store::new(),
            policy,
            upstream: UpstreamLink::new(),
        }
    }

    /// Observe the home state. Starts the repository subscription if needed.
    pub fn subscribe(&self) -> watch::Receiver<HomeUiState> {
        let rx = self.store.subscribe();
        let repository = Arc::clone(&self.repository);
        let store = self.store.clone();
        let grace = self.policy.grace();
        self.upstream.ensure_running(move || {
            forward_while_observed(
                repository.stream_all_items(),
                store,
                grace,
                HomeIntent::ItemsChanged,
            )
        });
        rx
    }

    pub fn state(&self) -> HomeUiState {
        self.store.state()
    }

    /// Filter the displayed list by name. The query stays active across
    /// later repository updates until replaced.
    pub fn search_query(&self, query: impl Into<String>) {
        let query = query.into();
        tracing::debug!(query = %query, "Home search");
        self.store.dispatch(HomeIntent::Search(query));
    }

    pub fn is_connected(&self) -> bool {
        self.upstream.is_running()
    }
}
