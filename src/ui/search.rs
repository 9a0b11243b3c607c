//! Search screen: matches items by name or id.

use std::sync::Arc;

use tokio::sync::watch;

use crate::data::{Item, ItemsRepository};
use crate::search::filter_by_name_or_id;
use crate::ui::mvi::{
    forward_while_observed, Intent, Reducer, SharingPolicy, Store, UiState, UpstreamLink,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchUiState {
    pub search_text: String,
    pub results: Vec<Item>,
    snapshot: Vec<Item>,
}

impl UiState for SearchUiState {}

impl SearchUiState {
    fn derive(snapshot: Vec<Item>, search_text: String) -> Self {
        Self {
            results: filter_by_name_or_id(&snapshot, &search_text),
            search_text,
            snapshot,
        }
    }
}

#[derive(Debug, Clone)]
pub enum SearchIntent {
    ItemsChanged(Vec<Item>),
    TextChanged(String),
}

impl Intent for SearchIntent {}

pub struct SearchReducer;

impl Reducer for SearchReducer {
    type State = SearchUiState;
    type Intent = SearchIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            SearchIntent::ItemsChanged(items) => SearchUiState::derive(items, state.search_text),
            SearchIntent::TextChanged(text) => SearchUiState::derive(state.snapshot, text),
        }
    }
}

pub struct SearchController {
    repository: Arc<dyn ItemsRepository>,
    store: Store<SearchReducer>,
    policy: SharingPolicy,
    upstream: UpstreamLink,
}

impl SearchController {
    pub fn new(repository: Arc<dyn ItemsRepository>, policy: SharingPolicy) -> Self {
        Self {
            repository,
            store: Store::new(),
            policy,
            upstream: UpstreamLink::new(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchUiState> {
        let rx = self.store.subscribe();
        let repository = Arc::clone(&self.repository);
        let store = self.store.clone();
        let grace = self.policy.grace();
        self.upstream.ensure_running(move || {
            forward_while_observed(
                repository.stream_all_items(),
                store,
                grace,
                SearchIntent::ItemsChanged,
            )
        });
        rx
    }

    pub fn state(&self) -> SearchUiState {
        self.store.state()
    }

    pub fn on_search_text_change(&self, text: impl Into<String>) {
        self.store.dispatch(SearchIntent::TextChanged(text.into()));
    }

    /// The current results, handed to whoever asked for the search.
    pub fn complete(&self) -> Vec<Item> {
        let results = self.store.state().results;
        tracing::debug!(count = results.len(), "Search completed");
        results
    }
}
