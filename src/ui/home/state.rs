use crate::data::Item;
use crate::ui::mvi::UiState;

/// What the home screen shows.
///
/// `item_list` is always `filter_by_name(snapshot, query)`: a new repository
/// snapshot re-applies the active query instead of discarding it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HomeUiState {
    pub item_list: Vec<Item>,
    pub query: String,
    snapshot: Vec<Item>,
}

impl UiState for HomeUiState {}

impl HomeUiState {
    pub(super) fn derive(snapshot: Vec<Item>, query: String) -> Self {
        let item_list = crate::search::filter_by_name(&snapshot, &query);
        Self {
            item_list,
            query,
            snapshot,
        }
    }

    pub(super) fn into_parts(self) -> (Vec<Item>, String) {
        (self.snapshot, self.query)
    }

    /// The latest unfiltered collection received from the repository.
    pub fn snapshot(&self) -> &[Item] {
        &self.snapshot
    }

    pub fn is_filtered(&self) -> bool {
        !self.query.is_empty()
    }
}
