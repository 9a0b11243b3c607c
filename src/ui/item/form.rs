//! Shared state for the entry and edit forms.

use crate::ui::item::model::ItemDetails;
use crate::ui::mvi::{Intent, Reducer, UiState};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemFormState {
    pub item_details: ItemDetails,
    pub is_entry_valid: bool,
    /// Last write failure, shown until the next edit.
    pub error: Option<String>,
}

impl UiState for ItemFormState {}

#[derive(Debug, Clone)]
pub enum ItemFormIntent {
    /// Fields replaced by user input or by loading a stored item.
    Edit(ItemDetails),
    /// A save was rejected by the repository.
    SaveFailed(String),
}

impl Intent for ItemFormIntent {}

pub struct ItemFormReducer;

impl Reducer for ItemFormReducer {
    type State = ItemFormState;
    type Intent = ItemFormIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ItemFormIntent::Edit(item_details) => ItemFormState {
                is_entry_valid: item_details.is_valid(),
                item_details,
                error: None,
            },
            ItemFormIntent::SaveFailed(message) => ItemFormState {
                error: Some(message),
                ..state
            },
        }
    }
}
