use crate::ui::details::intent::ItemDetailsIntent;
use crate::ui::details::state::{DetailsStatus, ItemDetailsUiState};
use crate::ui::item::ItemDetails;
use crate::ui::mvi::Reducer;

pub struct ItemDetailsReducer;

impl Reducer for ItemDetailsReducer {
    type State = ItemDetailsUiState;
    type Intent = ItemDetailsIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ItemDetailsIntent::ItemLoaded(item) => ItemDetailsUiState {
                out_of_stock: item.is_out_of_stock(),
                item_details: ItemDetails::from(&item),
                status: DetailsStatus::Ready,
                ..state
            },
            // Stale details must not stay actionable.
            ItemDetailsIntent::NotFound => ItemDetailsUiState {
                status: DetailsStatus::NotFound,
                item_id: state.item_id,
                error: state.error,
                ..ItemDetailsUiState::default()
            },
            ItemDetailsIntent::EnteredItemIdChanged(item_id) => {
                ItemDetailsUiState { item_id, ..state }
            }
            ItemDetailsIntent::OperationFailed(message) => ItemDetailsUiState {
                error: Some(message),
                ..state
            },
            ItemDetailsIntent::ErrorDismissed => ItemDetailsUiState {
                error: None,
                ..state
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Item;

    fn loaded(quantity: i32) -> ItemDetailsUiState {
        ItemDetailsReducer::reduce(
            ItemDetailsUiState::default(),
            ItemDetailsIntent::ItemLoaded(Item::new("Pen", 2.0, quantity).with_id(2)),
        )
    }

    #[test]
    fn default_is_loading_and_out_of_stock() {
        let state = ItemDetailsUiState::default();
        assert_eq!(state.status, DetailsStatus::Loading);
        assert!(state.out_of_stock);
    }

    #[test]
    fn loaded_item_sets_stock_flag() {
        let state = loaded(3);
        assert!(state.is_ready());
        assert!(!state.out_of_stock);
        assert_eq!(state.item_details.quantity, "3");

        assert!(loaded(0).out_of_stock);
    }

    #[test]
    fn not_found_is_distinct_from_zero_quantity() {
        let empty = loaded(0);
        let missing = ItemDetailsReducer::reduce(empty.clone(), ItemDetailsIntent::NotFound);
        assert_eq!(empty.status, DetailsStatus::Ready);
        assert_eq!(missing.status, DetailsStatus::NotFound);
        assert_eq!(missing.item_details, ItemDetails::default());
    }

    #[test]
    fn entered_id_survives_not_found() {
        let state = ItemDetailsReducer::reduce(
            loaded(1),
            ItemDetailsIntent::EnteredItemIdChanged("12".to_string()),
        );
        let state = ItemDetailsReducer::reduce(state, ItemDetailsIntent::NotFound);
        assert_eq!(state.item_id, "12");
    }

    #[test]
    fn error_is_kept_until_dismissed() {
        let state = ItemDetailsReducer::reduce(
            loaded(1),
            ItemDetailsIntent::OperationFailed("storage offline".to_string()),
        );
        let reload = ItemDetailsIntent::ItemLoaded(Item::new("Pen", 2.0, 1).with_id(2));
        let state = ItemDetailsReducer::reduce(state, reload);
        assert_eq!(state.error.as_deref(), Some("storage offline"));

        let state = ItemDetailsReducer::reduce(state, ItemDetailsIntent::ErrorDismissed);
        assert!(state.error.is_none());
    }
}
