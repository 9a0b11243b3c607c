use std::sync::Arc;

use tokio::sync::watch;

use crate::data::{Item, ItemsRepository, RepositoryError, RepositoryResult};
use crate::ui::item::form::{ItemFormIntent, ItemFormReducer, ItemFormState};
use crate::ui::item::model::ItemDetails;
use crate::ui::mvi::Store;

/// Backs the "add item" screen.
pub struct ItemEntryController {
    repository: Arc<dyn ItemsRepository>,
    store: Store<ItemFormReducer>,
}

impl ItemEntryController {
    pub fn new(repository: Arc<dyn ItemsRepository>) -> Self {
        Self {
            repository,
            store: Store::new(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ItemFormState> {
        self.store.subscribe()
    }

    pub fn state(&self) -> ItemFormState {
        self.store.state()
    }

    pub fn update_ui_state(&self, item_details: ItemDetails) {
        self.store.dispatch(ItemFormIntent::Edit(item_details));
    }

    /// Insert the entered item. Rejected with `Invalid` while the form is
    /// incomplete.
    pub async fn save_item(&self) -> RepositoryResult<Item> {
        let state = self.store.state();
        if !state.is_entry_valid {
            return Err(RepositoryError::Invalid {
                message: "all fields must be filled in".to_string(),
            });
        }

        let mut item = state.item_details.to_item();
        item.id = 0;
        match self.repository.insert_item(item).await {
            Ok(stored) => {
                tracing::info!(id = stored.id, name = %stored.name, "Item saved");
                Ok(stored)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Saving item failed");
                self.store.dispatch(ItemFormIntent::SaveFailed(e.to_string()));
                Err(e)
            }
        }
    }
}
