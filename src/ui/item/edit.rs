use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::data::{Item, ItemsRepository, RepositoryError, RepositoryResult};
use crate::ui::item::form::{ItemFormIntent, ItemFormReducer, ItemFormState};
use crate::ui::item::model::ItemDetails;
use crate::ui::mvi::Store;
use crate::ui::navigation::SavedStateHandle;

/// Backs the "edit item" screen for the item id carried in saved state.
pub struct ItemEditController {
    repository: Arc<dyn ItemsRepository>,
    item_id: i32,
    store: Store<ItemFormReducer>,
}

impl ItemEditController {
    /// Load the item into the form. `NotFound` if no value shows up within
    /// `timeout`.
    pub async fn load(
        repository: Arc<dyn ItemsRepository>,
        saved_state: &SavedStateHandle,
        timeout: Duration,
    ) -> RepositoryResult<Self> {
        let item_id = saved_state.item_id();
        let item = first_present(repository.stream_item(item_id), timeout)
            .await
            .ok_or(RepositoryError::NotFound { id: item_id })?;

        let store = Store::new();
        store.dispatch(ItemFormIntent::Edit(ItemDetails::from(&item)));

        Ok(Self {
            repository,
            item_id,
            store,
        })
    }

    pub fn item_id(&self) -> i32 {
        self.item_id
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

    /// Write the edited fields back. The stored id is kept regardless of
    /// what the form holds.
    pub async fn update_item(&self) -> RepositoryResult<()> {
        let state = self.store.state();
        if !state.is_entry_valid {
            return Err(RepositoryError::Invalid {
                message: "all fields must be filled in".to_string(),
            });
        }

        let item = Item {
            id: self.item_id,
            ..state.item_details.to_item()
        };
        if let Err(e) = self.repository.update_item(item).await {
            tracing::warn!(id = self.item_id, error = %e, "Updating item failed");
            self.store.dispatch(ItemFormIntent::SaveFailed(e.to_string()));
            return Err(e);
        }
        tracing::info!(id = self.item_id, "Item updated");
        Ok(())
    }
}

/// First `Some` value seen on `stream`, or `None` after `timeout`.
async fn first_present(
    mut stream: watch::Receiver<Option<Item>>,
    timeout: Duration,
) -> Option<Item> {
    let wait = stream.wait_for(|value| value.is_some());
    match tokio::time::timeout(timeout, wait).await {
        Ok(Ok(value)) => (*value).clone(),
        _ => None,
    }
}
