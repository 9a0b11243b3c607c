use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::data::{Item, ItemStream, ItemsRepository, RepositoryError, RepositoryResult};
use crate::ui::details::intent::ItemDetailsIntent;
use crate::ui::details::reducer::ItemDetailsReducer;
use crate::ui::details::state::{DetailsStatus, ItemDetailsUiState};
use crate::ui::mvi::{unobserved, SharingPolicy, Store, UpstreamLink};
use crate::ui::navigation::{SavedStateHandle, ENTERED_ITEM_ID_KEY};

/// How long a missing item may stay unresolved before it is reported.
pub const DEFAULT_NOT_FOUND_TIMEOUT: Duration = Duration::from_millis(3_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailsOptions {
    pub sharing: SharingPolicy,
    pub not_found_timeout: Duration,
}

impl Default for DetailsOptions {
    fn default() -> Self {
        Self {
            sharing: SharingPolicy::default(),
            not_found_timeout: DEFAULT_NOT_FOUND_TIMEOUT,
        }
    }
}

/// Projects one stored item into the details screen and runs its actions.
///
/// The item id comes from the saved state at construction and never changes.
pub struct ItemDetailsController {
    repository: Arc<dyn ItemsRepository>,
    saved_state: SavedStateHandle,
    item_id: i32,
    store: Store<ItemDetailsReducer>,
    options: DetailsOptions,
    upstream: UpstreamLink,
    // Serializes writes so a queued action sees the previous one's result.
    actions: Arc<Mutex<()>>,
}

impl ItemDetailsController {
    pub fn new(
        repository: Arc<dyn ItemsRepository>,
        saved_state: SavedStateHandle,
        options: DetailsOptions,
    ) -> Self {
        let item_id = saved_state.item_id();
        let entered = saved_state.get(ENTERED_ITEM_ID_KEY).unwrap_or_default();
        let store = Store::with_state(ItemDetailsUiState {
            item_id: entered,
            ..ItemDetailsUiState::default()
        });

        Self {
            repository,
            saved_state,
            item_id,
            store,
            options,
            upstream: UpstreamLink::new(),
            actions: Arc::new(Mutex::new(())),
        }
    }

    pub fn item_id(&self) -> i32 {
        self.item_id
    }

    /// Observe the details state. Starts the item subscription if needed.
    pub fn subscribe(&self) -> watch::Receiver<ItemDetailsUiState> {
        let rx = self.store.subscribe();
        let repository = Arc::clone(&self.repository);
        let item_id = self.item_id;
        let store = self.store.clone();
        let options = self.options;
        self.upstream.ensure_running(move || {
            forward_item(repository.stream_item(item_id), store, options)
        });
        rx
    }

    pub fn state(&self) -> ItemDetailsUiState {
        self.store.state()
    }

    pub fn entered_item_id(&self) -> String {
        self.saved_state
            .get(ENTERED_ITEM_ID_KEY)
            .unwrap_or_default()
    }

    /// Record the id typed into the lookup field. The subscribed item is
    /// not affected.
    pub fn update_entered_item_id(&self, new_item_id: impl Into<String>) {
        let new_item_id = new_item_id.into();
        self.saved_state.set(ENTERED_ITEM_ID_KEY, new_item_id.clone());
        self.store
            .dispatch(ItemDetailsIntent::EnteredItemIdChanged(new_item_id));
    }

    /// Sell one unit. Runs in the background; a call made while another
    /// action is in flight waits for it and then re-reads the state, so the
    /// quantity never drops below zero.
    pub fn reduce_quantity_by_one(&self) -> JoinHandle<()> {
        let repository = Arc::clone(&self.repository);
        let store = self.store.clone();
        let actions = Arc::clone(&self.actions);

        tokio::spawn(async move {
            let _guard = actions.lock().await;
            let state = store.state();
            if state.status != DetailsStatus::Ready {
                tracing::debug!("No item loaded, ignoring sell");
                return;
            }

            let current = state.item_details.to_item();
            if current.quantity <= 0 {
                tracing::debug!(id = current.id, "Out of stock, ignoring sell");
                return;
            }

            let updated = Item {
                quantity: current.quantity - 1,
                ..current
            };
            match repository.update_item(updated.clone()).await {
                Ok(()) => {
                    tracing::info!(id = updated.id, quantity = updated.quantity, "Quantity reduced");
                    store.dispatch(ItemDetailsIntent::ErrorDismissed);
                    store.dispatch(ItemDetailsIntent::ItemLoaded(updated));
                }
                Err(e) => {
                    tracing::warn!(id = updated.id, error = %e, "Reducing quantity failed");
                    store.dispatch(ItemDetailsIntent::OperationFailed(e.to_string()));
                }
            }
        })
    }

    /// Delete the shown item. Completes once the repository has removed it.
    pub async fn delete_item(&self) -> RepositoryResult<()> {
        let _guard = self.actions.lock().await;
        let state = self.store.state();
        if state.status != DetailsStatus::Ready {
            return Err(RepositoryError::NotFound { id: self.item_id });
        }

        let item = state.item_details.to_item();
        match self.repository.delete_item(item).await {
            Ok(()) => {
                tracing::info!(id = self.item_id, "Item deleted");
                self.store.dispatch(ItemDetailsIntent::ErrorDismissed);
                self.store.dispatch(ItemDetailsIntent::NotFound);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(id = self.item_id, error = %e, "Deleting item failed");
                self.store
                    .dispatch(ItemDetailsIntent::OperationFailed(e.to_string()));
                Err(e)
            }
        }
    }

    pub fn dismiss_error(&self) {
        self.store.dispatch(ItemDetailsIntent::ErrorDismissed);
    }

    pub fn is_connected(&self) -> bool {
        self.upstream.is_running()
    }
}

async fn forward_item(
    mut item: ItemStream,
    store: Store<ItemDetailsReducer>,
    options: DetailsOptions,
) {
    let idle = unobserved(&store, options.sharing.grace());
    tokio::pin!(idle);

    let mut deadline = None;
    let initial = item.borrow_and_update().clone();
    apply(&store, initial, &mut deadline, options.not_found_timeout);

    loop {
        tokio::select! {
            changed = item.changed() => {
                if changed.is_err() {
                    tracing::debug!("Item stream closed");
                    break;
                }
                let value = item.borrow_and_update().clone();
                apply(&store, value, &mut deadline, options.not_found_timeout);
            }
            _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                deadline = None;
                tracing::info!(
                    timeout_ms = options.not_found_timeout.as_millis() as u64,
                    "Item not found"
                );
                store.dispatch(ItemDetailsIntent::NotFound);
            }
            _ = &mut idle => {
                tracing::debug!("Details unobserved, releasing item stream");
                break;
            }
        }
    }
}

/// Present values replace the state; absent ones are held back and only
/// surface as `NotFound` once the timeout passes without a value.
fn apply(
    store: &Store<ItemDetailsReducer>,
    value: Option<Item>,
    deadline: &mut Option<Instant>,
    timeout: Duration,
) {
    match value {
        Some(item) => {
            *deadline = None;
            store.dispatch(ItemDetailsIntent::ItemLoaded(item));
        }
        None => {
            if deadline.is_none() && store.state().status != DetailsStatus::NotFound {
                *deadline = Some(Instant::now() + timeout);
            }
        }
    }
}
