//! Item details screen: one item, its stock flag, sell and delete.

mod controller;
mod intent;
mod reducer;
mod state;

pub use controller::{DetailsOptions, ItemDetailsController, DEFAULT_NOT_FOUND_TIMEOUT};
pub use intent::ItemDetailsIntent;
pub use reducer::ItemDetailsReducer;
pub use state::{DetailsStatus, ItemDetailsUiState};
