use crate::ui::item::ItemDetails;
use crate::ui::mvi::UiState;

/// Whether the details screen has an item to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailsStatus {
    /// No item received yet.
    #[default]
    Loading,
    /// `item_details` holds the stored item.
    Ready,
    /// The id did not resolve to an item within the not-found timeout,
    /// or the item was deleted.
    NotFound,
}

/// What the item details screen shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDetailsUiState {
    pub out_of_stock: bool,
    pub item_details: ItemDetails,
    /// Id typed into the lookup field. Unrelated to `item_details.id`.
    pub item_id: String,
    pub status: DetailsStatus,
    /// Last failed repository write, until dismissed or superseded.
    pub error: Option<String>,
}

impl Default for ItemDetailsUiState {
    fn default() -> Self {
        Self {
            out_of_stock: true,
            item_details: ItemDetails::default(),
            item_id: String::new(),
            status: DetailsStatus::Loading,
            error: None,
        }
    }
}

impl UiState for ItemDetailsUiState {}

impl ItemDetailsUiState {
    pub fn is_ready(&self) -> bool {
        self.status == DetailsStatus::Ready
    }
}
