use crate::data::Item;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum ItemDetailsIntent {
    /// The item stream produced a value.
    ItemLoaded(Item),
    /// The item is missing: never arrived in time, or was deleted.
    NotFound,
    EnteredItemIdChanged(String),
    OperationFailed(String),
    ErrorDismissed,
}

impl Intent for ItemDetailsIntent {}
