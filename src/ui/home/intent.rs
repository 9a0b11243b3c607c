use crate::data::Item;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum HomeIntent {
    /// Repository emitted a new collection.
    ItemsChanged(Vec<Item>),
    /// User edited the search field.
    Search(String),
}

impl Intent for HomeIntent {}
