//! Item entry, editing, and the text projection shared by item screens.

mod edit;
mod entry;
mod form;
mod model;

pub use edit::ItemEditController;
pub use entry::ItemEntryController;
pub use form::{ItemFormIntent, ItemFormReducer, ItemFormState};
pub use model::ItemDetails;
