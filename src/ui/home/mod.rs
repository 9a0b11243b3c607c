mod controller;
mod intent;
mod reducer;
mod state;

pub use controller::HomeController;
pub use intent::HomeIntent;
pub use reducer::HomeReducer;
pub use state::HomeUiState;
