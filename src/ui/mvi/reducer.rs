//! State transitions for one screen.

use super::intent::Intent;
use super::state::UiState;

/// Folds intents into a screen's state.
///
/// [`Store::dispatch`](super::Store::dispatch) calls this while holding the
/// state channel's lock, so it must not block or touch the repository.
/// Repository writes, timers and saved state belong to the controllers,
/// which report their outcome back as another intent.
///
/// Derived fields are recomputed here from the inputs kept in the state
/// (the home list from its snapshot and query, the stock flag from the
/// loaded item), never patched in place.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    /// Returning a value equal to `state` suppresses the change notification.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
