use crate::ui::home::intent::HomeIntent;
use crate::ui::home::state::HomeUiState;
use crate::ui::mvi::Reducer;

pub struct HomeReducer;

impl Reducer for HomeReducer {
    type State = HomeUiState;
    type Intent = HomeIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        let (snapshot, query) = state.into_parts();
        match intent {
            HomeIntent::ItemsChanged(items) => HomeUiState::derive(items, query),
            HomeIntent::Search(query) => HomeUiState::derive(snapshot, query),
        }
    }
}
