//! Line-oriented front end driving the screen controllers.

mod command;
mod render;

pub use command::{Command, CommandError, HELP};

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::watch;

use crate::config::ControllerConfig;
use crate::data::{ItemsRepository, RepositoryError};
use crate::ui::details::{
    DetailsOptions, DetailsStatus, ItemDetailsController, ItemDetailsUiState,
};
use crate::ui::home::{HomeController, HomeUiState};
use crate::ui::item::{ItemDetails, ItemEditController, ItemEntryController};
use crate::ui::navigation::{Navigator, Route};
use crate::ui::search::{SearchController, SearchUiState};

/// Upper bound on waiting for a controller to reflect a write before
/// rendering.
const SETTLE_TIMEOUT: Duration = Duration::from_millis(100);

#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("'{command}' only works on the {screen} screen")]
    WrongScreen {
        command: &'static str,
        screen: &'static str,
    },
}

/// What the loop should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Render(String),
    Quit,
}

enum Screen {
    Home,
    Details {
        controller: ItemDetailsController,
        state: watch::Receiver<ItemDetailsUiState>,
    },
    Search {
        controller: SearchController,
        state: watch::Receiver<SearchUiState>,
    },
}

pub struct Shell {
    repository: Arc<dyn ItemsRepository>,
    config: ControllerConfig,
    navigator: Navigator,
    home: HomeController,
    home_state: watch::Receiver<HomeUiState>,
    screen: Screen,
}

impl Shell {
    /// Must be called from within a Tokio runtime.
    pub fn new(repository: Arc<dyn ItemsRepository>, config: ControllerConfig) -> Self {
        let home = HomeController::new(Arc::clone(&repository), config.sharing_policy());
        let home_state = home.subscribe();
        Self {
            repository,
            config,
            navigator: Navigator::new(),
            home,
            home_state,
            screen: Screen::Home,
        }
    }

    pub fn current_route(&self) -> Route {
        self.navigator.current().route
    }

    /// Render whatever screen is on top.
    pub fn render(&self) -> String {
        match &self.screen {
            Screen::Home => render::home(&self.home_state.borrow()),
            Screen::Details { state, .. } => render::details(&state.borrow()),
            Screen::Search { state, .. } => render::search(&state.borrow()),
        }
    }

    /// Parse and run one input line.
    pub async fn execute_line(&mut self, line: &str) -> Result<Outcome, ShellError> {
        let command: Command = line.parse()?;
        self.execute(command).await
    }

    pub async fn execute(&mut self, command: Command) -> Result<Outcome, ShellError> {
        match command {
            Command::Help => return Ok(Outcome::Render(HELP.to_string())),
            Command::Quit => return Ok(Outcome::Quit),
            Command::List => {
                self.go_home();
                self.home.search_query("");
            }
            Command::Search(query) => {
                self.go_home();
                self.home.search_query(query);
            }
            Command::Find(text) => self.find(text).await,
            Command::Open(item_id) => self.open(item_id).await,
            Command::Sell => self.sell().await?,
            Command::Delete => self.delete().await?,
            Command::EnterId(text) => match &self.screen {
                Screen::Details { controller, .. } => controller.update_entered_item_id(text),
                _ => return Err(wrong_screen("enter-id", "details")),
            },
            Command::Add(details) => self.add(details).await?,
            Command::Edit { item_id, details } => self.edit(item_id, details).await?,
            Command::Back => self.back().await,
        }
        Ok(Outcome::Render(self.render()))
    }

    /// Read commands from `input` until `quit` or end of input, writing each
    /// rendered screen to `output`.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        settle(&mut self.home_state).await;
        output.write_all(self.render().as_bytes()).await?;
        output.write_all(b"> ").await?;
        output.flush().await?;

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                output.write_all(b"> ").await?;
                output.flush().await?;
                continue;
            }
            match self.execute_line(&line).await {
                Ok(Outcome::Quit) => break,
                Ok(Outcome::Render(text)) => output.write_all(text.as_bytes()).await?,
                Err(e) => {
                    tracing::debug!(line = %line, error = %e, "Command failed");
                    output.write_all(format!("error: {}\n", e).as_bytes()).await?;
                }
            }
            output.write_all(b"> ").await?;
            output.flush().await?;
        }
        Ok(())
    }

    fn go_home(&mut self) {
        self.navigator.pop_up_to(Route::Home);
        self.screen = Screen::Home;
    }

    async fn back(&mut self) {
        self.navigator.navigate_up();
        self.screen = match self.current_route() {
            Route::ItemDetails { item_id } => {
                let mut screen = self.details_screen(item_id);
                if let Screen::Details { state, .. } = &mut screen {
                    wait_loaded(state).await;
                }
                screen
            }
            Route::Search => self.search_screen().await,
            _ => Screen::Home,
        };
    }

    fn details_screen(&self, item_id: i32) -> Screen {
        let entry = self.navigator.current();
        debug_assert_eq!(entry.route, Route::ItemDetails { item_id });
        let controller = ItemDetailsController::new(
            Arc::clone(&self.repository),
            entry.saved_state.clone(),
            DetailsOptions::from(&self.config),
        );
        let state = controller.subscribe();
        Screen::Details { controller, state }
    }

    async fn open(&mut self, item_id: i32) {
        self.navigator.navigate(Route::ItemDetails { item_id });
        self.screen = self.details_screen(item_id);
        if let Screen::Details { state, .. } = &mut self.screen {
            wait_loaded(state).await;
        }
    }

    async fn find(&mut self, text: String) {
        if !matches!(self.screen, Screen::Search { .. }) {
            self.navigator.navigate(Route::Search);
            self.screen = self.search_screen().await;
        }
        if let Screen::Search { controller, .. } = &self.screen {
            controller.on_search_text_change(text);
        }
    }

    async fn search_screen(&self) -> Screen {
        let controller =
            SearchController::new(Arc::clone(&self.repository), self.config.sharing_policy());
        let mut state = controller.subscribe();
        settle(&mut state).await;
        Screen::Search { controller, state }
    }

    async fn sell(&mut self) -> Result<(), ShellError> {
        let Screen::Details { controller, .. } = &self.screen else {
            return Err(wrong_screen("sell", "details"));
        };
        // The task applies its result to the state before finishing; a
        // join error only means it was cancelled.
        let _ = controller.reduce_quantity_by_one().await;
        Ok(())
    }

    async fn delete(&mut self) -> Result<(), ShellError> {
        let Screen::Details { controller, .. } = &self.screen else {
            return Err(wrong_screen("delete", "details"));
        };
        self.home_state.mark_unchanged();
        controller.delete_item().await?;
        self.back().await;
        settle(&mut self.home_state).await;
        Ok(())
    }

    async fn add(&mut self, details: ItemDetails) -> Result<(), ShellError> {
        self.navigator.navigate(Route::ItemEntry);
        self.home_state.mark_unchanged();
        let entry = ItemEntryController::new(Arc::clone(&self.repository));
        entry.update_ui_state(details);
        let saved = entry.save_item().await;
        self.navigator.navigate_up();
        saved?;
        self.go_home();
        settle(&mut self.home_state).await;
        Ok(())
    }

    async fn edit(&mut self, item_id: i32, details: ItemDetails) -> Result<(), ShellError> {
        let entry = self.navigator.navigate(Route::ItemEdit { item_id });
        let saved_state = entry.saved_state.clone();
        self.home_state.mark_unchanged();
        if let Screen::Details { state, .. } = &mut self.screen {
            state.mark_unchanged();
        }
        let result = async {
            let editor = ItemEditController::load(
                Arc::clone(&self.repository),
                &saved_state,
                self.config.not_found_timeout(),
            )
            .await?;
            editor.update_ui_state(details);
            editor.update_item().await
        }
        .await;
        self.navigator.navigate_up();
        result?;
        if let Screen::Details { state, .. } = &mut self.screen {
            settle(state).await;
        } else {
            settle(&mut self.home_state).await;
        }
        Ok(())
    }
}

fn wrong_screen(command: &'static str, screen: &'static str) -> ShellError {
    ShellError::WrongScreen { command, screen }
}

/// Resolves either with the item or after the not-found timeout.
async fn wait_loaded(state: &mut watch::Receiver<ItemDetailsUiState>) {
    let _ = state
        .wait_for(|s| s.status != DetailsStatus::Loading)
        .await;
}

/// Wait briefly for `state` to pick up a change, so the next render shows it.
async fn settle<T>(state: &mut watch::Receiver<T>) {
    let _ = tokio::time::timeout(SETTLE_TIMEOUT, state.changed()).await;
    state.mark_unchanged();
}
