//! Screen routes, the back stack, and per-entry saved state.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

/// Saved-state key carrying the item id of the details and edit screens.
pub const ITEM_ID_ARG: &str = "itemId";

/// Saved-state key for the id typed into the details screen.
pub const ENTERED_ITEM_ID_KEY: &str = "enteredItemId";

/// Id read when no item id was passed. Never assigned by storage.
pub const MISSING_ITEM_ID: i32 = -1;

/// A destination in the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    ItemEntry,
    ItemDetails { item_id: i32 },
    ItemEdit { item_id: i32 },
    Search,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("Unknown route '{0}'")]
    Unknown(String),

    #[error("Route '{route}' needs an integer item id, got '{value}'")]
    BadItemId { route: String, value: String },
}

impl Route {
    pub fn item_id(&self) -> Option<i32> {
        match self {
            Route::ItemDetails { item_id } | Route::ItemEdit { item_id } => Some(*item_id),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Inventory",
            Route::ItemEntry => "Add Item",
            Route::ItemDetails { .. } => "Item Details",
            Route::ItemEdit { .. } => "Edit Item",
            Route::Search => "Search",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "home"),
            Route::ItemEntry => write!(f, "item_entry"),
            Route::ItemDetails { item_id } => write!(f, "item_details/{}", item_id),
            Route::ItemEdit { item_id } => write!(f, "item_edit/{}", item_id),
            Route::Search => write!(f, "search"),
        }
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_id = |route: &str, value: &str| {
            value.parse::<i32>().map_err(|_| RouteError::BadItemId {
                route: route.to_string(),
                value: value.to_string(),
            })
        };

        match s.split_once('/') {
            None => match s {
                "home" => Ok(Route::Home),
                "item_entry" => Ok(Route::ItemEntry),
                "search" => Ok(Route::Search),
                other => Err(RouteError::Unknown(other.to_string())),
            },
            Some(("item_details", id)) => Ok(Route::ItemDetails {
                item_id: parse_id("item_details", id)?,
            }),
            Some(("item_edit", id)) => Ok(Route::ItemEdit {
                item_id: parse_id("item_edit", id)?,
            }),
            Some(_) => Err(RouteError::Unknown(s.to_string())),
        }
    }
}

/// String key/value state attached to one back-stack entry.
///
/// Clones share the same storage, so a controller rebuilt for the same
/// entry sees what the previous one wrote.
#[derive(Debug, Clone, Default)]
pub struct SavedStateHandle {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl SavedStateHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saved state seeded with the arguments of `route`.
    pub fn for_route(route: &Route) -> Self {
        let handle = Self::new();
        if let Some(id) = route.item_id() {
            handle.set(ITEM_ID_ARG, id.to_string());
        }
        handle
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    pub fn set(&self, key: &str, value: impl Into<String>) {
        self.values.write().insert(key.to_string(), value.into());
    }

    /// The route's item id, or [`MISSING_ITEM_ID`] when absent or malformed.
    pub fn item_id(&self) -> i32 {
        self.get(ITEM_ID_ARG)
            .and_then(|v| v.parse().ok())
            .unwrap_or(MISSING_ITEM_ID)
    }
}

/// One entry on the back stack.
#[derive(Debug, Clone)]
pub struct BackStackEntry {
    pub route: Route,
    pub saved_state: SavedStateHandle,
}

/// Back stack rooted at [`Route::Home`].
#[derive(Debug)]
pub struct Navigator {
    stack: Vec<BackStackEntry>,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            stack: vec![BackStackEntry {
                route: Route::Home,
                saved_state: SavedStateHandle::new(),
            }],
        }
    }

    pub fn current(&self) -> &BackStackEntry {
        // The root entry is never popped.
        &self.stack[self.stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Push `route` and return its fresh entry.
    pub fn navigate(&mut self, route: Route) -> &BackStackEntry {
        tracing::debug!(route = %route, "Navigate");
        self.stack.push(BackStackEntry {
            route,
            saved_state: SavedStateHandle::for_route(&route),
        });
        self.current()
    }

    /// Pop the top entry. Returns false at the root.
    pub fn pop_back_stack(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        self.stack.pop();
        true
    }

    /// Leave the current screen for its parent.
    pub fn navigate_up(&mut self) -> bool {
        self.pop_back_stack()
    }

    /// Pop entries until `route` is on top. Returns false if it is not on
    /// the stack, leaving the stack unchanged.
    pub fn pop_up_to(&mut self, route: Route) -> bool {
        let Some(index) = self.stack.iter().rposition(|entry| entry.route == route) else {
            return false;
        };
        self.stack.truncate(index + 1);
        true
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
