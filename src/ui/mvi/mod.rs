//! Model-View-Intent (MVI) architecture primitives.
//!
//! This module provides base traits for implementing unidirectional
//! data flow between the repository and the screens.
//!
//! # Architecture
//!
//! ```text
//! Repository ──→ Intent ──→ Reducer ──→ Store ──→ View
//!                  ↑                               │
//!                  └───────────────────────────────┘
//! ```
//!
//! - **State**: Immutable representation of a screen
//! - **Intent**: User actions or repository emissions
//! - **Reducer**: Pure function that transforms state based on intents
//! - **Store**: Observable holder applying intents atomically
//! - **UpstreamLink**: Keeps the repository subscription alive while observed

mod intent;
mod reducer;
mod sharing;
mod state;
mod store;

pub use intent::Intent;
pub use reducer::Reducer;
pub use sharing::{
    forward_while_observed, unobserved, SharingPolicy, UpstreamLink, DEFAULT_GRACE,
};
pub use state::UiState;
pub use store::Store;
