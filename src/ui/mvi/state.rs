//! Screen state published to renderers.

/// What one screen renders.
///
/// `Default` is what a renderer sees before the repository has emitted
/// anything, so it must read as "nothing loaded yet" (the details screen
/// starts out of stock and `Loading`). `PartialEq` decides whether a
/// dispatch notifies subscribers.
pub trait UiState: Clone + PartialEq + Default + Send + Sync + 'static {}
