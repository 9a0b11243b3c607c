//! Inputs to a screen reducer.

/// Something that can change a screen's state: typed text, a repository
/// emission, or the outcome of a write started by the controller.
///
/// Intents carry owned data (items are cloned out of the repository
/// channel) so they can cross into the forwarding tasks.
pub trait Intent: Send + 'static {}
