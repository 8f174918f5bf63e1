//! Actions returned by screen event handlers.

use crate::submit::Payload;

/// An action that a screen handler returns to the [`App`](super::App).
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No state change needed.
    None,
    /// The modal committed; hand the payload to the update operation.
    Commit(Payload),
    /// The modal closed without committing.
    Close,
}
