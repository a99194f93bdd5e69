// Error types module

use crate::compositor::CompositionError;
use crate::constants::MSG_GENERIC_FAILURE;

/// Errors surfaced by the request handler.
///
/// Only `InvalidInput` carries a message meant for the user. Composition
/// failures are logged in full and shown as a generic message.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Empty, whitespace-only or overlong text. Never reaches the compositor.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The compositor failed.
    #[error(transparent)]
    Composition(#[from] CompositionError),
}

impl ServiceError {
    /// Message that is safe to show in the response page.
    pub fn user_message(&self) -> &str {
        match self {
            ServiceError::InvalidInput(msg) => msg,
            ServiceError::Composition(_) => MSG_GENERIC_FAILURE,
        }
    }
}
