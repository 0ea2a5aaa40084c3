//! Construction-time error taxonomy.
//!
//! Everything past construction is success-shaped: out-of-range navigation
//! clamps, no-op transitions are ignored, and cancelled animations complete
//! normally. Nothing is ever reported through the event channel.

use thiserror::Error;

/// Errors produced while constructing a [`crate::Deck`].
#[derive(Debug, Error)]
pub enum DeckError {
    /// `TransitionOptions` require a strictly positive duration.
    #[error("transition_speed_ms must be greater than zero")]
    ZeroTransitionSpeed,
    /// A serialized [`crate::DeckDefinition`] failed to parse.
    #[error("invalid deck definition: {0}")]
    InvalidDefinition(#[from] serde_json::Error),
}
