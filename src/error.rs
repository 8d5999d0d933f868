//! Error types for the gridspell engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Recoverable rule violation, reported to the acting player only.
    /// The game state is unchanged when this is returned.
    #[error("{0}")]
    IllegalAction(String),

    /// A sorcery interaction is resolving; all other mutating actions are
    /// rejected for both players until it finalizes or aborts.
    #[error("A sorcery is still resolving")]
    InteractionPending,

    /// A step input arrived with no interaction in progress.
    #[error("No sorcery is resolving")]
    NoPendingInteraction,

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Invalid deck: {0}")]
    InvalidDeck(String),

    /// A card id did not resolve where the engine expected it. This means a
    /// desynchronized client or a scripting bug, never a legal play.
    #[error("Card not found: {0}")]
    CardNotFound(u32),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl EngineError {
    pub fn illegal(reason: impl Into<String>) -> Self {
        EngineError::IllegalAction(reason.into())
    }

    /// Errors a client can provoke with a bad (but well-formed) request.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EngineError::IllegalAction(_)
                | EngineError::InteractionPending
                | EngineError::NoPendingInteraction
                | EngineError::InvalidDeck(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classification() {
        assert!(EngineError::illegal("Not your turn").is_recoverable());
        assert!(EngineError::InteractionPending.is_recoverable());
        assert!(!EngineError::CardNotFound(3).is_recoverable());
        assert!(!EngineError::Internal("bad".into()).is_recoverable());
    }

    #[test]
    fn test_display_passes_reason_through() {
        let err = EngineError::illegal("You've used all your moves");
        assert_eq!(err.to_string(), "You've used all your moves");
    }
}
