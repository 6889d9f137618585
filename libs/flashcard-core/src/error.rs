//! Error types for flashcard-core.

use thiserror::Error;

/// Errors raised while driving a test session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no cards in category {category}")]
    NoCards { category: String },

    #[error("answer is empty")]
    EmptyAnswer,

    #[error("card {position} was already answered")]
    AlreadyAnswered { position: usize },

    #[error("card {position} has not been answered yet")]
    NotAnswered { position: usize },

    #[error("test is finished")]
    Finished,
}

/// Errors that can occur when importing a card backup.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid import format: no cards array found")]
    MissingCards,

    #[error("no valid cards found in import data")]
    NoValidCards,
}

/// Errors that can occur when persisting cards.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}
