// ============================================================
// Layer 3 — Error Type
// ============================================================
// Core layers return BotError so callers can tell a broken
// system (storage down, model missing) apart from an FAQ that
// simply doesn't exist, which is not an error at all.
// The CLI wraps these in anyhow with extra context.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BotError>;

#[derive(Debug, Error)]
pub enum BotError {
    /// The database could not be opened or the query failed.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// The trained model artifact is missing, unreadable or incompatible.
    #[error("failed to load classifier: {0}")]
    ModelLoad(String),

    /// The question could not be turned into features.
    #[error("failed to classify question: {0}")]
    Classification(String),

    /// The training data cannot produce a model.
    #[error("training failed: {0}")]
    Training(String),

    /// An import file contained a record that can't be stored.
    #[error("invalid record #{index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Coarse, comparable classification of a BotError.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Storage,
    ModelLoad,
    Classification,
    Training,
    InvalidRecord,
    Io,
    Json,
}

impl BotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BotError::Storage(_)             => ErrorKind::Storage,
            BotError::ModelLoad(_)           => ErrorKind::ModelLoad,
            BotError::Classification(_)      => ErrorKind::Classification,
            BotError::Training(_)            => ErrorKind::Training,
            BotError::InvalidRecord { .. }   => ErrorKind::InvalidRecord,
            BotError::Io(_)                  => ErrorKind::Io,
            BotError::Json(_)                => ErrorKind::Json,
        }
    }
}
