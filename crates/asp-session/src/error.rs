use std::path::PathBuf;

use asp_core::{Exam, SessionState};
use thiserror::Error;

/// Failures of the underlying key/value storage.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage quota exceeded writing '{key}': {needed} bytes needed, {available} available")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },

    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("storage I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("keyring error: {0}")]
    Keyring(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No user logged in")]
    NotAuthenticated,

    #[error("Invalid exam selection.")]
    InvalidExamSelection { requested: Exam },

    /// In-memory state was updated but the store rejected the write.
    #[error("session updated in memory but not persisted: {0}")]
    Persist(#[source] StoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid session transition from {from} to {to}")]
    InvalidTransition {
        from: SessionState,
        to: SessionState,
    },

    #[error("onboarding: {0}")]
    Onboarding(String),

    #[error("token: {0}")]
    Token(String),

    #[error("failed to encode user: {0}")]
    Encode(#[from] serde_json::Error),
}
