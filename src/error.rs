//! Error types for host and feed collaborators.
//!
//! Errors are classified by what they isolate:
//! - `FeedError`: one calendar source failed; other sources still aggregate
//! - `HostError`: one vault operation failed; only that action aborts
//! - `StoreError`: the persisted data blob could not be read or written

use thiserror::Error;

/// Error from a single calendar feed source.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("invalid feed url: {0}")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("feed returned HTTP {0}")]
    Status(u16),

    #[error("malformed feed: {0}")]
    Malformed(String),
}

/// Error from a vault (note host) primitive.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for HostError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => HostError::NotFound(err.to_string()),
            std::io::ErrorKind::AlreadyExists => HostError::AlreadyExists(err.to_string()),
            _ => HostError::Io(err.to_string()),
        }
    }
}

/// Error from the persistent data store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("serialize error: {0}")]
    Serialize(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}
