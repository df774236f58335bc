//! Error types for commit graph operations.

use relic_store::StoreError;
use thiserror::Error;

/// Errors that can occur during graph traversal.
#[derive(Debug, Error)]
pub enum DagError {
    /// Reading or decoding a commit failed (missing object, kind mismatch,
    /// malformed payload).
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience type alias for graph operations.
pub type DagResult<T> = std::result::Result<T, DagError>;
