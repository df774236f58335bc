//! Error types for diff operations.

use relic_store::StoreError;
use thiserror::Error;

/// Errors that can occur while computing diffs.
#[derive(Debug, Error)]
pub enum DiffError {
    /// Reading a blob out of the object store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The text reconciler returned an unexpected status.
    #[error("text reconciler failed: {reason}")]
    ReconcilerFailure { reason: String },
}

/// Convenience type alias for diff operations.
pub type DiffResult<T> = std::result::Result<T, DiffError>;
