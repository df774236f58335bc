//! Error types for merge operations.

use relic_diff::DiffError;
use relic_store::StoreError;
use thiserror::Error;

/// Errors that can occur during a tree merge.
#[derive(Debug, Error)]
pub enum MergeError {
    /// Reading a blob out of the object store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The diff layer (or its reconciler) failed.
    #[error(transparent)]
    Diff(#[from] DiffError),
}

/// Convenience type alias for merge operations.
pub type MergeResult<T> = std::result::Result<T, MergeError>;
