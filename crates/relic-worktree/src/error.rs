//! Error types for working-directory operations.

use relic_store::StoreError;
use thiserror::Error;

/// Errors that can occur while snapshotting or materializing trees.
#[derive(Debug, Error)]
pub enum WorktreeError {
    /// A tree entry name contains a path separator or is `.`/`..`.
    #[error("illegal path name in tree entry: {name:?}")]
    IllegalPathName { name: String },

    /// A tree entry references an object kind that cannot appear in a tree.
    #[error("illegal object kind in tree entry: {kind}")]
    IllegalObjectKind { kind: String },

    /// Object storage failed underneath the scan or materialization.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// I/O error from the working directory.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for working-directory operations.
pub type WorktreeResult<T> = std::result::Result<T, WorktreeError>;
