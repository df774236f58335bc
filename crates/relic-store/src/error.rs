//! Error types for object storage and decoding.

use relic_types::ObjectId;
use thiserror::Error;

use crate::object::ObjectKind;

/// Errors that can occur during object storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested object does not exist in the store.
    #[error("object not found: {id}")]
    NotFound { id: ObjectId },

    /// The stored object has a different kind than the caller expected.
    #[error("object {id} is a {actual}, expected {expected}")]
    KindMismatch {
        id: ObjectId,
        expected: ObjectKind,
        actual: ObjectKind,
    },

    /// The raw object encoding is unreadable (missing kind tag or unknown tag).
    #[error("malformed object: {reason}")]
    MalformedObject { reason: String },

    /// A tree payload failed strict decoding.
    #[error("malformed tree: {reason}")]
    MalformedTree { reason: String },

    /// A commit payload failed strict decoding.
    #[error("malformed commit: {reason}")]
    MalformedCommit { reason: String },

    /// I/O error from the underlying filesystem.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
