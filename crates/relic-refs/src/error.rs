//! Error types for reference operations.

use thiserror::Error;

/// Errors that can occur during reference operations.
#[derive(Debug, Error)]
pub enum RefError {
    /// An attempt to write a reference with an empty value.
    #[error("empty value for ref {name}")]
    EmptyRefValue { name: String },

    /// A symbolic chain did not terminate within the dereference bound.
    #[error("symbolic ref chain starting at {name} does not terminate")]
    Cycle { name: String },

    /// A name resolved to nothing and is not a well-formed literal id.
    #[error("unknown revision: {name}")]
    UnknownRevision { name: String },

    /// A reference file holds neither a direct id nor a symbolic target.
    #[error("malformed ref {name}: {reason}")]
    MalformedRef { name: String, reason: String },

    /// I/O error from the underlying filesystem.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for reference operations.
pub type RefResult<T> = std::result::Result<T, RefError>;
