//! Error type aggregating every component failure.

use std::path::PathBuf;

use relic_dag::DagError;
use relic_diff::DiffError;
use relic_merge::MergeError;
use relic_refs::RefError;
use relic_store::StoreError;
use relic_worktree::WorktreeError;
use thiserror::Error;

/// Errors surfaced by repository operations.
///
/// Every variant is unrecoverable for the operation in progress; the calling
/// layer reports it and exits non-zero. There are no transient classes and
/// no retry policy.
#[derive(Debug, Error)]
pub enum RepoError {
    /// The path holds no repository metadata.
    #[error("not a relic repository: {path}")]
    NotARepository { path: PathBuf },

    /// The operation needs a history that does not exist yet.
    #[error("no commit yet")]
    NoCommitYet,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Refs(#[from] RefError),

    #[error(transparent)]
    Dag(#[from] DagError),

    #[error(transparent)]
    Worktree(#[from] WorktreeError),

    #[error(transparent)]
    Diff(#[from] DiffError),

    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for repository operations.
pub type RepoResult<T> = std::result::Result<T, RepoError>;
