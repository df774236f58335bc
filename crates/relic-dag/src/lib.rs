//! Commit graph traversal for the Relic version-control engine.
//!
//! The commit history is a DAG over the parent relation, stored as commit
//! objects in an [`ObjectStore`](relic_store::ObjectStore). This crate owns
//! the graph algorithms on top of it:
//!
//! - [`HistoryWalk`] -- a lazy, deduplicated walk over a commit's ancestry,
//!   exploring mainline (first-parent) history before merged-in side
//!   branches.
//! - [`merge_base`] -- nearest common ancestor of two commits.
//!
//! A missing commit object mid-walk is an error, never treated as the end of
//! history; a cyclic parent relation (corruption) terminates via the
//! visited set instead of looping forever.

pub mod error;
pub mod graph;
pub mod walk;

pub use error::{DagError, DagResult};
pub use graph::{get_commit, merge_base};
pub use walk::HistoryWalk;
