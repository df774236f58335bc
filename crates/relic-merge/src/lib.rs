//! Three-way tree merge for the Relic version-control engine.
//!
//! Reconciles two divergent snapshots against their common ancestor. The
//! tree level decides which paths need attention; the per-path content work
//! is delegated to a [`TextReconciler`](relic_diff::TextReconciler).
//! Conflict markers produced there pass through verbatim -- this crate
//! orchestrates, it does not resolve.

pub mod error;
pub mod tree_merge;

pub use error::{MergeError, MergeResult};
pub use tree_merge::{merge_trees, MergedTree};
