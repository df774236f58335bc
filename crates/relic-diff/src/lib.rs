//! Diff engine for the Relic version-control engine.
//!
//! Computes path-level differences between trees and delegates byte-level
//! text work to a pluggable reconciler:
//!
//! - [`compare_trees`] -- N-way outer join of `path -> id` mappings, the
//!   shared primitive beneath diff, status, and merge.
//! - [`changed_files`] -- positional change classification
//!   (added/deleted/modified).
//! - [`diff_trees`] -- concatenated per-path text reports.
//! - [`TextReconciler`] -- the injected line-diff/three-way-merge capability;
//!   [`LineReconciler`] is the default implementation, built on the
//!   `similar` crate's Myers line matching.

pub mod error;
pub mod reconciler;
pub mod tree_diff;

pub use error::{DiffError, DiffResult};
pub use reconciler::{LineReconciler, Merged, TextReconciler};
pub use tree_diff::{changed_files, compare_trees, diff_trees, ChangeKind};
