//! Working-directory snapshotting for the Relic version-control engine.
//!
//! The tree snapshot engine turns a working directory into an immutable tree
//! object and back:
//!
//! - [`write_tree`] -- scan the working directory into blob and tree objects.
//! - [`working_tree`] -- the same scan, computing content ids without
//!   persisting anything (for status/diff against a committed snapshot).
//! - [`flatten_tree`] -- expand a tree object into a `path -> blob id` map.
//! - [`read_tree`] -- destructively replace the working directory with a
//!   tree's content.
//!
//! Fixed scan policies: the engine's own metadata directory ([`META_DIR`])
//! is always ignored, symbolic links are never traversed, and directories
//! are pruned only when empty after their non-ignored contents are removed.

pub mod error;
pub mod materialize;
pub mod snapshot;

pub use error::{WorktreeError, WorktreeResult};
pub use materialize::{flatten_tree, read_tree, replace_working_dir};
pub use snapshot::{working_tree, write_tree, META_DIR};
