//! Reference management for the Relic version-control engine.
//!
//! References are named, mutable pointers into the object store -- the
//! human-readable entry points into an otherwise content-addressed world.
//! A reference value is either *direct* (an object id) or *symbolic*
//! (a pointer to another reference, resolved transitively).
//!
//! - **Branches** live under `refs/heads/` and advance as commits are made.
//! - **Tags** live under `refs/tags/`.
//! - **`HEAD`** marks the current checkout position: symbolic to a branch
//!   under normal operation, a direct commit id when detached.
//! - **`MERGE_HEAD`** records the second parent of an in-progress merge and
//!   is deleted when the merge is committed.
//!
//! Resolution is depth-bounded: a cyclic symbolic chain fails with
//! [`RefError::Cycle`] instead of hanging.

pub mod error;
pub mod store;
pub mod types;

pub use error::{RefError, RefResult};
pub use store::FsRefStore;
pub use types::{heads_ref, tags_ref, RefValue, HEAD, MERGE_HEAD};
