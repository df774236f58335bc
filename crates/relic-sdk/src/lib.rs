//! High-level repository API for the Relic version-control engine.
//!
//! [`Repository`] is an explicit handle over one repository on disk -- the
//! working root plus the `.relic/` metadata directory -- threading the
//! component crates together: object store, reference store, commit graph,
//! tree snapshotting, and the diff/merge engines. There is no global
//! "current repository" state; every operation goes through a handle, which
//! keeps multiple repositories per process and temporary test roots cheap.
//!
//! The surface mirrors what a command-line collaborator needs: `init`,
//! `hash_object`/`cat_object`, `write_tree`/`read_tree`, `commit`, `log`,
//! `checkout`, `branch`/`tag`, `status`, `reset`, `show`, `diff`, `merge`.
//! Rendering and argument parsing stay outside this workspace.

pub mod error;
pub mod repository;
pub mod types;

pub use error::{RepoError, RepoResult};
pub use repository::{Repository, DEFAULT_BRANCH};
pub use types::{Checkout, HeadState, LogEntry, MergeOutcome, Status};
