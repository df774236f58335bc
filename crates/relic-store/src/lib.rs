//! Content-addressed object storage for the Relic version-control engine.
//!
//! This crate implements a hash-keyed object store analogous to git's
//! `.git/objects/` directory. Every piece of durable data -- blobs, trees,
//! commits -- is stored as an immutable object identified by the SHA-1 hash
//! of its canonical encoding (`<kind-tag>\0<payload>`, so equal payloads of
//! different kinds never collide).
//!
//! # Object Types
//!
//! - [`ObjectKind::Blob`] -- raw file content
//! - [`ObjectKind::Tree`] -- directory listing mapping names to object ids
//! - [`ObjectKind::Commit`] -- snapshot reference plus parent links and message
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`FsObjectStore`] -- durable store sharded under `objects/`
//! - [`InMemoryObjectStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Objects are immutable once written (content-addressing guarantees this).
//! 2. Writing the same content twice is a no-op success.
//! 3. The store never interprets payloads -- decoding lives in [`object`].
//! 4. All I/O errors are propagated, never silently ignored; a missing
//!    object is an error at [`ObjectStore::get`], never "end of history".

pub mod error;
pub mod fs;
pub mod memory;
pub mod object;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use fs::FsObjectStore;
pub use memory::InMemoryObjectStore;
pub use object::{Commit, ObjectKind, StoredObject, Tree, TreeEntry};
pub use traits::ObjectStore;
