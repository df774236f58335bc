//! Shared identifier types for the Relic version-control engine.
//!
//! Every piece of durable data in Relic -- blobs, trees, commits -- is
//! identified by its [`ObjectId`], the SHA-1 digest of the object's canonical
//! encoding. This crate holds that identifier and nothing else, so every
//! other crate in the workspace can name objects without depending on the
//! storage layer.

pub mod error;
pub mod object_id;

pub use error::TypeError;
pub use object_id::ObjectId;
