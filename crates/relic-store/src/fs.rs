//! Durable filesystem object store.
//!
//! Objects live under a single `objects/` directory, sharded by the first
//! two hex characters of the id to keep directory fan-out reasonable:
//! `objects/ab/cdef...`. Each file holds the canonical encoding
//! `<kind-tag>\0<payload>` and is written exactly once.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use relic_types::ObjectId;
use tracing::debug;

use crate::error::StoreResult;
use crate::object::StoredObject;
use crate::traits::ObjectStore;

/// Filesystem-backed implementation of [`ObjectStore`].
#[derive(Clone, Debug)]
pub struct FsObjectStore {
    objects_dir: PathBuf,
}

impl FsObjectStore {
    /// Open a store rooted at an existing `objects/` directory.
    pub fn new(objects_dir: impl Into<PathBuf>) -> Self {
        Self {
            objects_dir: objects_dir.into(),
        }
    }

    /// Create the `objects/` directory (and parents) and open a store on it.
    pub fn create(objects_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let objects_dir = objects_dir.into();
        fs::create_dir_all(&objects_dir)?;
        Ok(Self { objects_dir })
    }

    /// The root `objects/` directory.
    pub fn objects_dir(&self) -> &Path {
        &self.objects_dir
    }

    /// Sharded path for an id: `objects/<2 hex>/<38 hex>`.
    fn object_path(&self, id: &ObjectId) -> PathBuf {
        let hex = id.to_hex();
        self.objects_dir.join(&hex[..2]).join(&hex[2..])
    }
}

impl ObjectStore for FsObjectStore {
    fn read(&self, id: &ObjectId) -> StoreResult<Option<StoredObject>> {
        match fs::read(self.object_path(id)) {
            Ok(raw) => Ok(Some(StoredObject::decode(&raw)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, object: &StoredObject) -> StoreResult<ObjectId> {
        let id = object.compute_id();
        let path = self.object_path(&id);
        // Write-once: an existing file already holds this exact content.
        if path.exists() {
            return Ok(id);
        }
        if let Some(shard) = path.parent() {
            fs::create_dir_all(shard)?;
        }
        fs::write(&path, object.encode())?;
        debug!(id = %id.short_hex(), kind = %object.kind, "stored object");
        Ok(id)
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        Ok(self.object_path(id).exists())
    }
}
