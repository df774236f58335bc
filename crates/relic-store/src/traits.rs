//! The [`ObjectStore`] trait defining the storage interface.

use relic_types::ObjectId;

use crate::error::{StoreError, StoreResult};
use crate::object::{ObjectKind, StoredObject};

/// Content-addressed object store.
///
/// All implementations must satisfy these invariants:
/// - Objects are immutable once written; writing the same content twice is a
///   no-op success returning the same id.
/// - Objects are never deleted (garbage collection is out of scope).
/// - All I/O errors are propagated, never silently ignored.
pub trait ObjectStore: Send + Sync {
    /// Read an object by its content-addressed id.
    ///
    /// Returns `Ok(None)` if the object does not exist.
    /// Returns `Err` on I/O failure or an undecodable stored encoding.
    fn read(&self, id: &ObjectId) -> StoreResult<Option<StoredObject>>;

    /// Write an object and return its content-addressed id.
    ///
    /// If the object already exists, this is a no-op (idempotent).
    fn write(&self, object: &StoredObject) -> StoreResult<ObjectId>;

    /// Check whether an object exists in the store.
    fn exists(&self, id: &ObjectId) -> StoreResult<bool>;

    /// Read an object that must exist, optionally checking its kind.
    ///
    /// Fails with [`StoreError::NotFound`] when the id is absent and
    /// [`StoreError::KindMismatch`] when `expected` is given and differs
    /// from the stored kind. Passing `None` disables the kind check
    /// (inspection tooling).
    fn get(&self, id: &ObjectId, expected: Option<ObjectKind>) -> StoreResult<StoredObject> {
        let obj = self.read(id)?.ok_or(StoreError::NotFound { id: *id })?;
        if let Some(expected) = expected {
            if obj.kind != expected {
                return Err(StoreError::KindMismatch {
                    id: *id,
                    expected,
                    actual: obj.kind,
                });
            }
        }
        Ok(obj)
    }
}
