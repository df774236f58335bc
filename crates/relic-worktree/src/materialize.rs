//! Expanding tree objects back into the working directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use relic_store::{ObjectKind, ObjectStore, Tree};
use relic_types::ObjectId;
use tracing::debug;

use crate::error::{WorktreeError, WorktreeResult};
use crate::snapshot::META_DIR;

/// Flatten a tree object into a full `path -> blob id` mapping.
///
/// Entry names are validated on the way: a name containing a separator or
/// equal to `.`/`..` fails with [`WorktreeError::IllegalPathName`], and an
/// entry kind that is neither blob nor tree fails with
/// [`WorktreeError::IllegalObjectKind`].
pub fn flatten_tree(
    store: &dyn ObjectStore,
    id: &ObjectId,
    base: &str,
) -> WorktreeResult<BTreeMap<String, ObjectId>> {
    let tree = Tree::from_stored_object(&store.get(id, Some(ObjectKind::Tree))?)?;
    let mut map = BTreeMap::new();
    for entry in &tree.entries {
        if entry.name.contains('/') || entry.name == "." || entry.name == ".." {
            return Err(WorktreeError::IllegalPathName {
                name: entry.name.clone(),
            });
        }
        let path = if base.is_empty() {
            entry.name.clone()
        } else {
            format!("{base}/{}", entry.name)
        };
        match entry.kind {
            ObjectKind::Blob => {
                map.insert(path, entry.id);
            }
            ObjectKind::Tree => {
                map.extend(flatten_tree(store, &entry.id, &path)?);
            }
            other => {
                return Err(WorktreeError::IllegalObjectKind {
                    kind: other.to_string(),
                });
            }
        }
    }
    Ok(map)
}

/// Destructively replace the working directory under `root` with the content
/// of the tree object `id`.
///
/// All non-ignored files are removed first (directories are pruned only when
/// empty afterwards; the metadata directory always survives), then every
/// path from the flattened tree is recreated verbatim. Any uncommitted local
/// change not present in the tree is permanently lost -- warning the user is
/// the caller's job, at the interface boundary. The replacement is not
/// atomic with respect to crashes.
pub fn read_tree(store: &dyn ObjectStore, root: &Path, id: &ObjectId) -> WorktreeResult<()> {
    let flat = flatten_tree(store, id, "")?;
    let mut files = BTreeMap::new();
    for (path, blob_id) in flat {
        let blob = store.get(&blob_id, Some(ObjectKind::Blob))?;
        files.insert(path, blob.data);
    }
    replace_working_dir(root, &files)?;
    debug!(id = %id.short_hex(), files = files.len(), "materialized tree");
    Ok(())
}

/// Clear the working directory and write the given `path -> bytes` mapping
/// into it. The destructive primitive beneath [`read_tree`] and merge
/// materialization.
pub fn replace_working_dir(root: &Path, files: &BTreeMap<String, Vec<u8>>) -> WorktreeResult<()> {
    clear_working_dir(root)?;
    for (path, bytes) in files {
        let target = root.join(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(target, bytes)?;
    }
    Ok(())
}

/// Remove all non-ignored files under `root`, pruning directories that end
/// up empty. The metadata directory is never entered or removed.
fn clear_working_dir(root: &Path) -> WorktreeResult<()> {
    for dirent in fs::read_dir(root)? {
        let dirent = dirent?;
        if dirent.file_name().to_string_lossy() == META_DIR {
            continue;
        }
        let file_type = dirent.file_type()?;
        if file_type.is_dir() && !file_type.is_symlink() {
            clear_working_dir(&dirent.path())?;
            // Prune only when empty: a directory that still holds ignored
            // content stays in place.
            if fs::read_dir(dirent.path())?.next().is_none() {
                fs::remove_dir(dirent.path())?;
            }
        } else {
            fs::remove_file(dirent.path())?;
        }
    }
    Ok(())
}
