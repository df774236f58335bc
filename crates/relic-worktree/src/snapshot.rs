//! Scanning the working directory into tree objects.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use relic_store::{ObjectKind, ObjectStore, StoredObject, Tree, TreeEntry};
use relic_types::ObjectId;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::WorktreeResult;

/// Name of the engine's metadata directory, always ignored by scans and
/// never touched by materialization.
pub const META_DIR: &str = ".relic";

/// Recursively snapshot the working directory under `root` into the store,
/// returning the id of the root tree object.
///
/// Regular files become blobs; subdirectories recurse into subtrees; the
/// metadata directory is skipped; symbolic links are never traversed.
/// Entries are sorted by name, so identical directory content always
/// produces an identical tree id regardless of filesystem iteration order.
pub fn write_tree(store: &dyn ObjectStore, root: &Path) -> WorktreeResult<ObjectId> {
    let mut entries = Vec::new();
    for dirent in fs::read_dir(root)? {
        let dirent = dirent?;
        let name = dirent.file_name().to_string_lossy().into_owned();
        if name == META_DIR {
            continue;
        }
        let file_type = dirent.file_type()?;
        if file_type.is_symlink() {
            continue;
        }
        if file_type.is_file() {
            let blob = StoredObject::new(ObjectKind::Blob, fs::read(dirent.path())?);
            let id = store.write(&blob)?;
            entries.push(TreeEntry::new(ObjectKind::Blob, id, name));
        } else if file_type.is_dir() {
            let id = write_tree(store, &dirent.path())?;
            entries.push(TreeEntry::new(ObjectKind::Tree, id, name));
        }
    }
    let tree = Tree::new(entries);
    let id = store.write(&tree.to_stored_object())?;
    debug!(id = %id.short_hex(), entries = tree.len(), "wrote tree");
    Ok(id)
}

/// Compute the `path -> blob id` mapping of the working directory without
/// persisting any object -- the scan behind status and diff.
///
/// Paths are relative to `root` and `/`-separated. The same skip rules as
/// [`write_tree`] apply.
pub fn working_tree(root: &Path) -> WorktreeResult<BTreeMap<String, ObjectId>> {
    let mut map = BTreeMap::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| e.file_name().to_string_lossy() != META_DIR);
    for entry in walker {
        let entry = entry.map_err(|e| {
            std::io::Error::other(format!("scan failed: {e}"))
        })?;
        if entry.path_is_symlink() || !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(root)
            .expect("walked path is under the scan root");
        let path = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        let blob = StoredObject::new(ObjectKind::Blob, fs::read(entry.path())?);
        map.insert(path, blob.compute_id());
    }
    Ok(map)
}
