//! Durable filesystem reference store.
//!
//! References are plain files under the metadata root: `HEAD`, `MERGE_HEAD`,
//! and the `refs/heads/` / `refs/tags/` namespaces. Each file holds either a
//! direct 40-hex id or `ref: <other-ref-name>`.
//!
//! Dereferencing resolves the *entire* symbolic chain before acting, so a
//! rewrite through `HEAD` always lands on the terminal concrete reference
//! (the branch), never on `HEAD` itself.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use relic_types::ObjectId;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{RefError, RefResult};
use crate::types::{RefValue, HEAD};

/// Upper bound on symbolic chain length. Chains deeper than this are treated
/// as cycles.
const MAX_DEREF_DEPTH: usize = 32;

/// Filesystem-backed reference store rooted at the metadata directory.
#[derive(Clone, Debug)]
pub struct FsRefStore {
    meta_dir: PathBuf,
}

impl FsRefStore {
    /// Open a store rooted at the metadata directory (e.g. `.relic/`).
    pub fn new(meta_dir: impl Into<PathBuf>) -> Self {
        Self {
            meta_dir: meta_dir.into(),
        }
    }

    /// The metadata root this store operates under.
    pub fn meta_dir(&self) -> &Path {
        &self.meta_dir
    }

    fn ref_path(&self, name: &str) -> PathBuf {
        self.meta_dir.join(name)
    }

    /// Read a single reference file without following symbolic chains.
    fn read_raw(&self, name: &str) -> RefResult<Option<RefValue>> {
        match fs::read_to_string(self.ref_path(name)) {
            Ok(content) => Ok(Some(RefValue::decode(name, &content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Follow the symbolic chain from `name`, returning the terminal
    /// reference name and its value (which is `None` when the terminal file
    /// does not exist yet).
    ///
    /// With `deref = false` the chain is not followed: the raw value of
    /// `name` itself is returned.
    fn resolve(&self, name: &str, deref: bool) -> RefResult<(String, Option<RefValue>)> {
        let mut current = name.to_string();
        for _ in 0..MAX_DEREF_DEPTH {
            let value = self.read_raw(&current)?;
            match value {
                Some(RefValue::Symbolic(target)) if deref => current = target,
                other => return Ok((current, other)),
            }
        }
        Err(RefError::Cycle {
            name: name.to_string(),
        })
    }

    /// Write a reference.
    ///
    /// With `deref`, the terminal concrete reference of the symbolic chain
    /// is the one rewritten. Writing a symbolic value with an empty target
    /// fails with [`RefError::EmptyRefValue`].
    pub fn update_ref(&self, name: &str, value: &RefValue, deref: bool) -> RefResult<()> {
        if let RefValue::Symbolic(target) = value {
            if target.trim().is_empty() {
                return Err(RefError::EmptyRefValue {
                    name: name.to_string(),
                });
            }
        }
        let (target_name, _) = self.resolve(name, deref)?;
        let path = self.ref_path(&target_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, value.encode())?;
        debug!(name = %target_name, value = %value, "updated ref");
        Ok(())
    }

    /// Read a reference, following the symbolic chain when `deref` is set.
    ///
    /// A reference that does not exist is `Ok(None)` -- "not set" is a normal
    /// state (`HEAD` before the first commit), not an error.
    pub fn get_ref(&self, name: &str, deref: bool) -> RefResult<Option<RefValue>> {
        let (_, value) = self.resolve(name, deref)?;
        Ok(value)
    }

    /// Delete the (optionally dereferenced) reference. Returns `true` if the
    /// underlying entry existed.
    pub fn delete_ref(&self, name: &str, deref: bool) -> RefResult<bool> {
        let (target_name, _) = self.resolve(name, deref)?;
        match fs::remove_file(self.ref_path(&target_name)) {
            Ok(()) => {
                debug!(name = %target_name, "deleted ref");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Enumerate all concrete references whose name starts with `prefix`,
    /// each fully dereferenced to its terminal object id (`None` when the
    /// chain ends at a reference that is not set). Sorted by name.
    pub fn iter_refs(&self, prefix: &str) -> RefResult<Vec<(String, Option<ObjectId>)>> {
        let mut names = Vec::new();
        for special in [HEAD, crate::types::MERGE_HEAD] {
            if self.ref_path(special).is_file() {
                names.push(special.to_string());
            }
        }
        let refs_root = self.meta_dir.join("refs");
        if refs_root.is_dir() {
            for entry in WalkDir::new(&refs_root) {
                let entry = entry.map_err(|e| {
                    RefError::Io(e.into_io_error().unwrap_or_else(|| {
                        std::io::Error::new(ErrorKind::Other, "walk error")
                    }))
                })?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let rel = entry
                    .path()
                    .strip_prefix(&self.meta_dir)
                    .expect("walked path is under the metadata root");
                let name: Vec<String> = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                names.push(name.join("/"));
            }
        }
        names.sort();

        let mut out = Vec::new();
        for name in names {
            if !name.starts_with(prefix) {
                continue;
            }
            let value = self.get_ref(&name, true)?;
            out.push((name, value.and_then(|v| v.as_direct())));
        }
        Ok(out)
    }

    /// Resolve a user-supplied short name to an object id.
    ///
    /// Tries, in order: the literal name, `refs/<name>`, `refs/tags/<name>`,
    /// `refs/heads/<name>`. If none resolve and the name is a well-formed
    /// 40-hex string, it is taken as a literal id. `@` is a fixed alias for
    /// `HEAD`. Anything else fails with [`RefError::UnknownRevision`].
    pub fn resolve_name(&self, name: &str) -> RefResult<ObjectId> {
        let name = if name == "@" { HEAD } else { name };
        let candidates = [
            name.to_string(),
            format!("refs/{name}"),
            format!("refs/tags/{name}"),
            format!("refs/heads/{name}"),
        ];
        for candidate in &candidates {
            if let Some(RefValue::Direct(id)) = self.get_ref(candidate, true)? {
                return Ok(id);
            }
        }
        if ObjectId::is_well_formed(name) {
            return ObjectId::from_hex(name).map_err(|_| RefError::UnknownRevision {
                name: name.to_string(),
            });
        }
        Err(RefError::UnknownRevision {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{heads_ref, tags_ref, MERGE_HEAD};

    fn oid(b: u8) -> ObjectId {
        ObjectId::from_digest([b; 20])
    }

    fn temp_store() -> (tempfile::TempDir, FsRefStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FsRefStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn missing_ref_is_none() {
        let (_dir, store) = temp_store();
        assert!(store.get_ref("refs/heads/main", true).unwrap().is_none());
    }

    #[test]
    fn direct_write_and_read() {
        let (_dir, store) = temp_store();
        store
            .update_ref(&heads_ref("main"), &RefValue::Direct(oid(1)), true)
            .unwrap();
        let value = store.get_ref(&heads_ref("main"), true).unwrap().unwrap();
        assert_eq!(value.as_direct(), Some(oid(1)));
    }

    #[test]
    fn symbolic_chain_resolves_to_terminal_value() {
        let (_dir, store) = temp_store();
        store
            .update_ref(&heads_ref("main"), &RefValue::Direct(oid(1)), true)
            .unwrap();
        store
            .update_ref(HEAD, &RefValue::Symbolic(heads_ref("main")), false)
            .unwrap();

        let resolved = store.get_ref(HEAD, true).unwrap().unwrap();
        assert_eq!(resolved.as_direct(), Some(oid(1)));
        // Raw read keeps the symbolic form.
        let raw = store.get_ref(HEAD, false).unwrap().unwrap();
        assert!(raw.is_symbolic());
    }

    #[test]
    fn deref_update_rewrites_the_branch_not_head() {
        let (_dir, store) = temp_store();
        store
            .update_ref(HEAD, &RefValue::Symbolic(heads_ref("main")), false)
            .unwrap();
        store.update_ref(HEAD, &RefValue::Direct(oid(9)), true).unwrap();

        // HEAD stays symbolic; the branch received the id.
        assert!(store.get_ref(HEAD, false).unwrap().unwrap().is_symbolic());
        assert_eq!(
            store
                .get_ref(&heads_ref("main"), false)
                .unwrap()
                .unwrap()
                .as_direct(),
            Some(oid(9))
        );
    }

    #[test]
    fn deep_symbolic_chain_resolves() {
        let (_dir, store) = temp_store();
        store
            .update_ref("refs/c", &RefValue::Direct(oid(3)), false)
            .unwrap();
        store
            .update_ref("refs/b", &RefValue::Symbolic("refs/c".into()), false)
            .unwrap();
        store
            .update_ref("refs/a", &RefValue::Symbolic("refs/b".into()), false)
            .unwrap();
        let value = store.get_ref("refs/a", true).unwrap().unwrap();
        assert_eq!(value.as_direct(), Some(oid(3)));
    }

    #[test]
    fn cyclic_chain_fails_instead_of_hanging() {
        let (_dir, store) = temp_store();
        store
            .update_ref("refs/a", &RefValue::Symbolic("refs/b".into()), false)
            .unwrap();
        store
            .update_ref("refs/b", &RefValue::Symbolic("refs/a".into()), false)
            .unwrap();
        let err = store.get_ref("refs/a", true).unwrap_err();
        assert!(matches!(err, RefError::Cycle { .. }));
    }

    #[test]
    fn empty_symbolic_value_rejected() {
        let (_dir, store) = temp_store();
        let err = store
            .update_ref(HEAD, &RefValue::Symbolic("  ".into()), false)
            .unwrap_err();
        assert!(matches!(err, RefError::EmptyRefValue { .. }));
    }

    #[test]
    fn delete_returns_whether_entry_existed() {
        let (_dir, store) = temp_store();
        store
            .update_ref(MERGE_HEAD, &RefValue::Direct(oid(4)), false)
            .unwrap();
        assert!(store.delete_ref(MERGE_HEAD, false).unwrap());
        assert!(!store.delete_ref(MERGE_HEAD, false).unwrap());
        assert!(store.get_ref(MERGE_HEAD, true).unwrap().is_none());
    }

    #[test]
    fn iter_refs_is_sorted_and_dereferenced() {
        let (_dir, store) = temp_store();
        store
            .update_ref(&heads_ref("main"), &RefValue::Direct(oid(1)), true)
            .unwrap();
        store
            .update_ref(&heads_ref("dev"), &RefValue::Direct(oid(2)), true)
            .unwrap();
        store
            .update_ref(&tags_ref("v1"), &RefValue::Direct(oid(3)), true)
            .unwrap();
        store
            .update_ref(HEAD, &RefValue::Symbolic(heads_ref("main")), false)
            .unwrap();

        let all = store.iter_refs("").unwrap();
        let names: Vec<&str> = all.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec!["HEAD", "refs/heads/dev", "refs/heads/main", "refs/tags/v1"]
        );
        // HEAD dereferences through the branch.
        assert_eq!(all[0].1, Some(oid(1)));

        let heads = store.iter_refs("refs/heads/").unwrap();
        assert_eq!(heads.len(), 2);
    }

    #[test]
    fn resolve_name_priority_and_fallbacks() {
        let (_dir, store) = temp_store();
        store
            .update_ref(&heads_ref("main"), &RefValue::Direct(oid(1)), true)
            .unwrap();
        store
            .update_ref(&tags_ref("v1"), &RefValue::Direct(oid(2)), true)
            .unwrap();
        store
            .update_ref(HEAD, &RefValue::Symbolic(heads_ref("main")), false)
            .unwrap();

        assert_eq!(store.resolve_name("main").unwrap(), oid(1));
        assert_eq!(store.resolve_name("v1").unwrap(), oid(2));
        assert_eq!(store.resolve_name("heads/main").unwrap(), oid(1));
        assert_eq!(store.resolve_name("HEAD").unwrap(), oid(1));
        assert_eq!(store.resolve_name("@").unwrap(), oid(1));

        // A tag shadows a branch of the same name (tags are tried first).
        store
            .update_ref(&tags_ref("main"), &RefValue::Direct(oid(7)), true)
            .unwrap();
        assert_eq!(store.resolve_name("main").unwrap(), oid(7));
    }

    #[test]
    fn resolve_name_accepts_literal_ids() {
        let (_dir, store) = temp_store();
        let literal = oid(5).to_hex();
        assert_eq!(store.resolve_name(&literal).unwrap(), oid(5));
    }

    #[test]
    fn resolve_name_rejects_unknown() {
        let (_dir, store) = temp_store();
        let err = store.resolve_name("no-such-branch").unwrap_err();
        assert!(matches!(err, RefError::UnknownRevision { .. }));
    }
}
