//! Path-level comparison of flattened trees.

use std::collections::BTreeMap;

use relic_store::{ObjectKind, ObjectStore};
use relic_types::ObjectId;

use crate::error::DiffResult;
use crate::reconciler::TextReconciler;

/// How a path changed between two trees.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    /// Absent in the old tree, present in the new one.
    Added,
    /// Present in the old tree, absent in the new one.
    Deleted,
    /// Present in both with different content.
    Modified,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added => f.write_str("new file"),
            Self::Deleted => f.write_str("deleted"),
            Self::Modified => f.write_str("modified"),
        }
    }
}

/// Outer-join N `path -> id` mappings by path.
///
/// Every path present in at least one tree appears exactly once, paired with
/// one entry per input tree (`None` where the path is absent). Output is
/// sorted by path.
pub fn compare_trees(
    trees: &[&BTreeMap<String, ObjectId>],
) -> Vec<(String, Vec<Option<ObjectId>>)> {
    let mut joined: BTreeMap<String, Vec<Option<ObjectId>>> = BTreeMap::new();
    for (i, tree) in trees.iter().enumerate() {
        for (path, id) in tree.iter() {
            joined
                .entry(path.clone())
                .or_insert_with(|| vec![None; trees.len()])[i] = Some(*id);
        }
    }
    joined.into_iter().collect()
}

/// Classify every path that differs between two trees.
///
/// Classification is positional: absent -> present is [`ChangeKind::Added`],
/// present -> absent is [`ChangeKind::Deleted`], differing ids are
/// [`ChangeKind::Modified`]; equal ids are omitted.
pub fn changed_files(
    from: &BTreeMap<String, ObjectId>,
    to: &BTreeMap<String, ObjectId>,
) -> Vec<(String, ChangeKind)> {
    let mut changes = Vec::new();
    for (path, ids) in compare_trees(&[from, to]) {
        let kind = match (ids[0], ids[1]) {
            (None, Some(_)) => ChangeKind::Added,
            (Some(_), None) => ChangeKind::Deleted,
            (Some(a), Some(b)) if a != b => ChangeKind::Modified,
            _ => continue,
        };
        changes.push((path, kind));
    }
    changes
}

/// Produce a concatenated text report for every path that differs between
/// two trees, delegating the line diff to the reconciler.
///
/// An absent id means "empty" for diff purposes, so additions and deletions
/// render as diffs against empty content.
pub fn diff_trees(
    store: &dyn ObjectStore,
    from: &BTreeMap<String, ObjectId>,
    to: &BTreeMap<String, ObjectId>,
    reconciler: &dyn TextReconciler,
) -> DiffResult<Vec<u8>> {
    let mut report = Vec::new();
    for (path, ids) in compare_trees(&[from, to]) {
        if ids[0] == ids[1] {
            continue;
        }
        let old = read_blob_or_empty(store, ids[0])?;
        let new = read_blob_or_empty(store, ids[1])?;
        report.extend(reconciler.diff(&path, &old, &new)?);
    }
    Ok(report)
}

/// Blob content for an optional id; `None` reads as empty.
pub fn read_blob_or_empty(store: &dyn ObjectStore, id: Option<ObjectId>) -> DiffResult<Vec<u8>> {
    match id {
        Some(id) => Ok(store.get(&id, Some(ObjectKind::Blob))?.data),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconciler::LineReconciler;
    use relic_store::{InMemoryObjectStore, StoredObject};

    fn oid(b: u8) -> ObjectId {
        ObjectId::from_digest([b; 20])
    }

    fn tree(entries: &[(&str, ObjectId)]) -> BTreeMap<String, ObjectId> {
        entries
            .iter()
            .map(|(path, id)| (path.to_string(), *id))
            .collect()
    }

    #[test]
    fn compare_outer_joins_by_path() {
        let a = tree(&[("common.txt", oid(1)), ("only_a.txt", oid(2))]);
        let b = tree(&[("common.txt", oid(3)), ("only_b.txt", oid(4))]);

        let joined = compare_trees(&[&a, &b]);
        assert_eq!(
            joined,
            vec![
                ("common.txt".into(), vec![Some(oid(1)), Some(oid(3))]),
                ("only_a.txt".into(), vec![Some(oid(2)), None]),
                ("only_b.txt".into(), vec![None, Some(oid(4))]),
            ]
        );
    }

    #[test]
    fn compare_three_trees() {
        let base = tree(&[("f.txt", oid(1))]);
        let ours = tree(&[("f.txt", oid(1)), ("new.txt", oid(2))]);
        let theirs = tree(&[("f.txt", oid(3))]);

        let joined = compare_trees(&[&base, &ours, &theirs]);
        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].1, vec![Some(oid(1)), Some(oid(1)), Some(oid(3))]);
        assert_eq!(joined[1].1, vec![None, Some(oid(2)), None]);
    }

    #[test]
    fn classification_is_positional() {
        let from = tree(&[("kept.txt", oid(1)), ("gone.txt", oid(2)), ("mod.txt", oid(3))]);
        let to = tree(&[("kept.txt", oid(1)), ("mod.txt", oid(4)), ("new.txt", oid(5))]);

        let changes = changed_files(&from, &to);
        assert_eq!(
            changes,
            vec![
                ("gone.txt".into(), ChangeKind::Deleted),
                ("mod.txt".into(), ChangeKind::Modified),
                ("new.txt".into(), ChangeKind::Added),
            ]
        );
    }

    #[test]
    fn change_kind_labels() {
        assert_eq!(ChangeKind::Added.to_string(), "new file");
        assert_eq!(ChangeKind::Deleted.to_string(), "deleted");
        assert_eq!(ChangeKind::Modified.to_string(), "modified");
    }

    #[test]
    fn diff_report_covers_changed_paths_only() {
        let store = InMemoryObjectStore::new();
        let old_id = store
            .write(&StoredObject::new(ObjectKind::Blob, b"hello\n".to_vec()))
            .unwrap();
        let new_id = store
            .write(&StoredObject::new(ObjectKind::Blob, b"world\n".to_vec()))
            .unwrap();
        let same_id = store
            .write(&StoredObject::new(ObjectKind::Blob, b"same\n".to_vec()))
            .unwrap();

        let from = tree(&[("f.txt", old_id), ("same.txt", same_id)]);
        let to = tree(&[("f.txt", new_id), ("same.txt", same_id)]);

        let report = diff_trees(&store, &from, &to, &LineReconciler).unwrap();
        let text = String::from_utf8(report).unwrap();
        assert!(text.contains("f.txt"));
        assert!(text.contains("-hello"));
        assert!(text.contains("+world"));
        assert!(!text.contains("same.txt"));
    }

    #[test]
    fn absent_ids_diff_against_empty() {
        let store = InMemoryObjectStore::new();
        let id = store
            .write(&StoredObject::new(ObjectKind::Blob, b"fresh\n".to_vec()))
            .unwrap();
        let from = BTreeMap::new();
        let to = tree(&[("new.txt", id)]);

        let report = diff_trees(&store, &from, &to, &LineReconciler).unwrap();
        let text = String::from_utf8(report).unwrap();
        assert!(text.contains("+fresh"));
    }
}
