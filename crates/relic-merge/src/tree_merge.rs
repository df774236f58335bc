//! Per-path orchestration of the three-way merge.

use std::collections::BTreeMap;

use relic_diff::tree_diff::{compare_trees, read_blob_or_empty};
use relic_diff::TextReconciler;
use relic_store::ObjectStore;
use relic_types::ObjectId;
use tracing::debug;

use crate::error::MergeResult;

/// The outcome of merging three trees: the full resulting file set plus the
/// paths whose content carries conflict markers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergedTree {
    /// Every path of the merged tree, mapped to its merged bytes.
    pub files: BTreeMap<String, Vec<u8>>,
    /// Paths whose merged content contains conflict markers.
    pub conflicts: Vec<String>,
}

impl MergedTree {
    /// Returns `true` when no path conflicted.
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Merge `ours` and `theirs` against their common `base`, all three given as
/// flattened `path -> blob id` mappings.
///
/// Every path present in any of the three trees is considered; an absent
/// entry reads as empty content. Paths where at most one side diverged from
/// the base resolve by taking that side's bytes verbatim (so binary content
/// survives untouched); only genuine three-way disagreements go through the
/// text reconciler, whose conflict markers are passed through verbatim.
pub fn merge_trees(
    store: &dyn ObjectStore,
    base: &BTreeMap<String, ObjectId>,
    ours: &BTreeMap<String, ObjectId>,
    theirs: &BTreeMap<String, ObjectId>,
    reconciler: &dyn TextReconciler,
) -> MergeResult<MergedTree> {
    let mut merged = MergedTree::default();
    for (path, ids) in compare_trees(&[base, ours, theirs]) {
        let (base_id, our_id, their_id) = (ids[0], ids[1], ids[2]);

        // Trivial resolutions keep the winning side's bytes untouched.
        let winner = if our_id == their_id {
            Some(our_id)
        } else if base_id == our_id {
            Some(their_id)
        } else if base_id == their_id {
            Some(our_id)
        } else {
            None
        };

        let bytes = match winner {
            Some(id) => read_blob_or_empty(store, id)?,
            None => {
                let base_bytes = read_blob_or_empty(store, base_id)?;
                let our_bytes = read_blob_or_empty(store, our_id)?;
                let their_bytes = read_blob_or_empty(store, their_id)?;
                let outcome = reconciler.merge(&base_bytes, &our_bytes, &their_bytes)?;
                if outcome.conflicted {
                    debug!(path = %path, "merge conflict");
                    merged.conflicts.push(path.clone());
                }
                outcome.bytes
            }
        };
        merged.files.insert(path, bytes);
    }
    Ok(merged)
}
