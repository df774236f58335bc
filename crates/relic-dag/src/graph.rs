//! Commit access and merge-base discovery.

use std::collections::HashSet;

use relic_store::{Commit, ObjectKind, ObjectStore};
use relic_types::ObjectId;
use tracing::debug;

use crate::error::DagResult;
use crate::walk::HistoryWalk;

/// Read and strictly decode a commit object.
pub fn get_commit(store: &dyn ObjectStore, id: ObjectId) -> DagResult<Commit> {
    let obj = store.get(&id, Some(ObjectKind::Commit))?;
    Ok(Commit::from_stored_object(&obj)?)
}

/// Nearest common ancestor of two commits.
///
/// Collects the full ancestor set of `a` (following *all* parents, not just
/// the first -- merge commits join histories) and returns the first commit of
/// `b`'s walk already in that set. Disjoint histories yield `Ok(None)`.
pub fn merge_base(
    store: &dyn ObjectStore,
    a: ObjectId,
    b: ObjectId,
) -> DagResult<Option<ObjectId>> {
    let mut reachable = HashSet::new();
    for item in HistoryWalk::new(store, [a]) {
        let (id, _) = item?;
        reachable.insert(id);
    }
    for item in HistoryWalk::new(store, [b]) {
        let (id, _) = item?;
        if reachable.contains(&id) {
            debug!(base = %id.short_hex(), "found merge base");
            return Ok(Some(id));
        }
    }
    Ok(None)
}
