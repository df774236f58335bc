//! Lazy ancestry walk over the commit DAG.

use std::collections::{HashSet, VecDeque};

use relic_store::{Commit, ObjectStore};
use relic_types::ObjectId;

use crate::error::DagResult;
use crate::graph::get_commit;

/// Lazy walk over a set of commits and all their ancestors.
///
/// Each reachable commit is yielded exactly once, even when the DAG reaches
/// it via several paths (diamond histories). The first parent of each
/// visited commit is pushed to the *front* of the frontier and later parents
/// to the back, so mainline ancestry is explored before merged-in side
/// branches -- the order users expect from a history listing.
///
/// The visited set also bounds the walk on a corrupt, cyclic parent
/// relation: traversal terminates instead of hanging.
pub struct HistoryWalk<'a> {
    store: &'a dyn ObjectStore,
    frontier: VecDeque<ObjectId>,
    visited: HashSet<ObjectId>,
}

impl<'a> HistoryWalk<'a> {
    /// Start a walk seeded from the given commit ids.
    pub fn new(store: &'a dyn ObjectStore, start: impl IntoIterator<Item = ObjectId>) -> Self {
        Self {
            store,
            frontier: start.into_iter().collect(),
            visited: HashSet::new(),
        }
    }
}

impl Iterator for HistoryWalk<'_> {
    type Item = DagResult<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let id = self.frontier.pop_front()?;
            if !self.visited.insert(id) {
                continue;
            }
            let commit = match get_commit(self.store, id) {
                Ok(commit) => commit,
                // A missing or unreadable commit propagates; it is not the
                // end of history.
                Err(e) => return Some(Err(e)),
            };
            let mut parents = commit.parents.iter().copied();
            if let Some(first) = parents.next() {
                self.frontier.push_front(first);
            }
            for parent in parents {
                self.frontier.push_back(parent);
            }
            return Some(Ok((id, commit)));
        }
    }
}
