//! Result types returned by repository operations.

use relic_diff::ChangeKind;
use relic_store::Commit;
use relic_types::ObjectId;

/// One entry of a history listing.
#[derive(Clone, Debug)]
pub struct LogEntry {
    /// The commit id.
    pub id: ObjectId,
    /// The decoded commit.
    pub commit: Commit,
    /// Names of all references pointing at this commit.
    pub refs: Vec<String>,
}

/// Result of a checkout: where the repository now points, and whether the
/// caller should be told about a detached state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkout {
    /// The commit the working directory now reflects.
    pub id: ObjectId,
    /// `true` when `HEAD` holds the commit id directly instead of pointing
    /// at a branch.
    pub detached: bool,
}

/// Where `HEAD` currently points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeadState {
    /// On a branch (possibly one without commits yet).
    Branch(String),
    /// Detached at a specific commit.
    Detached(ObjectId),
}

/// Snapshot of the repository state for status rendering.
#[derive(Clone, Debug)]
pub struct Status {
    /// Current branch or detached commit.
    pub head: HeadState,
    /// Second parent of the in-progress merge, if one is pending.
    pub merge_head: Option<ObjectId>,
    /// Working-directory changes relative to the `HEAD` tree.
    pub changes: Vec<(String, ChangeKind)>,
}

/// Outcome of a merge request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The other commit is already an ancestor of `HEAD`; nothing to do.
    AlreadyUpToDate,
    /// `HEAD` was an ancestor of the other commit and simply advanced to it;
    /// no merge commit is needed.
    FastForward { id: ObjectId },
    /// A three-way merge was materialized into the working directory.
    /// `MERGE_HEAD` is set; the next commit seals the merge with two
    /// parents. Conflicted paths carry embedded markers.
    InProgress { conflicts: Vec<String> },
}
