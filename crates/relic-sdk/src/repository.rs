//! The [`Repository`] handle.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use relic_dag::{get_commit, merge_base, HistoryWalk};
use relic_diff::{changed_files, diff_trees, LineReconciler, TextReconciler};
use relic_merge::merge_trees;
use relic_refs::{heads_ref, tags_ref, FsRefStore, RefValue, HEAD, MERGE_HEAD};
use relic_store::{Commit, FsObjectStore, ObjectKind, ObjectStore, StoredObject};
use relic_types::ObjectId;
use relic_worktree::{flatten_tree, read_tree, replace_working_dir, working_tree, write_tree, META_DIR};
use tracing::info;

use crate::error::{RepoError, RepoResult};
use crate::types::{Checkout, HeadState, LogEntry, MergeOutcome, Status};

/// Branch a fresh repository's `HEAD` points at.
pub const DEFAULT_BRANCH: &str = "main";

/// An open repository: working root, object store, reference store, and the
/// injected text reconciler.
pub struct Repository {
    root: PathBuf,
    objects: FsObjectStore,
    refs: FsRefStore,
    reconciler: Box<dyn TextReconciler>,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("root", &self.root)
            .field("objects", &self.objects)
            .field("refs", &self.refs)
            .field("reconciler", &"Box<dyn TextReconciler>")
            .finish()
    }
}

impl Repository {
    /// Initialize a repository at `root`, creating `.relic/` and its
    /// `objects/` area, and pointing `HEAD` symbolically at the default
    /// branch.
    ///
    /// Initializing where a repository already exists is non-destructive:
    /// the existing state is left alone and the returned flag is `true` so
    /// the caller can report the re-initialization.
    pub fn init(root: impl Into<PathBuf>) -> RepoResult<(Self, bool)> {
        let root = root.into();
        let meta = root.join(META_DIR);
        let existing = meta.is_dir();
        let objects = FsObjectStore::create(meta.join("objects"))?;
        let refs = FsRefStore::new(&meta);
        let repo = Self {
            root,
            objects,
            refs,
            reconciler: Box::new(LineReconciler),
        };
        if !existing {
            repo.refs
                .update_ref(HEAD, &RefValue::Symbolic(heads_ref(DEFAULT_BRANCH)), false)?;
            info!(root = %repo.root.display(), "initialized empty repository");
        }
        Ok((repo, existing))
    }

    /// Open an existing repository at `root`.
    pub fn open(root: impl Into<PathBuf>) -> RepoResult<Self> {
        let root = root.into();
        let meta = root.join(META_DIR);
        if !meta.is_dir() {
            return Err(RepoError::NotARepository { path: root });
        }
        Ok(Self {
            objects: FsObjectStore::new(meta.join("objects")),
            refs: FsRefStore::new(&meta),
            root,
            reconciler: Box::new(LineReconciler),
        })
    }

    /// Replace the text reconciler (testing, alternative merge tools).
    pub fn with_reconciler(mut self, reconciler: Box<dyn TextReconciler>) -> Self {
        self.reconciler = reconciler;
        self
    }

    /// The working root this repository operates on.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a user-supplied revision name to an object id.
    pub fn resolve(&self, name: &str) -> RepoResult<ObjectId> {
        Ok(self.refs.resolve_name(name)?)
    }

    // ---- Object plumbing ----

    /// Store raw bytes as a blob and return the id.
    pub fn hash_object(&self, data: &[u8]) -> RepoResult<ObjectId> {
        Ok(self
            .objects
            .write(&StoredObject::new(ObjectKind::Blob, data.to_vec()))?)
    }

    /// Read back an object's payload, optionally insisting on its kind.
    pub fn cat_object(&self, id: ObjectId, expected: Option<ObjectKind>) -> RepoResult<Vec<u8>> {
        Ok(self.objects.get(&id, expected)?.data)
    }

    /// Snapshot the working directory into a tree object.
    pub fn write_tree(&self) -> RepoResult<ObjectId> {
        Ok(write_tree(&self.objects, &self.root)?)
    }

    /// Destructively replace the working directory with a tree's content.
    pub fn read_tree(&self, id: ObjectId) -> RepoResult<()> {
        Ok(read_tree(&self.objects, &self.root, &id)?)
    }

    // ---- History ----

    /// The commit `HEAD` resolves to, if any.
    pub fn head_commit(&self) -> RepoResult<Option<ObjectId>> {
        Ok(self.refs.get_ref(HEAD, true)?.and_then(|v| v.as_direct()))
    }

    /// Snapshot the working directory and commit it.
    ///
    /// The dereferenced `HEAD` becomes the first parent when present; a
    /// pending `MERGE_HEAD` becomes the second and is deleted. The commit
    /// object is durably stored before any reference moves, so a crash
    /// in between leaves the repository pointing at nothing new.
    pub fn commit(&self, message: &str) -> RepoResult<ObjectId> {
        let tree = write_tree(&self.objects, &self.root)?;
        let mut parents = Vec::new();
        if let Some(head) = self.head_commit()? {
            parents.push(head);
        }
        if let Some(RefValue::Direct(merge_head)) = self.refs.get_ref(MERGE_HEAD, true)? {
            parents.push(merge_head);
            self.refs.delete_ref(MERGE_HEAD, false)?;
        }
        let commit = Commit {
            tree,
            parents,
            message: message.to_string(),
        };
        let id = self.objects.write(&commit.to_stored_object())?;
        self.refs.update_ref(HEAD, &RefValue::Direct(id), true)?;
        info!(id = %id.short_hex(), "created commit");
        Ok(id)
    }

    /// Read and decode a commit.
    pub fn get_commit(&self, id: ObjectId) -> RepoResult<Commit> {
        Ok(get_commit(&self.objects, id)?)
    }

    /// Walk history from `start`, newest and mainline first, decorating each
    /// commit with the reference names pointing at it.
    pub fn log(&self, start: ObjectId) -> RepoResult<Vec<LogEntry>> {
        let mut decorations: HashMap<ObjectId, Vec<String>> = HashMap::new();
        for (name, id) in self.refs.iter_refs("")? {
            if let Some(id) = id {
                decorations.entry(id).or_default().push(name);
            }
        }
        let mut entries = Vec::new();
        for item in HistoryWalk::new(&self.objects, [start]) {
            let (id, commit) = item?;
            entries.push(LogEntry {
                id,
                commit,
                refs: decorations.get(&id).cloned().unwrap_or_default(),
            });
        }
        Ok(entries)
    }

    /// Materialize the commit `name` resolves to into the working directory
    /// (destructively) and repoint `HEAD`.
    ///
    /// When `name` denotes a branch, `HEAD` becomes symbolic to it;
    /// otherwise `HEAD` holds the commit id directly and the returned
    /// [`Checkout`] reports the detached state.
    pub fn checkout(&self, name: &str) -> RepoResult<Checkout> {
        let id = self.refs.resolve_name(name)?;
        let commit = get_commit(&self.objects, id)?;
        read_tree(&self.objects, &self.root, &commit.tree)?;
        let branch = heads_ref(name);
        let is_branch = self.refs.get_ref(&branch, false)?.is_some();
        if is_branch {
            self.refs
                .update_ref(HEAD, &RefValue::Symbolic(branch), false)?;
        } else {
            self.refs.update_ref(HEAD, &RefValue::Direct(id), false)?;
        }
        info!(id = %id.short_hex(), detached = !is_branch, "checked out");
        Ok(Checkout {
            id,
            detached: !is_branch,
        })
    }

    // ---- References ----

    /// Create (or repoint) a branch at `id`. Returns the created name.
    pub fn branch(&self, name: &str, id: ObjectId) -> RepoResult<String> {
        self.refs
            .update_ref(&heads_ref(name), &RefValue::Direct(id), true)?;
        Ok(name.to_string())
    }

    /// Create (or repoint) a tag at `id`.
    pub fn tag(&self, name: &str, id: ObjectId) -> RepoResult<()> {
        self.refs
            .update_ref(&tags_ref(name), &RefValue::Direct(id), true)?;
        Ok(())
    }

    /// The current branch (if `HEAD` is symbolic) and all branch names.
    pub fn list_branches(&self) -> RepoResult<(Option<String>, Vec<String>)> {
        let current = match self.refs.get_ref(HEAD, false)? {
            Some(RefValue::Symbolic(target)) => target
                .strip_prefix("refs/heads/")
                .map(str::to_string),
            _ => None,
        };
        let names = self
            .refs
            .iter_refs("refs/heads/")?
            .into_iter()
            .map(|(name, _)| name.trim_start_matches("refs/heads/").to_string())
            .collect();
        Ok((current, names))
    }

    /// Repoint `HEAD` -- through the symbolic chain -- at `id`. The working
    /// directory is left alone.
    pub fn reset(&self, id: ObjectId) -> RepoResult<()> {
        self.refs.update_ref(HEAD, &RefValue::Direct(id), true)?;
        Ok(())
    }

    // ---- Inspection ----

    /// Current branch or detached position, pending merge, and
    /// working-directory changes against the `HEAD` tree.
    pub fn status(&self) -> RepoResult<Status> {
        let head = match self.refs.get_ref(HEAD, false)? {
            Some(RefValue::Symbolic(target)) => {
                let branch = target.strip_prefix("refs/heads/").unwrap_or(&target);
                HeadState::Branch(branch.to_string())
            }
            Some(RefValue::Direct(id)) => HeadState::Detached(id),
            None => HeadState::Branch(DEFAULT_BRANCH.to_string()),
        };
        let merge_head = self
            .refs
            .get_ref(MERGE_HEAD, true)?
            .and_then(|v| v.as_direct());
        let head_tree = match self.head_commit()? {
            Some(id) => self.commit_tree(id)?,
            None => BTreeMap::new(),
        };
        let working = working_tree(&self.root)?;
        Ok(Status {
            head,
            merge_head,
            changes: changed_files(&head_tree, &working),
        })
    }

    /// A commit plus the diff report against its first parent's tree.
    pub fn show(&self, id: ObjectId) -> RepoResult<(Commit, Vec<u8>)> {
        let commit = get_commit(&self.objects, id)?;
        let parent_tree = match commit.first_parent() {
            Some(parent) => self.commit_tree(parent)?,
            None => BTreeMap::new(),
        };
        let commit_tree = flatten_tree(&self.objects, &commit.tree, "")?;
        let report = diff_trees(
            &self.objects,
            &parent_tree,
            &commit_tree,
            self.reconciler.as_ref(),
        )?;
        Ok((commit, report))
    }

    /// Diff the working directory against a commit's tree (`HEAD` when
    /// `against` is `None`).
    pub fn diff(&self, against: Option<ObjectId>) -> RepoResult<Vec<u8>> {
        let from = match against {
            Some(id) => self.commit_tree(id)?,
            None => match self.head_commit()? {
                Some(id) => self.commit_tree(id)?,
                None => BTreeMap::new(),
            },
        };
        let working = working_tree(&self.root)?;
        Ok(diff_trees(
            &self.objects,
            &from,
            &working,
            self.reconciler.as_ref(),
        )?)
    }

    // ---- Merge ----

    /// Merge the commit `name` resolves to into the current `HEAD`.
    ///
    /// Fails with [`RepoError::NoCommitYet`] when `HEAD` has no history.
    /// An ancestor merges to [`MergeOutcome::AlreadyUpToDate`]; a descendant
    /// fast-forwards. Otherwise the merged tree is materialized into the
    /// working directory (destructively), `MERGE_HEAD` records the second
    /// parent, and the next [`commit`](Self::commit) seals the merge.
    pub fn merge(&self, name: &str) -> RepoResult<MergeOutcome> {
        let head = self.head_commit()?.ok_or(RepoError::NoCommitYet)?;
        let other = self.refs.resolve_name(name)?;
        let base = merge_base(&self.objects, head, other)?;
        if base == Some(other) {
            return Ok(MergeOutcome::AlreadyUpToDate);
        }
        let other_commit = get_commit(&self.objects, other)?;
        if base == Some(head) {
            read_tree(&self.objects, &self.root, &other_commit.tree)?;
            self.refs.update_ref(HEAD, &RefValue::Direct(other), true)?;
            info!(id = %other.short_hex(), "fast-forward merge");
            return Ok(MergeOutcome::FastForward { id: other });
        }

        self.refs
            .update_ref(MERGE_HEAD, &RefValue::Direct(other), false)?;
        let base_tree = match base {
            Some(id) => self.commit_tree(id)?,
            // Disjoint histories merge against an empty base.
            None => BTreeMap::new(),
        };
        let ours = self.commit_tree(head)?;
        let theirs = flatten_tree(&self.objects, &other_commit.tree, "")?;
        let merged = merge_trees(
            &self.objects,
            &base_tree,
            &ours,
            &theirs,
            self.reconciler.as_ref(),
        )?;
        replace_working_dir(&self.root, &merged.files)?;
        info!(conflicts = merged.conflicts.len(), "merge materialized");
        Ok(MergeOutcome::InProgress {
            conflicts: merged.conflicts,
        })
    }

    /// Flattened tree of a commit.
    fn commit_tree(&self, id: ObjectId) -> RepoResult<BTreeMap<String, ObjectId>> {
        let commit = get_commit(&self.objects, id)?;
        Ok(flatten_tree(&self.objects, &commit.tree, "")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relic_diff::ChangeKind;
    use std::fs;

    fn init_repo() -> (tempfile::TempDir, Repository) {
        let dir = tempfile::tempdir().unwrap();
        let (repo, existing) = Repository::init(dir.path()).unwrap();
        assert!(!existing);
        (dir, repo)
    }

    fn write_file(repo: &Repository, rel: &str, content: &str) {
        let path = repo.root().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn read_file(repo: &Repository, rel: &str) -> String {
        fs::read_to_string(repo.root().join(rel)).unwrap()
    }

    #[test]
    fn end_to_end_commit_log_checkout_diff() {
        let (_dir, repo) = init_repo();

        write_file(&repo, "f.txt", "hello");
        let c1 = repo.commit("first").unwrap();
        assert!(repo.get_commit(c1).unwrap().parents.is_empty());

        write_file(&repo, "f.txt", "world");
        let c2 = repo.commit("second").unwrap();
        assert_eq!(repo.get_commit(c2).unwrap().parents, vec![c1]);

        let log = repo.log(c2).unwrap();
        let ids: Vec<ObjectId> = log.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![c2, c1]);
        assert_eq!(log[0].commit.message, "second");

        let checkout = repo.checkout(&c1.to_hex()).unwrap();
        assert!(checkout.detached);
        assert_eq!(read_file(&repo, "f.txt"), "hello");

        let report = String::from_utf8(repo.diff(Some(c2)).unwrap()).unwrap();
        assert!(report.contains("f.txt"));
        assert!(report.contains("-world"));
        assert!(report.contains("+hello"));
    }

    #[test]
    fn reinit_is_reported_and_non_destructive() {
        let (dir, repo) = init_repo();
        write_file(&repo, "f.txt", "kept");
        let c1 = repo.commit("first").unwrap();

        let (repo, existing) = Repository::init(dir.path()).unwrap();
        assert!(existing);
        assert_eq!(repo.head_commit().unwrap(), Some(c1));
        assert_eq!(read_file(&repo, "f.txt"), "kept");
    }

    #[test]
    fn open_requires_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let err = Repository::open(dir.path()).unwrap_err();
        assert!(matches!(err, RepoError::NotARepository { .. }));

        Repository::init(dir.path()).unwrap();
        assert!(Repository::open(dir.path()).is_ok());
    }

    #[test]
    fn commit_repoints_the_branch_through_head() {
        let (_dir, repo) = init_repo();
        write_file(&repo, "f.txt", "content");
        let c1 = repo.commit("first").unwrap();

        // HEAD stays symbolic; the branch moved.
        let raw = repo.refs.get_ref(HEAD, false).unwrap().unwrap();
        assert!(raw.is_symbolic());
        let branch = repo.refs.get_ref("refs/heads/main", false).unwrap().unwrap();
        assert_eq!(branch.as_direct(), Some(c1));
    }

    #[test]
    fn cat_object_checks_kinds_on_request() {
        let (_dir, repo) = init_repo();
        let id = repo.hash_object(b"payload").unwrap();
        assert_eq!(repo.cat_object(id, Some(ObjectKind::Blob)).unwrap(), b"payload");
        assert_eq!(repo.cat_object(id, None).unwrap(), b"payload");
        assert!(matches!(
            repo.cat_object(id, Some(ObjectKind::Commit)).unwrap_err(),
            RepoError::Store(relic_store::StoreError::KindMismatch { .. })
        ));
    }

    #[test]
    fn status_tracks_the_working_directory() {
        let (_dir, repo) = init_repo();
        let status = repo.status().unwrap();
        assert_eq!(status.head, HeadState::Branch("main".into()));
        assert!(status.merge_head.is_none());
        assert!(status.changes.is_empty());

        write_file(&repo, "f.txt", "new");
        let status = repo.status().unwrap();
        assert_eq!(status.changes, vec![("f.txt".into(), ChangeKind::Added)]);

        repo.commit("first").unwrap();
        assert!(repo.status().unwrap().changes.is_empty());

        write_file(&repo, "f.txt", "changed");
        write_file(&repo, "g.txt", "added");
        let status = repo.status().unwrap();
        assert_eq!(
            status.changes,
            vec![
                ("f.txt".into(), ChangeKind::Modified),
                ("g.txt".into(), ChangeKind::Added),
            ]
        );

        fs::remove_file(repo.root().join("f.txt")).unwrap();
        let status = repo.status().unwrap();
        assert!(status
            .changes
            .contains(&("f.txt".into(), ChangeKind::Deleted)));
    }

    #[test]
    fn detached_checkout_is_reported_in_status() {
        let (_dir, repo) = init_repo();
        write_file(&repo, "f.txt", "one");
        let c1 = repo.commit("first").unwrap();
        write_file(&repo, "f.txt", "two");
        repo.commit("second").unwrap();

        repo.checkout(&c1.to_hex()).unwrap();
        assert_eq!(repo.status().unwrap().head, HeadState::Detached(c1));
    }

    #[test]
    fn branches_and_tags_resolve() {
        let (_dir, repo) = init_repo();
        write_file(&repo, "f.txt", "content");
        let c1 = repo.commit("first").unwrap();

        assert_eq!(repo.branch("feature", c1).unwrap(), "feature");
        repo.tag("v1", c1).unwrap();
        assert_eq!(repo.resolve("feature").unwrap(), c1);
        assert_eq!(repo.resolve("v1").unwrap(), c1);

        let (current, names) = repo.list_branches().unwrap();
        assert_eq!(current.as_deref(), Some("main"));
        assert_eq!(names, vec!["feature", "main"]);

        let checkout = repo.checkout("feature").unwrap();
        assert!(!checkout.detached);
        let (current, _) = repo.list_branches().unwrap();
        assert_eq!(current.as_deref(), Some("feature"));
    }

    #[test]
    fn reset_repoints_head_without_touching_files() {
        let (_dir, repo) = init_repo();
        write_file(&repo, "f.txt", "one");
        let c1 = repo.commit("first").unwrap();
        write_file(&repo, "f.txt", "two");
        repo.commit("second").unwrap();

        repo.reset(c1).unwrap();
        assert_eq!(repo.head_commit().unwrap(), Some(c1));
        // Still on the branch, and the working directory is untouched.
        assert_eq!(repo.status().unwrap().head, HeadState::Branch("main".into()));
        assert_eq!(read_file(&repo, "f.txt"), "two");
    }

    #[test]
    fn show_diffs_against_the_first_parent() {
        let (_dir, repo) = init_repo();
        write_file(&repo, "f.txt", "hello\n");
        let c1 = repo.commit("first").unwrap();
        write_file(&repo, "f.txt", "world\n");
        let c2 = repo.commit("second").unwrap();

        let (commit, report) = repo.show(c2).unwrap();
        let report = String::from_utf8(report).unwrap();
        assert_eq!(commit.message, "second");
        assert!(report.contains("-hello"));
        assert!(report.contains("+world"));

        // A root commit diffs against the empty tree.
        let (_, report) = repo.show(c1).unwrap();
        let report = String::from_utf8(report).unwrap();
        assert!(report.contains("+hello"));
    }

    #[test]
    fn log_decorates_commits_with_ref_names() {
        let (_dir, repo) = init_repo();
        write_file(&repo, "f.txt", "one");
        let c1 = repo.commit("first").unwrap();
        write_file(&repo, "f.txt", "two");
        let c2 = repo.commit("second").unwrap();
        repo.branch("release", c1).unwrap();
        repo.tag("v2", c2).unwrap();

        let log = repo.log(c2).unwrap();
        assert!(log[0].refs.contains(&"HEAD".to_string()));
        assert!(log[0].refs.contains(&"refs/heads/main".to_string()));
        assert!(log[0].refs.contains(&"refs/tags/v2".to_string()));
        assert!(log[1].refs.contains(&"refs/heads/release".to_string()));
    }

    #[test]
    fn merge_without_history_fails() {
        let (_dir, repo) = init_repo();
        assert!(matches!(
            repo.merge("anything").unwrap_err(),
            RepoError::NoCommitYet
        ));
    }

    #[test]
    fn merge_of_an_ancestor_is_up_to_date() {
        let (_dir, repo) = init_repo();
        write_file(&repo, "f.txt", "one");
        let c1 = repo.commit("first").unwrap();
        write_file(&repo, "f.txt", "two");
        repo.commit("second").unwrap();
        repo.branch("old", c1).unwrap();

        assert_eq!(repo.merge("old").unwrap(), MergeOutcome::AlreadyUpToDate);
        assert!(repo.status().unwrap().merge_head.is_none());
    }

    #[test]
    fn merge_fast_forwards_when_head_is_an_ancestor() {
        let (_dir, repo) = init_repo();
        write_file(&repo, "f.txt", "A");
        let c1 = repo.commit("first").unwrap();
        repo.branch("feature", c1).unwrap();
        repo.checkout("feature").unwrap();
        write_file(&repo, "f.txt", "B");
        let c2 = repo.commit("feature work").unwrap();

        repo.checkout("main").unwrap();
        assert_eq!(read_file(&repo, "f.txt"), "A");

        assert_eq!(
            repo.merge("feature").unwrap(),
            MergeOutcome::FastForward { id: c2 }
        );
        assert_eq!(read_file(&repo, "f.txt"), "B");
        assert_eq!(repo.head_commit().unwrap(), Some(c2));
        assert!(repo.status().unwrap().merge_head.is_none());
    }

    #[test]
    fn three_way_merge_combines_divergent_edits() {
        let (_dir, repo) = init_repo();
        write_file(&repo, "f.txt", "one\ntwo\nthree\n");
        let c1 = repo.commit("base").unwrap();
        repo.branch("feature", c1).unwrap();

        repo.checkout("feature").unwrap();
        write_file(&repo, "f.txt", "one\ntwo\nTHREE\n");
        let c2 = repo.commit("feature edit").unwrap();

        repo.checkout("main").unwrap();
        write_file(&repo, "f.txt", "ONE\ntwo\nthree\n");
        let c3 = repo.commit("main edit").unwrap();

        let outcome = repo.merge("feature").unwrap();
        assert_eq!(outcome, MergeOutcome::InProgress { conflicts: vec![] });
        assert_eq!(read_file(&repo, "f.txt"), "ONE\ntwo\nTHREE\n");
        assert_eq!(repo.status().unwrap().merge_head, Some(c2));

        let merge_commit = repo.commit("merge feature").unwrap();
        assert_eq!(repo.get_commit(merge_commit).unwrap().parents, vec![c3, c2]);
        assert!(repo.status().unwrap().merge_head.is_none());
    }

    #[test]
    fn conflicting_merge_leaves_markers_and_merge_head() {
        let (_dir, repo) = init_repo();
        write_file(&repo, "f.txt", "base\n");
        let c1 = repo.commit("base").unwrap();
        repo.branch("feature", c1).unwrap();

        repo.checkout("feature").unwrap();
        write_file(&repo, "f.txt", "feature\n");
        let c2 = repo.commit("feature edit").unwrap();

        repo.checkout("main").unwrap();
        write_file(&repo, "f.txt", "main\n");
        let c3 = repo.commit("main edit").unwrap();

        let outcome = repo.merge("feature").unwrap();
        assert_eq!(
            outcome,
            MergeOutcome::InProgress {
                conflicts: vec!["f.txt".into()]
            }
        );
        let content = read_file(&repo, "f.txt");
        assert!(content.contains("<<<<<<<"));
        assert!(content.contains("======="));
        assert!(content.contains(">>>>>>>"));
        assert_eq!(repo.status().unwrap().merge_head, Some(c2));

        // The next commit seals the merge and clears MERGE_HEAD.
        let merge_commit = repo.commit("merge with conflicts resolved").unwrap();
        assert_eq!(repo.get_commit(merge_commit).unwrap().parents, vec![c3, c2]);
        assert!(repo.status().unwrap().merge_head.is_none());
    }

    #[test]
    fn roundtrip_read_tree_restores_working_state() {
        let (_dir, repo) = init_repo();
        write_file(&repo, "a.txt", "alpha");
        write_file(&repo, "sub/b.txt", "beta");
        let tree = repo.write_tree().unwrap();

        write_file(&repo, "a.txt", "mutated");
        fs::remove_file(repo.root().join("sub/b.txt")).unwrap();

        repo.read_tree(tree).unwrap();
        assert_eq!(read_file(&repo, "a.txt"), "alpha");
        assert_eq!(read_file(&repo, "sub/b.txt"), "beta");
    }
}
