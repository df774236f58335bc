//! The pluggable text reconciliation seam.
//!
//! Tree-level orchestration (which paths differ, which triples to merge)
//! lives in this workspace; the byte-level line work is delegated through
//! [`TextReconciler`] so it can be swapped or stubbed in tests. The default
//! [`LineReconciler`] renders unified diffs and performs a three-way line
//! merge, both driven by the `similar` crate's Myers line matching.

use similar::{DiffTag, TextDiff};

use crate::error::DiffResult;

/// Result of a three-way content merge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Merged {
    /// The merged content, conflict markers included when `conflicted`.
    pub bytes: Vec<u8>,
    /// Whether any region could not be merged cleanly.
    pub conflicted: bool,
}

/// Injected capability for byte-level text work.
///
/// Implementations own line matching only; which blobs to hand over -- and
/// what to do with the result -- stays with the caller. A failing
/// implementation surfaces as
/// [`DiffError::ReconcilerFailure`](crate::DiffError::ReconcilerFailure).
pub trait TextReconciler: Send + Sync {
    /// Render a per-path diff report between two contents.
    fn diff(&self, path: &str, old: &[u8], new: &[u8]) -> DiffResult<Vec<u8>>;

    /// Three-way merge of `ours` and `theirs` against their common `base`.
    ///
    /// Conflicting regions are embedded in the output verbatim, between
    /// standard `<<<<<<<`/`=======`/`>>>>>>>` markers; the caller passes
    /// them through without resolving.
    fn merge(&self, base: &[u8], ours: &[u8], theirs: &[u8]) -> DiffResult<Merged>;
}

/// Default reconciler backed by `similar`.
///
/// Content is treated as text: non-UTF-8 input is decoded lossily, which is
/// acceptable for reports and mirrors how line-based merging degrades on
/// binary data anyway.
#[derive(Clone, Copy, Debug, Default)]
pub struct LineReconciler;

impl TextReconciler for LineReconciler {
    fn diff(&self, path: &str, old: &[u8], new: &[u8]) -> DiffResult<Vec<u8>> {
        if old == new {
            return Ok(Vec::new());
        }
        let old_text = String::from_utf8_lossy(old);
        let new_text = String::from_utf8_lossy(new);
        let diff = TextDiff::from_lines(old_text.as_ref(), new_text.as_ref());
        let report = diff
            .unified_diff()
            .context_radius(3)
            .header(&format!("a/{path}"), &format!("b/{path}"))
            .to_string();
        Ok(report.into_bytes())
    }

    fn merge(&self, base: &[u8], ours: &[u8], theirs: &[u8]) -> DiffResult<Merged> {
        let base_text = String::from_utf8_lossy(base);
        let ours_text = String::from_utf8_lossy(ours);
        let theirs_text = String::from_utf8_lossy(theirs);
        let (merged, conflicted) =
            merge_lines(base_text.as_ref(), ours_text.as_ref(), theirs_text.as_ref());
        Ok(Merged {
            bytes: merged.into_bytes(),
            conflicted,
        })
    }
}

/// A replacement of the base line range `start..end` with `lines`.
struct Edit {
    start: usize,
    end: usize,
    lines: Vec<String>,
}

/// Edit script of one side against the base, in base order.
fn side_edits(base: &str, side: &str) -> Vec<Edit> {
    let diff = TextDiff::from_lines(base, side);
    let side_lines: Vec<&str> = side.split_inclusive('\n').collect();
    let mut edits = Vec::new();
    for op in diff.ops() {
        if op.tag() == DiffTag::Equal {
            continue;
        }
        edits.push(Edit {
            start: op.old_range().start,
            end: op.old_range().end,
            lines: side_lines[op.new_range()]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        });
    }
    edits
}

/// Whether an edit over `start..end` belongs to the cluster `lo..hi`.
///
/// Ranges are half-open over base line indices; a zero-length range is an
/// insertion point. Two insertions at the same point interact, as does an
/// insertion at the start of a changed range -- the relative order would be
/// ambiguous, which is exactly a conflict.
fn interacts(lo: usize, hi: usize, start: usize, end: usize) -> bool {
    (start < hi && lo < end) || (start == lo && (start == end || lo == hi))
}

/// Apply one side's edits to the base slice `lo..hi`.
fn apply_edits(base_lines: &[&str], lo: usize, hi: usize, edits: &[Edit]) -> String {
    let mut out = String::new();
    let mut i = lo;
    for edit in edits {
        out.push_str(&base_lines[i..edit.start].concat());
        for line in &edit.lines {
            out.push_str(line);
        }
        i = edit.end;
    }
    out.push_str(&base_lines[i..hi].concat());
    out
}

/// Append a conflict block side, guaranteeing it ends in a newline so the
/// following marker starts a fresh line.
fn push_block(out: &mut String, block: &str) {
    out.push_str(block);
    if !block.is_empty() && !block.ends_with('\n') {
        out.push('\n');
    }
}

/// Three-way line merge.
///
/// Computes each side's edit script against the base, then walks the base
/// clustering edits whose ranges interact. A cluster touched by only one
/// side applies cleanly; a cluster where both sides produce the same text
/// collapses to one copy; anything else becomes a conflict block.
fn merge_lines(base: &str, ours: &str, theirs: &str) -> (String, bool) {
    let base_lines: Vec<&str> = base.split_inclusive('\n').collect();
    let our_edits = side_edits(base, ours);
    let their_edits = side_edits(base, theirs);

    let mut out = String::new();
    let mut conflicted = false;
    let mut cursor = 0usize;
    let mut ai = 0usize;
    let mut bi = 0usize;

    while ai < our_edits.len() || bi < their_edits.len() {
        // Seed the cluster with the earliest remaining edit.
        let seed_is_ours = match (our_edits.get(ai), their_edits.get(bi)) {
            (Some(a), Some(b)) => a.start <= b.start,
            (Some(_), None) => true,
            _ => false,
        };
        let a_from = ai;
        let b_from = bi;
        let (lo, mut hi) = if seed_is_ours {
            ai += 1;
            (our_edits[a_from].start, our_edits[a_from].end)
        } else {
            bi += 1;
            (their_edits[b_from].start, their_edits[b_from].end)
        };

        // Absorb edits from either side while they interact with the
        // cluster; each absorption can widen it, so iterate to a fixpoint.
        loop {
            let mut grew = false;
            while let Some(edit) = our_edits.get(ai) {
                if !interacts(lo, hi, edit.start, edit.end) {
                    break;
                }
                hi = hi.max(edit.end);
                ai += 1;
                grew = true;
            }
            while let Some(edit) = their_edits.get(bi) {
                if !interacts(lo, hi, edit.start, edit.end) {
                    break;
                }
                hi = hi.max(edit.end);
                bi += 1;
                grew = true;
            }
            if !grew {
                break;
            }
        }

        out.push_str(&base_lines[cursor..lo].concat());
        let ours_region = apply_edits(&base_lines, lo, hi, &our_edits[a_from..ai]);
        let theirs_region = apply_edits(&base_lines, lo, hi, &their_edits[b_from..bi]);

        if b_from == bi || ours_region == theirs_region {
            out.push_str(&ours_region);
        } else if a_from == ai {
            out.push_str(&theirs_region);
        } else {
            conflicted = true;
            out.push_str("<<<<<<< ours\n");
            push_block(&mut out, &ours_region);
            out.push_str("=======\n");
            push_block(&mut out, &theirs_region);
            out.push_str(">>>>>>> theirs\n");
        }
        cursor = hi;
    }
    out.push_str(&base_lines[cursor..].concat());
    (out, conflicted)
}
