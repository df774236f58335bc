use relic_types::ObjectId;

use crate::error::{StoreError, StoreResult};

/// The kind of object stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Raw content (file contents).
    Blob,
    /// Directory listing: sorted entries mapping names to object ids.
    Tree,
    /// Snapshot reference: tree id, parent links, message.
    Commit,
}

impl ObjectKind {
    /// The kind tag used in the canonical object encoding.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Tree => "tree",
            Self::Commit => "commit",
        }
    }

    /// Parse a kind tag from the canonical encoding.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "blob" => Some(Self::Blob),
            "tree" => Some(Self::Tree),
            "commit" => Some(Self::Commit),
            _ => None,
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// A stored object: kind tag + payload bytes.
///
/// `StoredObject` is the unit of storage. Its identity is the SHA-1 hash of
/// the canonical encoding `<kind-tag>\0<payload>`; hashing the kind tag
/// keeps ids of equal payloads disjoint across kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredObject {
    /// The type of this object.
    pub kind: ObjectKind,
    /// The payload bytes of the object.
    pub data: Vec<u8>,
}

impl StoredObject {
    /// Create a new stored object from kind and payload.
    pub fn new(kind: ObjectKind, data: Vec<u8>) -> Self {
        Self { kind, data }
    }

    /// The canonical on-disk encoding: `<kind-tag>\0<payload>`.
    pub fn encode(&self) -> Vec<u8> {
        let tag = self.kind.tag().as_bytes();
        let mut out = Vec::with_capacity(tag.len() + 1 + self.data.len());
        out.extend_from_slice(tag);
        out.push(0);
        out.extend_from_slice(&self.data);
        out
    }

    /// Decode from the canonical encoding.
    pub fn decode(raw: &[u8]) -> StoreResult<Self> {
        let nul = raw
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| StoreError::MalformedObject {
                reason: "missing kind tag separator".into(),
            })?;
        let tag = std::str::from_utf8(&raw[..nul]).map_err(|_| StoreError::MalformedObject {
            reason: "kind tag is not UTF-8".into(),
        })?;
        let kind = ObjectKind::from_tag(tag).ok_or_else(|| StoreError::MalformedObject {
            reason: format!("unknown kind tag {tag:?}"),
        })?;
        Ok(Self::new(kind, raw[nul + 1..].to_vec()))
    }

    /// Compute the content-addressed id for this object.
    ///
    /// The hash covers the canonical encoding, so identity is stable across
    /// backends and kinds never collide for equal payloads.
    pub fn compute_id(&self) -> ObjectId {
        ObjectId::hash_bytes(&self.encode())
    }
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

/// A single entry in a tree object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeEntry {
    /// Kind of the referenced object (blob or tree at use sites).
    pub kind: ObjectKind,
    /// Content-addressed id of the referenced object.
    pub id: ObjectId,
    /// Entry name (file or directory name, no path separators).
    pub name: String,
}

impl TreeEntry {
    /// Create a new tree entry.
    pub fn new(kind: ObjectKind, id: ObjectId, name: impl Into<String>) -> Self {
        Self {
            kind,
            id,
            name: name.into(),
        }
    }
}

impl PartialOrd for TreeEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TreeEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.name.cmp(&other.name)
    }
}

/// Directory listing object.
///
/// The payload is one text line per entry, `<kind> <40-hex> <name>`, sorted
/// lexicographically by name so that two directories with identical content
/// always hash to the same tree id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tree {
    /// Sorted entries in this directory.
    pub entries: Vec<TreeEntry>,
}

impl Tree {
    /// Create a new tree with the given entries, sorted by name.
    pub fn new(mut entries: Vec<TreeEntry>) -> Self {
        entries.sort();
        Self { entries }
    }

    /// Create an empty tree.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up an entry by name.
    pub fn get(&self, name: &str) -> Option<&TreeEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize the entry list to the tree payload.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(entry.kind.tag());
            out.push(' ');
            out.push_str(&entry.id.to_hex());
            out.push(' ');
            out.push_str(&entry.name);
            out.push('\n');
        }
        out.into_bytes()
    }

    /// Decode a tree payload.
    pub fn decode(data: &[u8]) -> StoreResult<Self> {
        let text = std::str::from_utf8(data).map_err(|_| StoreError::MalformedTree {
            reason: "tree payload is not UTF-8".into(),
        })?;
        let mut entries = Vec::new();
        for line in text.lines() {
            let mut parts = line.splitn(3, ' ');
            let (kind, id, name) = match (parts.next(), parts.next(), parts.next()) {
                (Some(kind), Some(id), Some(name)) if !name.is_empty() => (kind, id, name),
                _ => {
                    return Err(StoreError::MalformedTree {
                        reason: format!("bad entry line {line:?}"),
                    })
                }
            };
            let kind = ObjectKind::from_tag(kind).ok_or_else(|| StoreError::MalformedTree {
                reason: format!("unknown entry kind {kind:?}"),
            })?;
            let id = ObjectId::from_hex(id).map_err(|e| StoreError::MalformedTree {
                reason: format!("bad entry id: {e}"),
            })?;
            entries.push(TreeEntry::new(kind, id, name));
        }
        Ok(Self { entries })
    }

    /// Convert into a [`StoredObject`] for storage.
    pub fn to_stored_object(&self) -> StoredObject {
        StoredObject::new(ObjectKind::Tree, self.encode())
    }

    /// Decode from a [`StoredObject`], checking the kind.
    pub fn from_stored_object(obj: &StoredObject) -> StoreResult<Self> {
        if obj.kind != ObjectKind::Tree {
            return Err(StoreError::KindMismatch {
                id: obj.compute_id(),
                expected: ObjectKind::Tree,
                actual: obj.kind,
            });
        }
        Self::decode(&obj.data)
    }
}

// ---------------------------------------------------------------------------
// Commit
// ---------------------------------------------------------------------------

/// Snapshot reference object: a tree id, ordered parent links, and a message.
///
/// The payload is a header block followed by a blank line and the free-text
/// message:
///
/// ```text
/// tree <40-hex>
/// parent <40-hex>
///
/// <message>
/// ```
///
/// The first parent is the distinguished primary parent, the one followed
/// when walking mainline ancestry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Commit {
    /// Root tree of the snapshot.
    pub tree: ObjectId,
    /// Parent commits: empty for a root commit, two or more for a merge.
    pub parents: Vec<ObjectId>,
    /// Free-text commit message.
    pub message: String,
}

impl Commit {
    /// Serialize to the commit payload.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = format!("tree {}\n", self.tree.to_hex());
        for parent in &self.parents {
            out.push_str(&format!("parent {}\n", parent.to_hex()));
        }
        out.push('\n');
        out.push_str(&self.message);
        out.into_bytes()
    }

    /// Decode a commit payload strictly.
    ///
    /// A missing `tree` header, an unknown header key, or a malformed id
    /// fails with [`StoreError::MalformedCommit`].
    pub fn decode(data: &[u8]) -> StoreResult<Self> {
        let text = std::str::from_utf8(data).map_err(|_| StoreError::MalformedCommit {
            reason: "commit payload is not UTF-8".into(),
        })?;
        let (header, message) = match text.split_once("\n\n") {
            Some((header, message)) => (header, message.to_string()),
            // A headers-only commit with an empty message and no trailing
            // blank line is still readable.
            None => (text.trim_end_matches('\n'), String::new()),
        };

        let mut tree = None;
        let mut parents = Vec::new();
        for line in header.lines() {
            let (key, value) = line.split_once(' ').ok_or_else(|| StoreError::MalformedCommit {
                reason: format!("bad header line {line:?}"),
            })?;
            match key {
                "tree" => {
                    if tree.is_some() {
                        return Err(StoreError::MalformedCommit {
                            reason: "duplicate tree header".into(),
                        });
                    }
                    tree = Some(parse_header_id(value)?);
                }
                "parent" => parents.push(parse_header_id(value)?),
                _ => {
                    return Err(StoreError::MalformedCommit {
                        reason: format!("unknown header key {key:?}"),
                    })
                }
            }
        }

        let tree = tree.ok_or_else(|| StoreError::MalformedCommit {
            reason: "missing tree header".into(),
        })?;
        Ok(Self {
            tree,
            parents,
            message,
        })
    }

    /// The distinguished first parent, if any.
    pub fn first_parent(&self) -> Option<ObjectId> {
        self.parents.first().copied()
    }

    /// Returns `true` if this commit has two or more parents.
    pub fn is_merge(&self) -> bool {
        self.parents.len() >= 2
    }

    /// Convert into a [`StoredObject`] for storage.
    pub fn to_stored_object(&self) -> StoredObject {
        StoredObject::new(ObjectKind::Commit, self.encode())
    }

    /// Decode from a [`StoredObject`], checking the kind.
    pub fn from_stored_object(obj: &StoredObject) -> StoreResult<Self> {
        if obj.kind != ObjectKind::Commit {
            return Err(StoreError::KindMismatch {
                id: obj.compute_id(),
                expected: ObjectKind::Commit,
                actual: obj.kind,
            });
        }
        Self::decode(&obj.data)
    }
}

fn parse_header_id(value: &str) -> StoreResult<ObjectId> {
    ObjectId::from_hex(value).map_err(|e| StoreError::MalformedCommit {
        reason: format!("bad header id: {e}"),
    })
}
