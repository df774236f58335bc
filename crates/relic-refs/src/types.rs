//! Core reference types and well-known names.

use std::fmt;

use relic_types::ObjectId;

use crate::error::{RefError, RefResult};

/// The current-position reference.
pub const HEAD: &str = "HEAD";

/// Second parent of an in-progress merge; present only while one is pending.
pub const MERGE_HEAD: &str = "MERGE_HEAD";

/// Namespace for branches.
pub const HEADS_NS: &str = "refs/heads";

/// Namespace for tags.
pub const TAGS_NS: &str = "refs/tags";

/// Full reference name for a branch.
pub fn heads_ref(branch: &str) -> String {
    format!("{HEADS_NS}/{branch}")
}

/// Full reference name for a tag.
pub fn tags_ref(tag: &str) -> String {
    format!("{TAGS_NS}/{tag}")
}

/// The value of a reference: a direct object id, or a symbolic pointer to
/// another reference name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefValue {
    /// Points directly at an object.
    Direct(ObjectId),
    /// Points at another reference by name (`ref: <name>` on disk).
    Symbolic(String),
}

impl RefValue {
    /// Returns the object id for a direct value.
    pub fn as_direct(&self) -> Option<ObjectId> {
        match self {
            Self::Direct(id) => Some(*id),
            Self::Symbolic(_) => None,
        }
    }

    /// Returns `true` for a symbolic value.
    pub fn is_symbolic(&self) -> bool {
        matches!(self, Self::Symbolic(_))
    }

    /// On-disk encoding, newline-terminated.
    pub fn encode(&self) -> String {
        match self {
            Self::Direct(id) => format!("{id}\n"),
            Self::Symbolic(target) => format!("ref: {target}\n"),
        }
    }

    /// Decode the on-disk encoding of the reference `name`.
    pub fn decode(name: &str, content: &str) -> RefResult<Self> {
        let content = content.trim();
        if let Some(target) = content.strip_prefix("ref:") {
            let target = target.trim();
            if target.is_empty() {
                return Err(RefError::MalformedRef {
                    name: name.to_string(),
                    reason: "empty symbolic target".into(),
                });
            }
            return Ok(Self::Symbolic(target.to_string()));
        }
        let id = ObjectId::from_hex(content).map_err(|e| RefError::MalformedRef {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::Direct(id))
    }
}

// Display mirrors the on-disk encoding without the trailing newline.
impl fmt::Display for RefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct(id) => write!(f, "{id}"),
            Self::Symbolic(target) => write!(f, "ref: {target}"),
        }
    }
}
