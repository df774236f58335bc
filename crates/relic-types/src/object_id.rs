use std::fmt;

use sha1::{Digest, Sha1};

use crate::error::TypeError;

/// Number of bytes in an object id (SHA-1 digest width).
pub const ID_LEN: usize = 20;

/// Number of hex characters in the rendered form.
pub const HEX_LEN: usize = 2 * ID_LEN;

/// Content-addressed identifier for any stored object.
///
/// An `ObjectId` is the SHA-1 hash of an object's canonical encoding.
/// Identical content always produces the same `ObjectId`, making objects
/// deduplicatable and verifiable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; ID_LEN]);

impl ObjectId {
    /// Compute an `ObjectId` by hashing raw bytes.
    pub fn hash_bytes(data: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(data);
        Self(hasher.finalize().into())
    }

    /// Create an `ObjectId` from a pre-computed digest.
    pub const fn from_digest(digest: [u8; ID_LEN]) -> Self {
        Self(digest)
    }

    /// The raw 20-byte digest.
    pub fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.0
    }

    /// Hex-encoded string representation (40 lowercase characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters) for log output.
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a 40-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != ID_LEN {
            return Err(TypeError::InvalidLength {
                expected: ID_LEN,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; ID_LEN];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// Returns `true` if `s` is a well-formed 40-character hex id.
    pub fn is_well_formed(s: &str) -> bool {
        s.len() == HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.short_hex())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; ID_LEN]> for ObjectId {
    fn from(bytes: [u8; ID_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<ObjectId> for [u8; ID_LEN] {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

impl std::str::FromStr for ObjectId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
