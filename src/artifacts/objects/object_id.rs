//! Commit identifier
//!
//! Object IDs are 40-character lowercase hexadecimal strings. Unlike real git
//! they are not content hashes: each id is the SHA-1 of random seed bytes, so
//! two commits with identical messages and parents still get distinct ids.
//!
//! ## Format
//!
//! - Full: 40 hex characters (e.g., "abc123...def")
//! - Short: First 7 characters (e.g., "abc123f")

use crate::artifacts::objects::{OBJECT_ID_LENGTH, SHORT_OID_LENGTH};
use fake::rand;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

/// Opaque commit identifier
///
/// A 40-character hexadecimal string that uniquely identifies a commit
/// inside one repository instance.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// # Arguments
    ///
    /// * `id` - 40-character hexadecimal string
    ///
    /// # Returns
    ///
    /// Validated ObjectId or error if invalid length/characters
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Draw a fresh random id
    ///
    /// The `nonce` is mixed into the hashed seed so that ids drawn in quick
    /// succession from the same repository never share their seed.
    pub fn generate(nonce: u64) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(rand::random::<u64>().to_be_bytes());
        hasher.update(rand::random::<u64>().to_be_bytes());
        hasher.update(nonce.to_be_bytes());

        Self(format!("{:x}", hasher.finalize()))
    }

    /// Get abbreviated form of the object ID
    ///
    /// # Returns
    ///
    /// First 7 characters of the hash (standard git abbreviation)
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(SHORT_OID_LENGTH.min(self.0.len())).0.to_string()
    }

    /// Whether this id begins with the given (case-insensitive) hex prefix
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(&prefix.to_ascii_lowercase())
    }

    /// Whether a string could be a full id or an abbreviation of one
    pub fn looks_like_oid(s: &str, min_prefix_len: usize) -> bool {
        !s.is_empty()
            && s.len() >= min_prefix_len
            && s.len() <= OBJECT_ID_LENGTH
            && s.chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for ObjectId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ObjectId {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_parse(value)
    }
}

impl From<ObjectId> for String {
    fn from(oid: ObjectId) -> Self {
        oid.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_valid_and_distinct() {
        let ids = (0..500).map(ObjectId::generate).collect::<HashSet<_>>();

        assert_eq!(ids.len(), 500);
        for oid in &ids {
            assert!(ObjectId::try_parse(oid.to_string()).is_ok());
        }
    }

    #[test]
    fn short_oid_is_seven_chars_of_the_full_id() {
        let oid = ObjectId::generate(0);

        assert_eq!(oid.to_short_oid().len(), SHORT_OID_LENGTH);
        assert!(oid.has_prefix(&oid.to_short_oid()));
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!(ObjectId::try_parse("abc".to_string()).is_err());
    }

    #[test]
    fn parse_rejects_non_hex() {
        assert!(ObjectId::try_parse("z".repeat(40)).is_err());
    }

    #[test]
    fn parse_normalizes_case() {
        let oid = ObjectId::try_parse("A".repeat(40)).unwrap();
        assert_eq!(oid.as_ref(), "a".repeat(40));
    }

    #[test]
    fn looks_like_oid_respects_min_prefix() {
        assert!(!ObjectId::looks_like_oid("abc", 4));
        assert!(ObjectId::looks_like_oid("abcd", 4));
        assert!(!ObjectId::looks_like_oid("master", 4));
    }

    proptest! {
        #[test]
        fn prop_every_prefix_of_an_id_matches_it(len in 1usize..=40, nonce in any::<u64>()) {
            let oid = ObjectId::generate(nonce);
            let prefix = &oid.as_ref()[..len];
            prop_assert!(oid.has_prefix(prefix));
            prop_assert!(oid.has_prefix(&prefix.to_ascii_uppercase()));
        }
    }
}
