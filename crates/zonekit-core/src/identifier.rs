//! Zone identifiers.
//!
//! Locally drawn zones get a random UUID v4 in its canonical 36-character
//! text form (`xxxxxxxx-xxxx-4xxx-Nxxx-xxxxxxxxxxxx`, `N` one of `8 9 a b`).
//! Zones loaded from the remote store keep whatever opaque string the
//! store handed out.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::OnceLock;
use uuid::Uuid;

fn uuid_v4_pattern() -> &'static Regex {
    static UUID_V4_REGEX: OnceLock<Regex> = OnceLock::new();
    UUID_V4_REGEX.get_or_init(|| {
        Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
            .expect("invalid uuid regex")
    })
}

/// Identifier of a zone, shared by its shape, its record and its map overlay.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolygonId(String);

impl PolygonId {
    /// Wraps an identifier supplied by the remote store.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random identifier for a locally drawn zone.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().hyphenated().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks the textual UUID v4 layout: 8-4-4-4-12 lowercase hex groups,
    /// version nibble `4`, variant nibble in `8..=b`.
    pub fn is_uuid_v4(&self) -> bool {
        uuid_v4_pattern().is_match(&self.0)
    }
}

impl fmt::Display for PolygonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PolygonId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for PolygonId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for PolygonId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PolygonId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_follow_uuid_v4_layout() {
        for _ in 0..64 {
            let id = PolygonId::generate();
            assert_eq!(id.as_str().len(), 36);
            assert!(id.is_uuid_v4(), "not a v4 layout: {}", id);
        }
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = PolygonId::generate();
        let b = PolygonId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_remote_ids_are_opaque() {
        let id = PolygonId::from("zone-17");
        assert!(!id.is_uuid_v4());
        assert_eq!(id.to_string(), "zone-17");
    }

    #[test]
    fn test_layout_check_rejects_wrong_nibbles() {
        assert!(PolygonId::from("123e4567-e89b-42d3-a456-426614174000").is_uuid_v4());
        // version 1
        assert!(!PolygonId::from("123e4567-e89b-12d3-a456-426614174000").is_uuid_v4());
        // variant nibble c
        assert!(!PolygonId::from("123e4567-e89b-42d3-c456-426614174000").is_uuid_v4());
        // uppercase hex
        assert!(!PolygonId::from("123E4567-E89B-42D3-A456-426614174000").is_uuid_v4());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = PolygonId::from("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }
}
