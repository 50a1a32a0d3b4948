//! Strongly-typed ID wrappers for all entity types
//!
//! IDs are opaque strings: freshly created entities get a random UUID, but
//! imported data may carry any non-empty string and it is kept verbatim.
//! Newtype wrappers still prevent mixing up IDs of different entity types.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Wrap an existing identifier string
            pub fn from_raw(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Get the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// First eight characters, for compact display
            pub fn short(&self) -> &str {
                match self.0.char_indices().nth(8) {
                    Some((idx, _)) => &self.0[..idx],
                    None => &self.0,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().to_string()))
            }
        }
    };
}

define_id!(PartyId);
define_id!(MeterId);
define_id!(DocumentId);
define_id!(EntryId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_uuids() {
        let id = PartyId::new();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn test_id_equality() {
        let id1 = DocumentId::new();
        let id2 = id1.clone();
        assert_eq!(id1, id2);
        assert_ne!(id1, DocumentId::new());
    }

    #[test]
    fn test_raw_ids_kept_verbatim() {
        let id = MeterId::from_raw("legacy-7");
        assert_eq!(id.to_string(), "legacy-7");
        assert_eq!(id.short(), "legacy-7");
    }

    #[test]
    fn test_short_display() {
        let id = EntryId::from_raw("550e8400-e29b-41d4-a716-446655440000");
        assert_eq!(id.short(), "550e8400");
    }

    #[test]
    fn test_id_serialization_is_transparent() {
        let id = PartyId::from_raw("abc");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc\"");
        let back: PartyId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
