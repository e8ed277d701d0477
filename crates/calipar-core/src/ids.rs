//! Branded ID newtypes for type safety.
//!
//! Each entity in the review pipeline gets a distinct ID type implemented
//! as a newtype wrapper around `String`. This prevents accidentally passing
//! a review ID where a section key is expected.
//!
//! Generated IDs are UUID v4, matching how the review service mints them.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Generate a new UUID v4 string.
fn new_v4() -> String {
    Uuid::new_v4().to_string()
}

macro_rules! branded_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new random ID (UUID v4).
            #[must_use]
            pub fn new() -> Self {
                Self(new_v4())
            }

            /// Create from an existing string value.
            #[must_use]
            pub fn from_string(s: String) -> Self {
                Self(s)
            }

            /// Return the inner string as a slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume self and return the inner `String`.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;
            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

branded_id! {
    /// Unique identifier for a program review document.
    ReviewId
}

/// Identifier for a section within a program review.
///
/// Section keys are human-assigned slugs (`"mission"`, `"goals"`,
/// `"resource_needs"`), not generated UUIDs, so this newtype carries no
/// `new()` constructor.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionKey(String);

impl SectionKey {
    /// Return the inner string as a slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume self and return the inner `String`.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::ops::Deref for SectionKey {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SectionKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SectionKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SectionKey {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<SectionKey> for String {
    fn from(key: SectionKey) -> Self {
        key.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_ids_are_unique() {
        let a = ReviewId::new();
        let b = ReviewId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn review_id_roundtrips_through_string() {
        let id = ReviewId::new();
        let s = String::from(id.clone());
        assert_eq!(ReviewId::from_string(s), id);
    }

    #[test]
    fn section_key_from_slug() {
        let key = SectionKey::from("mission");
        assert_eq!(key.as_str(), "mission");
        assert_eq!(key.to_string(), "mission");
    }

    #[test]
    fn ids_serialize_transparently() {
        let key = SectionKey::from("goals");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"goals\"");
    }
}
