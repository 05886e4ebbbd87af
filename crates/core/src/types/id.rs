//! Newtype wrappers for entity identifiers.
//!
//! The remote API hands out opaque string `_id`s for every entity. Each
//! entity gets its own wrapper type so a `ProductId` can never be passed
//! where an `OrderId` belongs, at zero runtime cost.

/// Defines a string-backed identifier newtype.
///
/// The wrapper serializes transparently (the wire sees a plain string)
/// and converts from `String`/`&str` for ergonomic construction.
///
/// ```rust
/// # use orchard_core::define_id;
/// define_id!(UserId);
/// define_id!(OrderId);
///
/// let user_id = UserId::new("665f1c2e9b3d2a0012ab34cd");
/// // A UserId is not an OrderId; mixing them does not compile.
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything string-like.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the raw identifier.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Standard entity IDs
define_id!(UserId);
define_id!(ProductId);
define_id!(CategoryId);
define_id!(CartId);
define_id!(OrderId);
define_id!(SliderId);
define_id!(ConversationId);
define_id!(MessageId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_inner() {
        let id = ProductId::new("665f1c2e9b3d2a0012ab34cd");
        assert_eq!(id.to_string(), "665f1c2e9b3d2a0012ab34cd");
        assert_eq!(id.as_str(), "665f1c2e9b3d2a0012ab34cd");
    }

    #[test]
    fn test_serde_transparent() {
        let id: UserId = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(id, UserId::new("abc123"));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc123\"");
    }
}
