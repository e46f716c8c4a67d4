//! Newtype IDs for type-safe entity references.
//!
//! The remote service identifies every entity by an opaque string, so
//! these wrappers are string-backed. Use the `define_id!` macro to create
//! ID types that prevent accidentally mixing IDs from different entities.

/// Macro to define a type-safe, string-backed ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`/`From<&str>` implementations and `Display`
///
/// # Example
///
/// ```rust
/// # use opi_core::define_id;
/// define_id!(WidgetId);
/// define_id!(GadgetId);
///
/// let widget = WidgetId::new("w-1");
/// let gadget = GadgetId::new("g-1");
///
/// // These are different types, so this won't compile:
/// // let _: WidgetId = gadget;
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

            /// Get the ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the underlying string.
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

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(CaseId);
define_id!(InvestigationId);
define_id!(TestimonialId);
define_id!(TeamMemberId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_as_str() {
        let id = CaseId::new("case-042");
        assert_eq!(id.as_str(), "case-042");
    }

    #[test]
    fn test_display() {
        let id = InvestigationId::new("inv-7");
        assert_eq!(format!("{id}"), "inv-7");
    }

    #[test]
    fn test_serde_transparent() {
        let id = CaseId::new("case-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"case-1\"");

        let parsed: CaseId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_from_conversions() {
        let id: TeamMemberId = "tm-3".into();
        let s: String = id.clone().into();
        assert_eq!(s, "tm-3");
        assert_eq!(TeamMemberId::from(s), id);
    }
}
