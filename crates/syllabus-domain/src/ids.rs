//! Opaque identifiers for catalog entities and relationships
//!
//! The remote API owns identifier allocation, so identifiers are carried as
//! strings and never generated locally.

use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier value
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the raw identifier value
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True when the identifier is blank (empty or whitespace only)
            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }

            /// Consume the identifier and return the raw value
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

define_id!(
    /// Identifier of a course
    CourseId
);

define_id!(
    /// Identifier of a subject
    SubjectId
);

define_id!(
    /// Identifier of a specialty
    SpecialtyId
);

define_id!(
    /// Identifier of a (course, subject, specialty) relationship record
    RelationshipId
);
