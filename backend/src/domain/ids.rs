//! Strongly typed row identifiers.
//!
//! Every table is keyed by a database-generated integer. Wrapping each key in
//! its own type keeps a `ThreadId` from being passed where a `CapsuleId` is
//! expected, while serialising as a bare JSON number.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw database key.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Raw database key.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

define_id!(
    /// Login account key.
    AccountId
);
define_id!(
    /// User profile key; profiles own capsules, threads, and comments.
    ProfileId
);
define_id!(
    /// Time capsule key.
    CapsuleId
);
define_id!(
    /// Capsule content key.
    CapsuleContentId
);
define_id!(
    /// Prediction key.
    PredictionId
);
define_id!(
    /// Story node key.
    StoryNodeId
);
define_id!(
    /// Story choice key.
    StoryChoiceId
);
define_id!(
    /// Discussion thread key.
    ThreadId
);
define_id!(
    /// Discussion comment key.
    CommentId
);
define_id!(
    /// Key into one of the lookup tables.
    LookupId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialises_as_bare_number() {
        let value = serde_json::to_value(CapsuleId::new(7)).expect("serialise id");
        assert_eq!(value, serde_json::json!(7));
    }

    #[test]
    fn deserialises_from_number() {
        let id: ThreadId = serde_json::from_str("42").expect("parse id");
        assert_eq!(id.get(), 42);
    }
}
