//! Type-safe identifier wrappers around SQLite row ids.
//!
//! Users and lands are keyed by `INTEGER PRIMARY KEY AUTOINCREMENT`
//! columns. Wrapping the raw `i64` keeps a land id from being passed
//! where a user id is expected.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around an `i64` row id with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Return the inner row id.
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Identifier of a registered user (`users.id`).
    UserId
}

define_id! {
    /// Identifier of a land parcel (`lands.id`).
    LandId
}
