use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use ulid::Ulid;

/// Defines a ULID-backed newtype id, matching the `FileId`/`Revision`
/// newtype pattern in `djls-workspace` (stable, compact identity decoupled
/// from the underlying representation).
macro_rules! ulid_id {
    ($name:ident) => {
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Ulid);

        impl $name {
            #[must_use]
            pub fn new(ulid: Ulid) -> Self {
                Self(ulid)
            }

            /// A fresh, randomly generated id.
            #[must_use]
            pub fn generate() -> Self {
                Self(Ulid::new())
            }

            #[must_use]
            pub fn ulid(self) -> Ulid {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ulid::DecodeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ulid::from_string(s).map(Self)
            }
        }
    };
}

ulid_id!(SessionId);
ulid_id!(ThoughtId);
ulid_id!(ToolCallId);
ulid_id!(DiffHunkId);
