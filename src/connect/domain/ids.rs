//! Identifier newtypes for records on both platforms.
//!
//! Every identifier here is a platform-assigned integer key. Wrapping them
//! keeps a tracker entry id from being handed to an agency call and vice
//! versa.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! integer_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw platform identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the underlying numeric value.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

integer_id! {
    /// Identifier of a time entry on the tracker platform (the mapping key).
    SourceEntryId
}

integer_id! {
    /// Identifier of a timesheet row on the agency platform.
    TargetEntryId
}

integer_id! {
    /// Agency personnel reference for the acting user.
    PersonId
}

integer_id! {
    /// Identifier of a category label on the tracker platform.
    LabelId
}

integer_id! {
    /// Identifier of a job on the agency platform.
    JobId
}

integer_id! {
    /// Identifier of a task within an agency job.
    TaskId
}

integer_id! {
    /// Identifier of a user account on the tracker platform.
    TrackerUserId
}

integer_id! {
    /// Identifier of a client on the agency platform.
    ClientId
}

integer_id! {
    /// Identifier of a client record on the tracker platform.
    TrackerClientId
}
