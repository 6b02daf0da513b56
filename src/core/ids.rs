//! Identifier types.
//!
//! Catalog ids (participants, tracks, boosts) are the string keys used in
//! the catalog data. Race ids are generated by the session service.
//!
//! ## Usage
//!
//! ```
//! use rust_kart::core::{ParticipantId, RaceId};
//!
//! let mario = ParticipantId::new("mario");
//! assert_eq!(mario.as_str(), "mario");
//!
//! let race = RaceId::generate(1_700_000_000_000, 3);
//! assert_eq!(race.as_str(), "race_1700000000000_3");
//! ```

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an id from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw id.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Catalog key of a participant template.
    ParticipantId
);

string_id!(
    /// Catalog key of a track template.
    TrackId
);

string_id!(
    /// Catalog key of a boost template.
    BoostId
);

string_id!(
    /// Unique identifier of a race, generated at creation.
    RaceId
);

impl RaceId {
    /// Build a race id from a creation timestamp and a per-service sequence.
    ///
    /// The sequence makes ids unique even when two races are created in the
    /// same millisecond.
    #[must_use]
    pub fn generate(unix_millis: i64, sequence: u64) -> Self {
        Self(format!("race_{}_{}", unix_millis, sequence))
    }
}
