//! Internal implementation of the canonical record key.

use crate::{KeyError, KeyResult};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// A Canvas record key in canonical form (32 lowercase hex characters, no hyphens).
///
/// This wrapper type guarantees that once constructed, the contained identifier is in the
/// host's canonical format. It provides type safety for identifier comparisons across the
/// protocol: reviewer keys, staff keys and configuration keys all share this type, so a
/// non-canonical string can never reach a comparison site.
///
/// # Construction
/// - [`RecordKey::parse`] validates an externally supplied identifier.
/// - [`RecordKey::new`] generates a fresh canonical key (useful in tests and host bindings).
///
/// # Errors
/// [`RecordKey::parse`] returns [`KeyError::InvalidInput`] if the input is not already
/// canonical.
///
/// # Display format
/// When displayed or converted to string, `RecordKey` always produces the canonical
/// 32-character lowercase hex format without hyphens.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordKey(Uuid);

impl RecordKey {
    /// Generates a new record key in canonical form.
    ///
    /// The generated key follows RFC 4122 version 4.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Validates and parses a key string that must already be in canonical form.
    ///
    /// This does **not** normalise other common UUID forms (for example, hyphenated or
    /// uppercase). The host always supplies canonical keys, so anything else is treated as
    /// malformed input rather than silently repaired.
    ///
    /// # Arguments
    ///
    /// * `input` - Key string to validate and wrap. Must be exactly 32 lowercase hex characters.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidInput`] if `input` is not in canonical form.
    pub fn parse(input: &str) -> KeyResult<Self> {
        if Self::is_canonical(input) {
            // SAFETY: is_canonical guarantees valid hex, so parse_str will succeed
            let uuid = Uuid::parse_str(input).expect("is_canonical guarantees valid UUID");
            return Ok(Self(uuid));
        }
        Err(KeyError::InvalidInput(format!(
            "record key must be 32 lowercase hex characters without hyphens, got: '{}'",
            input
        )))
    }

    /// Returns true if `input` is in canonical record key form.
    ///
    /// This is a purely syntactic check that validates:
    /// - Exactly 32 bytes long
    /// - Contains only lowercase hex characters (`0-9` and `a-f`)
    pub fn is_canonical(input: &str) -> bool {
        input.len() == 32
            && input
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }

    /// Returns the key as a `uuid::Uuid`.
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RecordKey {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordKey {
    /// Formats the key in canonical form (32 lowercase hex characters, no hyphens).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display in canonical (simple) form
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for RecordKey {
    type Err = KeyError;

    /// Parses a string into a `RecordKey`, requiring canonical form.
    ///
    /// This is equivalent to calling [`RecordKey::parse`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordKey::parse(s)
    }
}

impl serde::Serialize for RecordKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for RecordKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        RecordKey::parse(&s).map_err(serde::de::Error::custom)
    }
}
