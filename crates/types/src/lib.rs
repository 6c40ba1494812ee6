//! Validated identifier primitives for the lab-triage protocol.
//!
//! The host EHR platform (Canvas) addresses staff, patients and reviewers by a *record key*:
//! **32 lowercase hexadecimal characters** (no hyphens). This is the same value you would get
//! from `Uuid::new_v4().simple().to_string()`.
//!
//! This crate provides:
//! - A small wrapper type ([`RecordKey`]) that *guarantees* the canonical format once
//!   constructed.
//!
//! ## Canonical key form
//! - Length: 32
//! - Characters: `0-9` and `a-f` only
//! - Example: `4150cd20de8a470aa570a852859ac87e`
//!
//! Notes:
//! - Canonical form is *required* for externally supplied identifiers (reviewer keys, staff
//!   keys, configuration values). Use [`RecordKey::parse`] to validate an input string.
//! - Non-canonical values (uppercase, hyphenated, wrong length, non-hex) are rejected.

mod key;

// Re-export public types
pub use key::RecordKey;

/// Error type for record key operations.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for record key operations.
pub type KeyResult<T> = Result<T, KeyError>;
