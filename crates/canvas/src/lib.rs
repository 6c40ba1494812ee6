//! Canvas wire/boundary support for the lab-triage protocol.
//!
//! This crate provides **wire models** and **format/translation helpers** for the data the
//! host platform exchanges with the protocol on each invocation:
//! - the patient context (care-team memberships and lab reports) handed in by the host,
//! - the field-change record naming the lab report that triggered evaluation,
//! - the outbound task-creation payload submitted back through the host's update channel.
//!
//! This crate focuses on:
//! - host (Canvas) semantic alignment, without any transport concerns
//! - serialisation/deserialisation
//! - translation between domain types and wire structs
//!
//! The host owns the full patient data model; the wire structs here type only the fields the
//! protocol reads and tolerate any extra keys the host includes alongside them.

pub mod change;
pub mod patient;
pub mod task;

// Re-export public domain-level types
pub use change::{ChangeType, FieldChange, ReportId};
pub use patient::{CareTeamMembership, CareTeamRole, LabReport, PatientContext};
pub use task::{Task, TaskCreate, TaskStatus};

/// Errors returned by the `canvas` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("invalid record key: {0}")]
    InvalidKey(#[from] triage_types::KeyError),
}

/// Type alias for Results that can fail with a [`CanvasError`].
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Deserialize a wire struct from JSON text, reporting the failing path on mismatch.
///
/// This uses `serde_path_to_error` to surface a best-effort "path" (e.g.
/// `careTeamMemberships.0.role.code`) to the failing field when the JSON does not match the
/// wire schema. Shared by the inbound parse entry points.
pub(crate) fn from_json_with_path<'de, T>(json_text: &'de str, what: &str) -> CanvasResult<T>
where
    T: serde::Deserialize<'de>,
{
    let mut deserializer = serde_json::Deserializer::from_str(json_text);

    match serde_path_to_error::deserialize::<_, T>(&mut deserializer) {
        Ok(parsed) => Ok(parsed),
        Err(err) => {
            let path = err.path().to_string();
            let source = err.into_inner();
            let path = if path.is_empty() {
                "<root>"
            } else {
                path.as_str()
            };
            Err(CanvasError::Translation(format!(
                "{what} schema mismatch at {path}: {source}"
            )))
        }
    }
}
