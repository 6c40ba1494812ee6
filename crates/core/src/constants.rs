//! Constants used throughout the triage core crate.
//!
//! These are the stock Canvas identifiers and role values the protocol ships with. They are
//! process-wide configuration with no runtime mutation; [`crate::ProtocolConfig`] captures
//! them as immutable values at startup.

/// Reviewer key the host routes untriaged lab reports to ("Canvas Support").
pub const CANVAS_SUPPORT_KEY: &str = "4150cd20de8a470aa570a852859ac87e";

/// Staff key that receives triage tasks when no care-team member holds the triage role.
pub const FALLBACK_STAFF_KEY: &str = "5eede137ecfe4124b8b773040e33be14";

/// Bot identity recorded as the creator of protocol-generated tasks.
pub const CANVAS_BOT_KEY: &str = "5eede137ecfe4124b8b773040e33be14";

/// Role code a care-team membership must carry to receive triage tasks.
pub const TRIAGE_ROLE_CODE: &str = "central_primary_care_practitioner";

/// Role display label a care-team membership must carry to receive triage tasks.
///
/// Both code and display must match; a membership whose pair has drifted apart should not
/// receive automated work.
pub const TRIAGE_ROLE_DISPLAY: &str = "Central Primary Care Practitioner";

/// Label attached to every triage task.
pub const TASK_LABEL_URGENT: &str = "Urgent";

/// Days until a triage task falls due.
pub const TASK_DUE_DAYS: i64 = 7;
