//! Patient-context wire models and translation helpers.
//!
//! This module provides both domain-level types and wire models for the read-only patient
//! view the host supplies on each protocol invocation.
//!
//! Responsibilities:
//! - Define public domain-level types for the rule evaluator to read
//! - Define wire structs matching the host's JSON field names
//! - Provide translation helpers between the wire model and domain types
//! - Validate identifiers at the boundary (canonical record keys)
//!
//! Notes:
//! - The host object carries far more fields than the protocol reads; wire structs type only
//!   what is read and ignore the rest.
//! - The protocol never mutates the patient context.

use crate::change::ReportId;
use crate::{from_json_with_path, CanvasError, CanvasResult};
use serde::Deserialize;
use triage_types::RecordKey;

// ============================================================================
// Public domain-level types
// ============================================================================

/// Read-only view of a patient, as handed over by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientContext {
    /// The patient's record key.
    pub key: RecordKey,

    /// Care-team memberships, in host-supplied order.
    pub care_team: Vec<CareTeamMembership>,

    /// Lab reports, in host-supplied order (oldest first).
    pub lab_reports: Vec<LabReport>,
}

/// A staff member's membership of the patient's care team.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CareTeamMembership {
    /// Record key of the staff member.
    pub staff_key: RecordKey,

    /// Role the staff member holds on this care team.
    pub role: CareTeamRole,
}

/// A coded care-team role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CareTeamRole {
    /// Machine-readable role code.
    pub code: String,

    /// Human-readable role label.
    pub display: String,
}

/// A lab report row with its reviewer assignments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabReport {
    /// The host's row id for this report.
    pub report_id: ReportId,

    /// Record keys of the reviewers the report is currently routed to.
    pub reviewers: Vec<RecordKey>,
}

impl PatientContext {
    /// Parse a patient context from the host's JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError`] if:
    /// - the JSON is malformed or a typed field has an unexpected shape (the error names the
    ///   failing path, e.g. `careTeamMemberships.0.role.code`),
    /// - any staff, patient or reviewer key is not in canonical form.
    pub fn parse(json_text: &str) -> CanvasResult<Self> {
        let wire: PatientWire = from_json_with_path(json_text, "Patient context")?;
        wire_to_domain(wire)
    }

    /// Returns the most recent lab report matching `report_id`, if any.
    ///
    /// The host supplies reports oldest-first and may hold several rows for the same report
    /// id; the last match is the current one.
    pub fn lab_report(&self, report_id: ReportId) -> Option<&LabReport> {
        self.lab_reports
            .iter()
            .rfind(|report| report.report_id == report_id)
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

/// Wire representation of the host patient object.
///
/// Only the fields the protocol reads are typed; the host includes many others.
#[derive(Debug, Deserialize)]
struct PatientWire {
    key: String,

    #[serde(rename = "careTeamMemberships", default)]
    care_team_memberships: Vec<CareTeamMembershipWire>,

    #[serde(rename = "labReports", default)]
    lab_reports: Vec<LabReportWire>,
}

#[derive(Debug, Deserialize)]
struct CareTeamMembershipWire {
    role: CareTeamRoleWire,
    staff: StaffWire,
}

#[derive(Debug, Deserialize)]
struct CareTeamRoleWire {
    code: String,
    display: String,
}

#[derive(Debug, Deserialize)]
struct StaffWire {
    key: String,
}

#[derive(Debug, Deserialize)]
struct LabReportWire {
    report: i64,

    #[serde(default)]
    reviewers: Vec<ReviewerWire>,
}

#[derive(Debug, Deserialize)]
struct ReviewerWire {
    key: String,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

/// Convert the wire patient to domain types, validating identifiers.
fn wire_to_domain(wire: PatientWire) -> CanvasResult<PatientContext> {
    let key = RecordKey::parse(&wire.key)
        .map_err(|e| CanvasError::Translation(format!("Invalid patient key: {e}")))?;

    let care_team = wire
        .care_team_memberships
        .into_iter()
        .map(|m| {
            let staff_key = RecordKey::parse(&m.staff.key)
                .map_err(|e| CanvasError::Translation(format!("Invalid staff key: {e}")))?;
            Ok(CareTeamMembership {
                staff_key,
                role: CareTeamRole {
                    code: m.role.code,
                    display: m.role.display,
                },
            })
        })
        .collect::<CanvasResult<Vec<_>>>()?;

    let lab_reports = wire
        .lab_reports
        .into_iter()
        .map(|r| {
            let reviewers = r
                .reviewers
                .into_iter()
                .map(|reviewer| {
                    RecordKey::parse(&reviewer.key).map_err(|e| {
                        CanvasError::Translation(format!("Invalid reviewer key: {e}"))
                    })
                })
                .collect::<CanvasResult<Vec<_>>>()?;
            Ok(LabReport {
                report_id: ReportId(r.report),
                reviewers,
            })
        })
        .collect::<CanvasResult<Vec<_>>>()?;

    Ok(PatientContext {
        key,
        care_team,
        lab_reports,
    })
}
