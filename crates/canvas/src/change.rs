//! Field-change records and change-type triggers.
//!
//! The host evaluates the protocol whenever a watched record type changes, and hands over a
//! *field-change record* describing the change. The record may be absent (for example when the
//! host replays a protocol outside a change event), so the boundary models it as
//! `Option<FieldChange>`: the "no record" and "no matching report" paths collapse into the
//! same outcome downstream.

use crate::{from_json_with_path, CanvasResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Public domain-level types
// ============================================================================

/// The host's numeric row identifier for a lab report.
///
/// Unlike staff and reviewer identifiers this is not a record key; the host addresses lab
/// report rows by an integer id and repeats that id in the field-change record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(pub i64);

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Record types a protocol can ask the host to trigger on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeType {
    /// Appointment records.
    Appointment,
    /// Condition (diagnosis) records.
    Condition,
    /// Lab order records.
    LabOrder,
    /// Lab report records.
    LabReport,
    /// Medication records.
    Medication,
    /// Message records.
    Message,
    /// Patient demographics.
    Patient,
    /// Task records.
    Task,
}

impl ChangeType {
    /// Convert to the host's model-name string.
    pub fn to_wire(self) -> &'static str {
        match self {
            ChangeType::Appointment => "appointment",
            ChangeType::Condition => "condition",
            ChangeType::LabOrder => "laborder",
            ChangeType::LabReport => "labreport",
            ChangeType::Medication => "medication",
            ChangeType::Message => "message",
            ChangeType::Patient => "patient",
            ChangeType::Task => "task",
        }
    }

    /// Parse from the host's model-name string.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "appointment" => Some(ChangeType::Appointment),
            "condition" => Some(ChangeType::Condition),
            "laborder" => Some(ChangeType::LabOrder),
            "labreport" => Some(ChangeType::LabReport),
            "medication" => Some(ChangeType::Medication),
            "message" => Some(ChangeType::Message),
            "patient" => Some(ChangeType::Patient),
            "task" => Some(ChangeType::Task),
            _ => None,
        }
    }
}

/// Domain-level carrier for a field-change record.
///
/// The protocol only consults [`FieldChange::report_id`]; the remaining fields describe the
/// change for logging and host-side bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldChange {
    /// Row id of the changed record (the lab report, for this protocol's trigger).
    pub report_id: ReportId,

    /// Model name of the changed record, when the host includes it.
    pub model_name: Option<String>,

    /// Whether the change created the record (as opposed to updating it).
    pub created: bool,

    /// Per-field before/after values, as supplied by the host. Opaque to this protocol.
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl FieldChange {
    /// Parse a field-change record from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError`] if the JSON is malformed, if the `canvas_id` key is missing,
    /// or if any typed field has an unexpected shape. A record without `canvas_id` cannot
    /// name the changed report, so it is a boundary fault for the host wrapper to report.
    pub fn parse(json_text: &str) -> CanvasResult<Self> {
        let wire: FieldChangeWire = from_json_with_path(json_text, "Field change")?;
        Ok(wire_to_domain(wire))
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

/// Wire representation of a host field-change record.
///
/// `canvas_id` is required; everything else is optional and extra keys are ignored, since the
/// host's diff payload varies by record type.
#[derive(Debug, Deserialize)]
struct FieldChangeWire {
    canvas_id: i64,

    #[serde(default)]
    model_name: Option<String>,

    #[serde(default)]
    created: bool,

    #[serde(default)]
    fields: BTreeMap<String, serde_json::Value>,
}

fn wire_to_domain(wire: FieldChangeWire) -> FieldChange {
    FieldChange {
        report_id: ReportId(wire.canvas_id),
        model_name: wire.model_name,
        created: wire.created,
        fields: wire.fields,
    }
}
