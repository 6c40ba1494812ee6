//! Outbound task-creation payloads.
//!
//! This module provides the domain type and wire model for the task-creation request a
//! protocol submits through the host's update channel.
//!
//! Responsibilities:
//! - Define the public domain-level [`TaskCreate`] type built by the rule evaluator
//! - Define the wire struct matching the host's task integration-message fields
//! - Render the payload to JSON for the update channel
//!
//! Notes:
//! - The payload is write-once: the host persists and delivers it, and the protocol never
//!   reads it back, so no parse direction exists here.

use crate::{CanvasError, CanvasResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use triage_types::RecordKey;

// ============================================================================
// Public domain-level types
// ============================================================================

/// Lifecycle status of a task on the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    /// Task is open and awaiting action.
    Open,
    /// Task has been completed.
    Completed,
    /// Task was closed without completion.
    Closed,
}

impl TaskStatus {
    /// Convert to the host's wire format string.
    pub fn to_wire(self) -> &'static str {
        match self {
            TaskStatus::Open => "OPEN",
            TaskStatus::Completed => "COMPLETED",
            TaskStatus::Closed => "CLOSED",
        }
    }
}

/// Domain-level carrier for a task-creation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskCreate {
    /// Record key of the patient the task belongs to.
    pub patient_key: RecordKey,

    /// Record key of the identity creating the task.
    pub created_by_key: RecordKey,

    /// Initial lifecycle status.
    pub status: TaskStatus,

    /// Human-readable task title.
    pub title: String,

    /// Record key of the staff member the task is assigned to.
    pub assignee_key: RecordKey,

    /// When the task falls due.
    pub due: DateTime<Utc>,

    /// When the task was created.
    pub created: DateTime<Utc>,

    /// Labels attached to the task.
    pub labels: Vec<String>,
}

// ============================================================================
// Public Task operations
// ============================================================================

/// Task payload operations.
///
/// This is a zero-sized type used for namespacing task-related operations.
/// All methods are associated functions.
pub struct Task;

impl Task {
    /// Render a task-creation request as JSON text for the host's update channel.
    ///
    /// Timestamps are rendered as RFC 3339 / ISO-8601 strings.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError`] if serialisation fails.
    pub fn render(data: &TaskCreate) -> CanvasResult<String> {
        serde_json::to_string(&domain_to_wire(data))
            .map_err(|e| CanvasError::Translation(format!("Failed to serialise task: {e}")))
    }

    /// Render a task-creation request as a JSON value.
    ///
    /// Host bindings that batch updates into a larger message can splice the value in
    /// without re-parsing text.
    pub fn render_value(data: &TaskCreate) -> CanvasResult<serde_json::Value> {
        serde_json::to_value(domain_to_wire(data))
            .map_err(|e| CanvasError::Translation(format!("Failed to serialise task: {e}")))
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

/// Wire representation of the task integration message.
#[derive(Debug, Serialize)]
struct TaskCreateWire {
    patient_key: String,
    created_by_key: String,
    status: &'static str,
    title: String,
    assignee_identifier: String,
    due: String,
    created: String,
    labels: Vec<String>,
}

fn domain_to_wire(data: &TaskCreate) -> TaskCreateWire {
    TaskCreateWire {
        patient_key: data.patient_key.to_string(),
        created_by_key: data.created_by_key.to_string(),
        status: data.status.to_wire(),
        title: data.title.clone(),
        assignee_identifier: data.assignee_key.to_string(),
        due: data.due.to_rfc3339(),
        created: data.created.to_rfc3339(),
        labels: data.labels.clone(),
    }
}
