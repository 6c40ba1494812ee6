//! Protocol evaluation results.
//!
//! Every evaluation returns exactly one [`ProtocolResult`]: a status from the host's fixed
//! two-value enumeration plus human-readable narrative text the host surfaces to staff.

/// Status of a protocol evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProtocolStatus {
    /// The protocol applied and its action was carried out.
    Satisfied,
    /// The protocol did not apply to this change.
    NotApplicable,
}

impl ProtocolStatus {
    /// Convert to the host's wire format string.
    pub fn to_wire(self) -> &'static str {
        match self {
            ProtocolStatus::Satisfied => "satisfied",
            ProtocolStatus::NotApplicable => "not_applicable",
        }
    }
}

/// Outcome of a single protocol evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProtocolResult {
    status: ProtocolStatus,
    narratives: Vec<String>,
}

impl ProtocolResult {
    /// Create a satisfied result with an initial narrative line.
    pub fn satisfied(narrative: impl Into<String>) -> Self {
        Self {
            status: ProtocolStatus::Satisfied,
            narratives: vec![narrative.into()],
        }
    }

    /// Create a not-applicable result with an initial narrative line.
    pub fn not_applicable(narrative: impl Into<String>) -> Self {
        Self {
            status: ProtocolStatus::NotApplicable,
            narratives: vec![narrative.into()],
        }
    }

    /// Append a narrative line.
    pub fn add_narrative(&mut self, narrative: impl Into<String>) {
        self.narratives.push(narrative.into());
    }

    /// The evaluation status.
    pub fn status(&self) -> ProtocolStatus {
        self.status
    }

    /// The narrative lines, in the order they were added.
    pub fn narratives(&self) -> &[String] {
        &self.narratives
    }

    /// The full narrative as a single newline-joined string.
    pub fn narrative(&self) -> String {
        self.narratives.join("\n")
    }
}
