//! Protocol runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into the rule evaluator. The identifiers and role values never change at runtime;
//! resolving them up front keeps every evaluation a pure function of its inputs.

use crate::constants::{
    CANVAS_BOT_KEY, CANVAS_SUPPORT_KEY, FALLBACK_STAFF_KEY, TASK_LABEL_URGENT, TRIAGE_ROLE_CODE,
    TRIAGE_ROLE_DISPLAY,
};
use crate::{ProtocolError, TriageResult};
use triage_types::RecordKey;

/// Protocol configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct ProtocolConfig {
    support_key: RecordKey,
    fallback_staff_key: RecordKey,
    bot_key: RecordKey,
    role_code: String,
    role_display: String,
    task_labels: Vec<String>,
}

impl ProtocolConfig {
    /// Create a new `ProtocolConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidConfig`] if the role code, role display, or any task
    /// label is empty or whitespace-only.
    pub fn new(
        support_key: RecordKey,
        fallback_staff_key: RecordKey,
        bot_key: RecordKey,
        role_code: impl Into<String>,
        role_display: impl Into<String>,
        task_labels: Vec<String>,
    ) -> TriageResult<Self> {
        let role_code = role_code.into();
        let role_display = role_display.into();

        if role_code.trim().is_empty() {
            return Err(ProtocolError::InvalidConfig(
                "role_code cannot be empty".into(),
            ));
        }
        if role_display.trim().is_empty() {
            return Err(ProtocolError::InvalidConfig(
                "role_display cannot be empty".into(),
            ));
        }
        if task_labels.iter().any(|label| label.trim().is_empty()) {
            return Err(ProtocolError::InvalidConfig(
                "task labels cannot be empty".into(),
            ));
        }

        Ok(Self {
            support_key,
            fallback_staff_key,
            bot_key,
            role_code,
            role_display,
            task_labels,
        })
    }

    /// Create a `ProtocolConfig` from wire-form key strings.
    ///
    /// Convenience for host bindings that configure the protocol from untyped values.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidKey`] if any key is not a canonical record key, or
    /// [`ProtocolError::InvalidConfig`] for invalid role/label values.
    pub fn from_wire_values(
        support_key: &str,
        fallback_staff_key: &str,
        bot_key: &str,
        role_code: impl Into<String>,
        role_display: impl Into<String>,
        task_labels: Vec<String>,
    ) -> TriageResult<Self> {
        Self::new(
            RecordKey::parse(support_key)?,
            RecordKey::parse(fallback_staff_key)?,
            RecordKey::parse(bot_key)?,
            role_code,
            role_display,
            task_labels,
        )
    }

    /// The stock Canvas configuration the protocol ships with.
    pub fn canvas_defaults() -> Self {
        // The checked-in constants are canonical keys and non-empty strings, so
        // from_wire_values cannot fail on them.
        Self::from_wire_values(
            CANVAS_SUPPORT_KEY,
            FALLBACK_STAFF_KEY,
            CANVAS_BOT_KEY,
            TRIAGE_ROLE_CODE,
            TRIAGE_ROLE_DISPLAY,
            vec![TASK_LABEL_URGENT.to_string()],
        )
        .expect("stock Canvas configuration is valid")
    }

    /// Reviewer key identifying the generic support reviewer.
    pub fn support_key(&self) -> &RecordKey {
        &self.support_key
    }

    /// Staff key that receives the task when no care-team member matches the role pair.
    pub fn fallback_staff_key(&self) -> &RecordKey {
        &self.fallback_staff_key
    }

    /// Identity recorded as the creator of generated tasks.
    pub fn bot_key(&self) -> &RecordKey {
        &self.bot_key
    }

    /// Role code an assignee's care-team membership must carry.
    pub fn role_code(&self) -> &str {
        &self.role_code
    }

    /// Role display label an assignee's care-team membership must carry.
    pub fn role_display(&self) -> &str {
        &self.role_display
    }

    /// Labels attached to generated tasks.
    pub fn task_labels(&self) -> &[String] {
        &self.task_labels
    }
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self::canvas_defaults()
    }
}
