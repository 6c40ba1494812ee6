//! The lab-report triage rule.
//!
//! This module implements the single clinical-workflow rule this repository exists for: when
//! a lab report ends up routed to the generic "Canvas Support" reviewer instead of a named
//! clinician, create a follow-up task for a care-team member who can actually review it.
//!
//! The host platform owns change detection, scheduling and task persistence. It calls
//! [`LabReportTriage::evaluate`] once per lab-report change with a read-only patient context
//! and an optional field-change record; the rule answers with a [`ProtocolResult`] and
//! submits at most one [`TaskCreate`] through the supplied [`UpdateSink`].

use crate::config::ProtocolConfig;
use crate::constants::TASK_DUE_DAYS;
use crate::result::ProtocolResult;
use canvas::{ChangeType, FieldChange, LabReport, PatientContext, TaskCreate, TaskStatus};
use chrono::{DateTime, Duration, Utc};
use triage_types::RecordKey;

const NARRATIVE_TASK_CREATED: &str = "Task created";
const NARRATIVE_NOT_ROUTED: &str = "Report not assigned to Canvas Support, no task created.";

/// Descriptive metadata the host displays alongside the protocol.
#[derive(Clone, Copy, Debug)]
pub struct ProtocolMeta {
    /// Human-readable protocol title.
    pub title: &'static str,
    /// What the protocol does and why.
    pub description: &'static str,
    /// Protocol version string.
    pub version: &'static str,
    /// Record types the host should re-evaluate the protocol on.
    pub compute_on_change_types: &'static [ChangeType],
}

/// The host's update/side-effect channel.
///
/// The rule hands outbound payloads to the sink; the host owns persistence and delivery.
pub trait UpdateSink {
    /// Receive one outbound task-creation request.
    fn submit(&mut self, update: TaskCreate);
}

/// Collecting sink for tests and simple host bindings.
impl UpdateSink for Vec<TaskCreate> {
    fn submit(&mut self, update: TaskCreate) {
        self.push(update);
    }
}

/// Rule evaluator for lab reports routed to the support reviewer.
#[derive(Clone, Debug)]
pub struct LabReportTriage {
    config: ProtocolConfig,
}

impl LabReportTriage {
    /// Protocol metadata, as registered with the host.
    pub const META: ProtocolMeta = ProtocolMeta {
        title: "Lab Report Task Creation",
        description: "Create a task for staff with a certain care-team role if a lab report \
                      becomes assigned to Canvas Support, so that every lab report reaches \
                      staff who are able to review it.",
        version: "1.0.1",
        compute_on_change_types: &[ChangeType::LabReport],
    };

    /// Create an evaluator with the given configuration.
    pub fn new(config: ProtocolConfig) -> Self {
        Self { config }
    }

    /// Evaluate the rule against the current wall clock.
    ///
    /// The clock is read once; the emitted task's `created` timestamp and its due date both
    /// derive from that single instant.
    pub fn evaluate(
        &self,
        patient: &PatientContext,
        changes: Option<&FieldChange>,
        updates: &mut dyn UpdateSink,
    ) -> ProtocolResult {
        self.evaluate_at(patient, changes, Utc::now(), updates)
    }

    /// Evaluate the rule at an explicit instant.
    ///
    /// Resolves the changed lab report, checks whether it is routed to the support reviewer,
    /// and if so submits one task assigned to the appropriate care-team member (or the
    /// configured fallback).
    pub fn evaluate_at(
        &self,
        patient: &PatientContext,
        changes: Option<&FieldChange>,
        now: DateTime<Utc>,
        updates: &mut dyn UpdateSink,
    ) -> ProtocolResult {
        let report = match self.changed_report(patient, changes) {
            Some(report) if self.routed_to_support(report) => report,
            _ => {
                tracing::debug!(patient = %patient.key, "changed lab report is not routed to support");
                return ProtocolResult::not_applicable(NARRATIVE_NOT_ROUTED);
            }
        };

        let assignee = self.assignee(patient);
        tracing::debug!(
            patient = %patient.key,
            report = %report.report_id,
            assignee = %assignee,
            "lab report routed to support, submitting triage task"
        );
        updates.submit(self.build_task(patient, report, assignee, now));

        ProtocolResult::satisfied(NARRATIVE_TASK_CREATED)
    }

    /// Return the lab report named by the field-change record, if both exist.
    fn changed_report<'a>(
        &self,
        patient: &'a PatientContext,
        changes: Option<&FieldChange>,
    ) -> Option<&'a LabReport> {
        patient.lab_report(changes?.report_id)
    }

    /// True if the report's reviewer set contains the support reviewer key.
    fn routed_to_support(&self, report: &LabReport) -> bool {
        report
            .reviewers
            .iter()
            .any(|reviewer| reviewer == self.config.support_key())
    }

    /// Select the staff member to assign the task to.
    ///
    /// Scans the care team for a membership matching both the configured role code and role
    /// display, taking the first in host-supplied order; falls back to the configured staff
    /// key when none matches. Host ordering of memberships is not guaranteed to be stable,
    /// so a multi-match is logged.
    fn assignee(&self, patient: &PatientContext) -> RecordKey {
        let mut matches = patient.care_team.iter().filter(|membership| {
            membership.role.code == self.config.role_code()
                && membership.role.display == self.config.role_display()
        });

        let first = matches.next();
        if matches.next().is_some() {
            tracing::warn!(
                patient = %patient.key,
                role_code = self.config.role_code(),
                "multiple care-team members hold the triage role, using the first in host order"
            );
        }

        match first {
            Some(membership) => membership.staff_key.clone(),
            None => self.config.fallback_staff_key().clone(),
        }
    }

    /// Build the outbound task payload for a support-routed report.
    fn build_task(
        &self,
        patient: &PatientContext,
        report: &LabReport,
        assignee: RecordKey,
        now: DateTime<Utc>,
    ) -> TaskCreate {
        TaskCreate {
            patient_key: patient.key.clone(),
            created_by_key: self.config.bot_key().clone(),
            status: TaskStatus::Open,
            title: format!(
                "Lab Report {} assigned to Canvas Support.",
                report.report_id
            ),
            assignee_key: assignee,
            due: now + Duration::days(TASK_DUE_DAYS),
            created: now,
            labels: self.config.task_labels().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CANVAS_BOT_KEY, CANVAS_SUPPORT_KEY, FALLBACK_STAFF_KEY};
    use crate::result::ProtocolStatus;
    use canvas::{CareTeamMembership, CareTeamRole, ReportId};
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    fn key(hex: &str) -> RecordKey {
        RecordKey::parse(hex).expect("valid key")
    }

    fn support_key() -> RecordKey {
        key(CANVAS_SUPPORT_KEY)
    }

    fn practitioner_membership(staff_hex: &str) -> CareTeamMembership {
        CareTeamMembership {
            staff_key: key(staff_hex),
            role: CareTeamRole {
                code: "central_primary_care_practitioner".to_string(),
                display: "Central Primary Care Practitioner".to_string(),
            },
        }
    }

    fn patient(care_team: Vec<CareTeamMembership>, lab_reports: Vec<LabReport>) -> PatientContext {
        PatientContext {
            key: key("90a8d1ea318041d9adb070a834d4e0f6"),
            care_team,
            lab_reports,
        }
    }

    fn change_for(report_id: i64) -> FieldChange {
        FieldChange {
            report_id: ReportId(report_id),
            model_name: Some("labreport".to_string()),
            created: false,
            fields: BTreeMap::new(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap()
    }

    fn rule() -> LabReportTriage {
        LabReportTriage::new(ProtocolConfig::canvas_defaults())
    }

    #[test]
    fn absent_field_change_record_is_not_applicable() {
        let patient = patient(
            vec![],
            vec![LabReport {
                report_id: ReportId(204),
                reviewers: vec![support_key()],
            }],
        );
        let mut updates: Vec<TaskCreate> = Vec::new();

        let result = rule().evaluate_at(&patient, None, now(), &mut updates);

        assert_eq!(result.status(), ProtocolStatus::NotApplicable);
        assert_eq!(
            result.narrative(),
            "Report not assigned to Canvas Support, no task created."
        );
        assert!(updates.is_empty());
    }

    #[test]
    fn unmatched_report_id_is_not_applicable() {
        let patient = patient(
            vec![],
            vec![LabReport {
                report_id: ReportId(204),
                reviewers: vec![support_key()],
            }],
        );
        let mut updates: Vec<TaskCreate> = Vec::new();

        let result = rule().evaluate_at(&patient, Some(&change_for(999)), now(), &mut updates);

        assert_eq!(result.status(), ProtocolStatus::NotApplicable);
        assert!(updates.is_empty());
    }

    #[test]
    fn report_without_support_reviewer_is_not_applicable() {
        let patient = patient(
            vec![practitioner_membership("c2ba0a1bb48a4accb8b50c96f2d1e823")],
            vec![LabReport {
                report_id: ReportId(204),
                reviewers: vec![key("81c01c7f5f3a4467b08a5e3ff9eb3bb6")],
            }],
        );
        let mut updates: Vec<TaskCreate> = Vec::new();

        let result = rule().evaluate_at(&patient, Some(&change_for(204)), now(), &mut updates);

        assert_eq!(result.status(), ProtocolStatus::NotApplicable);
        assert!(updates.is_empty());
    }

    #[test]
    fn support_routed_report_assigns_role_match() {
        let patient = patient(
            vec![
                CareTeamMembership {
                    staff_key: key("81c01c7f5f3a4467b08a5e3ff9eb3bb6"),
                    role: CareTeamRole {
                        code: "care_coordinator".to_string(),
                        display: "Care Coordinator".to_string(),
                    },
                },
                practitioner_membership("c2ba0a1bb48a4accb8b50c96f2d1e823"),
            ],
            vec![LabReport {
                report_id: ReportId(204),
                reviewers: vec![support_key()],
            }],
        );
        let mut updates: Vec<TaskCreate> = Vec::new();

        let result = rule().evaluate_at(&patient, Some(&change_for(204)), now(), &mut updates);

        assert_eq!(result.status(), ProtocolStatus::Satisfied);
        assert_eq!(result.narrative(), "Task created");
        assert_eq!(updates.len(), 1);
        assert_eq!(
            updates[0].assignee_key,
            key("c2ba0a1bb48a4accb8b50c96f2d1e823")
        );
    }

    #[test]
    fn no_role_match_assigns_fallback() {
        let patient = patient(
            vec![CareTeamMembership {
                staff_key: key("81c01c7f5f3a4467b08a5e3ff9eb3bb6"),
                role: CareTeamRole {
                    code: "care_coordinator".to_string(),
                    display: "Care Coordinator".to_string(),
                },
            }],
            vec![LabReport {
                report_id: ReportId(204),
                reviewers: vec![support_key()],
            }],
        );
        let mut updates: Vec<TaskCreate> = Vec::new();

        let result = rule().evaluate_at(&patient, Some(&change_for(204)), now(), &mut updates);

        assert_eq!(result.status(), ProtocolStatus::Satisfied);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].assignee_key, key(FALLBACK_STAFF_KEY));
    }

    #[test]
    fn role_code_without_display_assigns_fallback() {
        let mut membership = practitioner_membership("c2ba0a1bb48a4accb8b50c96f2d1e823");
        membership.role.display = "Primary Care Practitioner".to_string();

        let patient = patient(
            vec![membership],
            vec![LabReport {
                report_id: ReportId(204),
                reviewers: vec![support_key()],
            }],
        );
        let mut updates: Vec<TaskCreate> = Vec::new();

        rule().evaluate_at(&patient, Some(&change_for(204)), now(), &mut updates);

        assert_eq!(updates[0].assignee_key, key(FALLBACK_STAFF_KEY));
    }

    #[test]
    fn role_display_without_code_assigns_fallback() {
        let mut membership = practitioner_membership("c2ba0a1bb48a4accb8b50c96f2d1e823");
        membership.role.code = "primary_care_practitioner".to_string();

        let patient = patient(
            vec![membership],
            vec![LabReport {
                report_id: ReportId(204),
                reviewers: vec![support_key()],
            }],
        );
        let mut updates: Vec<TaskCreate> = Vec::new();

        rule().evaluate_at(&patient, Some(&change_for(204)), now(), &mut updates);

        assert_eq!(updates[0].assignee_key, key(FALLBACK_STAFF_KEY));
    }

    #[test]
    fn first_of_multiple_role_matches_wins() {
        let patient = patient(
            vec![
                practitioner_membership("c2ba0a1bb48a4accb8b50c96f2d1e823"),
                practitioner_membership("81c01c7f5f3a4467b08a5e3ff9eb3bb6"),
            ],
            vec![LabReport {
                report_id: ReportId(204),
                reviewers: vec![support_key()],
            }],
        );
        let mut updates: Vec<TaskCreate> = Vec::new();

        rule().evaluate_at(&patient, Some(&change_for(204)), now(), &mut updates);

        assert_eq!(
            updates[0].assignee_key,
            key("c2ba0a1bb48a4accb8b50c96f2d1e823")
        );
    }

    #[test]
    fn most_recent_matching_report_wins() {
        // Two rows share report id 204; the newer row is no longer routed to support.
        let patient = patient(
            vec![],
            vec![
                LabReport {
                    report_id: ReportId(204),
                    reviewers: vec![support_key()],
                },
                LabReport {
                    report_id: ReportId(204),
                    reviewers: vec![key("81c01c7f5f3a4467b08a5e3ff9eb3bb6")],
                },
            ],
        );
        let mut updates: Vec<TaskCreate> = Vec::new();

        let result = rule().evaluate_at(&patient, Some(&change_for(204)), now(), &mut updates);

        assert_eq!(result.status(), ProtocolStatus::NotApplicable);
        assert!(updates.is_empty());
    }

    #[test]
    fn task_carries_patient_bot_status_and_labels() {
        let patient = patient(
            vec![practitioner_membership("c2ba0a1bb48a4accb8b50c96f2d1e823")],
            vec![LabReport {
                report_id: ReportId(204),
                reviewers: vec![support_key()],
            }],
        );
        let mut updates: Vec<TaskCreate> = Vec::new();

        rule().evaluate_at(&patient, Some(&change_for(204)), now(), &mut updates);

        let task = &updates[0];
        assert_eq!(task.patient_key, key("90a8d1ea318041d9adb070a834d4e0f6"));
        assert_eq!(task.created_by_key, key(CANVAS_BOT_KEY));
        assert_eq!(task.status, TaskStatus::Open);
        assert_eq!(task.labels, vec!["Urgent".to_string()]);
    }

    #[test]
    fn task_title_embeds_report_id() {
        let patient = patient(
            vec![],
            vec![LabReport {
                report_id: ReportId(204),
                reviewers: vec![support_key()],
            }],
        );
        let mut updates: Vec<TaskCreate> = Vec::new();

        rule().evaluate_at(&patient, Some(&change_for(204)), now(), &mut updates);

        assert_eq!(
            updates[0].title,
            "Lab Report 204 assigned to Canvas Support."
        );
    }

    #[test]
    fn due_is_exactly_one_week_after_created() {
        let patient = patient(
            vec![],
            vec![LabReport {
                report_id: ReportId(204),
                reviewers: vec![support_key()],
            }],
        );
        let mut updates: Vec<TaskCreate> = Vec::new();

        rule().evaluate_at(&patient, Some(&change_for(204)), now(), &mut updates);

        let task = &updates[0];
        assert_eq!(task.created, now());
        assert_eq!(task.due - task.created, Duration::days(7));
    }

    #[test]
    fn at_most_one_task_per_evaluation() {
        // Several support-routed reports on file; only the changed one produces a task.
        let patient = patient(
            vec![],
            vec![
                LabReport {
                    report_id: ReportId(204),
                    reviewers: vec![support_key()],
                },
                LabReport {
                    report_id: ReportId(207),
                    reviewers: vec![support_key()],
                },
            ],
        );
        let mut updates: Vec<TaskCreate> = Vec::new();

        rule().evaluate_at(&patient, Some(&change_for(204)), now(), &mut updates);

        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].title, "Lab Report 204 assigned to Canvas Support.");
    }

    #[test]
    fn rendered_task_matches_update_channel_shape() {
        let patient = patient(
            vec![practitioner_membership("c2ba0a1bb48a4accb8b50c96f2d1e823")],
            vec![LabReport {
                report_id: ReportId(204),
                reviewers: vec![support_key()],
            }],
        );
        let mut updates: Vec<TaskCreate> = Vec::new();

        rule().evaluate_at(&patient, Some(&change_for(204)), now(), &mut updates);

        let value = canvas::Task::render_value(&updates[0]).expect("render task");
        assert_eq!(value["status"], "OPEN");
        assert_eq!(value["created_by_key"], CANVAS_BOT_KEY);
        assert_eq!(value["created"], "2026-08-07T12:00:00+00:00");
        assert_eq!(value["due"], "2026-08-14T12:00:00+00:00");
        assert_eq!(value["labels"], serde_json::json!(["Urgent"]));
    }

    #[test]
    fn meta_registers_lab_report_changes() {
        let meta = LabReportTriage::META;

        assert_eq!(meta.title, "Lab Report Task Creation");
        assert_eq!(meta.version, "1.0.1");
        assert_eq!(meta.compute_on_change_types, [ChangeType::LabReport]);
    }
}
