//! # Triage Core
//!
//! Core rule logic for the lab-triage protocol.
//!
//! This crate contains the decision function the host EHR platform calls back into when a
//! patient's lab report changes:
//! - Rule evaluation ([`LabReportTriage`]) with its satisfied / not-applicable result
//! - Immutable protocol configuration resolved once at startup
//! - The [`UpdateSink`] seam through which task payloads reach the host's update channel
//!
//! **No host concerns**: change detection, persistence, retries and delivery belong to the
//! host platform; wire models for its data shapes live in the `canvas` crate.

pub mod config;
pub mod constants;
pub mod error;
pub mod result;
pub mod rule;

pub use config::ProtocolConfig;
pub use error::{ProtocolError, TriageResult};
pub use result::{ProtocolResult, ProtocolStatus};
pub use rule::{LabReportTriage, ProtocolMeta, UpdateSink};
