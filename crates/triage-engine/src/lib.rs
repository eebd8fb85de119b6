//! triage-engine
//!
//! The interview itself: adaptive symptom questioning, the table-driven
//! main flow, specialist ranking, session storage, and [`TriageService`]
//! which ties them to report generation.

pub mod dialogue;
pub mod error;
pub mod flow;
pub mod service;
pub mod specialists;
pub mod states;
pub mod store;

pub use error::EngineError;
pub use flow::QuestionFlowEngine;
pub use service::{QuickAssessmentRequest, TriageService};
pub use store::{MemorySessionStore, SessionStore};
