//! triage-core
//!
//! Pure domain types for the triage interview: catalog records, question
//! flows, answers, prompts, session state and reports.
//! No I/O. This is the shared vocabulary of the triage system.

pub mod error;
pub mod models;
