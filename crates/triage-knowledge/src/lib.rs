//! triage-knowledge
//!
//! The symptom knowledge base. Pure data, loaded once at startup and shared
//! read-only. Holds the catalog documents (symptoms, conditions, question
//! flows, body regions, relationships) and the fixed lookup tables used to
//! tailor questions and rank specialists.

pub mod catalog;
pub mod characteristics;
pub mod error;
pub mod tables;

pub use catalog::{CatalogParts, SymptomCatalog};
