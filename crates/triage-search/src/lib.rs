//! triage-search
//!
//! Lexical and fuzzy symptom matching over the knowledge base: tiered
//! search, name resolution, and best-key lookup into the static tables.

pub mod matcher;
pub mod similarity;

pub use matcher::SymptomMatcher;
pub use similarity::{normalize, similarity};
