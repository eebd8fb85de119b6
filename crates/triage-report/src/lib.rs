//! triage-report
//!
//! Turns the answers gathered during an interview into a structured
//! assessment report: Bedrock Converse generation, output normalisation,
//! and a deterministic fallback that is always available.

pub mod bedrock;
pub mod error;
pub mod fallback;
pub mod generator;
pub mod normalize;
pub mod prompt;

pub use bedrock::BedrockReportGenerator;
pub use fallback::FallbackReportGenerator;
pub use generator::{BoxFuture, ReportGenerator};
