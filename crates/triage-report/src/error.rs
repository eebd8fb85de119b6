use std::time::Duration;

use thiserror::Error;

/// Why a generator could not produce a report. Callers substitute the
/// fallback report for any of these.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("report did not match the expected shape: {0}")]
    SchemaViolation(String),

    #[error("report generation timed out after {0:?}")]
    Timeout(Duration),
}
