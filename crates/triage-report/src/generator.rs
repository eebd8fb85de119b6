use std::future::Future;
use std::pin::Pin;

use triage_core::models::report::{AssessmentReport, ReportRequest};

use crate::error::ReportError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A source of assessment reports.
///
/// Methods return boxed futures for dyn compatibility.
pub trait ReportGenerator: Send + Sync {
    /// Short identifier used in logs (e.g. "bedrock", "fallback").
    fn name(&self) -> &str;

    fn generate<'a>(
        &'a self,
        request: &'a ReportRequest,
    ) -> BoxFuture<'a, Result<AssessmentReport, ReportError>>;
}

/// Display id stamped on every report, e.g. `HA-20261019143005`.
pub fn report_id(now: jiff::Timestamp) -> String {
    format!("HA-{}", now.strftime("%Y%m%d%H%M%S"))
}

/// Human-readable report date, e.g. `October 19, 2026`.
pub fn report_date(now: jiff::Timestamp) -> String {
    now.strftime("%B %d, %Y").to_string()
}
