//! Report generation via the Bedrock Converse API.

use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{ContentBlock, ConversationRole, Message, SystemContentBlock};
use tracing::info;
use uuid::Uuid;

use triage_core::models::report::{AssessmentReport, ReportRequest};

use crate::error::ReportError;
use crate::generator::{report_date, report_id, BoxFuture, ReportGenerator};
use crate::normalize::normalize;
use crate::prompt::{build_report_prompt, extract_json_object, SYSTEM_PROMPT};

/// Generates reports with a Claude model on Bedrock.
#[derive(Debug, Clone)]
pub struct BedrockReportGenerator {
    client: Client,
    model_id: String,
}

impl BedrockReportGenerator {
    pub fn new(config: &aws_config::SdkConfig, model_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(config),
            model_id: model_id.into(),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate_report(
        &self,
        request: &ReportRequest,
    ) -> Result<AssessmentReport, ReportError> {
        let generation_id = Uuid::new_v4();
        let now = jiff::Timestamp::now();
        info!(
            generation_id = %generation_id,
            model = %self.model_id,
            symptoms = request.symptoms.len(),
            "starting report generation"
        );

        let user_message = build_report_prompt(request, &report_date(now));
        let response_text = self.invoke_converse(&user_message).await?;

        let mut report = parse_report(&response_text)?;
        report.report_id = report_id(now);
        report.report_date = report_date(now);
        report.generated_at = Some(now);
        normalize(&mut report);

        info!(
            generation_id = %generation_id,
            conditions = report.possible_conditions.len(),
            "report generation complete"
        );
        Ok(report)
    }

    /// Single-turn Converse call. Returns the concatenated response text.
    async fn invoke_converse(&self, user_message: &str) -> Result<String, ReportError> {
        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .system(SystemContentBlock::Text(SYSTEM_PROMPT.to_string()))
            .messages(
                Message::builder()
                    .role(ConversationRole::User)
                    .content(ContentBlock::Text(user_message.to_string()))
                    .build()
                    .map_err(|e| ReportError::Invocation(e.to_string()))?,
            )
            .send()
            .await
            .map_err(|e| ReportError::Invocation(e.into_service_error().to_string()))?;

        if let Some(usage) = response.usage() {
            info!(
                model = %self.model_id,
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "bedrock token usage"
            );
        }

        let output_message = response
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| ReportError::ResponseParse("no message in response".to_string()))?;

        let text = output_message
            .content()
            .iter()
            .filter_map(|block| {
                if let ContentBlock::Text(text) = block {
                    Some(text.as_str())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");

        Ok(text)
    }
}

impl ReportGenerator for BedrockReportGenerator {
    fn name(&self) -> &str {
        "bedrock"
    }

    fn generate<'a>(
        &'a self,
        request: &'a ReportRequest,
    ) -> BoxFuture<'a, Result<AssessmentReport, ReportError>> {
        Box::pin(self.generate_report(request))
    }
}

/// Parse a model reply into a report. Surrounding prose and code fences
/// are ignored; anything else that does not match the report shape is a
/// schema violation.
pub fn parse_report(response_text: &str) -> Result<AssessmentReport, ReportError> {
    let json = extract_json_object(response_text).ok_or_else(|| {
        ReportError::ResponseParse(format!("no JSON object in response: {response_text}"))
    })?;

    let report: AssessmentReport = serde_json::from_str(json).map_err(|e| {
        ReportError::SchemaViolation(format!(
            "failed to parse AssessmentReport: {e}. Response: {response_text}"
        ))
    })?;

    if report.summary.trim().is_empty() {
        return Err(ReportError::SchemaViolation("empty summary".to_string()));
    }
    Ok(report)
}
