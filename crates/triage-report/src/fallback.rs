//! Deterministic report used when generation is unavailable or fails.

use triage_core::models::report::{AssessmentReport, PossibleCondition, ReportRequest, Urgency};

use crate::error::ReportError;
use crate::generator::{report_date, report_id, BoxFuture, ReportGenerator};
use crate::normalize::{to_strings, DEFAULT_WARNING_SIGNS};

const SELF_CARE: &[&str] = &[
    "Rest as needed and avoid strenuous activities until symptoms improve",
    "Stay hydrated by drinking water, herbal tea, or clear broths",
    "Take over-the-counter pain relievers like acetaminophen or ibuprofen as directed for pain or fever",
    "Use a cool compress if experiencing localized pain or inflammation",
    "Monitor your symptoms and keep a log of any changes",
];

const PREVENTION: &[&str] = &[
    "Wash hands frequently with soap and water for at least 20 seconds",
    "Maintain a balanced diet rich in fruits, vegetables, and whole grains",
    "Stay physically active with regular exercise appropriate to your condition",
    "Manage stress through relaxation techniques, meditation, or deep breathing",
    "Get adequate sleep on a regular schedule",
];

const NEXT_STEPS: &str = "Schedule an appointment with your primary care physician \
within the next 7 days to discuss your symptoms. If your symptoms worsen significantly \
before your appointment, consider seeking urgent care services.";

/// Build the templated report. Never fails.
pub fn fallback_report(request: &ReportRequest, now: jiff::Timestamp) -> AssessmentReport {
    let main = request.main_symptom();
    let supporting = vec![main.to_string()];

    let condition = |name: String, likelihood, urgency, explanation: &str| PossibleCondition {
        name,
        likelihood: Some(likelihood),
        urgency: Some(urgency),
        explanation: explanation.to_string(),
        supporting_symptoms: supporting.clone(),
    };

    AssessmentReport {
        report_id: report_id(now),
        report_date: report_date(now),
        summary: format!(
            "Assessment for {}: Based on your report of {main}, we recommend consulting \
             with a healthcare professional for a proper diagnosis. Your symptoms could be \
             related to several possible conditions that require professional evaluation.",
            request.name
        ),
        symptom_analysis: vec![format!(
            "{main}: Duration unknown, Severity unknown, Pattern unknown"
        )],
        possible_conditions: vec![
            condition(
                format!("Common causes of {main}"),
                60,
                Urgency::RoutineCareRecommended,
                "Several common conditions can cause these symptoms. A healthcare provider \
                 can perform the necessary examination and tests to determine the specific cause.",
            ),
            condition(
                "Inflammatory conditions".to_string(),
                25,
                Urgency::RequiresPromptAttention,
                "Some inflammatory conditions can present with these symptoms and may \
                 require specific treatment approaches.",
            ),
            condition(
                "Temporary viral or bacterial infection".to_string(),
                15,
                Urgency::SelfCareAppropriate,
                "Many infections can cause similar symptoms and typically resolve with \
                 appropriate treatment and rest.",
            ),
        ],
        warning_signs: to_strings(DEFAULT_WARNING_SIGNS),
        next_steps: NEXT_STEPS.to_string(),
        self_care: to_strings(SELF_CARE),
        prevention: to_strings(PREVENTION),
        specialists: Vec::new(),
        generated_at: Some(now),
    }
}

/// Always-available generator backed by [`fallback_report`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackReportGenerator;

impl ReportGenerator for FallbackReportGenerator {
    fn name(&self) -> &str {
        "fallback"
    }

    fn generate<'a>(
        &'a self,
        request: &'a ReportRequest,
    ) -> BoxFuture<'a, Result<AssessmentReport, ReportError>> {
        Box::pin(async move { Ok(fallback_report(request, jiff::Timestamp::now())) })
    }
}
