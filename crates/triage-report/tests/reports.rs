use std::collections::BTreeMap;

use triage_core::models::report::{PossibleCondition, ReportRequest, Urgency};
use triage_report::bedrock::parse_report;
use triage_report::error::ReportError;
use triage_report::fallback::fallback_report;
use triage_report::generator::{report_date, report_id};
use triage_report::normalize::{basic_prevention, normalize, DEFAULT_SELF_CARE, MAX_PREVENTION};
use triage_report::{FallbackReportGenerator, ReportGenerator};

fn request(symptoms: &[&str]) -> ReportRequest {
    ReportRequest {
        name: "Alex".to_string(),
        age: Some(40),
        biological_sex: Some("Male".to_string()),
        symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
        answers: BTreeMap::new(),
    }
}

fn condition(name: &str) -> PossibleCondition {
    PossibleCondition {
        name: name.to_string(),
        likelihood: None,
        urgency: None,
        explanation: String::new(),
        supporting_symptoms: Vec::new(),
    }
}

#[test]
fn fallback_report_is_templated_on_the_main_symptom() {
    let now: jiff::Timestamp = "2026-10-19T14:30:05Z".parse().unwrap();
    let report = fallback_report(&request(&["Cough", "Fever"]), now);

    assert!(report.summary.starts_with("Assessment for Alex: Based on your report of Cough,"));
    assert_eq!(report.report_id, "HA-20261019143005");
    assert_eq!(report.report_date, "October 19, 2026");
    assert_eq!(report.generated_at, Some(now));

    let likelihoods: Vec<Option<u8>> =
        report.possible_conditions.iter().map(|c| c.likelihood).collect();
    assert_eq!(likelihoods, vec![Some(60), Some(25), Some(15)]);
    assert_eq!(report.possible_conditions[0].name, "Common causes of Cough");
    assert_eq!(report.possible_conditions[0].urgency, Some(Urgency::RoutineCareRecommended));
    assert_eq!(report.possible_conditions[1].urgency, Some(Urgency::RequiresPromptAttention));
    assert_eq!(report.possible_conditions[2].urgency, Some(Urgency::SelfCareAppropriate));
    assert!(report.next_steps.contains("within the next 7 days"));
    assert_eq!(report.warning_signs.len(), 5);
}

#[test]
fn fallback_without_symptoms_uses_generic_phrase() {
    let report = fallback_report(&request(&[]), jiff::Timestamp::now());
    assert!(report.summary.contains("Based on your report of your symptoms"));
}

#[tokio::test]
async fn fallback_generator_never_fails() {
    let generator = FallbackReportGenerator;
    let report = generator.generate(&request(&["Rash"])).await.unwrap();
    assert_eq!(generator.name(), "fallback");
    assert_eq!(report.symptom_analysis.len(), 1);
}

#[test]
fn report_ids_and_dates_use_fixed_formats() {
    let now: jiff::Timestamp = "2026-01-02T03:04:05Z".parse().unwrap();
    assert_eq!(report_id(now), "HA-20260102030405");
    assert_eq!(report_date(now), "January 02, 2026");
}

#[test]
fn normalize_fills_only_empty_sections() {
    let mut report = fallback_report(&request(&["Cough"]), jiff::Timestamp::now());
    report.warning_signs = vec!["Coughing blood".to_string()];
    report.self_care.clear();
    report.prevention.clear();
    report.possible_conditions = vec![condition("Influenza (seasonal)")];

    normalize(&mut report);

    assert_eq!(report.warning_signs, vec!["Coughing blood".to_string()]);
    assert_eq!(report.self_care.len(), DEFAULT_SELF_CARE.len());
    assert_eq!(report.prevention.len(), MAX_PREVENTION);
    assert_eq!(report.prevention[5], "Consider annual flu vaccination");
}

#[test]
fn prevention_is_deduplicated_ignoring_case_and_capped() {
    let prevention = basic_prevention(&[condition("migraine"), condition("Insomnia")]);
    assert_eq!(prevention.len(), MAX_PREVENTION);
    assert_eq!(prevention[5], "Identify and avoid personal triggers");

    let baseline = basic_prevention(&[]);
    assert_eq!(baseline.len(), 5);
}

#[test]
fn parse_report_accepts_fenced_json() {
    let reply = r#"```json
{
  "summary": "Assessment for Alex: likely a cold.",
  "symptom_analysis": ["Cough: 2 days, mild, intermittent"],
  "possible_conditions": [
    {"name": "Common Cold", "likelihood": 70, "urgency": "self_care_appropriate",
     "explanation": "Typical upper airway symptoms.", "supporting_symptoms": ["Cough"]}
  ],
  "next_steps": "Rest and review within 1 week."
}
```"#;
    let report = parse_report(reply).unwrap();
    assert_eq!(report.possible_conditions[0].likelihood, Some(70));
    assert_eq!(
        report.possible_conditions[0].urgency,
        Some(Urgency::SelfCareAppropriate)
    );
    assert!(report.warning_signs.is_empty());
}

#[test]
fn parse_report_rejects_unusable_output() {
    assert!(matches!(
        parse_report("I cannot help with that."),
        Err(ReportError::ResponseParse(_))
    ));
    assert!(matches!(
        parse_report(r#"{"summary": 42}"#),
        Err(ReportError::SchemaViolation(_))
    ));
    assert!(matches!(
        parse_report(r#"{"summary": "  "}"#),
        Err(ReportError::SchemaViolation(_))
    ));
}
