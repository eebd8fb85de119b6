use std::collections::BTreeMap;

use serde_json::json;

use triage_core::models::report::ReportRequest;
use triage_report::prompt::{build_report_prompt, extract_json_object};

fn request() -> ReportRequest {
    let mut answers = BTreeMap::new();
    answers.insert("name".to_string(), json!("Sam"));
    answers.insert("duration".to_string(), json!("1-3 days"));
    answers.insert("triggers".to_string(), json!(["Stress", "Bright lights"]));
    answers.insert("medical_history_conditions".to_string(), json!(["Asthma"]));
    answers.insert("medications".to_string(), json!("Ibuprofen"));
    answers.insert("lifestyle_smoking".to_string(), json!("Never smoked"));

    ReportRequest {
        name: "Sam".to_string(),
        age: Some(34),
        biological_sex: Some("Female".to_string()),
        symptoms: vec!["Headache".to_string(), "Nausea".to_string()],
        answers,
    }
}

#[test]
fn prompt_has_patient_header() {
    let prompt = build_report_prompt(&request(), "October 19, 2026");
    assert!(prompt.starts_with("PATIENT: Sam, 34 years old, Female\n"));
    assert!(prompt.contains("DATE: October 19, 2026"));
    assert!(prompt.contains("SYMPTOMS: Headache, Nausea"));
}

#[test]
fn answers_are_grouped_by_section() {
    let prompt = build_report_prompt(&request(), "today");

    let details = prompt.find("SYMPTOM DETAILS:").unwrap();
    let history = prompt.find("MEDICAL HISTORY:").unwrap();
    let meds = prompt.find("MEDICATIONS AND ALLERGIES:").unwrap();
    let lifestyle = prompt.find("LIFESTYLE FACTORS:").unwrap();
    assert!(details < history && history < meds && meds < lifestyle);

    assert!(prompt[details..history].contains("- duration: 1-3 days"));
    assert!(prompt[details..history].contains("- triggers: Stress, Bright lights"));
    assert!(prompt[history..meds].contains("- conditions: Asthma"));
    assert!(prompt[meds..lifestyle].contains("- medications: Ibuprofen"));
    assert!(prompt[lifestyle..].contains("- smoking: Never smoked"));
    assert!(!prompt.contains("- name:"));
}

#[test]
fn empty_sections_get_placeholders() {
    let request = ReportRequest {
        name: "Anonymous".to_string(),
        age: None,
        biological_sex: None,
        symptoms: Vec::new(),
        answers: BTreeMap::new(),
    };
    let prompt = build_report_prompt(&request, "today");
    assert!(prompt.contains("SYMPTOMS: None reported"));
    assert!(prompt.contains("SYMPTOM DETAILS:\nNo additional details"));
    assert!(prompt.contains("MEDICAL HISTORY:\nNone reported"));
}

#[test]
fn json_object_is_found_inside_code_fences() {
    let reply = "Here you go:\n```json\n{\"summary\": \"x\"}\n```\n";
    assert_eq!(extract_json_object(reply), Some("{\"summary\": \"x\"}"));
    assert_eq!(extract_json_object("no json here"), None);
    assert_eq!(extract_json_object("} backwards {"), None);
}
