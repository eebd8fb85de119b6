//! Prompt assembly for report generation.

use serde_json::Value;

use triage_core::models::report::ReportRequest;

pub const SYSTEM_PROMPT: &str = "\
You are an expert medical assistant writing a structured health assessment \
report from a triage interview. You do not diagnose; you summarise and suggest \
possible explanations for a clinician to confirm.

Respond with a single JSON object and nothing else, using exactly these fields:
{
  \"summary\": string, beginning with \"Assessment for <patient name>:\" followed by 3-4 sentences,
  \"symptom_analysis\": [string] formatted \"Symptom: Duration, Severity, Pattern, Associated factors\",
  \"possible_conditions\": [{
    \"name\": string,
    \"likelihood\": integer percentage 0-100,
    \"urgency\": one of \"requires_immediate_attention\", \"requires_prompt_attention\", \"routine_care_recommended\", \"self_care_appropriate\",
    \"explanation\": one sentence,
    \"supporting_symptoms\": [string]
  }] with 3-5 entries ordered by likelihood,
  \"warning_signs\": [string] with 4-6 entries,
  \"next_steps\": string with concrete timeframes,
  \"self_care\": [string] with 4-6 entries,
  \"prevention\": [string] with 4-6 entries
}

Use plain, direct language and avoid medical jargon. Do not use markdown.";

/// Keys describing the patient rather than the complaint.
const PATIENT_KEYS: &[&str] = &["name", "age", "biological_sex"];

/// Build the user message: patient header followed by the answers grouped
/// into sections.
pub fn build_report_prompt(request: &ReportRequest, date: &str) -> String {
    let mut symptom_details = Vec::new();
    let mut medical_history = Vec::new();
    let mut medications = Vec::new();
    let mut lifestyle = Vec::new();

    for (key, value) in &request.answers {
        if PATIENT_KEYS.contains(&key.as_str()) {
            continue;
        }
        let value = display_value(value);
        if let Some(rest) = key.strip_prefix("medical_history_") {
            medical_history.push(format!("- {rest}: {value}"));
        } else if let Some(rest) = key.strip_prefix("lifestyle_") {
            lifestyle.push(format!("- {rest}: {value}"));
        } else if key == "medications" || key == "allergies" {
            medications.push(format!("- {key}: {value}"));
        } else {
            symptom_details.push(format!("- {key}: {value}"));
        }
    }

    let age = request
        .age
        .map(|age| format!("{age} years old"))
        .unwrap_or_else(|| "age not given".to_string());
    let sex = request.biological_sex.as_deref().unwrap_or("sex not given");
    let symptoms = if request.symptoms.is_empty() {
        "None reported".to_string()
    } else {
        request.symptoms.join(", ")
    };

    format!(
        "PATIENT: {name}, {age}, {sex}\n\
         DATE: {date}\n\
         SYMPTOMS: {symptoms}\n\
         \n\
         SYMPTOM DETAILS:\n{details}\n\
         \n\
         MEDICAL HISTORY:\n{history}\n\
         \n\
         MEDICATIONS AND ALLERGIES:\n{meds}\n\
         \n\
         LIFESTYLE FACTORS:\n{lifestyle}\n",
        name = request.name,
        details = section(&symptom_details, "No additional details"),
        history = section(&medical_history, "None reported"),
        meds = section(&medications, "None reported"),
        lifestyle = section(&lifestyle, "None reported"),
    )
}

fn section(lines: &[String], empty: &str) -> String {
    if lines.is_empty() {
        empty.to_string()
    } else {
        lines.join("\n")
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null => "not given".to_string(),
        other => other.to_string(),
    }
}

/// Pull the JSON object out of a model reply, tolerating surrounding prose
/// and markdown code fences.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}
