//! Fill report sections the generator left empty.

use std::collections::HashSet;

use triage_core::models::report::{AssessmentReport, PossibleCondition};

pub const MAX_PREVENTION: usize = 6;

pub const DEFAULT_WARNING_SIGNS: &[&str] = &[
    "Severe or worsening symptoms that interfere with daily activities",
    "Difficulty breathing or shortness of breath",
    "High fever (above 101.5°F or 38.6°C) that persists for more than 24 hours",
    "Severe pain that is not relieved by over-the-counter medications",
    "New confusion or inability to stay alert",
];

pub const DEFAULT_SELF_CARE: &[&str] = &[
    "Rest as needed and avoid strenuous activities until symptoms improve",
    "Stay hydrated by drinking water, herbal tea, or clear broths",
    "Take over-the-counter pain relievers as directed for pain or fever",
    "Use a cool compress if experiencing localized pain or inflammation",
    "Monitor your symptoms and keep a log of any changes",
];

const BASELINE_PREVENTION: &[&str] = &[
    "Maintain a balanced diet rich in fruits, vegetables, and whole grains",
    "Stay hydrated by drinking adequate water throughout the day",
    "Get regular physical activity appropriate for your condition",
    "Ensure adequate sleep (7-9 hours for most adults)",
    "Manage stress through relaxation techniques or mindfulness practices",
];

const PREVENTION_BY_CONDITION: &[(&str, &[&str])] = &[
    ("Common Cold", &["Wash hands frequently", "Avoid close contact with sick individuals", "Disinfect frequently touched surfaces"]),
    ("Influenza", &["Consider annual flu vaccination", "Practice good respiratory hygiene", "Avoid crowded places during flu season"]),
    ("Migraine", &["Identify and avoid personal triggers", "Maintain a regular sleep schedule", "Stay hydrated"]),
    ("Hypertension", &["Limit sodium intake", "Maintain a healthy weight", "Limit alcohol consumption"]),
    ("Gastroenteritis", &["Practice proper food handling and storage", "Wash hands thoroughly before meals", "Avoid undercooked foods"]),
    ("Anxiety", &["Practice regular relaxation techniques", "Limit caffeine and alcohol", "Maintain social connections"]),
    ("Depression", &["Stay physically active", "Maintain social connections", "Establish a regular daily routine"]),
    ("Asthma", &["Avoid known triggers", "Take medications as prescribed", "Create an asthma action plan"]),
    ("Allergic Rhinitis", &["Monitor pollen counts", "Keep windows closed during high pollen seasons", "Use air purifiers"]),
    ("Upper Respiratory Infection", &["Rest adequately", "Use a humidifier", "Avoid smoking and secondhand smoke"]),
    ("Bronchitis", &["Avoid irritants like smoke", "Use a humidifier", "Stay up to date on vaccinations"]),
    ("Sinusitis", &["Use a saline nasal spray", "Apply warm compresses to the face", "Sleep with your head elevated"]),
    ("Gastritis", &["Eat smaller, more frequent meals", "Avoid spicy or acidic foods", "Limit alcohol consumption"]),
    ("Tension Headache", &["Practice good posture", "Take regular breaks from screens", "Use stress management techniques"]),
    ("Insomnia", &["Maintain a regular sleep schedule", "Create a restful sleep environment", "Avoid screens before bedtime"]),
];

/// Fill empty warning-sign, self-care and prevention sections.
pub fn normalize(report: &mut AssessmentReport) {
    if report.warning_signs.is_empty() {
        report.warning_signs = to_strings(DEFAULT_WARNING_SIGNS);
    }
    if report.self_care.is_empty() {
        report.self_care = to_strings(DEFAULT_SELF_CARE);
    }
    if report.prevention.is_empty() {
        report.prevention = basic_prevention(&report.possible_conditions);
    }
}

/// Baseline measures plus those for the first known condition each
/// reported condition mentions, deduplicated ignoring case.
pub fn basic_prevention(conditions: &[PossibleCondition]) -> Vec<String> {
    let mut measures: Vec<&str> = BASELINE_PREVENTION.to_vec();
    for condition in conditions {
        let name = condition.name.to_lowercase();
        if let Some((_, extra)) = PREVENTION_BY_CONDITION
            .iter()
            .find(|(known, _)| name.contains(&known.to_lowercase()))
        {
            measures.extend_from_slice(extra);
        }
    }

    let mut seen = HashSet::new();
    measures
        .into_iter()
        .filter(|measure| seen.insert(measure.to_lowercase()))
        .take(MAX_PREVENTION)
        .map(str::to_string)
        .collect()
}

pub(crate) fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
