//! Keyword-based classification of free-text symptoms.

use crate::tables::{ACUTE_DURATIONS, CHRONIC_DURATIONS, COMMON_PATTERNS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymptomType {
    Pain,
    Skin,
    Neurological,
    Respiratory,
    Gastrointestinal,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chronicity {
    Acute,
    Chronic,
}

/// Checked in order; the first matching rule wins.
const TYPE_RULES: &[(SymptomType, &[&str])] = &[
    (SymptomType::Pain, &["pain", "ache", "sore", "hurt"]),
    (SymptomType::Skin, &["rash", "itch", "bump", "spot"]),
    (SymptomType::Neurological, &["dizz", "vertigo", "lightheaded"]),
    (SymptomType::Respiratory, &["cough", "breath", "wheez"]),
    (
        SymptomType::Gastrointestinal,
        &["nausea", "vomit", "diarrhea", "constipation"],
    ),
];

const CHRONIC_KEYWORDS: &[&str] = &["chronic", "recurring", "persistent"];

/// What a symptom text tells us before any question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Characteristics {
    pub symptom_type: SymptomType,
    pub chronicity: Chronicity,
}

impl Characteristics {
    pub fn infer(symptom: &str) -> Self {
        let text = symptom.to_lowercase();
        let has_any = |keywords: &[&str]| keywords.iter().any(|k| text.contains(k));

        let symptom_type = TYPE_RULES
            .iter()
            .find(|(_, keywords)| has_any(*keywords))
            .map(|(kind, _)| *kind)
            .unwrap_or(SymptomType::General);

        let chronicity = if has_any(CHRONIC_KEYWORDS) {
            Chronicity::Chronic
        } else {
            Chronicity::Acute
        };

        Self {
            symptom_type,
            chronicity,
        }
    }

    pub fn duration_options(&self) -> &'static [&'static str] {
        match self.chronicity {
            Chronicity::Acute => ACUTE_DURATIONS,
            Chronicity::Chronic => CHRONIC_DURATIONS,
        }
    }

    /// Common pattern choices plus the ones specific to the symptom type.
    pub fn pattern_options(&self) -> Vec<String> {
        let extra: &[&str] = match self.symptom_type {
            SymptomType::Pain => &["Sharp and sudden", "Dull and persistent"],
            SymptomType::Respiratory => &["Worse when lying down", "Worse with exertion"],
            SymptomType::Gastrointestinal => &["Related to meals", "Worse on empty stomach"],
            SymptomType::Skin => &["Spreading to new areas", "Changing appearance"],
            SymptomType::Neurological | SymptomType::General => {
                &["Only occurs under specific circumstances"]
            }
        };
        COMMON_PATTERNS
            .iter()
            .chain(extra)
            .map(|s| s.to_string())
            .collect()
    }
}
