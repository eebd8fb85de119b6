use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::answer::Answer;
use super::question::Question;
use crate::error::CoreError;

/// States of the main interview.
///
/// `SymptomAssessment` is the single state occupied for the whole
/// symptom-specific sub-interview. Names that do not match a known state
/// (a corrupted or outdated stored session) deserialize as `Unrecognized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    Introduction,
    Name,
    Age,
    BiologicalSex,
    Pregnancy,
    HeightWeight,
    MedicalHistoryIntro,
    MedicalHistoryConditions,
    MedicalHistoryOther,
    Medications,
    MedicationsList,
    Allergies,
    AllergiesList,
    FamilyHistory,
    FamilyHistoryDetails,
    LifestyleSmoking,
    LifestyleAlcohol,
    LifestyleExercise,
    LifestyleDiet,
    LifestyleStress,
    LifestyleSleep,
    SymptomEntry,
    SymptomAssessment,
    AdditionalSymptoms,
    OtherSymptoms,
    SymptomImpact,
    PreviousTreatment,
    Results,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    #[default]
    Main,
    SymptomSpecific,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub role: Role,
    pub content: String,
    pub timestamp: jiff::Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicalHistory {
    pub conditions: Option<Answer>,
    pub other_condition: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lifestyle {
    pub smoking: Option<String>,
    pub alcohol: Option<String>,
    pub exercise: Option<String>,
    pub diet: Option<String>,
    pub stress: Option<String>,
    pub sleep: Option<String>,
}

/// Demographics, history and lifestyle collected on the main flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatheredInfo {
    pub assessment_date: jiff::Timestamp,
    pub name: Option<String>,
    pub age: Option<u32>,
    pub biological_sex: Option<String>,
    pub pregnancy_status: Option<String>,
    pub height_weight: Option<String>,
    pub medical_history: MedicalHistory,
    pub medications: Option<String>,
    pub allergies: Option<String>,
    pub family_history: Option<Answer>,
    pub lifestyle: Lifestyle,
}

impl GatheredInfo {
    pub fn new(assessment_date: jiff::Timestamp) -> Self {
        Self {
            assessment_date,
            name: None,
            age: None,
            biological_sex: None,
            pregnancy_status: None,
            height_weight: None,
            medical_history: MedicalHistory::default(),
            medications: None,
            allergies: None,
            family_history: None,
            lifestyle: Lifestyle::default(),
        }
    }

    /// Flatten into `key -> value` pairs, nested sections prefixed by their name.
    pub fn flatten(&self) -> BTreeMap<String, serde_json::Value> {
        use serde_json::Value;

        let mut out = BTreeMap::new();
        let mut put = |key: &str, value: Option<Value>| {
            if let Some(value) = value {
                out.insert(key.to_string(), value);
            }
        };
        let text = |v: &Option<String>| v.as_ref().map(|s| Value::String(s.clone()));
        let answer = |v: &Option<Answer>| v.as_ref().map(Value::from);

        put(
            "assessment_date",
            Some(Value::String(self.assessment_date.to_string())),
        );
        put("name", text(&self.name));
        put("age", self.age.map(Value::from));
        put("biological_sex", text(&self.biological_sex));
        put("pregnancy_status", text(&self.pregnancy_status));
        put("height_weight", text(&self.height_weight));
        put(
            "medical_history_conditions",
            answer(&self.medical_history.conditions),
        );
        put(
            "medical_history_other_condition",
            text(&self.medical_history.other_condition),
        );
        put("medications", text(&self.medications));
        put("allergies", text(&self.allergies));
        put("family_history", answer(&self.family_history));
        put("lifestyle_smoking", text(&self.lifestyle.smoking));
        put("lifestyle_alcohol", text(&self.lifestyle.alcohol));
        put("lifestyle_exercise", text(&self.lifestyle.exercise));
        put("lifestyle_diet", text(&self.lifestyle.diet));
        put("lifestyle_stress", text(&self.lifestyle.stress));
        put("lifestyle_sleep", text(&self.lifestyle.sleep));
        out
    }
}

/// Repetition guard for one sub-interview.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AskedQuestions {
    pub last: Option<Question>,
    pub ids: BTreeSet<String>,
    pub texts: BTreeSet<String>,
}

impl AskedQuestions {
    pub fn reset(&mut self) {
        self.last = None;
        self.ids.clear();
        self.texts.clear();
    }

    pub fn mark(&mut self, question: &Question) {
        self.ids.insert(question.id.clone());
        self.texts.insert(question.text.clone());
        self.last = Some(question.clone());
    }

    pub fn is_repeated(&self, question: &Question) -> bool {
        if self.ids.contains(&question.id) || self.texts.contains(&question.text) {
            return true;
        }
        self.last
            .as_ref()
            .is_some_and(|last| last.id == question.id || last.text == question.text)
    }
}

/// Per-conversation interview state. Mutated exactly once per submitted answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueSession {
    pub id: Uuid,
    pub created_at: jiff::Timestamp,
    pub current_state: DialogueState,
    /// Append-only stack of visited states, used for backtracking.
    pub state_history: Vec<DialogueState>,
    pub current_flow: Flow,
    /// Lower-cased primary symptom while a sub-interview is active.
    pub symptom_specific_flow: Option<String>,
    pub current_question: Option<Question>,
    pub last_question_text: Option<String>,
    pub gathered_info: GatheredInfo,
    /// Reported symptoms in order. Not deduplicated.
    pub symptoms: Vec<String>,
    /// Sub-interview answers keyed by question id.
    pub symptom_details: BTreeMap<String, Answer>,
    pub conversation_history: Vec<ConversationEntry>,
    pub progress: u8,
    pub asked: AskedQuestions,
}

impl DialogueSession {
    pub fn new() -> Self {
        let now = jiff::Timestamp::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            current_state: DialogueState::Introduction,
            state_history: vec![DialogueState::Introduction],
            current_flow: Flow::Main,
            symptom_specific_flow: None,
            current_question: None,
            last_question_text: None,
            gathered_info: GatheredInfo::new(now),
            symptoms: Vec::new(),
            symptom_details: BTreeMap::new(),
            conversation_history: Vec::new(),
            progress: 0,
            asked: AskedQuestions::default(),
        }
    }

    pub fn record(&mut self, role: Role, content: impl Into<String>) {
        self.conversation_history.push(ConversationEntry {
            role,
            content: content.into(),
            timestamp: jiff::Timestamp::now(),
        });
    }

    /// The symptom that drives the sub-interview and specialist ranking.
    pub fn primary_symptom(&self) -> Option<&str> {
        self.symptom_specific_flow
            .as_deref()
            .or_else(|| self.symptoms.first().map(String::as_str))
    }

    pub fn in_sub_interview(&self) -> bool {
        self.current_flow == Flow::SymptomSpecific && self.symptom_specific_flow.is_some()
    }

    /// Gathered info overlaid with symptom details; details win on collision.
    pub fn answers(&self) -> BTreeMap<String, serde_json::Value> {
        let mut answers = self.gathered_info.flatten();
        for (key, answer) in &self.symptom_details {
            answers.insert(key.clone(), serde_json::Value::from(answer));
        }
        answers
    }
}

impl Default for DialogueSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a client-supplied session id.
pub fn parse_session_id(raw: &str) -> Result<Uuid, CoreError> {
    Ok(Uuid::parse_str(raw.trim())?)
}
