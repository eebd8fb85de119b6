use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Structured input handed to the report generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub name: String,
    pub age: Option<u32>,
    pub biological_sex: Option<String>,
    pub symptoms: Vec<String>,
    /// Flattened gathered info and symptom details.
    pub answers: BTreeMap<String, serde_json::Value>,
}

impl ReportRequest {
    /// The first reported symptom, or a generic phrase when none was given.
    pub fn main_symptom(&self) -> &str {
        self.symptoms
            .first()
            .map(String::as_str)
            .unwrap_or("your symptoms")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Urgency {
    RequiresImmediateAttention,
    RequiresPromptAttention,
    RoutineCareRecommended,
    SelfCareAppropriate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PossibleCondition {
    pub name: String,
    /// Percentage estimate, 0 to 100.
    #[serde(default)]
    pub likelihood: Option<u8>,
    #[serde(default)]
    pub urgency: Option<Urgency>,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub supporting_symptoms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Specialist {
    pub name: String,
    pub description: String,
    pub relevance_score: u32,
}

/// The final health assessment report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentReport {
    #[serde(default)]
    pub report_id: String,
    #[serde(default)]
    pub report_date: String,
    pub summary: String,
    #[serde(default)]
    pub symptom_analysis: Vec<String>,
    #[serde(default)]
    pub possible_conditions: Vec<PossibleCondition>,
    #[serde(default)]
    pub warning_signs: Vec<String>,
    #[serde(default)]
    pub next_steps: String,
    #[serde(default)]
    pub self_care: Vec<String>,
    #[serde(default)]
    pub prevention: Vec<String>,
    #[serde(default)]
    pub specialists: Vec<Specialist>,
    #[serde(default)]
    pub generated_at: Option<jiff::Timestamp>,
}
