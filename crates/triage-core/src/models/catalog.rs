//! Knowledge-base records. Immutable once loaded.

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Symptom {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub name: String,
    #[serde(default)]
    pub primary_symptoms: Vec<String>,
    #[serde(default)]
    pub secondary_symptoms: Vec<String>,
    #[serde(default)]
    pub symptom_relationships: Vec<ConditionSymptomLink>,
}

impl Condition {
    /// Primary symptoms followed by secondary symptoms.
    pub fn all_symptoms(&self) -> impl Iterator<Item = &String> {
        self.primary_symptoms
            .iter()
            .chain(self.secondary_symptoms.iter())
    }
}

/// An explicit symptom annotation on a condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionSymptomLink {
    pub symptom: String,
    #[serde(default)]
    pub related: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomRelationship {
    #[serde(default)]
    pub primary_symptom: Option<String>,
    #[serde(default, deserialize_with = "optional_id_string")]
    pub primary_symptom_id: Option<String>,
    #[serde(default)]
    pub related_symptoms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyRegion {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// Knowledge-base ids appear as both strings and integers in the source documents.
fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    RawId::deserialize(deserializer).map(String::from)
}

fn optional_id_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(String::from))
}
