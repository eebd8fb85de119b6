use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::answer::Answer;

/// How the client should collect an answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum InputType {
    #[default]
    Options,
    Text,
    Number,
    SymptomSearch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub input_type: InputType,
    #[serde(default)]
    pub multiple_select: bool,
}

impl Question {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            options: None,
            input_type: InputType::Options,
            multiple_select: false,
        }
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn multiple(mut self) -> Self {
        self.multiple_select = true;
        self
    }
}

/// A predefined branching question graph for one symptom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionFlow {
    pub symptom_name: String,
    pub first_question: Question,
    /// Keyed by the id of the question whose answer the rule inspects.
    #[serde(default)]
    pub follow_up_questions: BTreeMap<String, BranchRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchRule {
    #[serde(default)]
    pub condition: Option<BranchCondition>,
    pub next_question: Question,
}

impl BranchRule {
    /// Unconditional rules always fire.
    pub fn fires_on(&self, answer: &Answer) -> bool {
        self.condition
            .as_ref()
            .is_none_or(|condition| condition.is_met(answer))
    }
}

/// Edge condition on the recorded answer, matching the document shapes
/// `{"answer": ..}`, `{"answers": [..]}`, `{"contains": ..}`, `{"not_contains": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchCondition {
    Answer(String),
    Answers(Vec<String>),
    Contains(String),
    NotContains(String),
}

impl BranchCondition {
    pub fn is_met(&self, answer: &Answer) -> bool {
        match self {
            BranchCondition::Answer(expected) => answer.is(expected),
            BranchCondition::Answers(allowed) => answer
                .as_text()
                .is_some_and(|text| allowed.iter().any(|a| a == text)),
            BranchCondition::Contains(needle) => contains_lower(answer, needle),
            BranchCondition::NotContains(needle) => !contains_lower(answer, needle),
        }
    }
}

/// Substring conditions only apply to text answers.
fn contains_lower(answer: &Answer, needle: &str) -> bool {
    answer
        .as_text()
        .is_some_and(|text| text.to_lowercase().contains(&needle.to_lowercase()))
}
