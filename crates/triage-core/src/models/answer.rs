use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// A single user answer: free text or a multi-select list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum Answer {
    Text(String),
    Choices(Vec<String>),
}

impl Answer {
    /// The answer as text, or `None` for a multi-select list.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Answer::Text(text) => Some(text),
            Answer::Choices(_) => None,
        }
    }

    /// Exact, case-sensitive equality against a text answer.
    pub fn is(&self, value: &str) -> bool {
        self.as_text() == Some(value)
    }

    /// Case-insensitive equality, ignoring surrounding whitespace on both sides.
    pub fn is_ignore_case(&self, value: &str) -> bool {
        self.as_text()
            .is_some_and(|text| text.trim().eq_ignore_ascii_case(value.trim()))
    }

    /// True when a list contains `needle`, or a text answer contains it as a substring.
    pub fn mentions(&self, needle: &str) -> bool {
        match self {
            Answer::Text(text) => text.contains(needle),
            Answer::Choices(items) => items.iter().any(|item| item == needle),
        }
    }

    /// Split into individual items. Text answers are comma-separated.
    pub fn items(&self) -> Vec<String> {
        match self {
            Answer::Text(text) => text
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
            Answer::Choices(items) => items.clone(),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Text(text) => f.write_str(text),
            Answer::Choices(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Answer::Text(value.to_string())
    }
}

impl From<String> for Answer {
    fn from(value: String) -> Self {
        Answer::Text(value)
    }
}

impl From<Vec<String>> for Answer {
    fn from(value: Vec<String>) -> Self {
        Answer::Choices(value)
    }
}

impl TryFrom<serde_json::Value> for Answer {
    type Error = CoreError;

    /// Accepts strings, string arrays, and scalar numbers/booleans (stringified).
    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value;

        match value {
            Value::String(text) => Ok(Answer::Text(text)),
            Value::Number(n) => Ok(Answer::Text(n.to_string())),
            Value::Bool(b) => Ok(Answer::Text(b.to_string())),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(text) => Ok(text),
                    Value::Number(n) => Ok(n.to_string()),
                    other => Err(CoreError::InvalidAnswer(format!(
                        "unsupported list item: {other}"
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Answer::Choices),
            Value::Null => Err(CoreError::InvalidAnswer("missing input".to_string())),
            Value::Object(_) => Err(CoreError::InvalidAnswer(
                "objects are not valid answers".to_string(),
            )),
        }
    }
}

impl From<&Answer> for serde_json::Value {
    fn from(answer: &Answer) -> Self {
        match answer {
            Answer::Text(text) => serde_json::Value::String(text.clone()),
            Answer::Choices(items) => {
                serde_json::Value::Array(items.iter().cloned().map(Self::String).collect())
            }
        }
    }
}
