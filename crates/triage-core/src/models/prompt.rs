use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::question::{InputType, Question};
use super::report::AssessmentReport;

/// Explanatory popover attached to a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InfoButton {
    pub title: String,
    pub content: String,
}

/// The next thing the assistant asks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Prompt {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputType>,
    #[serde(default)]
    pub multiple_select: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_button: Option<InfoButton>,
    pub progress: u8,
}

impl Prompt {
    pub fn new(message: impl Into<String>, progress: u8) -> Self {
        Self {
            message: message.into(),
            options: None,
            input_type: None,
            multiple_select: false,
            placeholder: None,
            info_button: None,
            progress,
        }
    }

    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn input(mut self, input_type: InputType) -> Self {
        self.input_type = Some(input_type);
        self
    }

    pub fn multiple(mut self) -> Self {
        self.multiple_select = true;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn info(mut self, title: impl Into<String>, content: impl Into<String>) -> Self {
        self.info_button = Some(InfoButton {
            title: title.into(),
            content: content.into(),
        });
        self
    }

    /// Render a flow question as a prompt.
    pub fn from_question(question: &Question, progress: u8) -> Self {
        Self {
            message: question.text.clone(),
            options: question.options.clone(),
            input_type: Some(question.input_type),
            multiple_select: question.multiple_select,
            placeholder: None,
            info_button: None,
            progress,
        }
    }
}

/// Result of a submitted answer: another prompt, or the final report.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum Reply {
    Prompt(Prompt),
    Report {
        message: String,
        report: AssessmentReport,
        progress: u8,
        show_start_new: bool,
    },
}

impl Reply {
    pub fn message(&self) -> &str {
        match self {
            Reply::Prompt(prompt) => &prompt.message,
            Reply::Report { message, .. } => message,
        }
    }

    pub fn progress(&self) -> u8 {
        match self {
            Reply::Prompt(prompt) => prompt.progress,
            Reply::Report { progress, .. } => *progress,
        }
    }
}

/// Returned when an interview begins.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionStart {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub prompt: Prompt,
}
