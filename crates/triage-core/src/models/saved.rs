use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::answer::Answer;
use super::session::{ConversationEntry, DialogueSession, GatheredInfo};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    pub age: Option<u32>,
    pub biological_sex: Option<String>,
}

/// A point-in-time snapshot of an interview, kept for later reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedAssessment {
    pub id: Uuid,
    pub session_id: Uuid,
    pub created_at: jiff::Timestamp,
    pub user_info: UserInfo,
    pub symptoms: Vec<String>,
    pub symptom_details: BTreeMap<String, Answer>,
    pub gathered_info: GatheredInfo,
    pub conversation_history: Vec<ConversationEntry>,
}

impl SavedAssessment {
    pub fn snapshot(session: &DialogueSession) -> Self {
        let info = &session.gathered_info;
        Self {
            id: Uuid::new_v4(),
            session_id: session.id,
            created_at: jiff::Timestamp::now(),
            user_info: UserInfo {
                name: info.name.clone().unwrap_or_else(|| "Anonymous".to_string()),
                age: info.age,
                biological_sex: info.biological_sex.clone(),
            },
            symptoms: session.symptoms.clone(),
            symptom_details: session.symptom_details.clone(),
            gathered_info: info.clone(),
            conversation_history: session.conversation_history.clone(),
        }
    }
}
