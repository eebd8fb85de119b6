//! The operations exposed to transports.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use triage_core::models::answer::Answer;
use triage_core::models::catalog::Symptom;
use triage_core::models::prompt::{Prompt, Reply, SessionStart};
use triage_core::models::report::{AssessmentReport, ReportRequest};
use triage_core::models::saved::SavedAssessment;
use triage_core::models::session::{parse_session_id, DialogueSession, Role};
use triage_knowledge::SymptomCatalog;
use triage_report::error::ReportError;
use triage_report::fallback::fallback_report;
use triage_report::normalize::normalize;
use triage_report::ReportGenerator;
use triage_search::SymptomMatcher;

use crate::dialogue::{self, Turn};
use crate::error::EngineError;
use crate::specialists;
use crate::states;
use crate::store::{SessionHandle, SessionStore};

pub const DEFAULT_REPORT_TIMEOUT: Duration = Duration::from_secs(20);

/// Inputs for a one-shot assessment without an interview.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuickAssessmentRequest {
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub biological_sex: Option<String>,
    #[serde(default)]
    pub symptoms: Vec<String>,
}

/// Triage interview service. Cheap to clone; all state is shared.
#[derive(Clone)]
pub struct TriageService {
    catalog: Arc<SymptomCatalog>,
    store: Arc<dyn SessionStore>,
    generator: Arc<dyn ReportGenerator>,
    report_timeout: Duration,
}

impl TriageService {
    pub fn new(
        catalog: Arc<SymptomCatalog>,
        store: Arc<dyn SessionStore>,
        generator: Arc<dyn ReportGenerator>,
    ) -> Self {
        Self {
            catalog,
            store,
            generator,
            report_timeout: DEFAULT_REPORT_TIMEOUT,
        }
    }

    pub fn with_report_timeout(mut self, timeout: Duration) -> Self {
        self.report_timeout = timeout;
        self
    }

    pub fn catalog(&self) -> &SymptomCatalog {
        &self.catalog
    }

    pub async fn start_session(&self) -> SessionStart {
        self.open_session(false).await
    }

    /// Begin a fresh interview. A previous session, if any, is left as it was.
    pub async fn start_new_session(&self, previous: Option<&str>) -> SessionStart {
        if let Some(previous) = previous {
            info!(previous_session = %previous, "restarting assessment");
        }
        self.open_session(true).await
    }

    async fn open_session(&self, restart: bool) -> SessionStart {
        let mut session = DialogueSession::new();
        let prompt = states::welcome(restart);
        session.record(Role::Assistant, prompt.message.clone());

        let session_id = session.id;
        self.store.insert(session).await;
        info!(session_id = %session_id, "session started");

        SessionStart { session_id, prompt }
    }

    /// Apply one answer to a session. Produces the next prompt, or the final
    /// report once the interview is complete.
    pub async fn submit_answer(
        &self,
        session_id: &str,
        input: serde_json::Value,
    ) -> Result<Reply, EngineError> {
        let handle = self.session(session_id).await?;
        let answer = Answer::try_from(input)?;

        let mut session = handle.lock().await;
        match dialogue::submit(&mut session, &answer, &self.catalog) {
            Turn::Prompt(prompt) => Ok(Reply::Prompt(prompt)),
            Turn::Report => {
                let request = report_request(&session);
                let report = self.generate_report(&request).await;
                let message = format!("Here's your comprehensive health assessment, {}.", request.name);

                session.progress = 100;
                session.record(Role::Assistant, message.clone());
                info!(session_id = %session.id, report_id = %report.report_id, "assessment complete");

                Ok(Reply::Report {
                    message,
                    report,
                    progress: 100,
                    show_start_new: true,
                })
            }
        }
    }

    pub async fn go_back(&self, session_id: &str) -> Result<Prompt, EngineError> {
        let handle = self.session(session_id).await?;
        let mut session = handle.lock().await;
        dialogue::go_back(&mut session, &self.catalog)
    }

    pub fn search_symptoms(&self, query: &str) -> Vec<Symptom> {
        SymptomMatcher::new(&self.catalog)
            .search(query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// A report from symptoms alone. Age, biological sex and at least one
    /// symptom are required.
    pub async fn quick_assessment(
        &self,
        input: QuickAssessmentRequest,
    ) -> Result<Reply, EngineError> {
        let symptoms: Vec<String> = input
            .symptoms
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if symptoms.is_empty() {
            return Err(EngineError::MissingField("symptoms".to_string()));
        }
        let age = input
            .age
            .ok_or_else(|| EngineError::MissingField("age".to_string()))?;
        let biological_sex = input
            .biological_sex
            .filter(|sex| !sex.trim().is_empty())
            .ok_or_else(|| EngineError::MissingField("biological_sex".to_string()))?;

        let request = ReportRequest {
            name: String::new(),
            age: Some(age),
            biological_sex: Some(biological_sex),
            symptoms: dedupe(&symptoms),
            answers: Default::default(),
        };
        let report = self.generate_report(&request).await;

        Ok(Reply::Report {
            message: "Here's a quick assessment based on your symptoms.".to_string(),
            report,
            progress: 100,
            show_start_new: true,
        })
    }

    /// Snapshot the session for later reference. Returns the snapshot id.
    pub async fn save_assessment(&self, session_id: &str) -> Result<Uuid, EngineError> {
        let handle = self.session(session_id).await?;
        let snapshot = SavedAssessment::snapshot(&*handle.lock().await);
        let id = snapshot.id;

        self.store.save_assessment(snapshot).await;
        info!(session_id = %session_id, assessment_id = %id, "assessment saved");
        Ok(id)
    }

    pub async fn get_saved_assessment(&self, id: &str) -> Result<SavedAssessment, EngineError> {
        let Ok(parsed) = parse_session_id(id) else {
            return Err(EngineError::AssessmentNotFound(id.to_string()));
        };
        self.store
            .saved_assessment(parsed)
            .await
            .ok_or_else(|| EngineError::AssessmentNotFound(id.to_string()))
    }

    async fn session(&self, session_id: &str) -> Result<SessionHandle, EngineError> {
        let invalid = || EngineError::InvalidSession(session_id.to_string());
        let id = parse_session_id(session_id).map_err(|_| invalid())?;
        self.store.get(id).await.ok_or_else(invalid)
    }

    /// Generate with the configured generator, substituting the fallback
    /// report on error or timeout. Never fails.
    async fn generate_report(&self, request: &ReportRequest) -> AssessmentReport {
        let outcome = tokio::time::timeout(self.report_timeout, self.generator.generate(request))
            .await
            .unwrap_or_else(|_| Err(ReportError::Timeout(self.report_timeout)));

        let now = jiff::Timestamp::now();
        let mut report = match outcome {
            Ok(report) => report,
            Err(e) => {
                warn!(generator = self.generator.name(), error = %e, "report generation failed, using fallback");
                fallback_report(request, now)
            }
        };

        report.specialists = specialists::rank(&request.symptoms);
        report.generated_at.get_or_insert(now);
        normalize(&mut report);
        report
    }
}

/// Everything the interview gathered, shaped for the report generator.
fn report_request(session: &DialogueSession) -> ReportRequest {
    let info = &session.gathered_info;
    ReportRequest {
        name: info.name.clone().unwrap_or_else(|| "Anonymous".to_string()),
        age: info.age,
        biological_sex: info.biological_sex.clone(),
        symptoms: dedupe(&session.symptoms),
        answers: session.answers(),
    }
}

/// Case-insensitive dedupe keeping the first spelling seen.
fn dedupe(symptoms: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    symptoms
        .iter()
        .filter(|s| seen.insert(s.to_lowercase()))
        .cloned()
        .collect()
}
