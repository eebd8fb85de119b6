use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use uuid::Uuid;

use triage_core::models::prompt::Reply;
use triage_core::models::report::{AssessmentReport, ReportRequest};
use triage_core::models::session::DialogueState;
use triage_engine::store::SessionStore;
use triage_engine::{EngineError, MemorySessionStore, QuickAssessmentRequest, TriageService};
use triage_knowledge::SymptomCatalog;
use triage_report::error::ReportError;
use triage_report::{BoxFuture, FallbackReportGenerator, ReportGenerator};

struct FailingGenerator;

impl ReportGenerator for FailingGenerator {
    fn name(&self) -> &str {
        "failing"
    }

    fn generate<'a>(
        &'a self,
        _request: &'a ReportRequest,
    ) -> BoxFuture<'a, Result<AssessmentReport, ReportError>> {
        Box::pin(async { Err(ReportError::Invocation("service unavailable".to_string())) })
    }
}

struct SlowGenerator;

impl ReportGenerator for SlowGenerator {
    fn name(&self) -> &str {
        "slow"
    }

    fn generate<'a>(
        &'a self,
        request: &'a ReportRequest,
    ) -> BoxFuture<'a, Result<AssessmentReport, ReportError>> {
        Box::pin(async move {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(canned(request))
        })
    }
}

/// Returns a sparse report, as a model might.
struct CannedGenerator;

impl ReportGenerator for CannedGenerator {
    fn name(&self) -> &str {
        "canned"
    }

    fn generate<'a>(
        &'a self,
        request: &'a ReportRequest,
    ) -> BoxFuture<'a, Result<AssessmentReport, ReportError>> {
        Box::pin(async move { Ok(canned(request)) })
    }
}

fn canned(request: &ReportRequest) -> AssessmentReport {
    AssessmentReport {
        report_id: "HA-TEST".to_string(),
        report_date: "October 19, 2026".to_string(),
        summary: format!("Assessment for {}: canned.", request.name),
        symptom_analysis: Vec::new(),
        possible_conditions: Vec::new(),
        warning_signs: Vec::new(),
        next_steps: "See a doctor.".to_string(),
        self_care: Vec::new(),
        prevention: Vec::new(),
        specialists: Vec::new(),
        generated_at: None,
    }
}

fn catalog() -> Arc<SymptomCatalog> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data");
    Arc::new(SymptomCatalog::load(&dir).unwrap())
}

fn service(generator: impl ReportGenerator + 'static) -> (TriageService, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::new());
    let service = TriageService::new(catalog(), store.clone(), Arc::new(generator))
        .with_report_timeout(Duration::from_millis(200));
    (service, store)
}

/// Answers for a complete interview about back pain.
fn full_interview() -> Vec<serde_json::Value> {
    let mut answers: Vec<serde_json::Value> = [
        "Yes, let's start",
        "Sam",
        "40",
        "Male",
        "180 cm, 80 kg",
        "No",
        "No",
        "No",
        "No",
        "Never smoked",
        "Never",
        "Light (1-3 days/week)",
        "Balanced diet",
        "Low",
        "7-8 hours",
        "back pain",
        "1-3 days",
        "6",
        "Constant (always present)",
    ]
    .into_iter()
    .map(|s| json!(s))
    .collect();
    answers.extend([
        json!(["Fatigue"]),
        json!(["Lifting"]),
        json!("Moderately limiting"),
        json!(["Rest"]),
        // main flow again
        json!("None of these"),
        json!("Moderately limiting"),
        json!(["Home remedies"]),
        json!("View my assessment report"),
    ]);
    answers
}

async fn run_interview(service: &TriageService) -> (Uuid, Reply) {
    let start = service.start_session().await;
    let id = start.session_id.to_string();

    let mut last = None;
    for answer in full_interview() {
        last = Some(service.submit_answer(&id, answer).await.unwrap());
    }
    (start.session_id, last.unwrap())
}

#[tokio::test]
async fn start_session_returns_welcome_prompt() {
    let (service, store) = service(FallbackReportGenerator);
    let start = service.start_session().await;

    assert_eq!(start.prompt.progress, 0);
    assert!(start.prompt.message.starts_with("Hi, I'm your health assistant."));
    assert_eq!(
        start.prompt.options.unwrap(),
        ["Yes, let's start", "What information will you collect?"]
    );
    assert_eq!(store.session_count().await, 1);

    let session = store.get(start.session_id).await.unwrap();
    let session = session.lock().await;
    assert_eq!(session.current_state, DialogueState::Introduction);
    assert_eq!(session.conversation_history.len(), 1);
}

#[tokio::test]
async fn start_new_session_leaves_previous_session_alone() {
    let (service, store) = service(FallbackReportGenerator);
    let first = service.start_session().await;
    let first_id = first.session_id.to_string();
    service.submit_answer(&first_id, json!("Yes, let's start")).await.unwrap();

    let second = service.start_new_session(Some(&first_id)).await;
    assert_ne!(second.session_id, first.session_id);
    assert!(second.prompt.message.starts_with("Starting a new health assessment."));

    let previous = store.get(first.session_id).await.unwrap();
    assert_eq!(previous.lock().await.current_state, DialogueState::Name);
}

#[tokio::test]
async fn unknown_sessions_are_rejected() {
    let (service, _) = service(FallbackReportGenerator);

    let err = service.submit_answer("not-a-uuid", json!("hi")).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidSession(_)));

    let missing = Uuid::new_v4().to_string();
    let err = service.submit_answer(&missing, json!("hi")).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidSession(_)));

    assert!(matches!(service.go_back("").await, Err(EngineError::InvalidSession(_))));
    assert!(matches!(service.save_assessment(&missing).await, Err(EngineError::InvalidSession(_))));
}

#[tokio::test]
async fn object_answers_are_invalid_input() {
    let (service, _) = service(FallbackReportGenerator);
    let start = service.start_session().await;

    let err = service
        .submit_answer(&start.session_id.to_string(), json!({"text": "hi"}))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Core(_)));
}

#[tokio::test]
async fn go_back_follows_history() {
    let (service, _) = service(FallbackReportGenerator);
    let start = service.start_session().await;
    let id = start.session_id.to_string();

    assert!(matches!(service.go_back(&id).await, Err(EngineError::NoPreviousState)));

    service.submit_answer(&id, json!("Yes, let's start")).await.unwrap();
    service.submit_answer(&id, json!("Sam")).await.unwrap();

    let back = service.go_back(&id).await.unwrap();
    assert_eq!(back.progress, 5);
    assert!(back.message.contains("what's your name"));
}

#[tokio::test]
async fn failed_generation_falls_back_to_templated_report() {
    let (service, store) = service(FailingGenerator);
    let (session_id, reply) = run_interview(&service).await;

    let Reply::Report { message, report, progress, show_start_new } = reply else {
        panic!("expected the final report");
    };
    assert_eq!(message, "Here's your comprehensive health assessment, Sam.");
    assert_eq!(progress, 100);
    assert!(show_start_new);
    assert!(report.summary.starts_with("Assessment for Sam: Based on your report of back pain"));
    assert_eq!(report.possible_conditions.len(), 3);
    assert!(report.generated_at.is_some());

    let names: Vec<&str> = report.specialists.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Orthopedic Surgeon", "Neurologist", "Physical Therapist"]);

    let session = store.get(session_id).await.unwrap();
    let session = session.lock().await;
    assert_eq!(session.progress, 100);
    assert_eq!(session.current_state, DialogueState::Results);
    assert_eq!(session.symptoms, ["back pain"]);
}

#[tokio::test]
async fn slow_generation_times_out_to_fallback() {
    let (service, _) = service(SlowGenerator);
    let (_, reply) = run_interview(&service).await;

    let Reply::Report { report, .. } = reply else {
        panic!("expected the final report");
    };
    assert!(report.summary.contains("we recommend consulting"));
}

#[tokio::test]
async fn generated_reports_are_completed() {
    let (service, _) = service(CannedGenerator);
    let (_, reply) = run_interview(&service).await;

    let Reply::Report { report, .. } = reply else {
        panic!("expected the final report");
    };
    assert_eq!(report.summary, "Assessment for Sam: canned.");
    assert!(!report.warning_signs.is_empty());
    assert!(!report.self_care.is_empty());
    assert!(!report.prevention.is_empty());
    assert!(report.generated_at.is_some());
    assert_eq!(report.specialists.len(), 3);
}

#[tokio::test]
async fn quick_assessment_requires_every_field() {
    let (service, _) = service(FallbackReportGenerator);

    let missing_symptoms = QuickAssessmentRequest {
        age: Some(30),
        biological_sex: Some("Female".to_string()),
        symptoms: vec!["  ".to_string()],
    };
    let err = service.quick_assessment(missing_symptoms).await.unwrap_err();
    assert!(matches!(err, EngineError::MissingField(field) if field == "symptoms"));

    let missing_age = QuickAssessmentRequest {
        age: None,
        biological_sex: Some("Female".to_string()),
        symptoms: vec!["cough".to_string()],
    };
    let err = service.quick_assessment(missing_age).await.unwrap_err();
    assert!(matches!(err, EngineError::MissingField(field) if field == "age"));

    let missing_sex = QuickAssessmentRequest {
        age: Some(30),
        biological_sex: None,
        symptoms: vec!["cough".to_string()],
    };
    let err = service.quick_assessment(missing_sex).await.unwrap_err();
    assert!(matches!(err, EngineError::MissingField(field) if field == "biological_sex"));
}

#[tokio::test]
async fn quick_assessment_ranks_specialists() {
    let (service, _) = service(FallbackReportGenerator);
    let reply = service
        .quick_assessment(QuickAssessmentRequest {
            age: Some(58),
            biological_sex: Some("Male".to_string()),
            symptoms: vec!["chest pain".to_string(), "shortness of breath".to_string()],
        })
        .await
        .unwrap();

    assert_eq!(reply.message(), "Here's a quick assessment based on your symptoms.");
    assert_eq!(reply.progress(), 100);
    let Reply::Report { report, show_start_new, .. } = reply else {
        panic!("expected a report");
    };
    assert!(show_start_new);
    assert_eq!(report.specialists[0].name, "Cardiologist");
    assert!(report.specialists.iter().any(|s| s.name == "Pulmonologist"));
}

#[tokio::test]
async fn saved_assessments_can_be_retrieved() {
    let (service, _) = service(FallbackReportGenerator);
    let start = service.start_session().await;
    let id = start.session_id.to_string();
    service.submit_answer(&id, json!("Yes, let's start")).await.unwrap();

    let saved_id = service.save_assessment(&id).await.unwrap();
    let saved = service.get_saved_assessment(&saved_id.to_string()).await.unwrap();
    assert_eq!(saved.session_id, start.session_id);
    assert_eq!(saved.user_info.name, "Anonymous");
    assert_eq!(saved.conversation_history.len(), 3);

    let err = service
        .get_saved_assessment(&Uuid::new_v4().to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::AssessmentNotFound(_)));
}

#[tokio::test]
async fn search_returns_exact_match_first() {
    let (service, _) = service(FallbackReportGenerator);
    let results = service.search_symptoms("fever");

    assert_eq!(results[0].name, "Fever");
    assert!(results.iter().any(|s| s.name == "High fever"));
    assert!(results.len() <= 15);
    assert!(service.search_symptoms("   ").is_empty());
}

#[tokio::test]
async fn concurrent_sessions_do_not_interfere() {
    let (service, store) = service(FallbackReportGenerator);
    let a = service.start_session().await;
    let b = service.start_session().await;

    let (a_id, b_id) = (a.session_id.to_string(), b.session_id.to_string());

    let (ra, rb) = tokio::join!(
        service.submit_answer(&a_id, json!("Yes, let's start")),
        service.submit_answer(&b_id, json!("What information will you collect?")),
    );
    ra.unwrap();
    rb.unwrap();

    let a = store.get(a.session_id).await.unwrap();
    let b = store.get(b.session_id).await.unwrap();
    assert_eq!(a.lock().await.current_state, DialogueState::Name);
    assert_eq!(b.lock().await.current_state, DialogueState::Introduction);
}
