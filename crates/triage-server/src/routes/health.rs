use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthStatus {
    status: &'static str,
}

pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus { status: "healthy" })
}

#[derive(Serialize)]
pub struct ApiInfo {
    message: &'static str,
    version: &'static str,
    endpoints: Endpoints,
}

#[derive(Serialize)]
pub struct Endpoints {
    health_check: &'static str,
    start_assessment: &'static str,
    start_new: &'static str,
    process_input: &'static str,
    go_back: &'static str,
    quick_assessment: &'static str,
    save_assessment: &'static str,
    search_symptoms: &'static str,
}

/// Root endpoint describing the API.
pub async fn index() -> Json<ApiInfo> {
    Json(ApiInfo {
        message: "Health triage assistant API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: Endpoints {
            health_check: "/api/health",
            start_assessment: "/api/assessment/start",
            start_new: "/api/assessment/start_new",
            process_input: "/api/assessment/next",
            go_back: "/api/assessment/back",
            quick_assessment: "/api/assessment/quick",
            save_assessment: "/api/assessment/save",
            search_symptoms: "/api/symptoms/search",
        },
    })
}
