use std::env;
use std::sync::Arc;

use eyre::WrapErr;
use tracing_subscriber::EnvFilter;

use triage_engine::{MemorySessionStore, TriageService};
use triage_knowledge::SymptomCatalog;
use triage_report::{BedrockReportGenerator, FallbackReportGenerator, ReportGenerator};
use triage_server::config::{self, TriageConfig};
use triage_server::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    init_tracing();

    let config = config::load_config()?;
    let catalog = SymptomCatalog::load(&config.data_dir).wrap_err_with(|| {
        format!("failed to load knowledge base from {}", config.data_dir.display())
    })?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        symptoms = catalog.symptoms().len(),
        conditions = catalog.conditions().len(),
        flows = catalog.flows().len(),
        "knowledge base loaded"
    );

    let service = TriageService::new(
        Arc::new(catalog),
        Arc::new(MemorySessionStore::new()),
        report_generator(&config).await,
    )
    .with_report_timeout(config.report_timeout());

    let app = triage_server::app(AppState { service }, &config);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .wrap_err_with(|| format!("failed to bind {}", config.bind))?;
    tracing::info!(bind = %config.bind, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// JSON logs when `TRIAGE_LOG_JSON=1`, compact otherwise. Filter from
/// `RUST_LOG`, defaulting to `info`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env::var("TRIAGE_LOG_JSON").is_ok_and(|v| v == "1");

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).compact().init();
    }
}

async fn report_generator(config: &TriageConfig) -> Arc<dyn ReportGenerator> {
    let Some(model_id) = &config.model_id else {
        tracing::info!("no model configured, serving fallback reports only");
        return Arc::new(FallbackReportGenerator);
    };

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()))
        .load()
        .await;
    tracing::info!(model = %model_id, region = %config.region, "using bedrock report generator");
    Arc::new(BedrockReportGenerator::new(&aws_config, model_id.clone()))
}
