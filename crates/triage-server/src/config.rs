use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
const CURRENT_VERSION: u32 = 1;

/// Server settings. Read from an optional JSON file named by
/// `TRIAGE_CONFIG`, then overridden field by field from the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    pub config_version: u32,
    pub bind: String,
    /// Directory holding the five knowledge-base documents.
    pub data_dir: PathBuf,
    /// Bedrock model for report generation. Without one the server only
    /// produces fallback reports.
    pub model_id: Option<String>,
    pub region: String,
    pub report_timeout_secs: u64,
    /// Allowed CORS origins; `*` allows any.
    pub cors_origins: Vec<String>,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            bind: "0.0.0.0:15000".to_string(),
            data_dir: PathBuf::from("data"),
            model_id: None,
            region: "us-east-1".to_string(),
            report_timeout_secs: 20,
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl TriageConfig {
    pub fn report_timeout(&self) -> Duration {
        Duration::from_secs(self.report_timeout_secs)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

/// Load config from the process environment.
pub fn load_config() -> eyre::Result<TriageConfig> {
    let file = match env::var("TRIAGE_CONFIG") {
        Ok(path) if !path.trim().is_empty() => Some(read_config_file(Path::new(&path))?),
        _ => None,
    };
    resolve(file, |key| env::var(key).ok())
}

/// Read a config file as raw JSON so its version can be checked before
/// deserializing.
pub fn read_config_file(path: &Path) -> eyre::Result<serde_json::Value> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|e| eyre::eyre!("failed to parse config at {}: {e}", path.display()))?;
    Ok(json)
}

/// Merge file values and environment overrides into a config.
///
/// `var` looks up one environment variable; tests pass a closure over a
/// fixed map.
pub fn resolve(
    file: Option<serde_json::Value>,
    var: impl Fn(&str) -> Option<String>,
) -> eyre::Result<TriageConfig> {
    let mut config = match file {
        Some(json) => {
            check_version(&json)?;
            serde_json::from_value(json)?
        }
        None => TriageConfig::default(),
    };

    if let Some(bind) = var("TRIAGE_BIND") {
        config.bind = bind;
    }
    if let Some(dir) = var("TRIAGE_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }
    if let Some(model_id) = var("TRIAGE_MODEL_ID") {
        config.model_id = Some(model_id);
    }
    if let Some(region) = var("AWS_REGION") {
        config.region = region;
    }
    if let Some(secs) = var("TRIAGE_REPORT_TIMEOUT_SECS") {
        config.report_timeout_secs = secs
            .trim()
            .parse()
            .map_err(|e| eyre::eyre!("invalid TRIAGE_REPORT_TIMEOUT_SECS {secs:?}: {e}"))?;
    }
    if let Some(origins) = var("TRIAGE_CORS_ORIGINS") {
        config.cors_origins = origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
    }

    config.model_id = config.model_id.filter(|id| !id.trim().is_empty());
    config.config_version = CURRENT_VERSION;
    Ok(config)
}

fn check_version(json: &serde_json::Value) -> eyre::Result<()> {
    if !json.is_object() {
        return Err(eyre::eyre!("config is not a JSON object"));
    }
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0);

    if on_disk_version > u64::from(CURRENT_VERSION) {
        return Err(eyre::eyre!(
            "config_version {on_disk_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update the triage server."
        ));
    }
    Ok(())
}
