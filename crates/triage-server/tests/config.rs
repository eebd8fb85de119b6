use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serde_json::json;

use triage_server::config::{read_config_file, resolve, TriageConfig};

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_without_file_or_env() {
    let config = resolve(None, env(&[])).unwrap();
    assert_eq!(config, TriageConfig::default());
    assert_eq!(config.bind, "0.0.0.0:15000");
    assert_eq!(config.data_dir, PathBuf::from("data"));
    assert_eq!(config.report_timeout(), Duration::from_secs(20));
    assert!(config.model_id.is_none());
    assert!(config.allows_any_origin());
}

#[test]
fn environment_overrides_defaults() {
    let config = resolve(
        None,
        env(&[
            ("TRIAGE_BIND", "127.0.0.1:8080"),
            ("TRIAGE_DATA_DIR", "/srv/kb"),
            ("TRIAGE_MODEL_ID", "anthropic.claude-model"),
            ("AWS_REGION", "eu-west-1"),
            ("TRIAGE_REPORT_TIMEOUT_SECS", "5"),
            ("TRIAGE_CORS_ORIGINS", "https://a.example, https://b.example,"),
        ]),
    )
    .unwrap();

    assert_eq!(config.bind, "127.0.0.1:8080");
    assert_eq!(config.data_dir, PathBuf::from("/srv/kb"));
    assert_eq!(config.model_id.as_deref(), Some("anthropic.claude-model"));
    assert_eq!(config.region, "eu-west-1");
    assert_eq!(config.report_timeout(), Duration::from_secs(5));
    assert_eq!(config.cors_origins, ["https://a.example", "https://b.example"]);
    assert!(!config.allows_any_origin());
}

#[test]
fn environment_wins_over_file() {
    let file = json!({
        "config_version": 1,
        "bind": "0.0.0.0:9000",
        "region": "ap-southeast-2",
        "model_id": "file-model"
    });
    let config = resolve(Some(file), env(&[("AWS_REGION", "us-west-2")])).unwrap();

    assert_eq!(config.bind, "0.0.0.0:9000");
    assert_eq!(config.region, "us-west-2");
    assert_eq!(config.model_id.as_deref(), Some("file-model"));
    assert_eq!(config.report_timeout_secs, 20);
}

#[test]
fn pre_versioned_file_is_accepted() {
    let config = resolve(Some(json!({"bind": "0.0.0.0:1"})), env(&[])).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.bind, "0.0.0.0:1");
}

#[test]
fn newer_config_version_is_rejected() {
    let err = resolve(Some(json!({"config_version": 99})), env(&[])).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn non_object_file_is_rejected() {
    assert!(resolve(Some(json!(["bind"])), env(&[])).is_err());
}

#[test]
fn invalid_timeout_is_rejected() {
    let err = resolve(None, env(&[("TRIAGE_REPORT_TIMEOUT_SECS", "soon")])).unwrap_err();
    assert!(err.to_string().contains("TRIAGE_REPORT_TIMEOUT_SECS"));
}

#[test]
fn blank_model_id_means_fallback_only() {
    let config = resolve(None, env(&[("TRIAGE_MODEL_ID", "  ")])).unwrap();
    assert!(config.model_id.is_none());
}

#[test]
fn reads_config_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("triage.json");
    std::fs::write(&path, r#"{"config_version": 1, "data_dir": "/opt/triage/data"}"#).unwrap();

    let json = read_config_file(&path).unwrap();
    let config = resolve(Some(json), env(&[])).unwrap();
    assert_eq!(config.data_dir, PathBuf::from("/opt/triage/data"));

    let missing = read_config_file(&dir.path().join("absent.json")).unwrap_err();
    assert!(missing.to_string().contains("failed to read config"));
}
