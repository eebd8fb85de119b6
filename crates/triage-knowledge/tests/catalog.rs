use std::path::{Path, PathBuf};

use triage_knowledge::error::CatalogError;
use triage_knowledge::SymptomCatalog;

fn shipped_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

#[test]
fn loads_the_shipped_knowledge_base() {
    let catalog = SymptomCatalog::load(&shipped_data_dir()).unwrap();

    assert!(!catalog.symptoms().is_empty());
    assert!(!catalog.conditions().is_empty());
    assert!(!catalog.body_regions().is_empty());
    assert!(!catalog.relationships().is_empty());
    assert!(catalog.flow("headache").is_some());
}

#[test]
fn symptom_lookup_ignores_case() {
    let catalog = SymptomCatalog::load(&shipped_data_dir()).unwrap();

    let fever = catalog.symptom_named("FEVER").unwrap();
    assert_eq!(fever.name, "Fever");
    assert_eq!(catalog.symptom_by_id(&fever.id).unwrap().name, "Fever");
    assert!(catalog.symptom_named("not a symptom").is_none());
}

#[test]
fn flow_key_resolves_from_symptom_name() {
    let catalog = SymptomCatalog::load(&shipped_data_dir()).unwrap();

    assert_eq!(catalog.flow_key_for("chest pain"), Some("chest_pain"));
    assert_eq!(catalog.flow_key_for("Chest Pain"), Some("chest_pain"));
    assert_eq!(catalog.flow_key_for("toothache"), None);
}

#[test]
fn missing_documents_yield_empty_tables() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("symptoms.json"),
        r#"[{"id": 7, "name": "Fever"}]"#,
    )
    .unwrap();

    let catalog = SymptomCatalog::load(dir.path()).unwrap();

    assert_eq!(catalog.symptoms().len(), 1);
    assert_eq!(catalog.symptoms()[0].id, "7");
    assert!(catalog.conditions().is_empty());
    assert!(catalog.flows().is_empty());
    assert!(catalog.body_regions().is_empty());
    assert!(catalog.relationships().is_empty());
}

#[test]
fn empty_directory_loads_an_empty_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = SymptomCatalog::load(dir.path()).unwrap();
    assert!(catalog.symptoms().is_empty());
    assert!(catalog.flows().is_empty());
}

#[test]
fn malformed_document_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("conditions.json"), "{ not json").unwrap();

    let err = SymptomCatalog::load(dir.path()).unwrap_err();
    match err {
        CatalogError::Parse { path, .. } => {
            assert!(path.ends_with("conditions.json"));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}
