use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use triage_core::models::catalog::{BodyRegion, Condition, Symptom, SymptomRelationship};
use triage_core::models::question::QuestionFlow;

use crate::error::CatalogError;

pub const SYMPTOMS_FILE: &str = "symptoms.json";
pub const CONDITIONS_FILE: &str = "conditions.json";
pub const QUESTIONS_FILE: &str = "questions.json";
pub const BODY_REGIONS_FILE: &str = "body_regions.json";
pub const RELATIONSHIPS_FILE: &str = "symptom_relationships.json";

/// Raw catalog tables, before indexing.
#[derive(Debug, Clone, Default)]
pub struct CatalogParts {
    pub symptoms: Vec<Symptom>,
    pub conditions: Vec<Condition>,
    pub flows: BTreeMap<String, QuestionFlow>,
    pub body_regions: Vec<BodyRegion>,
    pub relationships: Vec<SymptomRelationship>,
}

/// Immutable, load-once knowledge base.
#[derive(Debug, Clone, Default)]
pub struct SymptomCatalog {
    parts: CatalogParts,
    /// Lower-cased symptom name → index into `symptoms`.
    by_name: HashMap<String, usize>,
    /// Symptom id → index into `symptoms`.
    by_id: HashMap<String, usize>,
    /// Lower-cased flow symptom name → flow key.
    flow_by_symptom: HashMap<String, String>,
}

impl SymptomCatalog {
    /// Load the five knowledge documents from `dir`.
    ///
    /// A missing document yields an empty table and a warning; a document
    /// that exists but does not parse is an error.
    pub fn load(dir: &Path) -> Result<Self, CatalogError> {
        let parts = CatalogParts {
            symptoms: load_document(dir, SYMPTOMS_FILE)?,
            conditions: load_document(dir, CONDITIONS_FILE)?,
            flows: load_document(dir, QUESTIONS_FILE)?,
            body_regions: load_document(dir, BODY_REGIONS_FILE)?,
            relationships: load_document(dir, RELATIONSHIPS_FILE)?,
        };

        let catalog = Self::from_parts(parts);
        info!(
            dir = %dir.display(),
            symptoms = catalog.parts.symptoms.len(),
            conditions = catalog.parts.conditions.len(),
            flows = catalog.parts.flows.len(),
            body_regions = catalog.parts.body_regions.len(),
            relationships = catalog.parts.relationships.len(),
            "knowledge base loaded"
        );
        Ok(catalog)
    }

    pub fn from_parts(parts: CatalogParts) -> Self {
        let mut by_name = HashMap::new();
        let mut by_id = HashMap::new();
        for (idx, symptom) in parts.symptoms.iter().enumerate() {
            by_name.entry(symptom.name.to_lowercase()).or_insert(idx);
            by_id.entry(symptom.id.clone()).or_insert(idx);
        }

        // Later flows win on duplicate symptom names.
        let flow_by_symptom = parts
            .flows
            .iter()
            .map(|(key, flow)| (flow.symptom_name.to_lowercase(), key.clone()))
            .collect();

        Self {
            parts,
            by_name,
            by_id,
            flow_by_symptom,
        }
    }

    pub fn symptoms(&self) -> &[Symptom] {
        &self.parts.symptoms
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.parts.conditions
    }

    pub fn flows(&self) -> &BTreeMap<String, QuestionFlow> {
        &self.parts.flows
    }

    pub fn flow(&self, key: &str) -> Option<&QuestionFlow> {
        self.parts.flows.get(key)
    }

    pub fn body_regions(&self) -> &[BodyRegion] {
        &self.parts.body_regions
    }

    pub fn relationships(&self) -> &[SymptomRelationship] {
        &self.parts.relationships
    }

    /// Case-insensitive exact lookup by symptom name.
    pub fn symptom_named(&self, name: &str) -> Option<&Symptom> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&idx| &self.parts.symptoms[idx])
    }

    pub fn symptom_by_id(&self, id: &str) -> Option<&Symptom> {
        self.by_id.get(id).map(|&idx| &self.parts.symptoms[idx])
    }

    /// Flow key whose `symptom_name` equals `name`, ignoring case.
    pub fn flow_key_for(&self, name: &str) -> Option<&str> {
        self.flow_by_symptom
            .get(&name.to_lowercase())
            .map(String::as_str)
    }
}

fn load_document<T>(dir: &Path, file: &str) -> Result<T, CatalogError>
where
    T: DeserializeOwned + Default,
{
    let path = dir.join(file);
    if !path.exists() {
        warn!(path = %path.display(), "knowledge document not found, using an empty table");
        return Ok(T::default());
    }

    let contents = std::fs::read_to_string(&path).map_err(|source| CatalogError::Io {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CatalogError::Parse { path, source })
}
