use std::collections::HashSet;

use tracing::debug;

use triage_core::models::catalog::Symptom;
use triage_core::models::question::QuestionFlow;
use triage_knowledge::SymptomCatalog;

use crate::similarity::{normalize, similarity, words};

pub const MAX_RESULTS: usize = 15;

/// Threshold for the fuzzy search tier.
pub const SEARCH_THRESHOLD: f64 = 0.7;
/// Threshold for resolving a free-text name to a catalog symptom.
pub const NAME_THRESHOLD: f64 = 0.8;
/// Threshold for resolving a symptom to a question flow.
pub const FLOW_THRESHOLD: f64 = 0.7;
/// Threshold for the per-family lookup tables.
pub const TABLE_THRESHOLD: f64 = 0.6;

/// Read-only matcher over a loaded catalog. Holds no per-call state.
#[derive(Debug, Clone, Copy)]
pub struct SymptomMatcher<'a> {
    catalog: &'a SymptomCatalog,
}

impl<'a> SymptomMatcher<'a> {
    pub fn new(catalog: &'a SymptomCatalog) -> Self {
        Self { catalog }
    }

    /// Ranked search: exact, then contains/word-overlap, then synonym, then
    /// fuzzy. Deduplicated by id and capped at [`MAX_RESULTS`].
    pub fn search(&self, query: &str) -> Vec<&'a Symptom> {
        let query = normalize(query);
        if query.is_empty() {
            return Vec::new();
        }
        let query_words = words(&query);

        let mut exact = Vec::new();
        let mut contains: Vec<(&Symptom, f64)> = Vec::new();
        let mut synonym = Vec::new();
        let mut fuzzy: Vec<(&Symptom, f64)> = Vec::new();

        for symptom in self.catalog.symptoms() {
            let name = normalize(&symptom.name);
            if name == query {
                exact.push(symptom);
                continue;
            }

            let name_words = words(&name);
            let shared = query_words.intersection(&name_words).count();
            let overlap = if shared == 0 {
                0.0
            } else {
                shared as f64 / query_words.len().max(name_words.len()) as f64
            };

            if name.contains(&query) || query.contains(&name) {
                contains.push((symptom, overlap));
                continue;
            }

            let synonym_hit = symptom.synonyms.iter().any(|syn| {
                let syn = normalize(syn);
                !syn.is_empty() && (syn.contains(&query) || query.contains(&syn))
            });
            if synonym_hit {
                synonym.push(symptom);
                continue;
            }

            if shared > 0 {
                contains.push((symptom, overlap));
                continue;
            }

            let score = similarity(&query, &name);
            if score > SEARCH_THRESHOLD {
                fuzzy.push((symptom, score));
            }
        }

        // Stable sorts keep catalog order among equal scores.
        contains.sort_by(|a, b| b.1.total_cmp(&a.1));
        fuzzy.sort_by(|a, b| b.1.total_cmp(&a.1));

        let ranked = exact
            .into_iter()
            .chain(contains.into_iter().map(|(s, _)| s))
            .chain(synonym)
            .chain(fuzzy.into_iter().map(|(s, _)| s));

        let mut seen = HashSet::new();
        let results: Vec<&Symptom> = ranked
            .filter(|&symptom| seen.insert(symptom.id.as_str()))
            .take(MAX_RESULTS)
            .collect();

        debug!(query = %query, results = results.len(), "symptom search");
        results
    }

    /// Case-insensitive exact lookup, else the best fuzzy match above
    /// [`NAME_THRESHOLD`].
    pub fn get_by_name(&self, name: &str) -> Option<&'a Symptom> {
        if name.is_empty() {
            return None;
        }
        if let Some(symptom) = self.catalog.symptom_named(name) {
            return Some(symptom);
        }

        let lowered = name.to_lowercase();
        best_above(
            self.catalog.symptoms().iter(),
            |symptom| similarity(&lowered, &symptom.name.to_lowercase()),
            NAME_THRESHOLD,
        )
    }

    /// The question flow for a symptom: exact `symptom_name` match, else the
    /// best fuzzy match above [`FLOW_THRESHOLD`].
    pub fn find_flow(&self, symptom: &str) -> Option<(&'a str, &'a QuestionFlow)> {
        if let Some(key) = self.catalog.flow_key_for(symptom) {
            return self
                .catalog
                .flows()
                .get_key_value(key)
                .map(|(key, flow)| (key.as_str(), flow));
        }

        let lowered = symptom.to_lowercase();
        best_above(
            self.catalog.flows().iter(),
            |(_, flow)| similarity(&lowered, &flow.symptom_name.to_lowercase()),
            FLOW_THRESHOLD,
        )
        .map(|(key, flow)| (key.as_str(), flow))
    }
}

/// Best-scoring key of a static table strictly above `threshold`. The
/// first key wins ties.
pub fn best_key<'k, V>(
    symptom: &str,
    table: &'k [(&'k str, V)],
    threshold: f64,
) -> Option<&'k (&'k str, V)> {
    let lowered = symptom.to_lowercase();
    best_above(table.iter(), |(key, _)| similarity(&lowered, key), threshold)
}

fn best_above<T>(
    candidates: impl Iterator<Item = T>,
    score: impl Fn(&T) -> f64,
    threshold: f64,
) -> Option<T> {
    let mut best = None;
    let mut best_score = threshold;
    for candidate in candidates {
        let s = score(&candidate);
        if s > best_score {
            best_score = s;
            best = Some(candidate);
        }
    }
    best
}
