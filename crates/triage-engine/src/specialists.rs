//! Specialist recommendations from the reported symptoms.

use std::collections::HashSet;

use triage_core::models::report::Specialist;
use triage_knowledge::tables::{describe_specialist, SPECIALISTS_BY_SYMPTOM};

pub const MAX_SPECIALISTS: usize = 3;

/// Tally specialists over every table entry each symptom matches (substring
/// either way, case-insensitive) and return the top three. Ties keep the
/// order in which specialists were first encountered.
///
/// Symptoms are deduplicated case-insensitively first so a symptom reported
/// twice does not count twice.
pub fn rank(symptoms: &[String]) -> Vec<Specialist> {
    let mut tally: Vec<(&'static str, u32)> = Vec::new();
    let mut seen = HashSet::new();

    for symptom in symptoms {
        let symptom = symptom.trim().to_lowercase();
        if symptom.is_empty() || !seen.insert(symptom.clone()) {
            continue;
        }

        for (key, specialists) in SPECIALISTS_BY_SYMPTOM {
            if !(key.contains(symptom.as_str()) || symptom.contains(key)) {
                continue;
            }
            for &name in *specialists {
                match tally.iter_mut().find(|(known, _)| *known == name) {
                    Some((_, count)) => *count += 1,
                    None => tally.push((name, 1)),
                }
            }
        }
    }

    // Stable sort preserves first-encountered order among equal counts.
    tally.sort_by(|a, b| b.1.cmp(&a.1));

    tally
        .into_iter()
        .take(MAX_SPECIALISTS)
        .map(|(name, count)| Specialist {
            name: name.to_string(),
            description: describe_specialist(name).to_string(),
            relevance_score: count,
        })
        .collect()
}
