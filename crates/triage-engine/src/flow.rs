//! Adaptive question selection for the symptom-specific sub-interview.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use triage_core::models::answer::Answer;
use triage_core::models::question::Question;
use triage_core::models::session::AskedQuestions;
use triage_knowledge::characteristics::Characteristics;
use triage_knowledge::tables::{
    COMMON_RELIEF, COMMON_TRIGGERS, DEFAULT_RELATED, IMPACT_OPTIONS, RELATED_BY_FAMILY,
    RELIEF_BY_FAMILY, SEVERITY_SCALE, TRIGGERS_BY_FAMILY, WORSENING_OPTIONS,
};
use triage_knowledge::SymptomCatalog;
use triage_search::matcher::{best_key, NAME_THRESHOLD, TABLE_THRESHOLD};
use triage_search::{similarity, SymptomMatcher};

pub const NONE_OF_THESE: &str = "None of these";
pub const OTHER_SYMPTOMS: &str = "Other symptoms";

/// Cap on related symptoms derived from conditions.
const MAX_CONDITION_RELATED: usize = 8;
/// Severity assumed when a severity answer cannot be parsed.
const DEFAULT_SEVERITY: i64 = 5;
const WORSENING_SEVERITY: i64 = 7;

/// Question selection bound to one session's repetition state for one turn.
pub struct QuestionFlowEngine<'a> {
    catalog: &'a SymptomCatalog,
    matcher: SymptomMatcher<'a>,
    asked: &'a mut AskedQuestions,
}

impl<'a> QuestionFlowEngine<'a> {
    pub fn new(catalog: &'a SymptomCatalog, asked: &'a mut AskedQuestions) -> Self {
        Self {
            catalog,
            matcher: SymptomMatcher::new(catalog),
            asked,
        }
    }

    /// Forget everything asked so far. Called when a new primary symptom
    /// sub-interview begins.
    pub fn reset(&mut self) {
        self.asked.reset();
    }

    pub fn is_repeated(&self, question: &Question) -> bool {
        self.asked.is_repeated(question)
    }

    /// The opening question for `symptom`: the matching flow's first
    /// question with the user's wording substituted in, or a synthesized
    /// duration question.
    pub fn first_question(&mut self, symptom: &str) -> Question {
        let question = match self.matcher.find_flow(symptom) {
            Some((key, flow)) => {
                debug!(symptom, flow = key, "using question flow");
                let mut question = flow.first_question.clone();
                if flow.symptom_name.to_lowercase() != symptom.to_lowercase() {
                    question.text = question.text.replace(&flow.symptom_name, symptom);
                }
                question
            }
            None => duration_question(symptom),
        };

        self.asked.mark(&question);
        question
    }

    /// The next question given the sub-interview answers so far, or `None`
    /// when the sub-interview is finished.
    pub fn next_question(
        &mut self,
        symptom: &str,
        answers: &BTreeMap<String, Answer>,
    ) -> Option<Question> {
        if let Some((key, flow)) = self.matcher.find_flow(symptom) {
            if !flow.follow_up_questions.is_empty() {
                // Most recent answer is taken by descending key order, not by
                // when it was given.
                let last_answered = answers
                    .iter()
                    .rev()
                    .find_map(|(id, answer)| {
                        flow.follow_up_questions.get(id).map(|rule| (rule, answer))
                    });

                if let Some((rule, answer)) = last_answered
                    && rule.fires_on(answer)
                {
                    let next = rule.next_question.clone();
                    if self.is_repeated(&next) {
                        return None;
                    }
                    self.asked.mark(&next);
                    return Some(next);
                }

                let flow_started = answers.keys().any(|id| id.starts_with(key));
                if !flow_started && !self.is_repeated(&flow.first_question) {
                    let first = flow.first_question.clone();
                    self.asked.mark(&first);
                    return Some(first);
                }
            }
        }

        for question in self.generic_battery(symptom, answers) {
            if !self.is_repeated(&question) {
                self.asked.mark(&question);
                return Some(question);
            }
        }

        if let Some(question) = family_question(symptom, answers)
            && !self.is_repeated(&question)
        {
            self.asked.mark(&question);
            return Some(question);
        }

        self.asked.last = None;
        None
    }

    /// Unanswered generic questions in priority order.
    fn generic_battery(&self, symptom: &str, answers: &BTreeMap<String, Answer>) -> Vec<Question> {
        let answered = |prefix: &str| answers.keys().any(|id| id.starts_with(prefix));
        let first_with = |prefix: &str| {
            answers
                .iter()
                .find(|(id, _)| id.starts_with(prefix))
                .map(|(_, answer)| answer)
        };
        let traits = Characteristics::infer(symptom);
        let mut battery = Vec::new();

        if !answered("duration") {
            battery.push(duration_question(symptom));
        }

        if !answered("severity") {
            battery.push(
                Question::new(
                    "severity",
                    format!(
                        "On a scale from 1 to 10, how would you rate the severity of your {symptom}?"
                    ),
                )
                .with_options(SEVERITY_SCALE.iter().copied()),
            );
        }

        if !answered("pattern") {
            battery.push(
                Question::new(
                    "pattern",
                    format!("How would you describe the pattern of your {symptom}?"),
                )
                .with_options(traits.pattern_options()),
            );
        }

        let severity = first_with("severity").map_or(0, |answer| parse_severity(&answer.to_string()));
        let persistent = first_with("duration").is_some_and(|answer| {
            let text = answer.to_string().to_lowercase();
            ["week", "month", "year"].iter().any(|unit| text.contains(unit))
        });
        if (severity >= WORSENING_SEVERITY || persistent) && !answered("worsening") {
            battery.push(
                Question::new("worsening", format!("Has your {symptom} gotten worse recently?"))
                    .with_options(WORSENING_OPTIONS.iter().copied()),
            );
        }

        if !answered("additional_symptoms") {
            let mut options = related_symptoms(self.catalog, symptom);
            options.push(NONE_OF_THESE.to_string());
            battery.push(
                Question::new(
                    "additional_symptoms",
                    format!("Are you experiencing any other symptoms along with {symptom}?"),
                )
                .with_options(options)
                .multiple(),
            );
        }

        if !answered("trigger") {
            battery.push(
                Question::new(
                    "triggers",
                    format!("Does anything seem to trigger or worsen your {symptom}?"),
                )
                .with_options(tailored_options(symptom, COMMON_TRIGGERS, TRIGGERS_BY_FAMILY))
                .multiple(),
            );
        }

        if !answered("impact") {
            battery.push(
                Question::new(
                    "impact",
                    format!("How much is this {symptom} affecting your daily activities?"),
                )
                .with_options(IMPACT_OPTIONS.iter().copied()),
            );
        }

        if !answered("relief") {
            battery.push(
                Question::new(
                    "relief",
                    format!("Have you tried anything that helps relieve your {symptom}?"),
                )
                .with_options(tailored_options(symptom, COMMON_RELIEF, RELIEF_BY_FAMILY))
                .multiple(),
            );
        }

        battery
    }
}

fn duration_question(symptom: &str) -> Question {
    let traits = Characteristics::infer(symptom);
    Question::new(
        "duration",
        format!("How long have you been experiencing {symptom}?"),
    )
    .with_options(traits.duration_options().iter().copied())
}

/// Leading integer of a severity answer such as `"7"` or `"10 (Severe)"`.
fn parse_severity(text: &str) -> i64 {
    text.split_whitespace()
        .next()
        .and_then(|token| token.parse().ok())
        .unwrap_or(DEFAULT_SEVERITY)
}

/// Common options, unioned with the closest family's options and sorted
/// when a family matches.
fn tailored_options(
    symptom: &str,
    common: &[&str],
    by_family: &[(&str, &[&str])],
) -> Vec<String> {
    match best_key(symptom, by_family, TABLE_THRESHOLD) {
        Some((_, specific)) => {
            let mut combined: Vec<String> = common
                .iter()
                .chain(specific.iter())
                .map(|s| s.to_string())
                .collect::<HashSet<_>>()
                .into_iter()
                .collect();
            combined.sort();
            combined
        }
        None => common.iter().map(|s| s.to_string()).collect(),
    }
}

/// Symptoms commonly reported alongside `symptom`.
///
/// Sources, first non-empty wins: an explicit relationship entry (by name,
/// then by resolved symptom id), conditions that list the symptom, the
/// static family table, and finally a fixed default list.
pub fn related_symptoms(catalog: &SymptomCatalog, symptom: &str) -> Vec<String> {
    let lowered = symptom.to_lowercase();
    let relationships = catalog.relationships();

    if let Some(rel) = relationships.iter().find(|rel| {
        rel.primary_symptom
            .as_deref()
            .is_some_and(|name| name.to_lowercase() == lowered)
    }) {
        return rel.related_symptoms.clone();
    }

    if let Some(found) = SymptomMatcher::new(catalog).get_by_name(symptom)
        && let Some(rel) = relationships
            .iter()
            .find(|rel| rel.primary_symptom_id.as_deref() == Some(found.id.as_str()))
    {
        return rel.related_symptoms.clone();
    }

    let from_conditions = related_from_conditions(catalog, &lowered);
    if !from_conditions.is_empty() {
        return from_conditions;
    }

    if let Some((_, related)) = best_key(symptom, RELATED_BY_FAMILY, TABLE_THRESHOLD) {
        return related.iter().map(|s| s.to_string()).collect();
    }

    DEFAULT_RELATED.iter().map(|s| s.to_string()).collect()
}

/// Other symptoms of conditions that feature `lowered`, in first-seen order.
fn related_from_conditions(catalog: &SymptomCatalog, lowered: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut related = Vec::new();

    for condition in catalog.conditions() {
        let listed = condition.all_symptoms().any(|s| {
            let s = s.to_lowercase();
            s == lowered || similarity(&s, lowered) > NAME_THRESHOLD
        });
        let annotated = condition
            .symptom_relationships
            .iter()
            .any(|link| link.symptom.to_lowercase() == lowered);
        if !listed && !annotated {
            continue;
        }

        for s in condition.all_symptoms() {
            if s.to_lowercase() != lowered && seen.insert(s.clone()) {
                related.push(s.clone());
            }
        }
    }

    related.truncate(MAX_CONDITION_RELATED);
    related
}

/// Family-specific follow-ups asked once the generic battery is exhausted.
pub fn family_question(symptom: &str, answers: &BTreeMap<String, Answer>) -> Option<Question> {
    let s = symptom.to_lowercase();
    let has = |id: &str| answers.contains_key(id);
    let ask = |id: &str, text: &str, options: &[&str]| {
        Some(Question::new(id, text).with_options(options.iter().copied()))
    };

    if s.contains("headache") || s.contains("migraine") {
        if !has("headache_location") {
            return ask(
                "headache_location",
                "Where is your headache located?",
                &["Front of the head", "Back of the head", "One side only", "Both sides", "All over", "Behind the eyes"],
            );
        }
        if !has("headache_character") {
            return ask(
                "headache_character",
                "How would you describe the pain?",
                &["Throbbing/pulsating", "Pressure/squeezing", "Sharp/stabbing", "Dull ache", "Burning"],
            );
        }
        if !has("headache_aura") {
            return ask(
                "headache_aura",
                "Before your headache begins, do you experience any warning signs like visual changes, numbness, or speech difficulties?",
                &["Yes", "No", "Sometimes"],
            );
        }
    } else if s.contains("chest") && (s.contains("pain") || s.contains("discomfort")) {
        if !has("chest_pain_location") {
            return ask(
                "chest_pain_location",
                "Where exactly in your chest do you feel the pain?",
                &["Center of chest", "Left side", "Right side", "Upper chest", "Lower chest", "All over chest"],
            );
        }
        if !has("chest_pain_radiation") {
            return ask(
                "chest_pain_radiation",
                "Does the pain spread or radiate to other areas?",
                &["Left arm", "Right arm", "Jaw or neck", "Back", "Abdomen", "No radiation"],
            );
        }
        if !has("chest_pain_breathing") {
            return ask(
                "chest_pain_breathing",
                "Does the pain change with breathing?",
                &["Worse with deep breath", "Better with deep breath", "No change with breathing"],
            );
        }
    } else if (s.contains("stomach") || s.contains("abdominal") || s.contains("belly"))
        && s.contains("pain")
    {
        if !has("abdominal_pain_location") {
            return ask(
                "abdominal_pain_location",
                "Where in your abdomen is the pain located?",
                &["Upper abdomen", "Lower abdomen", "Right side", "Left side", "Around the navel", "All over abdomen"],
            );
        }
        if !has("abdominal_pain_meals") {
            return ask(
                "abdominal_pain_meals",
                "How does eating affect your pain?",
                &["Pain improves after eating", "Pain worsens after eating", "No relation to eating", "Pain occurs mainly when hungry"],
            );
        }
        if !has("bowel_changes") {
            return ask(
                "bowel_changes",
                "Have you noticed any changes in your bowel movements?",
                &["Diarrhea", "Constipation", "Alternating diarrhea and constipation", "Blood in stool", "No changes"],
            );
        }
    } else if s.contains("cough") {
        if !has("cough_type") {
            return ask(
                "cough_type",
                "How would you describe your cough?",
                &["Dry (no mucus)", "Wet/productive (with mucus)", "Both", "Barking"],
            );
        }
        let productive = answers
            .get("cough_type")
            .is_some_and(|a| a.is("Wet/productive (with mucus)") || a.is("Both"));
        if productive && !has("sputum_color") {
            return ask(
                "sputum_color",
                "What color is the mucus/phlegm you cough up?",
                &["Clear/white", "Yellow", "Green", "Brown", "Pink or red (blood-tinged)"],
            );
        }
        if !has("cough_timing") {
            return ask(
                "cough_timing",
                "When is your cough worst?",
                &["Morning", "Night", "After exercise", "After eating", "No specific pattern"],
            );
        }
    } else if s.contains("joint") && s.contains("pain") {
        if !has("joint_location") {
            return ask(
                "joint_location",
                "Which joints are affected?",
                &["Knees", "Hips", "Ankles", "Shoulders", "Elbows", "Wrists", "Fingers", "Toes", "Spine", "Multiple joints"],
            )
            .map(Question::multiple);
        }
        if !has("joint_swelling") {
            return ask(
                "joint_swelling",
                "Do you have any swelling in the affected joint(s)?",
                &["Yes", "No", "Sometimes"],
            );
        }
        if !has("joint_morning_stiffness") {
            return ask(
                "joint_morning_stiffness",
                "Do you experience stiffness in your joints when you wake up in the morning?",
                &["Yes, for less than 30 minutes", "Yes, for 30 minutes to an hour", "Yes, for more than an hour", "No morning stiffness"],
            );
        }
    } else if s.contains("breath") {
        if !has("breathing_position") {
            return ask(
                "breathing_position",
                "Is your breathing difficulty affected by your body position?",
                &["Worse when lying down", "Better when sitting upright", "Not affected by position"],
            );
        }
        if !has("breathing_exertion") {
            return ask(
                "breathing_exertion",
                "How much exertion causes you to become short of breath?",
                &["At rest", "Minimal activity (getting dressed)", "Light activity (walking)", "Moderate activity (climbing stairs)", "Heavy activity (running)"],
            );
        }
    }

    None
}
