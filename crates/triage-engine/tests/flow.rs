use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use triage_core::models::answer::Answer;
use triage_core::models::question::Question;
use triage_core::models::session::AskedQuestions;
use triage_engine::flow::{family_question, related_symptoms, NONE_OF_THESE};
use triage_engine::QuestionFlowEngine;
use triage_knowledge::tables::{ACUTE_DURATIONS, CHRONIC_DURATIONS, DEFAULT_RELATED};
use triage_knowledge::SymptomCatalog;

fn catalog() -> SymptomCatalog {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data");
    SymptomCatalog::load(&dir).unwrap()
}

fn answers(pairs: &[(&str, &str)]) -> BTreeMap<String, Answer> {
    pairs
        .iter()
        .map(|(id, answer)| (id.to_string(), Answer::from(*answer)))
        .collect()
}

fn first_option(question: &Question) -> Answer {
    let options = question.options.clone().unwrap_or_default();
    match options.first() {
        Some(first) if question.multiple_select => Answer::Choices(vec![first.clone()]),
        Some(first) => Answer::from(first.as_str()),
        None => Answer::from("not sure"),
    }
}

#[test]
fn first_question_comes_from_matching_flow() {
    let catalog = catalog();
    let mut asked = AskedQuestions::default();
    let mut engine = QuestionFlowEngine::new(&catalog, &mut asked);

    let question = engine.first_question("Headache");
    assert_eq!(question.id, "headache_onset");
    assert_eq!(question.text, "How did your Headache start?");
    assert!(engine.is_repeated(&question));
}

#[test]
fn first_question_uses_the_users_wording() {
    let catalog = catalog();
    let mut asked = AskedQuestions::default();
    let mut engine = QuestionFlowEngine::new(&catalog, &mut asked);

    let question = engine.first_question("chest pains");
    assert_eq!(question.id, "chest_pain_onset");
    assert_eq!(question.text, "When did your chest pains start?");
}

#[test]
fn first_question_without_flow_asks_duration() {
    let catalog = catalog();
    let mut asked = AskedQuestions::default();
    let mut engine = QuestionFlowEngine::new(&catalog, &mut asked);

    let acute = engine.first_question("back pain");
    assert_eq!(acute.id, "duration");
    assert_eq!(acute.text, "How long have you been experiencing back pain?");
    assert_eq!(acute.options.unwrap(), ACUTE_DURATIONS);

    engine.reset();
    let chronic = engine.first_question("chronic back pain");
    assert_eq!(chronic.options.unwrap(), CHRONIC_DURATIONS);
}

#[test]
fn flow_branch_follows_matching_answer() {
    let catalog = catalog();
    let mut asked = AskedQuestions::default();
    let mut engine = QuestionFlowEngine::new(&catalog, &mut asked);
    engine.first_question("headache");

    let next = engine
        .next_question(
            "headache",
            &answers(&[("headache_onset", "Suddenly, within seconds")]),
        )
        .unwrap();
    assert_eq!(next.id, "headache_worst_ever");
}

#[test]
fn unmet_branch_falls_through_to_generic_questions() {
    let catalog = catalog();
    let mut asked = AskedQuestions::default();
    let mut engine = QuestionFlowEngine::new(&catalog, &mut asked);
    engine.first_question("headache");

    let next = engine
        .next_question(
            "headache",
            &answers(&[("headache_onset", "Gradually over hours")]),
        )
        .unwrap();
    assert_eq!(next.id, "duration");
    assert_eq!(next.text, "How long have you been experiencing headache?");
}

#[test]
fn branch_conditions_cover_substring_and_unconditional_edges() {
    let catalog = catalog();

    let mut asked = AskedQuestions::default();
    let mut engine = QuestionFlowEngine::new(&catalog, &mut asked);
    engine.first_question("cough");
    let next = engine
        .next_question("cough", &answers(&[("cough_duration", "3 to 8 weeks")]))
        .unwrap();
    assert_eq!(next.id, "cough_smoker");

    let mut asked = AskedQuestions::default();
    let mut engine = QuestionFlowEngine::new(&catalog, &mut asked);
    engine.first_question("cough");
    let next = engine
        .next_question("cough", &answers(&[("cough_duration", "Less than 3 weeks")]))
        .unwrap();
    assert_eq!(next.id, "duration");

    let mut asked = AskedQuestions::default();
    let mut engine = QuestionFlowEngine::new(&catalog, &mut asked);
    engine.first_question("fever");
    let next = engine
        .next_question("fever", &answers(&[("fever_temperature", "Not measured")]))
        .unwrap();
    assert_eq!(next.id, "fever_pattern");
}

#[test]
fn generic_battery_runs_in_priority_order_then_finishes() {
    let catalog = catalog();
    let mut asked = AskedQuestions::default();
    let mut engine = QuestionFlowEngine::new(&catalog, &mut asked);

    let mut question = engine.first_question("back pain");
    let mut given = BTreeMap::new();
    let mut ids = vec![question.id.clone()];

    loop {
        given.insert(question.id.clone(), first_option(&question));
        match engine.next_question("back pain", &given) {
            Some(next) => {
                ids.push(next.id.clone());
                question = next;
            }
            None => break,
        }
        assert!(ids.len() < 20, "sub-interview did not terminate: {ids:?}");
    }

    assert_eq!(
        ids,
        [
            "duration",
            "severity",
            "pattern",
            "additional_symptoms",
            "triggers",
            "impact",
            "relief"
        ]
    );
}

#[test]
fn high_severity_adds_worsening_question() {
    let catalog = catalog();
    let mut asked = AskedQuestions::default();
    let mut engine = QuestionFlowEngine::new(&catalog, &mut asked);
    engine.first_question("back pain");

    let given = answers(&[
        ("duration", "1-3 days"),
        ("severity", "8"),
        ("pattern", "Constant (always present)"),
    ]);
    let next = engine.next_question("back pain", &given).unwrap();
    assert_eq!(next.id, "worsening");
    assert_eq!(next.text, "Has your back pain gotten worse recently?");
}

#[test]
fn long_duration_adds_worsening_question() {
    let catalog = catalog();
    let mut asked = AskedQuestions::default();
    let mut engine = QuestionFlowEngine::new(&catalog, &mut asked);
    engine.first_question("back pain");

    let given = answers(&[
        ("duration", "1-2 weeks"),
        ("severity", "2"),
        ("pattern", "Constant (always present)"),
    ]);
    assert_eq!(engine.next_question("back pain", &given).unwrap().id, "worsening");
}

#[test]
fn questions_are_never_repeated_within_a_sub_interview() {
    let catalog = catalog();

    for symptom in ["headache", "chest pains", "persistent cough", "joint pain", "rash", "Shortness of breath"] {
        let mut asked = AskedQuestions::default();
        let mut engine = QuestionFlowEngine::new(&catalog, &mut asked);

        let mut question = engine.first_question(symptom);
        let mut given = BTreeMap::new();
        let mut ids = HashSet::from([question.id.clone()]);
        let mut texts = HashSet::from([question.text.clone()]);

        for _ in 0..30 {
            given.insert(question.id.clone(), first_option(&question));
            let Some(next) = engine.next_question(symptom, &given) else {
                break;
            };
            assert!(ids.insert(next.id.clone()), "{symptom}: repeated id {}", next.id);
            assert!(texts.insert(next.text.clone()), "{symptom}: repeated text {}", next.text);
            question = next;
        }

        assert!(engine.next_question(symptom, &given).is_none(), "{symptom} never finished");
    }
}

#[test]
fn family_questions_follow_the_generic_battery() {
    let given = answers(&[("cough_type", "Dry (no mucus)")]);
    assert_eq!(family_question("persistent cough", &given).unwrap().id, "cough_timing");

    let given = answers(&[("cough_type", "Both")]);
    assert_eq!(family_question("persistent cough", &given).unwrap().id, "sputum_color");

    let joints = family_question("joint pain", &BTreeMap::new()).unwrap();
    assert_eq!(joints.id, "joint_location");
    assert!(joints.multiple_select);

    let chest = family_question("chest discomfort", &BTreeMap::new()).unwrap();
    assert_eq!(chest.id, "chest_pain_location");

    assert!(family_question("back pain", &BTreeMap::new()).is_none());
}

#[test]
fn additional_symptoms_question_offers_related_symptoms() {
    let catalog = catalog();
    let mut asked = AskedQuestions::default();
    let mut engine = QuestionFlowEngine::new(&catalog, &mut asked);
    engine.first_question("back pain");

    let given = answers(&[
        ("duration", "1-3 days"),
        ("severity", "3"),
        ("pattern", "Constant (always present)"),
    ]);
    let question = engine.next_question("back pain", &given).unwrap();
    assert_eq!(question.id, "additional_symptoms");
    assert!(question.multiple_select);
    assert_eq!(
        question.options.unwrap(),
        ["Joint pain", "Fatigue", NONE_OF_THESE]
    );
}

#[test]
fn related_symptoms_prefer_explicit_relationships() {
    let catalog = catalog();

    let by_name = related_symptoms(&catalog, "headache");
    assert_eq!(by_name[0], "Nausea");
    assert_eq!(by_name.len(), 6);

    // Dizziness has a relationship entry only by symptom id.
    assert_eq!(
        related_symptoms(&catalog, "Dizziness"),
        ["Nausea", "Headache", "Fatigue", "Heart palpitations", "Fainting"]
    );
}

#[test]
fn related_symptoms_from_conditions_are_first_seen_and_capped() {
    let catalog = catalog();

    assert_eq!(
        related_symptoms(&catalog, "wheezing"),
        ["Shortness of breath", "Cough", "Chest pain"]
    );
    // Migraine is only an annotation on its condition.
    assert_eq!(
        related_symptoms(&catalog, "migraine"),
        ["Headache", "Sensitivity to light", "Nausea", "Vomiting", "Dizziness"]
    );
    assert_eq!(
        related_symptoms(&catalog, "fatigue"),
        ["Runny nose", "Sneezing", "Sore throat", "Cough", "Headache", "Fever", "Muscle aches", "Chills"]
    );
}

#[test]
fn related_symptoms_fall_back_to_tables() {
    let catalog = catalog();

    assert_eq!(
        related_symptoms(&catalog, "stomach pains"),
        ["Nausea", "Vomiting", "Diarrhea", "Loss of appetite", "Bloating", "Constipation"]
    );
    assert_eq!(related_symptoms(&catalog, "zzz"), DEFAULT_RELATED);
}

#[test]
fn triggers_are_tailored_to_the_symptom_family() {
    let catalog = catalog();
    let mut asked = AskedQuestions::default();
    let mut engine = QuestionFlowEngine::new(&catalog, &mut asked);
    engine.first_question("back pain");

    let given = answers(&[
        ("duration", "1-3 days"),
        ("severity", "3"),
        ("pattern", "Constant (always present)"),
        ("additional_symptoms", "None of these"),
    ]);
    let triggers = engine.next_question("back pain", &given).unwrap();
    assert_eq!(triggers.id, "triggers");

    let options = triggers.options.unwrap();
    let mut sorted = options.clone();
    sorted.sort();
    assert_eq!(options, sorted);
    assert!(options.contains(&"Lifting".to_string()));
    assert!(options.contains(&"Stress".to_string()));
}
