//! The main interview as a state table.
//!
//! Each state has an entry prompt (what the user sees on arriving) and an
//! advance handler (what its answer records and where it leads). Handlers
//! only touch the session they are given.

use std::collections::HashMap;
use std::sync::LazyLock;

use tracing::debug;

use triage_core::models::answer::Answer;
use triage_core::models::prompt::Prompt;
use triage_core::models::question::InputType;
use triage_core::models::session::{DialogueSession, DialogueState, Flow};
use triage_knowledge::tables::IMPACT_OPTIONS;
use triage_knowledge::SymptomCatalog;

use crate::flow::{related_symptoms, QuestionFlowEngine, NONE_OF_THESE, OTHER_SYMPTOMS};

pub const START_OPTION: &str = "Yes, let's start";
pub const EXPLAIN_OPTION: &str = "What information will you collect?";
pub const VIEW_REPORT_OPTION: &str = "View my assessment report";

const DISCLAIMER: &str = "I'll ask you several detailed questions about your symptoms to \
provide a comprehensive assessment. This is not a substitute for professional medical advice, \
but I can help guide you. Shall we begin?";

const MIN_AGE: i64 = 0;
const MAX_AGE: i64 = 120;
/// Pregnancy is asked of female patients within this age range.
const PREGNANCY_AGES: std::ops::RangeInclusive<u32> = 12..=55;

/// Progress shown on the first sub-interview question.
const SUB_INTERVIEW_PROGRESS: u8 = 84;
/// Sub-interview progress never passes this.
const SUB_INTERVIEW_CAP: u8 = 95;

/// What an answer does to the interview.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Move to a new state and show its entry prompt.
    To(DialogueState),
    /// Stay in the current state and show this prompt instead.
    Ask(Prompt),
    /// Produce the final report.
    Report,
}

type EntryPrompt = fn(&DialogueSession, &SymptomCatalog) -> Prompt;
type Advance = fn(&mut DialogueSession, &Answer, &SymptomCatalog) -> Transition;

pub struct StateEntry {
    pub prompt: EntryPrompt,
    pub advance: Advance,
}

static STATES: LazyLock<HashMap<DialogueState, StateEntry>> = LazyLock::new(|| {
    use DialogueState::*;

    let entries: [(DialogueState, EntryPrompt, Advance); 28] = [
        (Introduction, |_, _| welcome(false), introduction),
        (Name, name_prompt, name),
        (Age, age_prompt, age),
        (BiologicalSex, biological_sex_prompt, biological_sex),
        (Pregnancy, pregnancy_prompt, pregnancy),
        (HeightWeight, height_weight_prompt, height_weight),
        (MedicalHistoryIntro, medical_history_intro_prompt, medical_history_intro),
        (MedicalHistoryConditions, conditions_prompt, conditions),
        (MedicalHistoryOther, other_condition_prompt, other_condition),
        (Medications, medications_prompt, medications),
        (MedicationsList, medications_list_prompt, medications_list),
        (Allergies, allergies_prompt, allergies),
        (AllergiesList, allergies_list_prompt, allergies_list),
        (FamilyHistory, family_history_prompt, family_history),
        (FamilyHistoryDetails, family_history_details_prompt, family_history_details),
        (LifestyleSmoking, smoking_prompt, smoking),
        (LifestyleAlcohol, alcohol_prompt, alcohol),
        (LifestyleExercise, exercise_prompt, exercise),
        (LifestyleDiet, diet_prompt, diet),
        (LifestyleStress, stress_prompt, stress),
        (LifestyleSleep, sleep_prompt, sleep),
        (SymptomEntry, symptom_entry_prompt, symptom_entry),
        (SymptomAssessment, sub_interview_prompt, sub_interview),
        (AdditionalSymptoms, additional_symptoms_prompt, additional_symptoms),
        (OtherSymptoms, other_symptoms_prompt, other_symptoms),
        (SymptomImpact, impact_prompt, impact),
        (PreviousTreatment, previous_treatment_prompt, previous_treatment),
        (Results, results_prompt, |_, _, _| Transition::Report),
    ];

    entries
        .into_iter()
        .map(|(state, prompt, advance)| (state, StateEntry { prompt, advance }))
        .collect()
});

/// The table entry for `state`, or `None` for a state the engine does not know.
pub fn entry(state: DialogueState) -> Option<&'static StateEntry> {
    STATES.get(&state)
}

/// Opening prompt of an interview.
pub fn welcome(new_session: bool) -> Prompt {
    let greeting = if new_session {
        "Starting a new health assessment."
    } else {
        "Hi, I'm your health assistant."
    };
    Prompt::new(format!("{greeting} {DISCLAIMER}"), 0).options([START_OPTION, EXPLAIN_OPTION])
}

/// Shown when the session is in a state that has no table entry.
pub fn start_over() -> Prompt {
    Prompt::new("I'm not sure how to proceed. Let's start over.", 0).options(["Start over"])
}

fn yes(answer: &Answer) -> bool {
    answer.is_ignore_case("yes")
}

fn text_of(answer: &Answer) -> String {
    answer.to_string().trim().to_string()
}

// -- demographics --------------------------------------------------------

fn introduction(_: &mut DialogueSession, answer: &Answer, _: &SymptomCatalog) -> Transition {
    if answer.is(EXPLAIN_OPTION) {
        return Transition::Ask(
            Prompt::new(
                "I'll ask about your personal details (name, age, sex), medical history, current \
                 symptoms, their severity and duration, and lifestyle factors. This helps me \
                 provide a more accurate assessment. All information is kept confidential. \
                 Would you like to proceed?",
                0,
            )
            .options([START_OPTION, "No, maybe later"]),
        );
    }
    Transition::To(DialogueState::Name)
}

fn name_prompt(_: &DialogueSession, _: &SymptomCatalog) -> Prompt {
    Prompt::new(
        "Great! First, what's your name? This helps me personalize our conversation.",
        5,
    )
    .input(InputType::Text)
}

fn name(session: &mut DialogueSession, answer: &Answer, _: &SymptomCatalog) -> Transition {
    session.gathered_info.name = Some(text_of(answer));
    Transition::To(DialogueState::Age)
}

fn age_prompt(session: &DialogueSession, _: &SymptomCatalog) -> Prompt {
    let name = session.gathered_info.name.as_deref().unwrap_or_default();
    Prompt::new(
        format!(
            "Nice to meet you, {name}. How old are you? Your age helps me understand which \
             conditions might be more relevant to you."
        ),
        8,
    )
    .input(InputType::Number)
}

fn age(session: &mut DialogueSession, answer: &Answer, _: &SymptomCatalog) -> Transition {
    let reprompt = |message: &str| {
        Transition::Ask(Prompt::new(message, session.progress).input(InputType::Number))
    };

    let Ok(age) = text_of(answer).parse::<i64>() else {
        return reprompt("Please enter a valid number for your age.");
    };
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return reprompt("Please enter a valid age between 0 and 120.");
    }
    let Ok(age) = u32::try_from(age) else {
        return reprompt("Please enter a valid age between 0 and 120.");
    };

    session.gathered_info.age = Some(age);
    Transition::To(DialogueState::BiologicalSex)
}

fn biological_sex_prompt(_: &DialogueSession, _: &SymptomCatalog) -> Prompt {
    Prompt::new(
        "What is your biological sex? This is important as certain medical conditions affect \
         biological sexes differently.",
        12,
    )
    .options(["Female", "Male", "Intersex"])
    .info(
        "Why is this important?",
        "Biological sex affects how symptoms present and which conditions are more likely. \
         For example, heart attack symptoms often differ between males and females.",
    )
}

fn biological_sex(session: &mut DialogueSession, answer: &Answer, _: &SymptomCatalog) -> Transition {
    let sex = text_of(answer);
    let female = sex.eq_ignore_ascii_case("female");
    session.gathered_info.biological_sex = Some(sex);

    let age = session.gathered_info.age.unwrap_or_default();
    if female && PREGNANCY_AGES.contains(&age) {
        Transition::To(DialogueState::Pregnancy)
    } else {
        Transition::To(DialogueState::HeightWeight)
    }
}

fn pregnancy_prompt(_: &DialogueSession, _: &SymptomCatalog) -> Prompt {
    Prompt::new(
        "Are you currently pregnant or is there a possibility you might be pregnant?",
        16,
    )
    .options(["Yes", "No", "Possibly", "I'm not sure"])
}

fn pregnancy(session: &mut DialogueSession, answer: &Answer, _: &SymptomCatalog) -> Transition {
    session.gathered_info.pregnancy_status = Some(text_of(answer));
    Transition::To(DialogueState::HeightWeight)
}

fn height_weight_prompt(session: &DialogueSession, _: &SymptomCatalog) -> Prompt {
    let progress = if session.gathered_info.pregnancy_status.is_some() {
        20
    } else {
        16
    };
    Prompt::new(
        "What is your height and weight? This helps assess your body mass index (BMI), which \
         can be relevant for certain conditions.",
        progress,
    )
    .input(InputType::Text)
    .placeholder("e.g., 5'10\", 160 lbs or 178 cm, 73 kg")
}

fn height_weight(session: &mut DialogueSession, answer: &Answer, _: &SymptomCatalog) -> Transition {
    session.gathered_info.height_weight = Some(text_of(answer));
    Transition::To(DialogueState::MedicalHistoryIntro)
}

// -- medical history -----------------------------------------------------

fn medical_history_intro_prompt(_: &DialogueSession, _: &SymptomCatalog) -> Prompt {
    Prompt::new(
        "Now I'll ask about your medical history. This information helps provide context for \
         your current symptoms. Do you have any diagnosed medical conditions?",
        24,
    )
    .options(["Yes", "No"])
}

fn medical_history_intro(_: &mut DialogueSession, answer: &Answer, _: &SymptomCatalog) -> Transition {
    if yes(answer) {
        Transition::To(DialogueState::MedicalHistoryConditions)
    } else {
        Transition::To(DialogueState::Medications)
    }
}

fn conditions_prompt(_: &DialogueSession, _: &SymptomCatalog) -> Prompt {
    Prompt::new("Please select any conditions you've been diagnosed with:", 28)
        .options([
            "Diabetes",
            "High blood pressure",
            "Heart disease",
            "Asthma",
            "COPD",
            "Cancer",
            "Thyroid disorder",
            "Autoimmune disease",
            "Kidney disease",
            "Liver disease",
            "Mental health condition",
            "Neurological disorder",
            "Other condition",
        ])
        .multiple()
}

fn conditions(session: &mut DialogueSession, answer: &Answer, _: &SymptomCatalog) -> Transition {
    session.gathered_info.medical_history.conditions = Some(answer.clone());
    if answer.mentions("Other condition") {
        Transition::To(DialogueState::MedicalHistoryOther)
    } else {
        Transition::To(DialogueState::Medications)
    }
}

fn other_condition_prompt(_: &DialogueSession, _: &SymptomCatalog) -> Prompt {
    Prompt::new(
        "You mentioned having another condition. Could you please specify what it is?",
        32,
    )
    .input(InputType::Text)
}

fn other_condition(session: &mut DialogueSession, answer: &Answer, _: &SymptomCatalog) -> Transition {
    session.gathered_info.medical_history.other_condition = Some(text_of(answer));
    Transition::To(DialogueState::Medications)
}

fn medications_prompt(_: &DialogueSession, _: &SymptomCatalog) -> Prompt {
    Prompt::new(
        "Are you currently taking any medications, including prescription, over-the-counter, \
         supplements, or herbal remedies?",
        32,
    )
    .options(["Yes", "No"])
}

fn medications(session: &mut DialogueSession, answer: &Answer, _: &SymptomCatalog) -> Transition {
    if yes(answer) {
        return Transition::To(DialogueState::MedicationsList);
    }
    session.gathered_info.medications = Some("None".to_string());
    Transition::To(DialogueState::Allergies)
}

fn medications_list_prompt(_: &DialogueSession, _: &SymptomCatalog) -> Prompt {
    Prompt::new(
        "Please list the medications you're taking. Include the name, dosage if known, and how \
         often you take them.",
        36,
    )
    .input(InputType::Text)
    .placeholder("e.g., Lisinopril 10mg daily, Vitamin D 1000IU daily")
}

fn medications_list(session: &mut DialogueSession, answer: &Answer, _: &SymptomCatalog) -> Transition {
    session.gathered_info.medications = Some(text_of(answer));
    Transition::To(DialogueState::Allergies)
}

fn allergies_prompt(_: &DialogueSession, _: &SymptomCatalog) -> Prompt {
    Prompt::new(
        "Do you have any allergies to medications, foods, or environmental factors?",
        40,
    )
    .options(["Yes", "No"])
}

fn allergies(session: &mut DialogueSession, answer: &Answer, _: &SymptomCatalog) -> Transition {
    if yes(answer) {
        return Transition::To(DialogueState::AllergiesList);
    }
    session.gathered_info.allergies = Some("None".to_string());
    Transition::To(DialogueState::FamilyHistory)
}

fn allergies_list_prompt(_: &DialogueSession, _: &SymptomCatalog) -> Prompt {
    Prompt::new("Please list your allergies and any reactions you experience:", 44)
        .input(InputType::Text)
        .placeholder("e.g., Penicillin (rash), Peanuts (anaphylaxis)")
}

fn allergies_list(session: &mut DialogueSession, answer: &Answer, _: &SymptomCatalog) -> Transition {
    session.gathered_info.allergies = Some(text_of(answer));
    Transition::To(DialogueState::FamilyHistory)
}

fn family_history_prompt(_: &DialogueSession, _: &SymptomCatalog) -> Prompt {
    Prompt::new(
        "Do any medical conditions run in your family? Family history can be relevant for many \
         health issues.",
        48,
    )
    .options(["Yes", "No", "I don't know"])
}

fn family_history(session: &mut DialogueSession, answer: &Answer, _: &SymptomCatalog) -> Transition {
    if yes(answer) {
        return Transition::To(DialogueState::FamilyHistoryDetails);
    }
    session.gathered_info.family_history = Some(answer.clone());
    Transition::To(DialogueState::LifestyleSmoking)
}

fn family_history_details_prompt(_: &DialogueSession, _: &SymptomCatalog) -> Prompt {
    Prompt::new(
        "Please select any conditions that run in your immediate family (parents, siblings, \
         children):",
        52,
    )
    .options([
        "Heart disease",
        "Diabetes",
        "Cancer",
        "High blood pressure",
        "Stroke",
        "Mental health conditions",
        "Autoimmune disorders",
        "Other condition",
    ])
    .multiple()
}

fn family_history_details(
    session: &mut DialogueSession,
    answer: &Answer,
    _: &SymptomCatalog,
) -> Transition {
    session.gathered_info.family_history = Some(answer.clone());
    Transition::To(DialogueState::LifestyleSmoking)
}

// -- lifestyle -----------------------------------------------------------

fn smoking_prompt(_: &DialogueSession, _: &SymptomCatalog) -> Prompt {
    Prompt::new("Do you smoke tobacco or use e-cigarettes/vaping products?", 56).options([
        "Currently smoke",
        "Used to smoke",
        "Never smoked",
        "Use e-cigarettes/vape",
    ])
}

fn smoking(session: &mut DialogueSession, answer: &Answer, _: &SymptomCatalog) -> Transition {
    session.gathered_info.lifestyle.smoking = Some(text_of(answer));
    Transition::To(DialogueState::LifestyleAlcohol)
}

fn alcohol_prompt(_: &DialogueSession, _: &SymptomCatalog) -> Prompt {
    Prompt::new("How often do you consume alcoholic beverages?", 60).options([
        "Never",
        "Occasionally",
        "Weekly",
        "Several times per week",
        "Daily",
    ])
}

fn alcohol(session: &mut DialogueSession, answer: &Answer, _: &SymptomCatalog) -> Transition {
    session.gathered_info.lifestyle.alcohol = Some(text_of(answer));
    Transition::To(DialogueState::LifestyleExercise)
}

fn exercise_prompt(_: &DialogueSession, _: &SymptomCatalog) -> Prompt {
    Prompt::new("How would you describe your physical activity level?", 64).options([
        "Sedentary (little to no exercise)",
        "Light (1-3 days/week)",
        "Moderate (3-5 days/week)",
        "Active (6-7 days/week)",
        "Very active (multiple times daily)",
    ])
}

fn exercise(session: &mut DialogueSession, answer: &Answer, _: &SymptomCatalog) -> Transition {
    session.gathered_info.lifestyle.exercise = Some(text_of(answer));
    Transition::To(DialogueState::LifestyleDiet)
}

fn diet_prompt(_: &DialogueSession, _: &SymptomCatalog) -> Prompt {
    Prompt::new("How would you describe your diet?", 68).options([
        "Balanced diet",
        "Vegetarian",
        "Vegan",
        "Keto/low-carb",
        "High protein",
        "Restricted due to allergies/conditions",
        "Irregular eating patterns",
    ])
}

fn diet(session: &mut DialogueSession, answer: &Answer, _: &SymptomCatalog) -> Transition {
    session.gathered_info.lifestyle.diet = Some(text_of(answer));
    Transition::To(DialogueState::LifestyleStress)
}

fn stress_prompt(_: &DialogueSession, _: &SymptomCatalog) -> Prompt {
    Prompt::new("How would you rate your current stress level?", 72)
        .options(["Low", "Moderate", "High", "Very high"])
}

fn stress(session: &mut DialogueSession, answer: &Answer, _: &SymptomCatalog) -> Transition {
    session.gathered_info.lifestyle.stress = Some(text_of(answer));
    Transition::To(DialogueState::LifestyleSleep)
}

fn sleep_prompt(_: &DialogueSession, _: &SymptomCatalog) -> Prompt {
    Prompt::new("How many hours of sleep do you typically get per night?", 76).options([
        "Less than 5 hours",
        "5-6 hours",
        "7-8 hours",
        "More than 8 hours",
        "Irregular sleep pattern",
    ])
}

fn sleep(session: &mut DialogueSession, answer: &Answer, _: &SymptomCatalog) -> Transition {
    session.gathered_info.lifestyle.sleep = Some(text_of(answer));
    Transition::To(DialogueState::SymptomEntry)
}

// -- symptoms ------------------------------------------------------------

fn symptom_entry_prompt(_: &DialogueSession, _: &SymptomCatalog) -> Prompt {
    Prompt::new(
        "Now, let's focus on why you're seeking help today. What's the main symptom that's \
         bothering you?",
        80,
    )
    .input(InputType::SymptomSearch)
    .placeholder("e.g., headache, cough, stomach pain")
}

/// Record the primary symptom and open its sub-interview.
fn symptom_entry(session: &mut DialogueSession, answer: &Answer, catalog: &SymptomCatalog) -> Transition {
    let symptom = text_of(answer);
    if symptom.is_empty() {
        return Transition::Ask(symptom_entry_prompt(session, catalog));
    }

    session.symptoms.push(symptom.clone());
    // A sub-interview starts with no answers, including after going back.
    session.symptom_details.clear();
    session.current_flow = Flow::SymptomSpecific;
    session.symptom_specific_flow = Some(symptom.to_lowercase());

    let mut engine = QuestionFlowEngine::new(catalog, &mut session.asked);
    engine.reset();
    let question = engine.first_question(&symptom);
    debug!(session_id = %session.id, symptom = %symptom, question = %question.id, "sub-interview started");

    session.last_question_text = Some(question.text.clone());
    session.current_question = Some(question);
    Transition::To(DialogueState::SymptomAssessment)
}

fn sub_interview_progress(session: &DialogueSession) -> u8 {
    let answered = u8::try_from(session.symptom_details.len()).unwrap_or(u8::MAX);
    SUB_INTERVIEW_PROGRESS
        .saturating_add(answered.saturating_mul(2))
        .min(SUB_INTERVIEW_CAP)
}

fn sub_interview_prompt(session: &DialogueSession, catalog: &SymptomCatalog) -> Prompt {
    match &session.current_question {
        Some(question) => Prompt::from_question(question, sub_interview_progress(session)),
        None => symptom_entry_prompt(session, catalog),
    }
}

/// One turn of the symptom-specific sub-interview: record the answer to
/// the current question and ask the next one, or hand back to the main
/// flow once no further questions apply.
pub fn sub_interview(session: &mut DialogueSession, answer: &Answer, catalog: &SymptomCatalog) -> Transition {
    if let Some(question) = &session.current_question {
        session
            .symptom_details
            .insert(question.id.clone(), answer.clone());
    }

    let symptom = session.primary_symptom().unwrap_or_default().to_string();
    let next = QuestionFlowEngine::new(catalog, &mut session.asked)
        .next_question(&symptom, &session.symptom_details);

    match next {
        Some(question) if session.last_question_text.as_deref() != Some(question.text.as_str()) => {
            session.last_question_text = Some(question.text.clone());
            let prompt = Prompt::from_question(&question, 0);
            session.current_question = Some(question);
            Transition::Ask(Prompt {
                progress: sub_interview_progress(session),
                ..prompt
            })
        }
        _ => {
            debug!(session_id = %session.id, answers = session.symptom_details.len(), "sub-interview finished");
            session.current_flow = Flow::Main;
            Transition::To(DialogueState::AdditionalSymptoms)
        }
    }
}

fn additional_symptoms_prompt(session: &DialogueSession, catalog: &SymptomCatalog) -> Prompt {
    let symptom = session.primary_symptom().unwrap_or_default();
    let mut options = related_symptoms(catalog, symptom);
    options.push(NONE_OF_THESE.to_string());
    options.push(OTHER_SYMPTOMS.to_string());

    Prompt::new(
        "Are you experiencing any other symptoms along with your main concern?",
        92,
    )
    .options(options)
    .multiple()
}

fn additional_symptoms(session: &mut DialogueSession, answer: &Answer, _: &SymptomCatalog) -> Transition {
    if answer.is(NONE_OF_THESE) {
        return Transition::To(DialogueState::SymptomImpact);
    }
    if answer.is(OTHER_SYMPTOMS) {
        return Transition::To(DialogueState::OtherSymptoms);
    }

    session.symptoms.extend(
        answer
            .items()
            .into_iter()
            .filter(|item| item != NONE_OF_THESE && item != OTHER_SYMPTOMS),
    );

    if matches!(answer, Answer::Choices(_)) && answer.mentions(OTHER_SYMPTOMS) {
        Transition::To(DialogueState::OtherSymptoms)
    } else {
        Transition::To(DialogueState::SymptomImpact)
    }
}

fn other_symptoms_prompt(_: &DialogueSession, _: &SymptomCatalog) -> Prompt {
    Prompt::new("Please describe any other symptoms you're experiencing:", 94)
        .input(InputType::Text)
}

fn other_symptoms(session: &mut DialogueSession, answer: &Answer, _: &SymptomCatalog) -> Transition {
    session.symptoms.extend(answer.items());
    Transition::To(DialogueState::SymptomImpact)
}

fn impact_prompt(_: &DialogueSession, _: &SymptomCatalog) -> Prompt {
    Prompt::new(
        "How much are your symptoms affecting your daily activities?",
        94,
    )
    .options(IMPACT_OPTIONS.iter().copied())
}

fn impact(session: &mut DialogueSession, answer: &Answer, _: &SymptomCatalog) -> Transition {
    session
        .symptom_details
        .insert("impact".to_string(), answer.clone());
    Transition::To(DialogueState::PreviousTreatment)
}

fn previous_treatment_prompt(_: &DialogueSession, _: &SymptomCatalog) -> Prompt {
    Prompt::new(
        "Have you tried any treatments or remedies for these symptoms?",
        98,
    )
    .options([
        "No treatment tried",
        "Over-the-counter medication",
        "Prescription medication",
        "Home remedies",
        "Rest/lifestyle changes",
        "Other",
    ])
    .multiple()
}

fn previous_treatment(session: &mut DialogueSession, answer: &Answer, _: &SymptomCatalog) -> Transition {
    session
        .symptom_details
        .insert("previous_treatment".to_string(), answer.clone());
    Transition::To(DialogueState::Results)
}

fn results_prompt(_: &DialogueSession, _: &SymptomCatalog) -> Prompt {
    Prompt::new(
        "Thank you for providing all this information. I now have enough details to generate \
         your health assessment report.",
        99,
    )
    .options([VIEW_REPORT_OPTION])
}
