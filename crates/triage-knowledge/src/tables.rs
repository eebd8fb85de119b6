//! Fixed lookup tables. Keys of the per-family tables are matched against a
//! user's symptom text with fuzzy scoring by the caller.

/// Symptoms commonly reported together with a symptom family.
pub const RELATED_BY_FAMILY: &[(&str, &[&str])] = &[
    ("headache", &["Nausea", "Sensitivity to light", "Dizziness", "Fatigue", "Vision changes", "Neck pain"]),
    ("cough", &["Sore throat", "Runny nose", "Fever", "Shortness of breath", "Chest pain", "Wheezing"]),
    ("fever", &["Chills", "Sweating", "Headache", "Muscle aches", "Fatigue", "Loss of appetite"]),
    ("stomach pain", &["Nausea", "Vomiting", "Diarrhea", "Loss of appetite", "Bloating", "Constipation"]),
    ("abdominal pain", &["Nausea", "Vomiting", "Diarrhea", "Loss of appetite", "Bloating", "Constipation"]),
    ("chest pain", &["Shortness of breath", "Sweating", "Nausea", "Dizziness", "Pain in arm or jaw", "Heart palpitations"]),
    ("rash", &["Itching", "Swelling", "Redness", "Fever", "Pain", "Blisters"]),
    ("fatigue", &["Headache", "Muscle weakness", "Difficulty concentrating", "Sleep problems", "Sore throat", "Low mood"]),
    ("runny nose", &["Sneezing", "Congestion", "Sore throat", "Cough", "Watery eyes", "Itchy eyes"]),
    ("joint pain", &["Swelling", "Redness", "Stiffness", "Limited movement", "Warmth in the joint", "Morning stiffness"]),
    ("back pain", &["Stiffness", "Numbness", "Tingling", "Weakness", "Difficulty moving", "Pain radiating to legs"]),
    ("dizziness", &["Lightheadedness", "Vertigo", "Nausea", "Headache", "Balance problems", "Fainting"]),
    ("shortness of breath", &["Chest pain", "Cough", "Wheezing", "Fatigue", "Rapid breathing", "Blue lips or fingernails"]),
    ("nausea", &["Vomiting", "Loss of appetite", "Stomach pain", "Dizziness", "Headache", "Diarrhea"]),
    ("anxiety", &["Racing heart", "Sweating", "Trembling", "Difficulty concentrating", "Sleep problems", "Irritability"]),
    ("depression", &["Low mood", "Loss of interest", "Fatigue", "Sleep changes", "Appetite changes", "Difficulty concentrating"]),
];

/// Used when nothing else yields related symptoms.
pub const DEFAULT_RELATED: &[&str] = &[
    "Fever",
    "Fatigue",
    "Nausea",
    "Dizziness",
    "Shortness of breath",
    "Headache",
];

pub const COMMON_TRIGGERS: &[&str] = &[
    "Physical activity",
    "Stress",
    "Time of day",
    "Weather changes",
    "Nothing specific",
];

pub const TRIGGERS_BY_FAMILY: &[(&str, &[&str])] = &[
    ("headache", &["Bright lights", "Loud noises", "Certain foods", "Alcohol", "Lack of sleep", "Screen time"]),
    ("cough", &["Cold air", "Talking", "Lying down", "Deep breathing", "Dust or allergens"]),
    ("stomach pain", &["Eating", "Specific foods", "Hunger", "Stress", "Alcohol"]),
    ("abdominal pain", &["Eating", "Specific foods", "Hunger", "Stress", "Alcohol"]),
    ("chest pain", &["Physical exertion", "Stress", "Eating", "Deep breathing", "Lying down"]),
    ("rash", &["Heat", "Certain foods", "Medications", "Contact with substances", "Stress"]),
    ("joint pain", &["Movement", "Weather changes", "Physical activity", "Rest", "Specific positions"]),
    ("back pain", &["Sitting", "Standing", "Bending", "Lifting", "Specific movements"]),
    ("dizziness", &["Standing up", "Moving head", "Specific positions", "Eating"]),
    ("shortness of breath", &["Exercise", "Lying down", "Exposure to allergens", "Cold air"]),
    ("fatigue", &["Physical activity", "Mental exertion", "Stress", "Poor sleep", "Time of day"]),
    ("anxiety", &["Social situations", "Specific thoughts", "Uncertainty", "Work/school stress"]),
    ("depression", &["Time of day", "Social situations", "Specific thoughts", "Anniversaries/holidays"]),
];

pub const COMMON_RELIEF: &[&str] = &[
    "Over-the-counter medication",
    "Rest",
    "Home remedies",
    "Prescription medication",
    "Nothing has helped",
];

pub const RELIEF_BY_FAMILY: &[(&str, &[&str])] = &[
    ("headache", &["Pain relievers", "Dark room", "Cold compress", "Caffeine", "Sleep"]),
    ("cough", &["Cough medicine", "Warm liquids", "Honey", "Humidifier", "Throat lozenges"]),
    ("fever", &["Fever reducers", "Cool compress", "Staying hydrated", "Light clothing"]),
    ("stomach pain", &["Antacids", "Heating pad", "Avoiding certain foods", "Small meals", "Ginger tea"]),
    ("abdominal pain", &["Antacids", "Heating pad", "Avoiding certain foods", "Small meals", "Ginger tea"]),
    ("chest pain", &["Resting", "Pain medication", "Antacids", "Sitting upright"]),
    ("rash", &["Topical creams", "Cool compress", "Antihistamines", "Avoiding irritants", "Oatmeal bath"]),
    ("joint pain", &["Pain relievers", "Hot/cold therapy", "Gentle stretching", "Joint braces", "Elevation"]),
    ("back pain", &["Pain relievers", "Heat therapy", "Cold therapy", "Stretching", "Massage"]),
    ("dizziness", &["Sitting down", "Hydration", "Avoiding sudden movements", "Ginger"]),
    ("shortness of breath", &["Sitting upright", "Using a fan", "Pursed lip breathing", "Inhaler"]),
    ("fatigue", &["Short naps", "Caffeine", "Regular sleep schedule", "Gentle exercise"]),
    ("anxiety", &["Deep breathing", "Meditation", "Talking to someone", "Distraction techniques"]),
    ("depression", &["Exercise", "Socializing", "Therapy", "Light therapy", "Regular routine"]),
];

pub const ACUTE_DURATIONS: &[&str] = &[
    "Less than 24 hours",
    "1-3 days",
    "4-7 days",
    "1-2 weeks",
    "2-4 weeks",
    "1-3 months",
    "More than 3 months",
];

pub const CHRONIC_DURATIONS: &[&str] = &[
    "Less than 1 week",
    "1-4 weeks",
    "1-3 months",
    "3-6 months",
    "6-12 months",
    "More than 1 year",
];

pub const COMMON_PATTERNS: &[&str] = &[
    "Constant (always present)",
    "Intermittent (comes and goes)",
    "Worsening over time",
    "Improving over time",
    "Fluctuating (varies in intensity)",
];

pub const SEVERITY_SCALE: &[&str] = &[
    "1 (Very mild)",
    "2",
    "3",
    "4",
    "5 (Moderate)",
    "6",
    "7",
    "8",
    "9",
    "10 (Severe)",
];

pub const WORSENING_OPTIONS: &[&str] = &[
    "Yes, significantly worse",
    "Yes, somewhat worse",
    "No change",
    "It's actually improving",
];

pub const IMPACT_OPTIONS: &[&str] = &[
    "Not at all",
    "Slightly limiting",
    "Moderately limiting",
    "Severely limiting",
    "Completely unable to perform normal activities",
];

/// Symptom keyword → specialists who usually handle it.
pub const SPECIALISTS_BY_SYMPTOM: &[(&str, &[&str])] = &[
    ("headache", &["Neurologist", "Primary Care Physician"]),
    ("migraine", &["Neurologist", "Primary Care Physician"]),
    ("fever", &["Primary Care Physician", "Infectious Disease Specialist"]),
    ("cough", &["Pulmonologist", "Primary Care Physician"]),
    ("chest pain", &["Cardiologist", "Pulmonologist", "Emergency Medicine"]),
    ("shortness of breath", &["Pulmonologist", "Cardiologist"]),
    ("abdominal pain", &["Gastroenterologist", "Primary Care Physician"]),
    ("stomach pain", &["Gastroenterologist", "Primary Care Physician"]),
    ("joint pain", &["Rheumatologist", "Orthopedic Surgeon"]),
    ("back pain", &["Orthopedic Surgeon", "Neurologist", "Physical Therapist"]),
    ("rash", &["Dermatologist", "Allergist"]),
    ("sore throat", &["Otolaryngologist", "Primary Care Physician"]),
    ("runny nose", &["Allergist", "Otolaryngologist"]),
    ("dizziness", &["Neurologist", "Otolaryngologist", "Cardiologist"]),
    ("fatigue", &["Primary Care Physician", "Endocrinologist", "Rheumatologist"]),
    ("nausea", &["Gastroenterologist", "Primary Care Physician"]),
    ("vomiting", &["Gastroenterologist", "Emergency Medicine"]),
    ("diarrhea", &["Gastroenterologist", "Primary Care Physician", "Infectious Disease Specialist"]),
    ("constipation", &["Gastroenterologist", "Primary Care Physician"]),
    ("blood in stool", &["Gastroenterologist", "Colorectal Surgeon"]),
    ("urinary problems", &["Urologist", "Nephrologist"]),
    ("skin issues", &["Dermatologist"]),
    ("eye problems", &["Ophthalmologist"]),
    ("ear pain", &["Otolaryngologist"]),
    ("hearing loss", &["Audiologist", "Otolaryngologist"]),
    ("vision changes", &["Ophthalmologist", "Neurologist"]),
    ("numbness", &["Neurologist"]),
    ("tingling", &["Neurologist"]),
    ("weakness", &["Neurologist", "Rheumatologist"]),
    ("hair loss", &["Dermatologist", "Endocrinologist"]),
    ("weight loss", &["Primary Care Physician", "Endocrinologist", "Gastroenterologist"]),
    ("weight gain", &["Primary Care Physician", "Endocrinologist"]),
    ("anxiety", &["Psychiatrist", "Psychologist"]),
    ("depression", &["Psychiatrist", "Psychologist"]),
    ("sleep problems", &["Sleep Specialist", "Neurologist", "Psychiatrist"]),
    ("memory issues", &["Neurologist", "Geriatrician", "Psychiatrist"]),
    ("breathing difficulty", &["Pulmonologist", "Cardiologist", "Allergist"]),
    ("heart palpitations", &["Cardiologist"]),
    ("swelling", &["Primary Care Physician", "Cardiologist", "Rheumatologist"]),
    ("joint swelling", &["Rheumatologist", "Orthopedic Surgeon"]),
    ("muscle pain", &["Rheumatologist", "Orthopedic Surgeon", "Physical Therapist"]),
    ("watery eyes", &["Ophthalmologist", "Allergist"]),
    ("sneezing", &["Allergist", "Otolaryngologist", "Primary Care Physician"]),
];

const SPECIALIST_DESCRIPTIONS: &[(&str, &str)] = &[
    ("Primary Care Physician", "For general health concerns and initial evaluation"),
    ("Neurologist", "Specializes in disorders of the brain and nervous system"),
    ("Cardiologist", "Specializes in heart conditions"),
    ("Pulmonologist", "Specializes in lung and respiratory conditions"),
    ("Gastroenterologist", "Specializes in digestive system disorders"),
    ("Dermatologist", "Specializes in skin conditions"),
    ("Rheumatologist", "Specializes in autoimmune and inflammatory conditions"),
    ("Orthopedic Surgeon", "Specializes in bone and joint conditions"),
    ("Otolaryngologist", "Specializes in ear, nose, and throat conditions"),
    ("Allergist", "Specializes in allergies and immune system disorders"),
    ("Endocrinologist", "Specializes in hormone-related conditions"),
    ("Infectious Disease Specialist", "Specializes in infections and related conditions"),
    ("Emergency Medicine", "For urgent and emergency medical conditions"),
    ("Psychiatrist", "Specializes in mental health conditions with medication management"),
    ("Psychologist", "Specializes in mental health therapy and counseling"),
    ("Ophthalmologist", "Specializes in eye diseases and conditions"),
    ("Urologist", "Specializes in urinary tract and male reproductive system"),
    ("Nephrologist", "Specializes in kidney diseases"),
    ("Colorectal Surgeon", "Specializes in conditions affecting the colon and rectum"),
    ("Audiologist", "Specializes in hearing disorders"),
    ("Sleep Specialist", "Specializes in sleep disorders and sleep medicine"),
    ("Geriatrician", "Specializes in healthcare for older adults"),
    ("Physical Therapist", "Specializes in physical rehabilitation and pain management"),
];

/// Static description for a specialist; unknown names get a generic one.
pub fn describe_specialist(name: &str) -> &'static str {
    SPECIALIST_DESCRIPTIONS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, description)| *description)
        .unwrap_or("Medical specialist")
}

/// Look up a family table entry by its exact key.
pub fn family_entry(table: &'static [(&'static str, &'static [&'static str])], key: &str) -> Option<&'static [&'static str]> {
    table
        .iter()
        .find(|(family, _)| *family == key)
        .map(|(_, entries)| *entries)
}
