use triage_search::similarity::sequence_ratio;
use triage_search::{normalize, similarity};

#[test]
fn identical_strings_score_one() {
    for text in ["fever", "chest pain", "shortness of breath", "a"] {
        assert_eq!(similarity(text, text), 1.0, "{text}");
    }
}

#[test]
fn identical_strings_with_short_words_score_one() {
    for text in ["pain in leg", "ringing in ears", "a b", "of"] {
        assert_eq!(similarity(text, text), 1.0, "{text}");
    }
}

#[test]
fn empty_input_scores_zero() {
    assert_eq!(similarity("", "x"), 0.0);
    assert_eq!(similarity("x", ""), 0.0);
    assert_eq!(similarity("", ""), 0.0);
}

#[test]
fn sequence_ratio_matches_block_matching() {
    // "abcd" vs "bcde": one block "bcd" of length 3.
    assert!((sequence_ratio("abcd", "bcde") - 0.75).abs() < 1e-9);
    // Two blocks after splitting around the longest match: "ab " and "xy".
    assert!((sequence_ratio("ab xy", "ab zxy") - 10.0 / 11.0).abs() < 1e-9);
    assert_eq!(sequence_ratio("abc", "xyz"), 0.0);
}

#[test]
fn shared_words_and_prefixes_raise_the_score() {
    let related = similarity("chest pains", "chest pain");
    let unrelated = similarity("chest pains", "back ache");
    assert!(related > 0.7, "{related}");
    assert!(unrelated < 0.5, "{unrelated}");
}

#[test]
fn similarity_stays_in_unit_range() {
    let pairs = [
        ("headache", "head ache"),
        ("stomach pain", "abdominal pain"),
        ("cough", "coughing up blood"),
        ("x", "xxxxxxxxxxxxxxxxxxxx"),
    ];
    for (a, b) in pairs {
        let score = similarity(a, b);
        assert!((0.0..=1.0).contains(&score), "{a} / {b}: {score}");
    }
}

#[test]
fn normalize_strips_punctuation_and_collapses_whitespace() {
    assert_eq!(normalize("  Chest-Pain!!  "), "chestpain");
    assert_eq!(normalize("Shortness   of\tbreath."), "shortness of breath");
    assert_eq!(normalize("?!"), "");
}
