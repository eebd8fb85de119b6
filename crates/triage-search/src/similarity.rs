use std::collections::{HashMap, HashSet};

const SEQUENCE_WEIGHT: f64 = 0.6;
const JACCARD_WEIGHT: f64 = 0.3;
const PREFIX_WEIGHT: f64 = 0.1;

/// Lower-case, strip punctuation and collapse whitespace.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn words(text: &str) -> HashSet<&str> {
    text.split_whitespace().collect()
}

/// Blended similarity in `[0, 1]`: sequence ratio, word Jaccard and
/// word-prefix overlap. Inputs are compared as given; callers lower-case.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    // The prefix signal skips words under 3 characters.
    if a == b {
        return 1.0;
    }

    let direct = sequence_ratio(a, b);
    let a_words = words(a);
    let b_words = words(b);
    if a_words.is_empty() || b_words.is_empty() {
        return direct;
    }

    let intersection = a_words.intersection(&b_words).count();
    let union = a_words.union(&b_words).count();
    let jaccard = intersection as f64 / union as f64;

    let prefix = prefix_overlap(&a_words, &b_words);

    direct * SEQUENCE_WEIGHT + jaccard * JACCARD_WEIGHT + prefix * PREFIX_WEIGHT
}

/// Fraction of `a` words sharing a 3-5 character prefix with some `b` word.
fn prefix_overlap(a_words: &HashSet<&str>, b_words: &HashSet<&str>) -> f64 {
    let matched = a_words
        .iter()
        .filter(|a_word| {
            b_words.iter().any(|b_word| {
                let a_chars: Vec<char> = a_word.chars().collect();
                let b_chars: Vec<char> = b_word.chars().collect();
                let shorter = a_chars.len().min(b_chars.len());
                if shorter < 3 {
                    return false;
                }
                let len = shorter.min(5);
                a_chars[..len] == b_chars[..len]
            })
        })
        .count();

    matched as f64 / a_words.len().max(b_words.len()) as f64
}

/// `2 * M / (len(a) + len(b))` where `M` is the total size of the matching
/// blocks found by recursive longest-common-substring splitting.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut b_index: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, c) in b.iter().enumerate() {
        b_index.entry(*c).or_default().push(j);
    }

    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let (i, j, size) = longest_match(a, &b_index, a_lo, a_hi, b_lo, b_hi);
        if size == 0 {
            continue;
        }
        matched += size;
        if a_lo < i && b_lo < j {
            pending.push((a_lo, i, b_lo, j));
        }
        if i + size < a_hi && j + size < b_hi {
            pending.push((i + size, a_hi, j + size, b_hi));
        }
    }
    matched
}

/// Longest block `a[i..i+k] == b[j..j+k]` inside the given ranges. Ties go
/// to the earliest `i`, then the earliest `j`.
fn longest_match(
    a: &[char],
    b_index: &HashMap<char, Vec<usize>>,
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (a_lo, b_lo, 0);
    // Length of the match ending at (i - 1, j), keyed by j.
    let mut run_lengths: HashMap<usize, usize> = HashMap::new();

    for (i, c) in a.iter().enumerate().take(a_hi).skip(a_lo) {
        let mut next_runs = HashMap::new();
        if let Some(positions) = b_index.get(c) {
            for &j in positions {
                if j < b_lo {
                    continue;
                }
                if j >= b_hi {
                    break;
                }
                let k = j
                    .checked_sub(1)
                    .and_then(|prev| run_lengths.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next_runs.insert(j, k);
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            }
        }
        run_lengths = next_runs;
    }

    (best_i, best_j, best_size)
}
