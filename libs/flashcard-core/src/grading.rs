//! Answer grading for typed test answers.
//!
//! A submitted answer is compared to the expected text after normalization
//! (lowercase, punctuation stripped, trimmed). The grader is intentionally
//! strict for numbers and short words and tolerates a single typo in longer
//! single words. Multi-word answers are compared position by position.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Single words must be longer than this to get typo leniency.
pub const MIN_LENIENT_WORD_LEN: usize = 4;

/// Largest edit distance accepted for a lenient single word.
pub const MAX_TYPO_DISTANCE: usize = 1;

/// Minimum positional similarity for a phrase to be accepted.
pub const PHRASE_THRESHOLD: f64 = 0.9;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("non-word pattern is valid"));

static DIGITS_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("digits pattern is valid"));

/// Outcome of grading one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    /// Score in `[0, 1]`; only `1.0` counts as correct.
    pub score: f64,
    pub is_correct: bool,
    pub submitted_normalized: String,
    pub expected_normalized: String,
}

/// Canonical comparison form: lowercase, without punctuation, trimmed.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    NON_WORD.replace_all(&lowered, "").trim().to_string()
}

/// Calculate Levenshtein distance between two strings.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            curr[j] = if a_chars[i - 1] == b_chars[j - 1] {
                prev[j - 1]
            } else {
                1 + prev[j - 1].min(curr[j - 1]).min(prev[j])
            };
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Score a submitted answer against the expected one.
///
/// Returns `1.0` for a correct answer and `0.0` for an incorrect one. Phrases
/// that are accepted without being identical return their positional
/// similarity, which is always at least [`PHRASE_THRESHOLD`].
pub fn score(submitted: &str, expected: &str) -> f64 {
    score_normalized(&normalize(submitted), &normalize(expected))
}

/// Grade an answer, keeping the normalized forms for display.
pub fn grade(submitted: &str, expected: &str) -> Grade {
    let submitted_normalized = normalize(submitted);
    let expected_normalized = normalize(expected);
    let score = score_normalized(&submitted_normalized, &expected_normalized);

    Grade {
        score,
        is_correct: score == 1.0,
        submitted_normalized,
        expected_normalized,
    }
}

fn score_normalized(submitted: &str, expected: &str) -> f64 {
    if submitted == expected {
        return 1.0;
    }
    if submitted.is_empty() {
        return 0.0;
    }

    // Numbers never get typo leniency: "4" and "14" are different answers.
    if DIGITS_ONLY.is_match(submitted) && DIGITS_ONLY.is_match(expected) {
        return 0.0;
    }

    if is_single_word(submitted) && is_single_word(expected) {
        return single_word_score(submitted, expected);
    }

    phrase_score(submitted, expected)
}

fn is_single_word(text: &str) -> bool {
    text.split_whitespace().count() == 1
}

fn single_word_score(submitted: &str, expected: &str) -> f64 {
    let submitted_len = submitted.chars().count();
    let expected_len = expected.chars().count();

    let lenient = match submitted_len.abs_diff(expected_len) {
        0 => submitted_len > MIN_LENIENT_WORD_LEN,
        1 => submitted_len > MIN_LENIENT_WORD_LEN && expected_len > MIN_LENIENT_WORD_LEN,
        _ => false,
    };

    if lenient && edit_distance(submitted, expected) == MAX_TYPO_DISTANCE {
        1.0
    } else {
        0.0
    }
}

fn phrase_score(submitted: &str, expected: &str) -> f64 {
    let submitted: Vec<char> = submitted.chars().collect();
    let expected: Vec<char> = expected.chars().collect();

    // submitted is non-empty here, so max_len > 0
    let max_len = submitted.len().max(expected.len());
    let matches = submitted
        .iter()
        .zip(&expected)
        .filter(|(s, e)| s == e)
        .count();

    let similarity = matches as f64 / max_len as f64;
    if similarity >= PHRASE_THRESHOLD {
        similarity
    } else {
        0.0
    }
}
