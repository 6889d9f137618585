//! Character highlighting of a typed answer against the expected answer.

use crate::grading::normalize;
use serde::{Deserialize, Serialize};

/// Text shown where the typed answer is shorter than the expected one.
pub const MISSING_PLACEHOLDER: &str = "_";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Same character in both answers (ignoring case).
    Match,
    /// Typed character differs from the expected one.
    Mismatch,
    /// Typed answer is longer than the expected one.
    Extra,
    /// Expected answer is longer than the typed one.
    Missing,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HighlightSegment {
    pub text: String,
    pub kind: SegmentKind,
}

impl HighlightSegment {
    fn new(text: impl Into<String>, kind: SegmentKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// Tag each character of the typed answer by position.
///
/// Alignment is index by index, not edit-distance based. When both answers
/// normalize to the same text the whole typed answer is a match, even if
/// punctuation shifts the positions.
pub fn highlight(submitted: &str, expected: &str) -> Vec<HighlightSegment> {
    let submitted = submitted.trim();
    let expected = expected.trim();

    if normalize(submitted) == normalize(expected) {
        return submitted
            .chars()
            .map(|c| HighlightSegment::new(c, SegmentKind::Match))
            .collect();
    }

    let submitted: Vec<char> = submitted.chars().collect();
    let expected: Vec<char> = expected.chars().collect();
    let len = submitted.len().max(expected.len());

    (0..len)
        .filter_map(|i| match (submitted.get(i), expected.get(i)) {
            (Some(&s), Some(&e)) if s.to_lowercase().eq(e.to_lowercase()) => {
                Some(HighlightSegment::new(s, SegmentKind::Match))
            }
            (Some(&s), Some(_)) => Some(HighlightSegment::new(s, SegmentKind::Mismatch)),
            (Some(&s), None) => Some(HighlightSegment::new(s, SegmentKind::Extra)),
            (None, Some(_)) => Some(HighlightSegment::new(
                MISSING_PLACEHOLDER,
                SegmentKind::Missing,
            )),
            (None, None) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(segments: &[HighlightSegment]) -> Vec<SegmentKind> {
        segments.iter().map(|s| s.kind).collect()
    }

    fn text(segments: &[HighlightSegment]) -> String {
        segments.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_equal_after_normalization_is_all_match() {
        let segments = highlight("  Paris! ", "paris");
        assert_eq!(text(&segments), "Paris!");
        assert!(segments.iter().all(|s| s.kind == SegmentKind::Match));
    }

    #[test]
    fn test_mismatch_ignores_case() {
        use SegmentKind::*;
        let segments = highlight("ReSiliant", "resilient");
        assert_eq!(
            kinds(&segments),
            vec![Match, Match, Match, Match, Match, Match, Mismatch, Match, Match]
        );
        assert_eq!(text(&segments), "ReSiliant");
    }

    #[test]
    fn test_extra_characters() {
        use SegmentKind::*;
        let segments = highlight("cats", "cab");
        assert_eq!(kinds(&segments), vec![Match, Match, Mismatch, Extra]);
    }

    #[test]
    fn test_missing_characters_use_placeholder() {
        use SegmentKind::*;
        let segments = highlight("ca", "cart");
        assert_eq!(kinds(&segments), vec![Match, Match, Missing, Missing]);
        assert_eq!(text(&segments), "ca__");
    }

    #[test]
    fn test_empty_submission() {
        let segments = highlight("", "abc");
        assert_eq!(segments.len(), 3);
        assert!(segments.iter().all(|s| s.kind == SegmentKind::Missing));
    }

    #[test]
    fn test_both_empty() {
        assert!(highlight("", "   ").is_empty());
    }

    #[test]
    fn test_segment_serializes_snake_case() {
        let json = serde_json::to_string(&HighlightSegment::new("_", SegmentKind::Missing))
            .expect("serialize");
        assert_eq!(json, r#"{"text":"_","kind":"missing"}"#);
    }
}
