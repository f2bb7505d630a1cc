//! Comparison verdicts and the injected equality predicate.

use serde::{Deserialize, Serialize};

use crate::normalize::NormalizedText;

/// Decides whether normalized output and normalized expected text are equal.
///
/// Exact versus fuzzy matching is a platform policy, so the checker takes it
/// as a collaborator. Any `Fn(&[u8], &[u8]) -> bool` closure works too.
pub trait TextEquality: Send + Sync {
    /// Returns true when `output` should be accepted as matching `expected`.
    fn texts_equal(&self, output: &[u8], expected: &[u8]) -> bool;
}

/// Byte-for-byte equality.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatch;

impl TextEquality for ExactMatch {
    fn texts_equal(&self, output: &[u8], expected: &[u8]) -> bool {
        output == expected
    }
}

impl<F> TextEquality for F
where
    F: Fn(&[u8], &[u8]) -> bool + Send + Sync,
{
    fn texts_equal(&self, output: &[u8], expected: &[u8]) -> bool {
        self(output, expected)
    }
}

/// Outcome of comparing a test's output against its baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonResult {
    /// Output matched (or was just written as the new baseline).
    Match,
    /// There was no baseline to compare against.
    MissingBaseline,
    /// A baseline exists and the output differs from it.
    ContentMismatch,
}

impl ComparisonResult {
    /// Classify a comparison given the predicate's verdict and the expected text.
    #[must_use]
    pub fn classify(equal: bool, expected: &NormalizedText) -> Self {
        if equal {
            Self::Match
        } else if expected.is_missing() {
            Self::MissingBaseline
        } else {
            Self::ContentMismatch
        }
    }

    /// Returns true for [`ComparisonResult::Match`].
    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }

    /// Returns true for either mismatch variant.
    #[must_use]
    pub fn is_mismatch(&self) -> bool {
        !self.is_match()
    }

    /// Get the string name of the result
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::MissingBaseline => "missing_baseline",
            Self::ContentMismatch => "content_mismatch",
        }
    }
}

/// A verdict together with the texts it was reached on.
///
/// For a rebaseline run `expected` is the missing marker, since no prior
/// baseline was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// The verdict.
    pub result: ComparisonResult,
    /// The normalized test output.
    pub output: NormalizedText,
    /// The normalized baseline, or the missing marker.
    pub expected: NormalizedText,
}

impl Decision {
    /// Returns true when the output matched.
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.result.is_match()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    #[test]
    fn test_exact_match() {
        assert!(ExactMatch.texts_equal(b"a\n", b"a\n"));
        assert!(!ExactMatch.texts_equal(b"a\n", b"A\n"));
    }

    #[test]
    fn test_closure_predicate() {
        let case_insensitive =
            |a: &[u8], b: &[u8]| a.eq_ignore_ascii_case(b);
        assert!(case_insensitive.texts_equal(b"PASS\n", b"pass\n"));
    }

    #[test]
    fn test_classify() {
        let expected = normalize(b"A");
        assert_eq!(
            ComparisonResult::classify(true, &expected),
            ComparisonResult::Match
        );
        assert_eq!(
            ComparisonResult::classify(false, &expected),
            ComparisonResult::ContentMismatch
        );
        assert_eq!(
            ComparisonResult::classify(false, &NormalizedText::missing()),
            ComparisonResult::MissingBaseline
        );
    }

    #[test]
    fn test_empty_baseline_is_not_missing() {
        // An empty file normalizes to "\n", which is a real baseline.
        assert_eq!(
            ComparisonResult::classify(false, &normalize(b"")),
            ComparisonResult::ContentMismatch
        );
    }

    #[test]
    fn test_result_names() {
        assert_eq!(ComparisonResult::Match.as_str(), "match");
        assert!(ComparisonResult::MissingBaseline.is_mismatch());
        assert!(!ComparisonResult::ContentMismatch.is_match());
    }
}
