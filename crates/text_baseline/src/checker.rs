//! TextDiffChecker - compares a test's text output with its baseline.
//!
//! Wires the injected collaborators together:
//! - [`BaselineLocator`] resolves baseline and artifact paths
//! - [`TextEquality`] judges normalized texts
//! - [`DiffRenderer`] renders diff artifacts
//! - [`DiagnosticLogger`] receives verbose diagnostics
//!
//! The checker holds no per-test state; every call stands alone.

use std::fmt;
use std::path::Path;

use crate::artifacts::{self, TestFailure};
use crate::baseline;
use crate::compare::{ComparisonResult, Decision, ExactMatch, TextEquality};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::layout::{BaselineLocator, TestIdentity};
use crate::logging::{DiagnosticLogger, TracingLogger};
use crate::normalize::{NormalizedText, normalize};
use crate::render::{DiffRenderer, SimilarRenderer};

/// Compares test output against stored `-expected.txt` baselines.
///
/// # Example
///
/// ```rust,no_run
/// use text_baseline::{ComparisonResult, Config, LayoutPaths, TestIdentity, TextDiffChecker};
///
/// # fn main() -> text_baseline::Result<()> {
/// let checker = TextDiffChecker::new(LayoutPaths::new("LayoutTests", "results"));
/// let test = TestIdentity::new("fast/dom/title.html");
///
/// let decision = checker.decide(b"PASS\n", &test, &Config::new())?;
/// if decision.result != ComparisonResult::Match {
///     let failure = checker.on_mismatch(&test, &decision)?;
///     eprintln!("{}: {}", test, failure.message());
/// }
/// # Ok(())
/// # }
/// ```
pub struct TextDiffChecker {
    locator: Box<dyn BaselineLocator>,
    equality: Box<dyn TextEquality>,
    renderer: Box<dyn DiffRenderer>,
    logger: Box<dyn DiagnosticLogger>,
}

impl fmt::Debug for TextDiffChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextDiffChecker").finish_non_exhaustive()
    }
}

impl TextDiffChecker {
    /// Creates a checker with exact matching, `similar` diffs, and `tracing` diagnostics.
    pub fn new(locator: impl BaselineLocator + 'static) -> Self {
        Self {
            locator: Box::new(locator),
            equality: Box::new(ExactMatch),
            renderer: Box::new(SimilarRenderer::new()),
            logger: Box::new(TracingLogger),
        }
    }

    /// Replaces the equality predicate.
    #[must_use]
    pub fn with_equality(mut self, equality: impl TextEquality + 'static) -> Self {
        self.equality = Box::new(equality);
        self
    }

    /// Replaces the diff renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: impl DiffRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Replaces the diagnostic logger.
    #[must_use]
    pub fn with_logger(mut self, logger: impl DiagnosticLogger + 'static) -> Self {
        self.logger = Box::new(logger);
        self
    }

    /// The path resolver in use.
    #[must_use]
    pub fn locator(&self) -> &dyn BaselineLocator {
        self.locator.as_ref()
    }

    /// Load the normalized baseline for a test, or the missing marker.
    pub fn load_expected(&self, test: &TestIdentity, config: &Config) -> Result<NormalizedText> {
        baseline::load_expected(self.locator.as_ref(), self.logger.as_ref(), test, config)
    }

    /// Decide whether `raw_output` matches the test's baseline.
    ///
    /// When rebaselining, the raw output is written as the new baseline
    /// unmodified and the result is always [`ComparisonResult::Match`]; the
    /// old baseline is never read. Otherwise nothing is written.
    pub fn decide(
        &self,
        raw_output: &[u8],
        test: &TestIdentity,
        config: &Config,
    ) -> Result<Decision> {
        if config.is_rebaseline() {
            artifacts::save_baseline(
                self.locator.as_ref(),
                self.logger.as_ref(),
                test,
                raw_output,
                config,
            )?;
            return Ok(Decision {
                result: ComparisonResult::Match,
                output: normalize(raw_output),
                expected: NormalizedText::missing(),
            });
        }

        let output = normalize(raw_output);
        let expected = self.load_expected(test, config)?;
        let equal = self.equality.texts_equal(&output, &expected);
        Ok(Decision {
            result: ComparisonResult::classify(equal, &expected),
            output,
            expected,
        })
    }

    /// Persist the artifacts for a mismatch and return the failure to report.
    ///
    /// Fails with [`Error::NotAMismatch`] if `decision` is a match.
    pub fn on_mismatch(&self, test: &TestIdentity, decision: &Decision) -> Result<TestFailure> {
        let failure = TestFailure::from_result(decision.result)
            .ok_or_else(|| Error::NotAMismatch { test: test.clone() })?;
        artifacts::write_mismatch_artifacts(
            self.locator.as_ref(),
            self.renderer.as_ref(),
            test,
            &decision.output,
            &decision.expected,
            true,
        )?;
        Ok(failure)
    }

    /// Compare output with the baseline and persist artifacts on mismatch.
    ///
    /// Returns `None` when the test passes.
    pub fn compare_output(
        &self,
        raw_output: &[u8],
        test: &TestIdentity,
        config: &Config,
    ) -> Result<Option<TestFailure>> {
        let decision = self.decide(raw_output, test, config)?;
        if decision.is_match() {
            return Ok(None);
        }
        self.on_mismatch(test, &decision).map(Some)
    }

    /// Returns true if two files differ after normalization.
    ///
    /// Missing files read as empty; nothing is written.
    pub fn differs(&self, file_a: &Path, file_b: &Path) -> Result<bool> {
        let a = baseline::read_normalized(file_a)?;
        let b = baseline::read_normalized(file_b)?;
        Ok(!self.equality.texts_equal(&a, &b))
    }
}
