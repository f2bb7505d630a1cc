//! Mismatch artifacts, new baselines, and the failures reported upstream.
//!
//! On mismatch the results directory receives, next to the test's relative
//! path:
//! - `<test>-actual.txt`: the normalized output
//! - `<test>-expected.txt`: the normalized baseline, when one exists
//! - `<test>-diff.txt`: unified diff of the two
//! - `<test>-wdiff.html`: word-level diff of the two

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::compare::ComparisonResult;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::layout::{BaselineLocator, EXPECTED_SUFFIX, TestIdentity};
use crate::logging::DiagnosticLogger;
use crate::normalize::NormalizedText;
use crate::render::DiffRenderer;

/// A file written into the results directory for a failing test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// The normalized output.
    Actual,
    /// The normalized baseline.
    Expected,
    /// Unified line diff.
    Diff,
    /// Word-level HTML diff.
    WordDiff,
}

impl ArtifactKind {
    /// All artifact kinds, in the order they are written.
    pub const ALL: [Self; 4] = [Self::Actual, Self::Expected, Self::Diff, Self::WordDiff];

    /// Suffix appended to the test's stem.
    #[must_use]
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Actual => "-actual.txt",
            Self::Expected => EXPECTED_SUFFIX,
            Self::Diff => "-diff.txt",
            Self::WordDiff => "-wdiff.html",
        }
    }
}

/// Failure reported to the result aggregator. Plain data, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TestFailure {
    /// The test has no baseline yet.
    MissingResult,
    /// The output differs from the baseline.
    TextMismatch {
        /// Whether text diff artifacts were rendered.
        has_text_diff: bool,
    },
}

impl TestFailure {
    /// The failure corresponding to a verdict, or `None` for a match.
    #[must_use]
    pub fn from_result(result: ComparisonResult) -> Option<Self> {
        match result {
            ComparisonResult::Match => None,
            ComparisonResult::MissingBaseline => Some(Self::MissingResult),
            ComparisonResult::ContentMismatch => Some(Self::TextMismatch {
                has_text_diff: true,
            }),
        }
    }

    /// Short human-readable summary.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingResult => "No expected results found",
            Self::TextMismatch { .. } => "Text diff mismatch",
        }
    }
}

/// Write `bytes` to `path`, creating parent directories.
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, bytes).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the raw output as the test's new baseline, byte for byte.
///
/// Returns the path written.
pub fn save_baseline(
    locator: &dyn BaselineLocator,
    logger: &dyn DiagnosticLogger,
    test: &TestIdentity,
    raw_output: &[u8],
    config: &Config,
) -> Result<PathBuf> {
    let path = locator.new_baseline_path(test, EXPECTED_SUFFIX)?;
    if config.is_verbose() {
        logger.log(
            Level::DEBUG,
            &format!("writing new baseline result \"{}\"", path.display()),
        );
    }
    write_file(&path, raw_output)?;
    Ok(path)
}

/// Write the mismatch artifacts for a test.
///
/// The expected artifact is skipped when there is no baseline. Diffs are
/// rendered only when `render_diffs` is set. Returns the paths written.
pub fn write_mismatch_artifacts(
    locator: &dyn BaselineLocator,
    renderer: &dyn DiffRenderer,
    test: &TestIdentity,
    output: &NormalizedText,
    expected: &NormalizedText,
    render_diffs: bool,
) -> Result<Vec<PathBuf>> {
    let path_of = |kind: ArtifactKind| locator.result_path(test, kind.suffix());
    let actual_path = path_of(ArtifactKind::Actual)?;
    let expected_path = path_of(ArtifactKind::Expected)?;
    let mut written = Vec::with_capacity(ArtifactKind::ALL.len());

    write_file(&actual_path, output)?;
    written.push(actual_path.clone());

    if !expected.is_missing() {
        write_file(&expected_path, expected)?;
        written.push(expected_path.clone());
    }

    if !render_diffs {
        return Ok(written);
    }

    let diff_path = path_of(ArtifactKind::Diff)?;
    let diff = renderer
        .unified_diff(
            expected,
            output,
            &expected_path.display().to_string(),
            &actual_path.display().to_string(),
        )
        .map_err(|source| Error::Write {
            path: diff_path.clone(),
            source,
        })?;
    write_file(&diff_path, &diff)?;
    written.push(diff_path);

    let wdiff = renderer.word_diff(expected, output);
    let wdiff_path = path_of(ArtifactKind::WordDiff)?;
    write_file(&wdiff_path, &wdiff)?;
    written.push(wdiff_path);

    Ok(written)
}
