//! Test identities and where their baselines and artifacts live.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Suffix of a stored baseline and of the expected-text artifact.
pub const EXPECTED_SUFFIX: &str = "-expected.txt";

/// Identifies a test by its path relative to the layout tests root,
/// e.g. `fast/dom/title.html`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestIdentity(PathBuf);

impl TestIdentity {
    /// Creates an identity from a test path relative to the tests root.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// The test path as given.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// The test path without its extension. Baselines and artifacts are
    /// named by appending a suffix to this stem.
    #[must_use]
    pub fn stem(&self) -> PathBuf {
        self.0.with_extension("")
    }

    /// `<stem><suffix>`, relative to whatever directory the caller joins it to.
    #[must_use]
    pub fn with_suffix(&self, suffix: &str) -> PathBuf {
        let mut name = self.stem().into_os_string();
        name.push(suffix);
        PathBuf::from(name)
    }
}

impl fmt::Display for TestIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl From<&str> for TestIdentity {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<&Path> for TestIdentity {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

impl From<PathBuf> for TestIdentity {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

/// Resolves file locations for a test.
///
/// Implemented by the harness's platform layer; [`LayoutPaths`] covers the
/// usual tests-root + search-path + results-directory layout. Each method
/// fails with [`Error::OutsideTestsRoot`] for a test path that cannot be
/// placed inside the layout.
pub trait BaselineLocator: Send + Sync {
    /// Baseline consulted when comparing. May not exist.
    fn expected_path(&self, test: &TestIdentity, suffix: &str) -> Result<PathBuf>;

    /// Where a fresh baseline is written when rebaselining.
    fn new_baseline_path(&self, test: &TestIdentity, suffix: &str) -> Result<PathBuf>;

    /// Location of a result artifact for the test.
    fn result_path(&self, test: &TestIdentity, suffix: &str) -> Result<PathBuf>;
}

/// Directory layout of a layout-test checkout.
///
/// Baselines are looked up along an ordered search path of platform
/// directories (most specific first) before falling back to the test's own
/// directory under the tests root. Artifacts mirror the test's relative path
/// under the results directory.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use text_baseline::{BaselineLocator, LayoutPaths, TestIdentity};
///
/// let paths = LayoutPaths::new("LayoutTests", "results");
/// let test = TestIdentity::new("fast/css/zoom.html");
/// assert_eq!(
///     paths.result_path(&test, "-actual.txt").unwrap(),
///     Path::new("results/fast/css/zoom-actual.txt"),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutPaths {
    tests_root: PathBuf,
    #[serde(default)]
    search_path: Vec<PathBuf>,
    results_dir: PathBuf,
    #[serde(default)]
    new_baseline_dir: Option<PathBuf>,
}

impl LayoutPaths {
    /// Creates a layout with no platform baseline directories.
    pub fn new(tests_root: impl Into<PathBuf>, results_dir: impl Into<PathBuf>) -> Self {
        Self {
            tests_root: tests_root.into(),
            search_path: Vec::new(),
            results_dir: results_dir.into(),
            new_baseline_dir: None,
        }
    }

    /// Sets the platform baseline directories, most specific first.
    pub fn with_search_path<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.search_path = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Sets where rebaselining writes. Defaults to the first search-path
    /// directory, or the tests root when the search path is empty.
    pub fn with_new_baseline_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.new_baseline_dir = Some(dir.into());
        self
    }

    /// Root of the layout tests.
    #[must_use]
    pub fn tests_root(&self) -> &Path {
        &self.tests_root
    }

    /// Platform baseline directories, most specific first.
    #[must_use]
    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    /// Directory receiving result artifacts.
    #[must_use]
    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    fn baseline_dir(&self) -> &Path {
        self.new_baseline_dir
            .as_deref()
            .or_else(|| self.search_path.first().map(PathBuf::as_path))
            .unwrap_or(&self.tests_root)
    }

    /// `<stem><suffix>` relative to the tests root.
    ///
    /// Absolute identities under the tests root are made relative to it.
    /// Anything that would still resolve outside the layout (an absolute
    /// path elsewhere, `..`, an empty path) is rejected, since joining it
    /// would let artifacts overwrite files outside the results directory.
    fn relative_name(&self, test: &TestIdentity, suffix: &str) -> Result<PathBuf> {
        let path = test.path();
        let relative = if path.is_absolute() {
            path.strip_prefix(&self.tests_root)
                .map_err(|_| Error::OutsideTestsRoot { test: test.clone() })?
        } else {
            path
        };
        let mut has_name = false;
        for component in relative.components() {
            match component {
                Component::Normal(_) => has_name = true,
                Component::CurDir => {}
                _ => return Err(Error::OutsideTestsRoot { test: test.clone() }),
            }
        }
        if !has_name {
            return Err(Error::OutsideTestsRoot { test: test.clone() });
        }
        Ok(TestIdentity::new(relative).with_suffix(suffix))
    }
}

impl BaselineLocator for LayoutPaths {
    /// First `<dir>/<stem><suffix>` along the search path that is a regular
    /// file, else the same name under the tests root.
    ///
    /// A candidate that is missing, or whose directory is missing or is a
    /// plain file, is skipped. Any other stat failure (an unsearchable
    /// platform directory, for one) is returned rather than silently
    /// falling through to a less specific baseline.
    fn expected_path(&self, test: &TestIdentity, suffix: &str) -> Result<PathBuf> {
        let relative = self.relative_name(test, suffix)?;
        for dir in &self.search_path {
            let candidate = dir.join(&relative);
            match fs::metadata(&candidate) {
                Ok(meta) if meta.is_file() => return Ok(candidate),
                Ok(_) => {}
                Err(e)
                    if matches!(
                        e.kind(),
                        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
                    ) => {}
                Err(source) => {
                    return Err(Error::Read {
                        path: candidate,
                        source,
                    });
                }
            }
        }
        Ok(self.tests_root.join(relative))
    }

    fn new_baseline_path(&self, test: &TestIdentity, suffix: &str) -> Result<PathBuf> {
        Ok(self.baseline_dir().join(self.relative_name(test, suffix)?))
    }

    fn result_path(&self, test: &TestIdentity, suffix: &str) -> Result<PathBuf> {
        Ok(self.results_dir.join(self.relative_name(test, suffix)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stem_strips_extension() {
        let test = TestIdentity::new("fast/dom/title.html");
        assert_eq!(test.stem(), PathBuf::from("fast/dom/title"));
        assert_eq!(
            test.with_suffix(EXPECTED_SUFFIX),
            PathBuf::from("fast/dom/title-expected.txt")
        );
    }

    #[test]
    fn test_stem_without_extension() {
        let test = TestIdentity::new("http/tests/misc/redirect");
        assert_eq!(
            test.with_suffix("-actual.txt"),
            PathBuf::from("http/tests/misc/redirect-actual.txt")
        );
    }

    #[test]
    fn test_expected_path_falls_back_to_tests_root() {
        let paths = LayoutPaths::new("/nonexistent/LayoutTests", "/tmp/results")
            .with_search_path(["/nonexistent/platform/mac"]);
        let test = TestIdentity::new("fast/a.html");
        assert_eq!(
            paths.expected_path(&test, EXPECTED_SUFFIX).unwrap(),
            PathBuf::from("/nonexistent/LayoutTests/fast/a-expected.txt")
        );
    }

    #[test]
    fn test_new_baseline_dir_defaults() {
        let test = TestIdentity::new("a.html");

        let plain = LayoutPaths::new("root", "out");
        assert_eq!(
            plain.new_baseline_path(&test, EXPECTED_SUFFIX).unwrap(),
            PathBuf::from("root/a-expected.txt")
        );

        let platform = LayoutPaths::new("root", "out").with_search_path(["root/platform/win"]);
        assert_eq!(
            platform.new_baseline_path(&test, EXPECTED_SUFFIX).unwrap(),
            PathBuf::from("root/platform/win/a-expected.txt")
        );

        let explicit = platform.with_new_baseline_dir("fresh");
        assert_eq!(
            explicit.new_baseline_path(&test, EXPECTED_SUFFIX).unwrap(),
            PathBuf::from("fresh/a-expected.txt")
        );
    }

    #[test]
    fn test_absolute_identity_under_root_is_relativized() {
        let paths = LayoutPaths::new("/checkout/LayoutTests", "/checkout/results");
        let test = TestIdentity::new("/checkout/LayoutTests/fast/a.html");
        assert_eq!(
            paths.result_path(&test, "-expected.txt").unwrap(),
            PathBuf::from("/checkout/results/fast/a-expected.txt")
        );
        assert_eq!(
            paths.expected_path(&test, EXPECTED_SUFFIX).unwrap(),
            PathBuf::from("/checkout/LayoutTests/fast/a-expected.txt")
        );
    }

    #[test]
    fn test_identity_outside_root_rejected() {
        let paths = LayoutPaths::new("/checkout/LayoutTests", "/checkout/results");
        for escaping in [
            "/elsewhere/a.html",
            "../a.html",
            "fast/../../a.html",
            "/checkout/LayoutTests",
            "",
        ] {
            let test = TestIdentity::new(escaping);
            let err = paths.result_path(&test, "-actual.txt").unwrap_err();
            assert!(
                matches!(err, Error::OutsideTestsRoot { .. }),
                "{escaping:?} gave {err:?}"
            );
            assert!(paths.expected_path(&test, EXPECTED_SUFFIX).is_err());
            assert!(paths.new_baseline_path(&test, EXPECTED_SUFFIX).is_err());
        }
    }

    #[test]
    fn test_current_dir_components_allowed() {
        let paths = LayoutPaths::new("root", "out");
        let test = TestIdentity::new("./fast/a.html");
        assert_eq!(
            paths.result_path(&test, "-actual.txt").unwrap(),
            PathBuf::from("out/fast/a-actual.txt")
        );
    }

    #[test]
    fn test_search_path_entry_that_is_a_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let not_a_dir = dir.path().join("platform-mac");
        fs::write(&not_a_dir, b"").unwrap();
        let paths = LayoutPaths::new(dir.path(), dir.path().join("out"))
            .with_search_path([&not_a_dir]);
        let test = TestIdentity::new("fast/a.html");
        assert_eq!(
            paths.expected_path(&test, EXPECTED_SUFFIX).unwrap(),
            dir.path().join("fast/a-expected.txt")
        );
    }

    #[test]
    fn test_display_identity() {
        let test = TestIdentity::from("svg/text/tspan.svg");
        assert_eq!(test.to_string(), "svg/text/tspan.svg");
    }
}
