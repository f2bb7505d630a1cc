#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Text Baseline
//!
//! Compares the text a layout test printed against the test's stored
//! `-expected.txt` baseline and records what went wrong when they disagree.
//!
//! The crate is one comparator inside a larger test harness. It does not run
//! tests or schedule them; it is handed the raw bytes a test produced and:
//! - normalizes line endings on both sides so Windows and Unix output compare equal
//! - loads the baseline, treating a missing file as "no baseline yet"
//! - decides match / missing baseline / content mismatch
//! - writes `-actual.txt`, `-expected.txt`, `-diff.txt` and `-wdiff.html`
//!   artifacts into the results directory on mismatch
//! - overwrites the baseline instead of comparing when rebaselining
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use text_baseline::{Config, LayoutPaths, TestIdentity, TextDiffChecker};
//!
//! fn main() -> text_baseline::Result<()> {
//!     let paths = LayoutPaths::new("LayoutTests", "layout-test-results")
//!         .with_search_path(["LayoutTests/platform/linux"]);
//!     let checker = TextDiffChecker::new(paths);
//!
//!     let test = TestIdentity::new("fast/dom/title.html");
//!     let failure = checker.compare_output(b"PASS\r\n", &test, &Config::new())?;
//!     println!("{failure:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Collaborators
//!
//! Everything platform-specific is injected:
//! - [`BaselineLocator`]: where baselines and artifacts live ([`LayoutPaths`] by default)
//! - [`TextEquality`]: whether two normalized texts count as equal ([`ExactMatch`] by default)
//! - [`DiffRenderer`]: how diff artifacts are rendered ([`SimilarRenderer`] by default)
//! - [`DiagnosticLogger`]: where verbose diagnostics go ([`TracingLogger`] by default)

pub mod artifacts;
pub mod baseline;
pub mod checker;
pub mod compare;
pub mod config;
pub mod error;
pub mod layout;
pub mod logging;
pub mod normalize;
pub mod render;

pub use artifacts::{ArtifactKind, TestFailure};
pub use checker::TextDiffChecker;
pub use compare::{ComparisonResult, Decision, ExactMatch, TextEquality};
pub use config::Config;
pub use error::{Error, Result};
pub use layout::{BaselineLocator, EXPECTED_SUFFIX, LayoutPaths, TestIdentity};
pub use logging::{DiagnosticLogger, NullLogger, TracingLogger};
pub use normalize::{NormalizedText, normalize};
pub use render::{DiffRenderer, SimilarRenderer};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        BaselineLocator, ComparisonResult, Config, Decision, DiagnosticLogger, DiffRenderer,
        Error, LayoutPaths, NormalizedText, Result, TestFailure, TestIdentity, TextDiffChecker,
        TextEquality,
    };
}
