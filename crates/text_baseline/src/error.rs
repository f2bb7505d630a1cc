//! Error types.
//!
//! Only file I/O and test paths escaping the layout can fail. A missing baseline is not an error, and a content
//! mismatch is reported as a [`TestFailure`](crate::TestFailure) value.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::layout::TestIdentity;

/// Errors raised while reading baselines or writing artifacts.
#[derive(Debug, Error)]
pub enum Error {
    /// A file existed (or might have) but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// An artifact, baseline, or one of their parent directories could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// File or directory that was being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The test path resolves outside the tests root: an absolute path
    /// elsewhere, a `..` component, or no file name at all.
    #[error("test path {test} is outside the tests root")]
    OutsideTestsRoot {
        /// The offending test.
        test: TestIdentity,
    },

    /// Artifacts were requested for a test whose output matched.
    #[error("output of {test} matched its baseline; nothing to report")]
    NotAMismatch {
        /// The test in question.
        test: TestIdentity,
    },
}

impl Error {
    /// Path involved in an I/O failure, if any.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } => Some(path),
            Self::OutsideTestsRoot { .. } | Self::NotAMismatch { .. } => None,
        }
    }

    /// Kind of the underlying I/O error, if any.
    #[must_use]
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source.kind()),
            Self::OutsideTestsRoot { .. } | Self::NotAMismatch { .. } => None,
        }
    }
}

/// A specialized `Result` type for baseline operations.
pub type Result<T> = std::result::Result<T, Error>;
