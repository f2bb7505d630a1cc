//! Reading baselines.
//!
//! Baselines are conventionally UTF-8, but test output is never decoded, so
//! baselines are not decoded either: both sides stay raw bytes and compare
//! byte for byte.

use std::fs;
use std::io;
use std::path::Path;

use tracing::Level;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::layout::{BaselineLocator, EXPECTED_SUFFIX, TestIdentity};
use crate::logging::DiagnosticLogger;
use crate::normalize::{NormalizedText, normalize};

/// Read a file and normalize it.
///
/// A file that does not exist reads as [`NormalizedText::missing`]. Any other
/// failure (permissions, a directory in the way, I/O faults) is returned.
pub fn read_normalized(path: &Path) -> Result<NormalizedText> {
    match fs::read(path) {
        Ok(bytes) => Ok(normalize(&bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(NormalizedText::missing()),
        Err(source) => Err(Error::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load and normalize the expected text for a test.
///
/// Returns the missing marker when the test has no baseline yet.
pub fn load_expected(
    locator: &dyn BaselineLocator,
    logger: &dyn DiagnosticLogger,
    test: &TestIdentity,
    config: &Config,
) -> Result<NormalizedText> {
    let path = locator.expected_path(test, EXPECTED_SUFFIX)?;
    if config.is_verbose() {
        logger.log(Level::DEBUG, &format!("Using {}", path.display()));
    }
    read_normalized(&path)
}
