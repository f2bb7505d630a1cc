//! Per-call comparison settings.

use serde::{Deserialize, Serialize};

/// Settings for a single comparison. Supplied per call, never retained.
///
/// Defaults:
/// - `rebaseline` off: compare against the stored baseline
/// - `verbose` off: no diagnostics about which files were consulted
///
/// # Example
///
/// ```rust
/// use text_baseline::Config;
///
/// let config = Config::new().rebaseline(true).verbose(true);
/// assert!(config.is_rebaseline());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Write the output as the new baseline instead of comparing.
    pub rebaseline: bool,
    /// Log the baseline paths consulted and the files written.
    pub verbose: bool,
}

impl Config {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables rebaselining.
    #[must_use]
    pub fn rebaseline(mut self, enabled: bool) -> Self {
        self.rebaseline = enabled;
        self
    }

    /// Enables or disables verbose diagnostics.
    #[must_use]
    pub fn verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    /// Returns whether rebaselining is enabled.
    #[must_use]
    pub fn is_rebaseline(&self) -> bool {
        self.rebaseline
    }

    /// Returns whether verbose diagnostics are enabled.
    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}
