//! Line-ending normalization for test output and baselines.
//!
//! Both sides of a comparison go through [`normalize`] so that a baseline
//! checked in from Windows and output captured on Linux compare equal. The
//! text is treated as opaque bytes: nothing is decoded, so output in an
//! unexpected encoding still compares byte for byte.

use std::fmt;
use std::ops::Deref;

/// Text in canonical form: `\n` line endings and exactly one trailing `\n`.
///
/// The empty value is reserved as the "no baseline exists" marker. No output
/// of [`normalize`] is ever empty, so a baseline file that exists but holds
/// no text (normalized to `"\n"`) is still distinguishable from a missing one.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct NormalizedText(Vec<u8>);

impl NormalizedText {
    /// The "no baseline" marker.
    #[must_use]
    pub const fn missing() -> Self {
        Self(Vec::new())
    }

    /// Returns true for the "no baseline" marker.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.0.is_empty()
    }

    /// The normalized bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the text, returning its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Lossy UTF-8 view, for logs and error messages only.
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

impl Deref for NormalizedText {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for NormalizedText {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_missing() {
            f.write_str("NormalizedText(<missing>)")
        } else {
            write!(f, "NormalizedText({:?})", String::from_utf8_lossy(&self.0))
        }
    }
}

fn is_line_break(byte: &u8) -> bool {
    matches!(byte, b'\r' | b'\n')
}

/// Normalize raw text into [`NormalizedText`].
///
/// - a run of `\r` directly before `\n` folds to a single `\r\n` (test
///   drivers that print `\r\n` through a translating pipe arrive as `\r\r\n`)
/// - leading and trailing `\r`/`\n` bytes are stripped
/// - every remaining `\r\n` becomes `\n`
/// - exactly one `\n` is appended
///
/// Lone `\r` bytes inside the text are kept. The fold runs to a fixpoint so
/// that `normalize(normalize(x)) == normalize(x)` for every input.
///
/// # Example
///
/// ```rust
/// use text_baseline::normalize;
///
/// assert_eq!(normalize(b"\r\nHello\r\r\nWorld\r\n\r\n").as_bytes(), b"Hello\nWorld\n");
/// assert_eq!(normalize(b"").as_bytes(), b"\n");
/// ```
#[must_use]
pub fn normalize(text: &[u8]) -> NormalizedText {
    let start = text
        .iter()
        .position(|b| !is_line_break(b))
        .unwrap_or(text.len());
    let end = text
        .iter()
        .rposition(|b| !is_line_break(b))
        .map_or(start, |i| i + 1);
    let body = &text[start..end];

    let mut out = Vec::with_capacity(body.len() + 1);
    let mut pending_cr = 0usize;
    for &byte in body {
        match byte {
            b'\r' => pending_cr += 1,
            b'\n' => {
                // Any number of CRs before LF is one line break.
                pending_cr = 0;
                out.push(b'\n');
            }
            other => {
                out.extend(std::iter::repeat_n(b'\r', pending_cr));
                pending_cr = 0;
                out.push(other);
            }
        }
    }
    // `body` never ends in '\r', so nothing is left pending here.
    debug_assert_eq!(pending_cr, 0);
    out.push(b'\n');
    NormalizedText(out)
}
