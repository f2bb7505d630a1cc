//! Diff rendering for mismatch artifacts.
//!
//! Renders a unified line diff (`-diff.txt`) and a word-level HTML diff
//! (`-wdiff.html`) between the expected and actual text. Input is treated as
//! bytes throughout; hunks are written with `similar`'s byte writer so
//! non-UTF-8 output reaches the unified diff unchanged.

use std::io::{self, Write};

use similar::{ChangeTag, TextDiff};

/// Renders human-readable diffs between expected and actual text.
pub trait DiffRenderer: Send + Sync {
    /// Unified line diff. The labels name the two sides in the `---`/`+++`
    /// header. Identical inputs render as an empty diff.
    fn unified_diff(
        &self,
        expected: &[u8],
        actual: &[u8],
        expected_label: &str,
        actual_label: &str,
    ) -> io::Result<Vec<u8>>;

    /// Word-level diff as a standalone HTML fragment.
    fn word_diff(&self, expected: &[u8], actual: &[u8]) -> Vec<u8>;
}

const WDIFF_HEADER: &str = "<head><style>.del { background: #faa; } \
                            .add { background: #afa; }</style></head><pre>";
const WDIFF_FOOTER: &str = "</pre>";

/// [`DiffRenderer`] backed by the `similar` crate.
#[derive(Debug, Clone, Copy)]
pub struct SimilarRenderer {
    context_lines: usize,
}

impl Default for SimilarRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarRenderer {
    /// Creates a renderer with three lines of context, like `diff -u`.
    #[must_use]
    pub fn new() -> Self {
        Self { context_lines: 3 }
    }

    /// Sets the number of unchanged lines shown around each hunk.
    #[must_use]
    pub fn context_lines(mut self, lines: usize) -> Self {
        self.context_lines = lines;
        self
    }
}

impl DiffRenderer for SimilarRenderer {
    fn unified_diff(
        &self,
        expected: &[u8],
        actual: &[u8],
        expected_label: &str,
        actual_label: &str,
    ) -> io::Result<Vec<u8>> {
        let diff = TextDiff::from_lines(expected, actual);
        let mut unified = diff.unified_diff();
        unified.context_radius(self.context_lines);

        let mut out = Vec::new();
        for hunk in unified.iter_hunks() {
            if out.is_empty() {
                writeln!(out, "--- {expected_label}")?;
                writeln!(out, "+++ {actual_label}")?;
            }
            // Raw bytes; the hunk's `Display` would go through lossy UTF-8.
            hunk.to_writer(&mut out)?;
        }
        Ok(out)
    }

    fn word_diff(&self, expected: &[u8], actual: &[u8]) -> Vec<u8> {
        let diff = TextDiff::from_words(expected, actual);
        let mut out = Vec::with_capacity(expected.len().max(actual.len()) + 128);
        out.extend_from_slice(WDIFF_HEADER.as_bytes());

        let mut open: Option<ChangeTag> = None;
        for change in diff.iter_all_changes() {
            let tag = change.tag();
            if open != Some(tag) {
                if matches!(open, Some(ChangeTag::Delete | ChangeTag::Insert)) {
                    out.extend_from_slice(b"</span>");
                }
                match tag {
                    ChangeTag::Delete => out.extend_from_slice(b"<span class=del>"),
                    ChangeTag::Insert => out.extend_from_slice(b"<span class=add>"),
                    ChangeTag::Equal => {}
                }
                open = Some(tag);
            }
            escape_html_into(change.value(), &mut out);
        }
        if matches!(open, Some(ChangeTag::Delete | ChangeTag::Insert)) {
            out.extend_from_slice(b"</span>");
        }

        out.extend_from_slice(WDIFF_FOOTER.as_bytes());
        out
    }
}

fn escape_html_into(bytes: &[u8], out: &mut Vec<u8>) {
    for &byte in bytes {
        match byte {
            b'&' => out.extend_from_slice(b"&amp;"),
            b'<' => out.extend_from_slice(b"&lt;"),
            b'>' => out.extend_from_slice(b"&gt;"),
            other => out.push(other),
        }
    }
}
