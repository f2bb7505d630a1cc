//! The default logger forwards verbose diagnostics to `tracing`.

use std::io;
use std::sync::{Arc, Mutex};

use text_baseline::{Config, DiagnosticLogger, LayoutPaths, TestIdentity, TextDiffChecker, TracingLogger};
use tracing::Level;

/// Writer collecting formatted events in memory.
#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture<F: FnOnce()>(f: F) -> String {
    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(Level::TRACE)
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    buf.contents()
}

#[test]
fn test_levels_forwarded() {
    let out = capture(|| {
        TracingLogger.log(Level::WARN, "careful");
        TracingLogger.log(Level::DEBUG, "details");
    });
    assert!(out.contains("WARN"));
    assert!(out.contains("careful"));
    assert!(out.contains("DEBUG"));
    assert!(out.contains("details"));
    assert!(out.contains("text_baseline"));
}

#[test]
fn test_verbose_checker_emits_event() {
    let dir = tempfile::tempdir().unwrap();
    let checker = TextDiffChecker::new(LayoutPaths::new(dir.path(), dir.path().join("results")));
    let test = TestIdentity::new("fast/t.html");

    let out = capture(|| {
        checker
            .decide(b"x", &test, &Config::new().verbose(true))
            .unwrap();
    });
    assert!(out.contains("Using "));
    assert!(out.contains("t-expected.txt"));
}

#[test]
fn test_quiet_checker_emits_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let checker = TextDiffChecker::new(LayoutPaths::new(dir.path(), dir.path().join("results")));
    let test = TestIdentity::new("fast/t.html");

    let out = capture(|| {
        checker.decide(b"x", &test, &Config::new()).unwrap();
    });
    assert!(out.is_empty());
}
