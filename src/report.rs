//! Report sinks: structured run events and their text rendering.
//!
//! The run driver emits ordered events through the [`ReportSink`] trait and
//! knows nothing about formatting. Implement the trait to get a custom
//! output format (JSON, TAP, etc.); [`TextSink`] is the default renderer,
//! writing an ANSI-colored report to stderr or a plain one to a log file.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use thiserror::Error;

/// Errors from setting up a report destination.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("could not create log file {path}: {source}")]
    CreateLog { path: String, source: io::Error },
}

/// Receives the ordered structured events of one run.
///
/// All methods default to no-ops so an implementation can subscribe to just
/// the events it cares about.
pub trait ReportSink {
    /// A run is starting over `suite_count` registered suites.
    fn on_run_start(&mut self, _suite_count: usize) {}

    /// A suite is about to be built and run.
    fn on_suite_start(&mut self, _name: &str) {}

    /// A case is about to execute.
    fn on_case_start(&mut self, _name: &str) {}

    /// A case finished.
    fn on_case_result(&mut self, _name: &str, _passed: bool) {}

    /// Diagnostic log text a suite accumulated (only emitted when non-empty).
    fn on_suite_log(&mut self, _log: &str) {}

    /// A suite finished with `passed` of `total` cases passing.
    fn on_suite_summary(&mut self, _name: &str, _passed: usize, _total: usize) {}

    /// The run finished with `passed` of `total` suites fully passing.
    fn on_run_summary(&mut self, _passed: usize, _total: usize, _all_passed: bool) {}
}

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

// Column the [PASSED]/[FAILED] marker is padded out to.
const RESULT_COLUMN: usize = 60;

/// Default text renderer.
///
/// Colors are enabled for the stderr destination and disabled when writing
/// to a log file.
pub struct TextSink {
    out: Box<dyn Write>,
    color: bool,
    pending_width: usize,
}

impl TextSink {
    /// Render to stderr with ANSI colors.
    pub fn stderr() -> Self {
        Self::from_writer(Box::new(io::stderr()), true)
    }

    /// Render to a freshly created log file, without colors.
    pub fn file(path: &Path) -> Result<Self, ReportError> {
        let file = File::create(path).map_err(|source| ReportError::CreateLog {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::from_writer(Box::new(file), false))
    }

    /// Render to `path` when given and creatable, falling back to stderr
    /// with a warning otherwise.
    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            Some(p) => match Self::file(p) {
                Ok(sink) => {
                    tracing::info!(path = %p.display(), "writing test report to file");
                    sink
                }
                Err(err) => {
                    tracing::warn!(%err, "falling back to stderr for the test report");
                    Self::stderr()
                }
            },
            None => Self::stderr(),
        }
    }

    /// Render to an arbitrary writer (used by self-tests to capture output).
    pub fn from_writer(out: Box<dyn Write>, color: bool) -> Self {
        Self {
            out,
            color,
            pending_width: 0,
        }
    }

    fn paint(&self, code: &'static str) -> &'static str {
        if self.color { code } else { "" }
    }

    /// Write the `[PASSED]`/`[FAILED]` marker, dash-padded out to
    /// [`RESULT_COLUMN`] past whatever the current line already holds.
    fn write_marker(&mut self, passed: bool) {
        let fill = RESULT_COLUMN.saturating_sub(self.pending_width);
        let (color, label) = if passed {
            (self.paint(GREEN), "PASSED")
        } else {
            (self.paint(RED), "FAILED")
        };
        let reset = self.paint(RESET);
        let _ = writeln!(self.out, "{:-<fill$}[{color}{label}{reset}]", "");
        self.pending_width = 0;
    }
}

impl ReportSink for TextSink {
    fn on_run_start(&mut self, suite_count: usize) {
        let (bold, reset) = (self.paint(BOLD), self.paint(RESET));
        let _ = writeln!(self.out, "{bold}Testing {suite_count} suite(s){reset}");
    }

    fn on_suite_start(&mut self, name: &str) {
        let _ = writeln!(self.out);
        let _ = writeln!(self.out, "Begin testing: {name}");
        let _ = self.out.flush();
    }

    fn on_case_start(&mut self, name: &str) {
        let line = format!("Running: {name}");
        self.pending_width = line.len();
        let _ = write!(self.out, "{line}");
        let _ = self.out.flush();
    }

    fn on_case_result(&mut self, _name: &str, passed: bool) {
        self.write_marker(passed);
        let _ = self.out.flush();
    }

    fn on_suite_log(&mut self, log: &str) {
        let (red, reset) = (self.paint(RED), self.paint(RESET));
        let _ = write!(self.out, "{red}{log}{reset}");
    }

    fn on_suite_summary(&mut self, name: &str, passed: usize, total: usize) {
        let (green, reset) = (self.paint(GREEN), self.paint(RESET));
        let _ = writeln!(self.out, "{green}Completed cases [{passed}/{total}]{reset}");
        let line = format!("{name} finished");
        self.pending_width = line.len();
        let _ = write!(self.out, "{line}");
        self.write_marker(passed == total);
    }

    fn on_run_summary(&mut self, passed: usize, total: usize, all_passed: bool) {
        let _ = writeln!(self.out);
        let line = format!("Testing ended, [{passed}/{total}] suite(s) passed");
        self.pending_width = line.len();
        let _ = write!(self.out, "{line}");
        self.write_marker(all_passed);
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Writer handing everything to a shared buffer the test can inspect.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn rendered(color: bool, drive: impl FnOnce(&mut TextSink)) -> String {
        let buf = SharedBuf::default();
        let mut sink = TextSink::from_writer(Box::new(buf.clone()), color);
        drive(&mut sink);
        let bytes = buf.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn case_results_are_padded_markers() {
        let out = rendered(false, |sink| {
            sink.on_case_start("short");
            sink.on_case_result("short", true);
            sink.on_case_start("other");
            sink.on_case_result("other", false);
        });
        assert!(out.contains("Running: short"));
        assert!(out.contains("[PASSED]"));
        assert!(out.contains("[FAILED]"));
        assert!(out.contains("----"));
    }

    #[test]
    fn colors_only_on_colored_sinks() {
        let plain = rendered(false, |sink| sink.on_run_summary(1, 1, true));
        assert!(!plain.contains("\x1b["));
        let colored = rendered(true, |sink| sink.on_run_summary(1, 1, true));
        assert!(colored.contains(GREEN));
    }

    #[test]
    fn run_summary_counts_suites() {
        let out = rendered(false, |sink| sink.on_run_summary(2, 3, false));
        assert!(out.contains("[2/3] suite(s) passed"));
        assert!(out.contains("[FAILED]"));
    }
}
