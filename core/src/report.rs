//! Report plumbing for batch checks.
//!
//! Data problems never abort a run; checks emit `Report` values through a
//! `ReportSink` and keep going. A GUI host can render the optional entry
//! reference as a hyperlink; the CLI forwards everything to `tracing`.

use std::fmt;

/// Severity of a report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Info => write!(f, "info"),
            Level::Warning => write!(f, "warning"),
            Level::Error => write!(f, "error"),
        }
    }
}

/// One message produced while processing an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub level: Level,
    pub message: String,
    /// Opaque locator of the entry the message concerns. Hosts that can
    /// navigate turn it into a link; plain sinks print it as-is.
    pub reference: Option<String>,
}

impl Report {
    pub fn info<M: Into<String>>(message: M) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
            reference: None,
        }
    }

    pub fn warning<M: Into<String>>(message: M) -> Self {
        Self {
            level: Level::Warning,
            message: message.into(),
            reference: None,
        }
    }

    pub fn error<M: Into<String>>(message: M) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
            reference: None,
        }
    }

    /// Attach the locator of the entry this report concerns.
    pub fn with_reference<R: Into<String>>(mut self, reference: R) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

/// Destination for reports emitted during a batch run.
pub trait ReportSink {
    fn report(&mut self, report: Report);
}

/// Sink that collects reports in memory. Used by tests and by callers that
/// want to post-process the messages themselves.
#[derive(Debug, Default)]
pub struct MemorySink {
    reports: Vec<Report>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn messages(&self) -> Vec<&str> {
        self.reports.iter().map(|r| r.message.as_str()).collect()
    }

    pub fn count(&self, level: Level) -> usize {
        self.reports.iter().filter(|r| r.level == level).count()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

impl ReportSink for MemorySink {
    fn report(&mut self, report: Report) {
        self.reports.push(report);
    }
}

/// Sink that forwards reports to the `tracing` subscriber.
#[derive(Debug, Default)]
pub struct LogSink;

impl ReportSink for LogSink {
    fn report(&mut self, report: Report) {
        let reference = report.reference.as_deref().unwrap_or("");
        match report.level {
            Level::Info => tracing::info!(reference, "{}", report.message),
            Level::Warning => tracing::warn!(reference, "{}", report.message),
            Level::Error => tracing::error!(reference, "{}", report.message),
        }
    }
}
