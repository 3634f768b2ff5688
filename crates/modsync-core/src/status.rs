//! Status lines for callers that want to follow a long scan or reconcile run.
//!
//! The engine never prints. Anything human readable is handed to a
//! [`StatusSink`], which a CLI can print and a UI can put in a label.

/// Receiver for human-readable progress lines
pub trait StatusSink {
    /// Report one status line
    fn status(&mut self, message: &str);
}

impl<F> StatusSink for F
where
    F: FnMut(&str),
{
    fn status(&mut self, message: &str) {
        self(message);
    }
}

/// Sink that drops every message
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl StatusSink for NullSink {
    fn status(&mut self, _message: &str) {}
}

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Render a byte count in GiB with two decimals, e.g. `1.50 GB`
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_gib(bytes: u64) -> String {
    format!("{:.2} GB", bytes as f64 / GIB)
}
