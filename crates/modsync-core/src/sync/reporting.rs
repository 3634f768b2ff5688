//! Reconcile reporting and statistics

use std::fmt::Write;

use super::ReconcileReport;
use super::actions::ReconcileAction;
use crate::status::format_gib;

/// Reconcile run reporter
pub struct SyncReporter;

impl SyncReporter {
    /// Generate a summary report
    #[must_use]
    pub fn generate_summary(report: &ReconcileReport) -> String {
        let mut output = String::new();

        output.push_str("\n=== Reconcile Summary ===\n");
        let _ = writeln!(
            output,
            "Copied:   {} ({})",
            report.copied,
            format_gib(report.bytes_copied)
        );
        let _ = writeln!(output, "Deleted:  {}", report.deleted);
        let _ = writeln!(output, "\nTotal operations: {}", report.total_operations());

        if report.is_empty() {
            output.push_str("Status: ✓ Already in sync\n");
        } else {
            output.push_str("Status: ✓ Success\n");
        }

        output
    }

    /// Render a plan, one numbered action per line
    #[must_use]
    pub fn describe_plan(actions: &[ReconcileAction]) -> String {
        if actions.is_empty() {
            return "Nothing to do\n".to_string();
        }

        let mut output = String::new();
        let copies = actions.iter().filter(|a| a.is_copy()).count();
        let _ = writeln!(
            output,
            "Planned: {copies} copies, {} deletes",
            actions.len() - copies
        );
        for (index, action) in actions.iter().enumerate() {
            let _ = writeln!(output, "  {:>3}. {action}", index + 1);
        }

        output
    }
}
