//! CLI output formatting

use crate::core::{Decision, ProcessReport, StepOutcome};
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static SKIP: Emoji<'_, '_> = Emoji("⏭️  ", "- ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Format one evaluated step for display
pub fn format_outcome(outcome: &StepOutcome) -> String {
    match &outcome.decision {
        Decision::Skipped => format!(
            "{} {} {}",
            SKIP,
            style(outcome.display_name()).dim(),
            style(format!("(no changes in {})", outcome.patterns.join(", "))).dim()
        ),
        Decision::Kept { pattern, file } => format!(
            "{} {} {}",
            CHECK,
            style(outcome.display_name()).green(),
            style(format!("({} matches {})", file, pattern)).dim()
        ),
    }
}

/// Format the totals line of a report
pub fn format_summary(report: &ProcessReport) -> String {
    format!(
        "{} {} skipped, {} kept, {} without skip_if_unchanged",
        INFO,
        style(report.skipped()).cyan(),
        style(report.kept()).cyan(),
        style(report.passthrough).dim()
    )
}

/// Print the report to stderr; stdout is reserved for the pipeline
pub fn print_report(report: &ProcessReport) {
    for outcome in &report.outcomes {
        eprintln!("{}", format_outcome(outcome));
    }
    eprintln!("{}", format_summary(report));
}
