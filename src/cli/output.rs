//! Output formatting for the CLI.
//!
//! Statements go to stdout; the optional summary is meant for stderr.

use colored::Colorize;
use std::fmt::Write;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::reconciler::{BucketSummary, MoveReport};

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
    /// Shell-quote addresses.
    quote: bool,
}

/// Bucket row for table display.
#[derive(Tabled)]
struct BucketRow {
    #[tabled(rename = "Type")]
    resource_type: String,
    #[tabled(rename = "Created")]
    created: usize,
    #[tabled(rename = "Destroyed")]
    destroyed: usize,
    #[tabled(rename = "Moves")]
    matched: usize,
    #[tabled(rename = "Unmatched (create/destroy)")]
    unmatched: String,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self {
            format,
            quote: false,
        }
    }

    /// Enables shell quoting of addresses.
    #[must_use]
    pub const fn with_quote(mut self, quote: bool) -> Self {
        self.quote = quote;
        self
    }

    /// Formats the move statements of a report.
    ///
    /// Text output is one command per line with a trailing newline, or the
    /// empty string when there are no moves.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn format_statements(&self, report: &MoveReport) -> serde_json::Result<String> {
        match self.format {
            OutputFormat::Json => {
                let mut json = serde_json::to_string_pretty(&ReportJson::new(report, self.quote))?;
                json.push('\n');
                Ok(json)
            }
            OutputFormat::Text => Ok(report
                .render_lines(self.quote)
                .into_iter()
                .fold(String::new(), |mut out, line| {
                    let _ = writeln!(out, "{line}");
                    out
                })),
        }
    }

    /// Formats the per-type summary as a table.
    #[must_use]
    pub fn format_summary(&self, report: &MoveReport) -> String {
        let mut output = String::new();

        let _ = writeln!(
            output,
            "\n{} (strategy: {}, reuse: {})\n",
            "Move summary".bold(),
            report.strategy,
            report.reuse
        );

        if report.buckets.is_empty() {
            output.push_str("   No resources are created or destroyed.\n");
            return output;
        }

        let rows: Vec<BucketRow> = report.buckets.iter().map(BucketRow::from).collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        output.push_str(&table.to_string());
        output.push('\n');

        let moves = report.statements.len();
        let moves_text = if moves == 0 {
            moves.to_string().yellow()
        } else {
            moves.to_string().green()
        };
        let _ = writeln!(output, "\n{moves_text} moves found.");

        output
    }
}

impl From<&BucketSummary> for BucketRow {
    fn from(bucket: &BucketSummary) -> Self {
        Self {
            resource_type: bucket.resource_type.clone(),
            created: bucket.created,
            destroyed: bucket.destroyed,
            matched: bucket.matched,
            unmatched: format!("{}/{}", bucket.unmatched_created, bucket.unmatched_destroyed),
        }
    }
}

// JSON serialization helpers

#[derive(serde::Serialize)]
struct ReportJson<'a> {
    strategy: String,
    reuse: String,
    move_count: usize,
    moves: Vec<MoveJson>,
    buckets: &'a [BucketSummary],
}

#[derive(serde::Serialize)]
struct MoveJson {
    source: String,
    destination: String,
    command: String,
}

impl<'a> ReportJson<'a> {
    fn new(report: &'a MoveReport, quote: bool) -> Self {
        Self {
            strategy: report.strategy.to_string(),
            reuse: report.reuse.to_string(),
            move_count: report.statements.len(),
            moves: report
                .statements
                .iter()
                .map(|s| MoveJson {
                    source: s.source.to_string(),
                    destination: s.destination.to_string(),
                    command: s.render(quote),
                })
                .collect(),
            buckets: &report.buckets,
        }
    }
}
