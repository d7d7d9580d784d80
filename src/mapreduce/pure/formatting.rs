//! Pure functions for rendering the final report

use crate::error::MapReduceResult;
use crate::mapreduce::aggregation::FinalAggregate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output format for the word-count report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// One `word: count` line per word
    #[default]
    Text,
    /// Single-line JSON object
    Json,
    /// Pretty-printed JSON object
    JsonPretty,
}

/// Format one report line
///
/// # Examples
///
/// ```
/// use tally::mapreduce::pure::formatting::format_line;
///
/// assert_eq!(format_line("sentence", 4), "sentence: 4");
/// ```
pub fn format_line(word: &str, count: u64) -> String {
    format!("{}: {}", word, count)
}

/// Report lines in ascending word order
pub fn format_lines(totals: &FinalAggregate) -> Vec<String> {
    totals
        .iter()
        .map(|(word, count)| format_line(word, count))
        .collect()
}

/// Render the whole report in the requested format
///
/// The text format ends every line with a newline and is empty when there
/// are no words.
pub fn render_report(totals: &FinalAggregate, format: ReportFormat) -> MapReduceResult<String> {
    let rendered = match format {
        ReportFormat::Text => format_lines(totals)
            .into_iter()
            .map(|line| line + "\n")
            .collect(),
        ReportFormat::Json => serde_json::to_string(totals)? + "\n",
        ReportFormat::JsonPretty => serde_json::to_string_pretty(totals)? + "\n",
    };
    Ok(rendered)
}
