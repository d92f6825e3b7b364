//! Run summary output
//!
//! Handles the summary formats: table, JSON

mod json;
mod table;

use crate::cli::OutputFormat;
use crate::pipeline::RunSummary;

pub use self::json::JsonFormatter;
pub use self::table::TableFormatter;

/// Trait for summary formatters
pub trait Formatter {
    /// Render the summary as printable text
    fn format(&self, summary: &RunSummary) -> String;
}

/// Print the run summary in the requested format
pub fn output_summary(summary: &RunSummary, format: &OutputFormat) {
    let text = match format {
        OutputFormat::Table => TableFormatter.format(summary),
        OutputFormat::Json => JsonFormatter.format(summary),
    };
    println!("\n{}", text);
}
