//! Table summary formatter

use comfy_table::{presets::NOTHING, Table};

use super::Formatter;
use crate::pipeline::RunSummary;

/// Formatter for ASCII table output
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format(&self, summary: &RunSummary) -> String {
        let mut table = Table::new();
        table.load_preset(NOTHING).set_header(vec![
            "Project", "Cluster", "Context", "Mode", "Status", "Session",
        ]);

        for outcome in &summary.outcomes {
            let status = match &outcome.error {
                None => "ok".to_string(),
                Some(e) => format!("failed: {}", e),
            };
            let session = outcome.session_path.display().to_string();
            table.add_row(vec![
                outcome.project.as_str(),
                outcome.cluster.as_str(),
                outcome.context.as_str(),
                outcome.mode,
                status.as_str(),
                session.as_str(),
            ]);
        }

        format!(
            "{}\n\n{} cluster(s), {} failed",
            table,
            summary.outcomes.len(),
            summary.failed_count()
        )
    }
}
