//! JSON summary formatter

use serde::Serialize;

use super::Formatter;
use crate::pipeline::{ClusterOutcome, RunSummary};

/// Formatter for JSON output
pub struct JsonFormatter;

/// Serializable outcome for JSON output
#[derive(Serialize)]
struct JsonOutcome<'a> {
    project: &'a str,
    cluster: &'a str,
    context: &'a str,
    mode: &'a str,
    status: &'a str,
    session_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl<'a> From<&'a ClusterOutcome> for JsonOutcome<'a> {
    fn from(outcome: &'a ClusterOutcome) -> Self {
        Self {
            project: &outcome.project,
            cluster: &outcome.cluster,
            context: &outcome.context,
            mode: outcome.mode,
            status: if outcome.is_success() { "ok" } else { "failed" },
            session_path: outcome.session_path.display().to_string(),
            error: outcome.error.as_deref(),
        }
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, summary: &RunSummary) -> String {
        let outcomes: Vec<JsonOutcome> = summary.outcomes.iter().map(JsonOutcome::from).collect();

        serde_json::to_string_pretty(&outcomes)
            .unwrap_or_else(|e| format!("Error serializing to JSON: {}", e))
    }
}
