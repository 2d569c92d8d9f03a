//! JSON output formatting

use serde::Serialize;

use super::{RunReport, SummaryRenderer};
use crate::error::{ActionDocsError, RenderError};

/// Version of the JSON report layout
pub const REPORT_VERSION: &str = "1";

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    tool_version: &'static str,
    #[serde(flatten)]
    report: &'a RunReport,
}

impl SummaryRenderer for JsonOutput {
    fn render_summary(&self, report: &RunReport) -> Result<String, ActionDocsError> {
        let document = JsonReport {
            version: REPORT_VERSION,
            tool_version: env!("CARGO_PKG_VERSION"),
            report,
        };
        serde_json::to_string_pretty(&document).map_err(|e| RenderError::from(e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::summary::summarize;
    use crate::batch::{BatchRun, ItemResult, WorkItem};
    use crate::utils::RunTiming;

    #[test]
    fn test_json_report_shape() {
        let run = BatchRun {
            results: vec![ItemResult::failed(
                WorkItem::new("x/action.yml"),
                vec!["bad".into()],
            )],
            skipped: Vec::new(),
        };
        let (summary, _) = summarize(&run.results, false);
        let report = RunReport::new("validate", &run, summary, RunTiming::default());

        let json = JsonOutput::new().render_summary(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], "1");
        assert_eq!(value["command"], "validate");
        assert_eq!(value["summary"]["errored"], 1);
        assert_eq!(value["items"][0]["status"], "failed");
        assert_eq!(value["items"][0]["errors"][0], "bad");
    }
}
