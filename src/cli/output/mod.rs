//! Output formatting module for CLI

pub mod json;
mod terminal;

pub use json::JsonOutput;
pub use terminal::TerminalOutput;

use serde::Serialize;
use std::path::PathBuf;

use crate::batch::summary::Summary;
use crate::batch::{BatchRun, ItemResult};
use crate::error::ActionDocsError;
use crate::utils::RunTiming;

/// Status of one item in a run report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Ok,
    Failed,
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemReport {
    pub path: PathBuf,
    pub status: ItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl From<&ItemResult> for ItemReport {
    fn from(result: &ItemResult) -> Self {
        Self {
            path: result.item.path.clone(),
            status: if result.is_error() {
                ItemStatus::Failed
            } else {
                ItemStatus::Ok
            },
            artifact: result.artifact().map(|p| p.to_path_buf()),
            errors: result.errors().to_vec(),
        }
    }
}

/// Everything a batch command reports at the end of a run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub command: &'static str,
    pub summary: Summary,
    pub timing: RunTiming,
    /// Sorted by path
    pub items: Vec<ItemReport>,
}

impl RunReport {
    pub fn new(command: &'static str, run: &BatchRun, summary: Summary, timing: RunTiming) -> Self {
        let mut items: Vec<ItemReport> = run.results.iter().map(ItemReport::from).collect();
        items.extend(run.skipped.iter().map(|item| ItemReport {
            path: item.path.clone(),
            status: ItemStatus::Skipped,
            artifact: None,
            errors: Vec::new(),
        }));
        items.sort_by(|a, b| a.path.cmp(&b.path));

        Self {
            command,
            summary,
            timing,
            items,
        }
    }
}

/// Trait for rendering the end-of-run report
pub trait SummaryRenderer {
    fn render_summary(&self, report: &RunReport) -> Result<String, ActionDocsError>;
}
