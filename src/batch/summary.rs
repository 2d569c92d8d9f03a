//! Batch summary
//!
//! Aggregates item results into counts and the overall error that decides
//! the process exit code.

use serde::Serialize;

use super::ItemResult;
use crate::error::AggregateError;

/// Counts for a finished batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub processed: usize,
    pub succeeded: usize,
    pub errored: usize,
    /// Succeeded items, outside a dry run
    pub written: usize,
    /// Succeeded items, in a dry run
    pub would_write: usize,
    /// Succeeded items that produced a document
    pub artifacts: usize,
    /// Items never started because fail-fast tripped
    pub skipped: usize,
    pub dry_run: bool,
}

impl Summary {
    pub fn with_skipped(mut self, skipped: usize) -> Self {
        self.skipped = skipped;
        self
    }

    pub fn has_errors(&self) -> bool {
        self.errored > 0
    }
}

/// Count results and build the overall error.
///
/// The error is present exactly when at least one result failed. Its
/// messages are `<path>: <message>`, one per item error.
pub fn summarize(results: &[ItemResult], dry_run: bool) -> (Summary, Result<(), AggregateError>) {
    let processed = results.len();
    let errored = results.iter().filter(|r| r.is_error()).count();
    let succeeded = processed - errored;
    let artifacts = results
        .iter()
        .filter(|r| !r.is_error() && r.artifact().is_some())
        .count();

    let summary = Summary {
        processed,
        succeeded,
        errored,
        written: if dry_run { 0 } else { succeeded },
        would_write: if dry_run { succeeded } else { 0 },
        artifacts,
        skipped: 0,
        dry_run,
    };

    if errored == 0 {
        return (summary, Ok(()));
    }

    let messages = results
        .iter()
        .flat_map(|result| {
            result
                .errors()
                .iter()
                .map(move |message| format!("{}: {}", result.item.path.display(), message))
        })
        .collect();

    (
        summary,
        Err(AggregateError {
            processed,
            errored,
            messages,
        }),
    )
}
