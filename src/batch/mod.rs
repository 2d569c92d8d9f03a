//! # Batch Processing
//!
//! Runs a task over every discovered action file with bounded parallelism.
//!
//! - one tokio task per item, admitted through a [`Semaphore`] of size
//!   `concurrency`; the task body runs on the blocking pool
//! - each item yields exactly one [`ItemResult`] once admitted; failures
//!   are captured in the result, never raised
//! - with fail-fast, the first failing item trips a one-shot
//!   [`AbortSignal`]; items not yet admitted are skipped while admitted
//!   ones run to completion
//! - results flow to the caller through a channel; `run` returns only
//!   after every spawned task has finished

pub mod summary;

pub use summary::{summarize, Summary};

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, info, warn};

/// Default number of concurrently running tasks
pub const DEFAULT_CONCURRENCY: usize = 4;

/// A discovered action file
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkItem {
    pub path: PathBuf,
}

impl WorkItem {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Directory containing the action file
    pub fn dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }
}

impl From<PathBuf> for WorkItem {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

/// Outcome of one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The task succeeded. `artifact` is the file it generated, if any.
    Success { artifact: Option<PathBuf> },
    /// The task failed with at least one message
    Failed { errors: Vec<String> },
}

/// Result for one admitted item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemResult {
    pub item: WorkItem,
    pub outcome: Outcome,
}

impl ItemResult {
    pub fn success(item: WorkItem, artifact: Option<PathBuf>) -> Self {
        Self {
            item,
            outcome: Outcome::Success { artifact },
        }
    }

    /// A failed result. An empty `errors` list is replaced by a generic
    /// message so failures always carry at least one.
    pub fn failed(item: WorkItem, errors: Vec<String>) -> Self {
        let errors = if errors.is_empty() {
            vec!["unknown error".to_string()]
        } else {
            errors
        };
        Self {
            item,
            outcome: Outcome::Failed { errors },
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Failed { .. })
    }

    pub fn errors(&self) -> &[String] {
        match &self.outcome {
            Outcome::Failed { errors } => errors,
            Outcome::Success { .. } => &[],
        }
    }

    pub fn artifact(&self) -> Option<&Path> {
        match &self.outcome {
            Outcome::Success { artifact } => artifact.as_deref(),
            Outcome::Failed { .. } => None,
        }
    }
}

/// One-shot broadcast cancellation signal.
///
/// Tripping it more than once is a no-op; the first cause is kept.
#[derive(Debug, Clone, Default)]
pub struct AbortSignal {
    cause: Arc<OnceLock<PathBuf>>,
}

impl AbortSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trip the signal. Returns `true` only for the call that tripped it.
    pub fn trigger(&self, cause: &Path) -> bool {
        self.cause.set(cause.to_path_buf()).is_ok()
    }

    pub fn is_triggered(&self) -> bool {
        self.cause.get().is_some()
    }

    /// Item whose failure tripped the signal
    pub fn cause(&self) -> Option<&Path> {
        self.cause.get().map(PathBuf::as_path)
    }
}

/// Everything a batch run produced
#[derive(Debug, Clone, Default)]
pub struct BatchRun {
    /// One result per admitted item, in completion order
    pub results: Vec<ItemResult>,
    /// Items never admitted because fail-fast tripped
    pub skipped: Vec<WorkItem>,
}

/// Progress hook: `(result, completed, total)`
pub type ProgressCallback = Box<dyn Fn(&ItemResult, usize, usize) + Send + Sync>;

enum Message {
    Finished(ItemResult),
    Skipped(WorkItem),
}

/// Runs a task over work items with bounded concurrency
pub struct BatchProcessor {
    concurrency: usize,
    fail_fast: bool,
    progress: Option<ProgressCallback>,
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_CONCURRENCY)
    }
}

impl BatchProcessor {
    /// A processor running at most `concurrency` tasks at once (minimum 1)
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
            fail_fast: false,
            progress: None,
        }
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Called from the collecting loop with `(result, completed, total)`
    pub fn set_progress_callback(&mut self, callback: ProgressCallback) {
        self.progress = Some(callback);
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Run `task` over `items`.
    pub async fn run<F>(&self, items: Vec<WorkItem>, task: F) -> BatchRun
    where
        F: Fn(WorkItem) -> ItemResult + Send + Sync + 'static,
    {
        let total = items.len();
        let task = Arc::new(task);
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let abort = AbortSignal::new();
        let (tx, mut rx) = mpsc::unbounded_channel();

        info!(
            items = total,
            concurrency = self.concurrency,
            fail_fast = self.fail_fast,
            "Starting batch"
        );

        let mut handles = Vec::with_capacity(total);
        for item in items {
            let semaphore = Arc::clone(&semaphore);
            let abort = abort.clone();
            let tx = tx.clone();
            let task = Arc::clone(&task);
            let fail_fast = self.fail_fast;

            handles.push(tokio::spawn(async move {
                if abort.is_triggered() {
                    let _ = tx.send(Message::Skipped(item));
                    return;
                }

                let Ok(_permit) = semaphore.acquire_owned().await else {
                    let _ = tx.send(Message::Skipped(item));
                    return;
                };

                // Re-check: the signal may have tripped while waiting for a slot
                if abort.is_triggered() {
                    let _ = tx.send(Message::Skipped(item));
                    return;
                }

                debug!(path = %item.path.display(), "Processing item");
                let fallback = item.clone();
                let result = match tokio::task::spawn_blocking(move || (*task)(item)).await {
                    Ok(result) => result,
                    Err(e) => ItemResult::failed(fallback, vec![format!("task aborted: {e}")]),
                };

                if fail_fast && result.is_error() && abort.trigger(&result.item.path) {
                    warn!(path = %result.item.path.display(), "Fail-fast: stopping new items");
                }

                let _ = tx.send(Message::Finished(result));
            }));
        }
        drop(tx);

        let mut run = BatchRun::default();
        while let Some(message) = rx.recv().await {
            match message {
                Message::Finished(result) => {
                    if let Some(progress) = &self.progress {
                        progress(&result, run.results.len() + run.skipped.len() + 1, total);
                    }
                    run.results.push(result);
                }
                Message::Skipped(item) => {
                    debug!(path = %item.path.display(), "Skipped after abort");
                    run.skipped.push(item);
                }
            }
        }

        for handle in handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "Batch task did not complete cleanly");
            }
        }

        info!(
            results = run.results.len(),
            errors = run.results.iter().filter(|r| r.is_error()).count(),
            skipped = run.skipped.len(),
            "Batch finished"
        );
        run
    }
}

/// Run `task` over `items` and return one result per admitted item.
pub async fn process_all<F>(
    items: Vec<WorkItem>,
    concurrency: usize,
    fail_fast: bool,
    task: F,
) -> Vec<ItemResult>
where
    F: Fn(WorkItem) -> ItemResult + Send + Sync + 'static,
{
    BatchProcessor::new(concurrency)
        .with_fail_fast(fail_fast)
        .run(items, task)
        .await
        .results
}
