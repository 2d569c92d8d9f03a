//! Diagnostics sink
//!
//! Commands report user-facing progress through one injectable
//! [`Diagnostics`] implementation instead of printing directly, so batch
//! tasks running on worker threads and tests share the same channel.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// User-facing message sink shared by batch tasks
pub trait Diagnostics: Send + Sync {
    fn info(&self, message: &str);
    fn success(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
    /// Called after each finished item
    fn progress(&self, done: usize, total: usize);
    /// Called once the batch is over
    fn finish(&self) {}
}

/// Colored stderr output with an optional progress bar.
///
/// `quiet` suppresses everything but errors; `verbose` additionally prints
/// per-item info messages.
pub struct TerminalDiagnostics {
    quiet: bool,
    verbose: bool,
    bar: Mutex<Option<ProgressBar>>,
}

impl TerminalDiagnostics {
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose: verbose && !quiet,
            bar: Mutex::new(None),
        }
    }

    /// Print through the progress bar when one is active so lines do not
    /// tear it
    fn emit(&self, line: String) {
        match self.bar.lock() {
            Ok(guard) => match guard.as_ref() {
                Some(bar) => bar.println(line),
                None => eprintln!("{line}"),
            },
            Err(_) => eprintln!("{line}"),
        }
    }
}

impl Diagnostics for TerminalDiagnostics {
    fn info(&self, message: &str) {
        if self.verbose {
            self.emit(format!("{} {}", "::".blue(), message));
        }
    }

    fn success(&self, message: &str) {
        if !self.quiet {
            self.emit(format!("{} {}", "✓".green(), message));
        }
    }

    fn warn(&self, message: &str) {
        if !self.quiet {
            self.emit(format!("{} {}", "⚠".yellow(), message.yellow()));
        }
    }

    fn error(&self, message: &str) {
        self.emit(format!("{} {}", "✗".red(), message.red()));
    }

    fn progress(&self, done: usize, total: usize) {
        if self.quiet || total < 2 {
            return;
        }
        let Ok(mut guard) = self.bar.lock() else {
            return;
        };
        let bar = guard.get_or_insert_with(|| {
            let bar = ProgressBar::new(total as u64);
            if let Ok(style) =
                ProgressStyle::with_template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} actions")
            {
                bar.set_style(style.progress_chars("=> "));
            }
            bar
        });
        bar.set_position(done as u64);
    }

    fn finish(&self) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(bar) = guard.take() {
                bar.finish_and_clear();
            }
        }
    }
}

/// Message severity recorded by [`CollectingDiagnostics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warn,
    Error,
}

/// Records every message; for tests and embedding
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    messages: Mutex<Vec<(Level, String)>>,
    last_progress: Mutex<Option<(usize, usize)>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(Level, String)> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    pub fn last_progress(&self) -> Option<(usize, usize)> {
        self.last_progress.lock().ok().and_then(|p| *p)
    }

    fn record(&self, level: Level, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((level, message.to_string()));
        }
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn info(&self, message: &str) {
        self.record(Level::Info, message);
    }

    fn success(&self, message: &str) {
        self.record(Level::Success, message);
    }

    fn warn(&self, message: &str) {
        self.record(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.record(Level::Error, message);
    }

    fn progress(&self, done: usize, total: usize) {
        if let Ok(mut last) = self.last_progress.lock() {
            *last = Some((done, total));
        }
    }
}
