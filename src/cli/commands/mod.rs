//! CLI commands module

pub mod config;
pub mod deps;
pub mod gen;
pub mod generate_man;
pub mod schema;
pub mod validate;

use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::output::{JsonOutput, RunReport, SummaryRenderer, TerminalOutput};
use super::{exit_codes, GlobalOptions};
use crate::batch::{summarize, BatchProcessor, ItemResult, WorkItem, DEFAULT_CONCURRENCY};
use crate::config::{
    apply_cli_overrides, validate_configuration, CliOverrides, Config, ConfigLoader,
    ConfigSource, LoaderOptions, OutputFormat,
};
use crate::diagnostics::{Diagnostics, TerminalDiagnostics};
use crate::error::{ActionDocsError, ConfigError};
use crate::scanner::{discover_action_files, find_repository_root};
use crate::utils::{RunTiming, Timer};

/// Arguments for the gen command
#[derive(Args, Debug)]
pub struct GenArgs {
    /// Action file or directory to document (defaults to the working directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, value_name = "FORMAT")]
    pub output_format: Option<OutputFormat>,

    /// Output directory, relative to each action unless absolute
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Built-in theme name or path to a theme directory / template
    #[arg(short, long, value_name = "THEME")]
    pub theme: Option<String>,

    /// Render everything but do not write files
    #[arg(long)]
    pub dry_run: bool,

    /// Add a generation timestamp to each document
    #[arg(long)]
    pub timestamp: bool,

    #[command(flatten)]
    pub batch: BatchArgs,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Action file or directory to validate (defaults to the working directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Also validate against the JSON Schema
    #[arg(long)]
    pub strict: bool,

    #[command(flatten)]
    pub batch: BatchArgs,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// Batch options shared by gen and validate
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Stop starting new actions after the first failure
    #[arg(long)]
    pub fail_fast: bool,

    /// Maximum number of actions processed at once
    #[arg(short = 'j', long, value_name = "N", default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Only look at the given directory, not its subdirectories
    #[arg(long)]
    pub no_recursive: bool,
}

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the resolved configuration (tokens masked)
    Show(ConfigShowArgs),

    /// Write a starter configuration file
    Init(ConfigInitArgs),

    /// List built-in themes
    Themes,

    /// Show where configuration files are looked up
    Path,
}

/// Arguments for `config show`
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Action directory whose config.yaml applies on top
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Only load these sources (comma separated)
    #[arg(long, value_delimiter = ',', value_name = "SOURCES")]
    pub only: Option<Vec<ConfigSource>>,

    /// Skip these sources (comma separated)
    #[arg(long, value_delimiter = ',', value_name = "SOURCES")]
    pub skip: Option<Vec<ConfigSource>>,

    /// Print JSON instead of YAML
    #[arg(long)]
    pub json: bool,
}

impl ConfigShowArgs {
    pub fn loader_options(&self) -> LoaderOptions {
        let mut options = match &self.only {
            Some(sources) => LoaderOptions::only(sources),
            None => LoaderOptions::all(),
        };
        for source in self.skip.iter().flatten() {
            options = options.without(*source);
        }
        options
    }
}

/// Arguments for `config init`
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Write the global config instead of the repository's .ghreadme.yaml
    #[arg(long)]
    pub global: bool,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the deps command
#[derive(Args, Debug)]
pub struct DepsArgs {
    /// Action file or directory (defaults to the working directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Only look at the given directory, not its subdirectories
    #[arg(long)]
    pub no_recursive: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the schema command
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Write the schema to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the generate-man command
#[derive(Args, Debug)]
pub struct GenerateManArgs {
    /// Output directory for the man page
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

/// Discovered actions and the configuration they share.
///
/// The base configuration is resolved once; each item then layers its own
/// `config.yaml` and the command line on top through [`Workspace::item_config`].
pub struct Workspace {
    /// Directory discovery started from
    pub root: PathBuf,
    /// Repository root used for repo config and `uses:` subpaths
    pub repo_root: PathBuf,
    pub loader: ConfigLoader,
    pub base: Config,
    pub overrides: CliOverrides,
    /// `base` with command line overrides, used for run-wide settings
    pub effective: Config,
    files: Vec<PathBuf>,
}

impl Workspace {
    pub fn prepare(
        global: &GlobalOptions,
        path: Option<&Path>,
        recursive: bool,
        overrides: CliOverrides,
    ) -> Result<Self, ActionDocsError> {
        let target = global.resolve(path);
        let files = discover_action_files(&target, recursive)?;

        let root = if target.is_file() {
            target
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."))
        } else {
            target
        };
        let repo_root = find_repository_root(&root).unwrap_or_else(|| root.clone());
        debug!(root = %root.display(), repo_root = %repo_root.display(), "Workspace");

        let loader = ConfigLoader::new(LoaderOptions::all());
        let base = loader.load_configuration(global.config.as_deref(), Some(&repo_root), None)?;

        let mut effective = base.clone();
        apply_cli_overrides(&mut effective, &overrides);
        validate_configuration(&effective)?;

        Ok(Self {
            root,
            repo_root,
            loader,
            base,
            overrides,
            effective,
            files,
        })
    }

    /// Work items in discovery order
    pub fn take_items(&mut self) -> Vec<WorkItem> {
        std::mem::take(&mut self.files)
            .into_iter()
            .map(WorkItem::new)
            .collect()
    }

    /// Configuration for one action
    pub fn item_config(&self, item: &WorkItem) -> Result<Config, ConfigError> {
        let mut config = self.loader.action_view(&self.base, item.dir())?;
        apply_cli_overrides(&mut config, &self.overrides);
        validate_configuration(&config)?;
        Ok(config)
    }

    pub fn diagnostics(&self) -> Arc<dyn Diagnostics> {
        Arc::new(TerminalDiagnostics::new(
            self.effective.quiet,
            self.effective.verbose,
        ))
    }
}

/// Command line values shared by every batch command
pub(crate) fn global_overrides(global: &GlobalOptions) -> CliOverrides {
    CliOverrides {
        verbose: global.verbose > 0,
        quiet: global.quiet,
        ..Default::default()
    }
}

/// Outcome of one batch task: the written artifact, or error messages
pub(crate) type TaskOutcome = Result<Option<PathBuf>, Vec<String>>;

/// Run `task` over every discovered action and print the run report.
///
/// Returns the aggregate error when any item failed.
pub(crate) async fn run_batch<F>(
    command: &'static str,
    mut workspace: Workspace,
    batch: &BatchArgs,
    dry_run: bool,
    json: bool,
    discovery: Duration,
    task: F,
) -> Result<i32, ActionDocsError>
where
    F: Fn(&Workspace, &WorkItem, &dyn Diagnostics) -> TaskOutcome + Send + Sync + 'static,
{
    let items = workspace.take_items();
    let diagnostics = workspace.diagnostics();
    let workspace = Arc::new(workspace);

    let mut processor = BatchProcessor::new(batch.concurrency).with_fail_fast(batch.fail_fast);
    let progress = Arc::clone(&diagnostics);
    processor.set_progress_callback(Box::new(move |result, done, total| {
        report_failure(progress.as_ref(), result);
        progress.progress(done, total)
    }));

    let timer = Timer::start();
    let shared = Arc::clone(&workspace);
    let sink = Arc::clone(&diagnostics);
    let run = processor
        .run(items, move |item| match task(&shared, &item, sink.as_ref()) {
            Ok(artifact) => ItemResult::success(item, artifact),
            Err(errors) => ItemResult::failed(item, errors),
        })
        .await;
    diagnostics.finish();
    if !run.skipped.is_empty() {
        diagnostics.warn(&format!(
            "Fail-fast: {} action(s) skipped after the first failure",
            run.skipped.len()
        ));
    }

    let timing = RunTiming {
        discovery,
        processing: timer.elapsed(),
    };
    let (summary, outcome) = summarize(&run.results, dry_run);
    let report = RunReport::new(
        command,
        &run,
        summary.with_skipped(run.skipped.len()),
        timing,
    );

    if json {
        println!("{}", JsonOutput::new().render_summary(&report)?);
    } else if !workspace.effective.quiet {
        let terminal = TerminalOutput::new(workspace.effective.verbose);
        print!("{}", terminal.render_summary(&report)?);
    }

    outcome?;
    Ok(exit_codes::SUCCESS)
}

/// Report a failed item as soon as it finishes
fn report_failure(diagnostics: &dyn Diagnostics, result: &ItemResult) {
    if let Some(first) = result.errors().first() {
        let more = result.errors().len() - 1;
        let suffix = if more > 0 {
            format!(" (+{more} more)")
        } else {
            String::new()
        };
        diagnostics.error(&format!("{}: {first}{suffix}", result.item.path.display()));
    }
}

/// Wrap a single error as task error messages
pub(crate) fn task_error(error: impl std::fmt::Display) -> Vec<String> {
    vec![error.to_string()]
}
