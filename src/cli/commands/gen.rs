//! Gen command - Generate documentation for action files

use chrono::Utc;
use std::path::PathBuf;

use super::{global_overrides, run_batch, task_error, GenArgs, TaskOutcome, Workspace};
use crate::batch::WorkItem;
use crate::cli::GlobalOptions;
use crate::config::{CliOverrides, OutputFormat};
use crate::diagnostics::Diagnostics;
use crate::error::ActionDocsError;
use crate::manifest;
use crate::render::{action_subpath, output_path, write_output, RenderOptions, Renderer};
use crate::utils::Timer;

pub async fn execute(args: GenArgs, global: &GlobalOptions) -> Result<i32, ActionDocsError> {
    let timer = Timer::start();

    let overrides = CliOverrides {
        theme: args.theme.clone(),
        output_format: args.output_format,
        output_dir: args.output_dir.clone(),
        ..global_overrides(global)
    };
    let workspace = Workspace::prepare(
        global,
        args.path.as_deref(),
        !args.batch.no_recursive,
        overrides,
    )?;

    let settings = GenSettings {
        dry_run: args.dry_run,
        timestamp: args.timestamp,
    };

    run_batch(
        "gen",
        workspace,
        &args.batch,
        args.dry_run,
        args.json,
        timer.elapsed(),
        move |workspace, item, diagnostics| generate(workspace, item, settings, diagnostics),
    )
    .await
}

#[derive(Debug, Clone, Copy)]
struct GenSettings {
    dry_run: bool,
    timestamp: bool,
}

/// Parse, validate, render and write documentation for one action
fn generate(
    workspace: &Workspace,
    item: &WorkItem,
    settings: GenSettings,
    diagnostics: &dyn Diagnostics,
) -> TaskOutcome {
    let config = workspace.item_config(item).map_err(task_error)?;
    let manifest = manifest::parse(&item.path).map_err(task_error)?;

    let problems = manifest.validate();
    if !problems.is_empty() {
        return Err(problems);
    }

    let mut options = RenderOptions::new(config.format().unwrap_or(OutputFormat::Md))
        .with_subpath(action_subpath(&item.path, &workspace.repo_root));
    if settings.timestamp {
        options = options.with_timestamp(Utc::now());
    }

    let renderer = Renderer::new(&config).map_err(task_error)?;
    let content = renderer.render(&manifest, &options).map_err(task_error)?;
    let output: PathBuf = output_path(&item.path, &workspace.root, &config);

    if settings.dry_run {
        diagnostics.info(&format!("Would write {}", output.display()));
    } else {
        write_output(&output, &content).map_err(task_error)?;
        diagnostics.success(&format!("Generated {}", output.display()));
    }

    Ok(Some(output))
}
