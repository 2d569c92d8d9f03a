//! Validate command - Check action manifests

use super::{global_overrides, run_batch, task_error, TaskOutcome, ValidateArgs, Workspace};
use crate::batch::WorkItem;
use crate::cli::GlobalOptions;
use crate::diagnostics::Diagnostics;
use crate::error::ActionDocsError;
use crate::manifest;
use crate::schema::validate_schema;
use crate::utils::Timer;

pub async fn execute(args: ValidateArgs, global: &GlobalOptions) -> Result<i32, ActionDocsError> {
    let timer = Timer::start();

    let workspace = Workspace::prepare(
        global,
        args.path.as_deref(),
        !args.batch.no_recursive,
        global_overrides(global),
    )?;

    let strict = args.strict;
    run_batch(
        "validate",
        workspace,
        &args.batch,
        false,
        args.json,
        timer.elapsed(),
        move |workspace, item, diagnostics| check(workspace, item, strict, diagnostics),
    )
    .await
}

/// Relaxed checks always; schema checks in strict mode
fn check(
    workspace: &Workspace,
    item: &WorkItem,
    strict: bool,
    diagnostics: &dyn Diagnostics,
) -> TaskOutcome {
    let config = workspace.item_config(item).map_err(task_error)?;
    let manifest = manifest::parse(&item.path).map_err(task_error)?;

    let mut errors = manifest.validate();
    if strict {
        match validate_schema(&item.path, &config.schema) {
            Ok(violations) => errors.extend(violations.into_iter().map(|v| format!("schema {v}"))),
            Err(e) => errors.push(e.to_string()),
        }
    }

    if errors.is_empty() {
        diagnostics.success(&format!("{} is valid", item.path.display()));
        Ok(None)
    } else {
        Err(errors)
    }
}
