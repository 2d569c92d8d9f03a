//! Deps command - List `uses:` dependencies of composite actions

use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::DepsArgs;
use crate::cli::{exit_codes, GlobalOptions};
use crate::deps::{self, Dependency};
use crate::error::{ActionDocsError, AggregateError, RenderError};
use crate::manifest;
use crate::scanner::discover_action_files;

#[derive(Debug, Serialize)]
struct ActionDependencies {
    path: PathBuf,
    dependencies: Vec<Dependency>,
    security_notes: Vec<String>,
}

pub async fn execute(args: DepsArgs, global: &GlobalOptions) -> Result<i32, ActionDocsError> {
    let target = global.resolve(args.path.as_deref());
    let files = discover_action_files(&target, !args.no_recursive)?;

    let mut reports = Vec::new();
    let mut errors = Vec::new();
    for path in files {
        match manifest::parse(&path) {
            Ok(manifest) => {
                let dependencies = deps::analyze(&manifest);
                let security_notes = deps::security_notes(&dependencies);
                reports.push(ActionDependencies {
                    path,
                    dependencies,
                    security_notes,
                });
            }
            Err(e) => errors.push(format!("{}: {}", path.display(), e)),
        }
    }

    if args.json {
        let json = serde_json::to_string_pretty(&reports).map_err(RenderError::from)?;
        println!("{json}");
    } else if !global.quiet {
        print!("{}", format_table(&reports));
    }

    if errors.is_empty() {
        Ok(exit_codes::SUCCESS)
    } else {
        Err(AggregateError {
            processed: reports.len() + errors.len(),
            errored: errors.len(),
            messages: errors,
        }
        .into())
    }
}

fn format_table(reports: &[ActionDependencies]) -> String {
    let mut output = String::new();

    for report in reports {
        output.push_str(&format!("{}\n", report.path.display().to_string().bold()));
        if report.dependencies.is_empty() {
            output.push_str(&format!("  {}\n", "no dependencies".dimmed()));
            continue;
        }

        for dep in &report.dependencies {
            let kind = if dep.kind.is_pinned() {
                dep.kind.label().green()
            } else {
                dep.kind.label().yellow()
            };
            output.push_str(&format!(
                "  {} {} {}\n",
                "•".dimmed(),
                dep.uses.cyan(),
                format!("[{kind}]")
            ));
        }
        for note in &report.security_notes {
            output.push_str(&format!("    {} {}\n", "⚠".yellow(), note.dimmed()));
        }
    }

    output
}
