//! Schema command - Display the action metadata JSON Schema

use colored::Colorize;

use super::SchemaArgs;
use crate::cli::exit_codes;
use crate::error::{ActionDocsError, RenderError};
use crate::schema::EMBEDDED_SCHEMA;

pub async fn execute(args: SchemaArgs) -> Result<i32, ActionDocsError> {
    match args.output {
        Some(output_path) => {
            std::fs::write(&output_path, EMBEDDED_SCHEMA).map_err(|e| RenderError::FileWrite {
                path: output_path.clone(),
                source: e,
            })?;

            println!(
                "{} Schema written to: {}",
                "Success:".green().bold(),
                output_path.display().to_string().cyan()
            );
        }
        None => {
            print!("{EMBEDDED_SCHEMA}");
        }
    }

    Ok(exit_codes::SUCCESS)
}
