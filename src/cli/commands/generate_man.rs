//! Generate man page command

use clap::CommandFactory;
use std::fs;

use super::GenerateManArgs;
use crate::cli::{exit_codes, Cli};
use crate::error::{ActionDocsError, RenderError};

/// File name of the generated page
pub const MAN_PAGE: &str = "gh-action-readme.1";

/// Execute the generate-man command
pub async fn execute(args: GenerateManArgs) -> Result<i32, ActionDocsError> {
    let man = clap_mangen::Man::new(Cli::command());
    let output_path = args.output.join(MAN_PAGE);

    let mut buffer: Vec<u8> = Vec::new();
    man.render(&mut buffer)?;

    fs::write(&output_path, buffer).map_err(|e| RenderError::FileWrite {
        path: output_path.clone(),
        source: e,
    })?;

    println!("Man page generated: {}", output_path.display());

    Ok(exit_codes::SUCCESS)
}
