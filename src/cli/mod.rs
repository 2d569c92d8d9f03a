//! # CLI Module
//!
//! This module defines the command-line interface for gh-action-readme using `clap`.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `gen` | Generate documentation for discovered actions |
//! | `validate` | Validate action manifests |
//! | `config` | Show, initialize, or locate configuration |
//! | `deps` | List `uses:` dependencies of composite actions |
//! | `schema` | Print the built-in action JSON Schema |
//!
//! ## Global Options
//!
//! - `-v, --verbose` - Increase verbosity level (use multiple times: -v, -vv, -vvv)
//! - `-q, --quiet` - Only print errors
//! - `-c, --config <FILE>` - Global configuration file
//! - `-C, --directory <DIR>` - Working directory (defaults to current directory)
//!
//! ## Examples
//!
//! ```bash
//! # Document every action in the repository
//! gh-action-readme gen
//!
//! # HTML output into docs/ next to each action, without writing
//! gh-action-readme gen --output-format html --output-dir docs --dry-run
//!
//! # Strict validation, stopping at the first failure
//! gh-action-readme validate --strict --fail-fast
//! ```

pub mod commands;
pub mod exit_codes;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use commands::{ConfigArgs, DepsArgs, GenArgs, GenerateManArgs, SchemaArgs, ValidateArgs};

/// gh-action-readme - Generate documentation for GitHub Actions
#[derive(Parser, Debug)]
#[command(name = "gh-action-readme")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Global configuration file (replaces the search path)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Working directory (defaults to current directory)
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate documentation for action.yml files
    Gen(GenArgs),

    /// Validate action.yml files
    Validate(ValidateArgs),

    /// Inspect or create configuration
    Config(ConfigArgs),

    /// List dependencies of composite actions
    Deps(DepsArgs),

    /// Print the action metadata JSON Schema
    Schema(SchemaArgs),

    /// Generate man page (hidden, for packaging)
    #[command(hide = true)]
    GenerateMan(GenerateManArgs),
}

/// Options shared by every command
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub verbose: u8,
    pub quiet: bool,
    pub config: Option<PathBuf>,
    pub directory: Option<PathBuf>,
}

impl GlobalOptions {
    /// Working directory for relative paths
    pub fn base_dir(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// `path` resolved against the working directory
    pub fn resolve(&self, path: Option<&Path>) -> PathBuf {
        match path {
            Some(p) if p.is_absolute() => p.to_path_buf(),
            Some(p) => self.base_dir().join(p),
            None => self.base_dir(),
        }
    }
}

impl Cli {
    pub fn global_options(&self) -> GlobalOptions {
        GlobalOptions {
            verbose: self.verbose,
            quiet: self.quiet,
            config: self.config.clone(),
            directory: self.directory.clone(),
        }
    }
}
