//! gh-action-readme library
//!
//! Discovers `action.yml` files, resolves layered configuration, and
//! validates or documents every action concurrently.
//!
//! The command line front end lives in [`cli`]; everything else can be
//! embedded directly:
//!
//! ```rust,no_run
//! use gh_action_readme::{batch, config, manifest, scanner};
//! use std::path::Path;
//!
//! # async fn run() -> Result<(), gh_action_readme::ActionDocsError> {
//! let files = scanner::discover_action_files(Path::new("."), true)?;
//! let base = config::load_configuration(None, Some(Path::new(".")), None)?;
//! let items = files.into_iter().map(batch::WorkItem::new).collect();
//!
//! let results = batch::process_all(items, 4, false, move |item| {
//!     match manifest::parse(&item.path) {
//!         Ok(m) if m.validate().is_empty() => batch::ItemResult::success(item, None),
//!         Ok(m) => batch::ItemResult::failed(item, m.validate()),
//!         Err(e) => batch::ItemResult::failed(item, vec![e.to_string()]),
//!     }
//! })
//! .await;
//! let (summary, outcome) = batch::summarize(&results, false);
//! println!("{} processed with theme {}", summary.processed, base.theme);
//! outcome?;
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod cli;
pub mod config;
pub mod deps;
pub mod diagnostics;
pub mod error;
pub mod manifest;
pub mod render;
pub mod scanner;
pub mod schema;
pub mod utils;

pub use error::ActionDocsError;
