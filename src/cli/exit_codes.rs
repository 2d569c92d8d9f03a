//! Exit codes for the CLI
//!
//! # Exit Code Reference
//!
//! | Code | Constant | Meaning | Example |
//! |------|----------|---------|---------|
//! | 0 | `SUCCESS` | Success | Every action documented or valid |
//! | 1 | `ITEM_ERRORS` | One or more actions failed | Invalid manifest, template error |
//! | 3 | `ERROR` | Configuration or runtime error | Unreadable config, no action files |
//! | 4 | `INVALID_ARGS` | Invalid arguments | Unknown flag or value |
//!
//! Code 2 is unused.

use crate::error::ActionDocsError;

/// Command completed and every item succeeded
pub const SUCCESS: i32 = 0;

/// At least one action failed to validate or render
pub const ITEM_ERRORS: i32 = 1;

/// Configuration, discovery, or I/O error outside the batch
pub const ERROR: i32 = 3;

/// Command line could not be parsed
pub const INVALID_ARGS: i32 = 4;

/// Exit code for an error returned by a command
pub fn for_error(error: &ActionDocsError) -> i32 {
    match error {
        ActionDocsError::Aggregate(_) => ITEM_ERRORS,
        _ => ERROR,
    }
}
