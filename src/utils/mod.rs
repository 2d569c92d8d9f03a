//! Utility modules for gh-action-readme

pub mod timing;

pub use timing::{format_duration, RunTiming, Timer};
