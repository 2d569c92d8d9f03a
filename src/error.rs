//! Error types for gh-action-readme
//!
//! Each stage (config, discovery, manifest, schema, render) has its own
//! `thiserror` enum; [`ActionDocsError`] wraps them for the CLI, which maps
//! variants to exit codes.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for gh-action-readme
#[derive(Error, Debug)]
pub enum ActionDocsError {
    /// Configuration loading or validation errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Action file discovery errors
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    /// Action manifest errors
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Schema validation errors
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Rendering and output errors
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// One or more batch items failed
    #[error("{0}")]
    Aggregate(#[from] AggregateError),

    /// Bare I/O errors from the CLI layer
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while resolving configuration.
///
/// A missing optional file is not an error: loaders return `Ok(None)` for it.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configuration file exists but could not be read
    #[error("failed to read {source_name} config '{}': {source}", path.display())]
    Read {
        /// Configuration source that owned the file
        source_name: &'static str,
        /// Path to the file
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// A configuration file exists but is not valid YAML for `Config`
    #[error("failed to parse {source_name} config '{}': {source}", path.display())]
    Parse {
        /// Configuration source that owned the file
        source_name: &'static str,
        /// Path to the file
        path: PathBuf,
        /// The underlying YAML error
        source: serde_yaml::Error,
    },

    /// An environment variable holds a value the field cannot accept
    #[error("invalid value '{value}' for environment variable {key}")]
    EnvValue {
        /// Variable name
        key: String,
        /// Offending value
        value: String,
    },

    /// The resolved configuration is inconsistent
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Human readable reason
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            reason: reason.into(),
        }
    }
}

/// Errors that occur while discovering action files
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// The path to scan does not exist
    #[error("path not found: {}", path.display())]
    NotFound {
        /// Missing path
        path: PathBuf,
    },

    /// Nothing named action.yml / action.yaml was found
    #[error("no action.yml or action.yaml files found under {}", path.display())]
    NoActionFiles {
        /// Path that was scanned
        path: PathBuf,
    },

    /// A file was given explicitly but is not an action manifest
    #[error("not an action manifest: {}", path.display())]
    NotAnActionFile {
        /// Offending path
        path: PathBuf,
    },
}

/// Errors that occur while reading action manifests
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Failed to read the file
    #[error("failed to read '{}': {source}", path.display())]
    FileRead {
        /// Path to the manifest
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Failed to parse the YAML document
    #[error("failed to parse '{}': {source}", path.display())]
    Parse {
        /// Path to the manifest
        path: PathBuf,
        /// The underlying YAML error
        source: serde_yaml::Error,
    },
}

/// Errors that occur while loading or compiling a JSON Schema
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Failed to read the schema or the instance
    #[error("failed to read '{}': {source}", path.display())]
    FileRead {
        /// Path that failed
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// The schema or instance is not valid JSON/YAML
    #[error("failed to parse '{}': {message}", path.display())]
    Parse {
        /// Path that failed
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// The schema itself is invalid
    #[error("invalid schema '{}': {message}", path.display())]
    InvalidSchema {
        /// Path to the schema
        path: PathBuf,
        /// Compiler message
        message: String,
    },
}

/// Errors that occur while rendering or writing documentation
#[derive(Error, Debug)]
pub enum RenderError {
    /// A template, header, or footer file could not be read
    #[error("failed to read '{}': {source}", path.display())]
    FileRead {
        /// Path that failed
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Failed to write generated documentation
    #[error("failed to write '{}': {source}", path.display())]
    FileWrite {
        /// Path that failed
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Template compilation or execution failed
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Summary-level error: one or more items in a batch failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{errored} of {processed} action(s) failed:\n{}", messages.join("\n"))]
pub struct AggregateError {
    /// Number of processed items
    pub processed: usize,
    /// Number of failed items
    pub errored: usize,
    /// Per-item messages, prefixed with the item path
    pub messages: Vec<String>,
}
