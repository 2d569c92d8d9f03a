//! JSON Schema validation of action manifests
//!
//! The manifest YAML is converted to a JSON value and checked against the
//! configured schema. When the configured schema is the default path and it
//! does not exist on disk, the schema compiled into the binary is used.

use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::config::DEFAULT_SCHEMA_PATH;
use crate::error::SchemaError;

/// Schema shipped with the binary
pub const EMBEDDED_SCHEMA: &str = include_str!("../schemas/action.schema.json");

/// Validate the manifest at `path` against `schema_path`.
///
/// Returns one message per violation, formatted as `<location>: <message>`.
/// An empty vector means the manifest conforms.
pub fn validate_schema(path: &Path, schema_path: &str) -> Result<Vec<String>, SchemaError> {
    let schema = load_schema(schema_path)?;
    let instance = load_instance(path)?;

    let validator =
        jsonschema::validator_for(&schema).map_err(|e| SchemaError::InvalidSchema {
            path: Path::new(schema_path).to_path_buf(),
            message: e.to_string(),
        })?;

    let errors: Vec<String> = validator
        .iter_errors(&instance)
        .map(|error| {
            let location = error.instance_path.to_string();
            let location = if location.is_empty() {
                "(root)".to_string()
            } else {
                location
            };
            format!("{location}: {error}")
        })
        .collect();

    debug!(
        "Schema check of {} found {} violation(s)",
        path.display(),
        errors.len()
    );
    Ok(errors)
}

/// Load the schema document, falling back to the embedded one
pub fn load_schema(schema_path: &str) -> Result<Value, SchemaError> {
    let path = Path::new(schema_path);
    let use_embedded =
        schema_path.is_empty() || (schema_path == DEFAULT_SCHEMA_PATH && !path.exists());

    let (content, origin) = if use_embedded {
        debug!("Using embedded action schema");
        (EMBEDDED_SCHEMA.to_string(), Path::new(DEFAULT_SCHEMA_PATH))
    } else {
        let content = fs::read_to_string(path).map_err(|e| SchemaError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        (content, path)
    };

    serde_json::from_str(&content).map_err(|e| SchemaError::Parse {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })
}

fn load_instance(path: &Path) -> Result<Value, SchemaError> {
    let content = fs::read_to_string(path).map_err(|e| SchemaError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let value: Value = serde_yaml::from_str(&content).map_err(|e| SchemaError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(match value {
        Value::Null => Value::Object(Default::default()),
        other => other,
    })
}
