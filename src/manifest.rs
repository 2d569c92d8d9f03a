//! # Action Manifests
//!
//! Parsing and relaxed validation of `action.yml` metadata files.
//!
//! ```rust
//! use gh_action_readme::manifest::ActionManifest;
//!
//! let manifest = ActionManifest::from_yaml(
//!     "name: Hello\ndescription: Says hello\nruns:\n  using: node20\n  main: index.js\n",
//! )
//! .unwrap();
//! assert!(manifest.validate().is_empty());
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::ManifestError;

/// Values accepted for `runs.using`
pub const SUPPORTED_RUNTIMES: [&str; 6] =
    ["node12", "node16", "node20", "node24", "docker", "composite"];

/// Parsed `action.yml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionManifest {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub inputs: BTreeMap<String, ActionInput>,
    pub outputs: BTreeMap<String, ActionOutput>,
    pub runs: Runs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branding: Option<Branding>,
}

/// An entry under `inputs`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionInput {
    pub description: String,
    #[serde(deserialize_with = "lenient_bool")]
    pub required: bool,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(
        rename = "deprecationMessage",
        skip_serializing_if = "Option::is_none"
    )]
    pub deprecation_message: Option<String>,
}

/// An entry under `outputs`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionOutput {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// The `runs` block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Runs {
    pub using: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<Step>,
}

/// A composite action step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Step {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uses: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
}

/// Marketplace branding
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branding {
    pub icon: String,
    pub color: String,
}

impl ActionManifest {
    /// Parse a manifest from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Structural problems that make the manifest unusable.
    ///
    /// This is the relaxed check; strict mode also validates against the
    /// JSON Schema.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push("missing required field 'name'".to_string());
        }
        if self.description.trim().is_empty() {
            errors.push("missing required field 'description'".to_string());
        }

        match self.runs.using.as_str() {
            "" => errors.push("missing required field 'runs.using'".to_string()),
            "docker" => {
                if self.runs.image.as_deref().unwrap_or_default().is_empty() {
                    errors.push("docker actions require 'runs.image'".to_string());
                }
            }
            "composite" => {
                if self.runs.steps.is_empty() {
                    errors.push("composite actions require 'runs.steps'".to_string());
                }
                for (index, step) in self.runs.steps.iter().enumerate() {
                    match (&step.uses, &step.run) {
                        (None, None) => errors.push(format!(
                            "step {} must define either 'uses' or 'run'",
                            index + 1
                        )),
                        (Some(_), Some(_)) => errors.push(format!(
                            "step {} cannot define both 'uses' and 'run'",
                            index + 1
                        )),
                        (None, Some(_)) if step.shell.is_none() => errors.push(format!(
                            "step {} uses 'run' without 'shell'",
                            index + 1
                        )),
                        _ => {}
                    }
                }
            }
            using if using.starts_with("node") && SUPPORTED_RUNTIMES.contains(&using) => {
                if self.runs.main.as_deref().unwrap_or_default().is_empty() {
                    errors.push(format!("{using} actions require 'runs.main'"));
                }
            }
            other => errors.push(format!(
                "unsupported runs.using '{other}' (expected one of: {})",
                SUPPORTED_RUNTIMES.join(", ")
            )),
        }

        for (name, input) in &self.inputs {
            if input.description.trim().is_empty() {
                errors.push(format!("input '{name}' is missing a description"));
            }
        }

        errors
    }

    pub fn is_composite(&self) -> bool {
        self.runs.using == "composite"
    }
}

/// Read and parse an action manifest
pub fn parse(path: &Path) -> Result<ActionManifest, ManifestError> {
    let content = fs::read_to_string(path).map_err(|e| ManifestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    ActionManifest::from_yaml(&content).map_err(|e| ManifestError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::Bool(b) => Ok(b),
        serde_yaml::Value::Null => Ok(false),
        serde_yaml::Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" => Ok(true),
            "false" | "no" | "" => Ok(false),
            other => Err(D::Error::custom(format!("invalid boolean '{other}'"))),
        },
        other => Err(D::Error::custom(format!("invalid boolean {other:?}"))),
    }
}

fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::Null => Ok(None),
        serde_yaml::Value::Bool(b) => Ok(Some(b.to_string())),
        serde_yaml::Value::Number(n) => Ok(Some(n.to_string())),
        serde_yaml::Value::String(s) => Ok(Some(s)),
        other => Err(D::Error::custom(format!(
            "expected a scalar default value, found {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const NODE_ACTION: &str = r#"
name: Setup Widget
description: Installs the widget CLI
author: Acme
inputs:
  version:
    description: Version to install
    required: false
    default: 1.2
  token:
    description: Token | with pipe
    required: "true"
  legacy:
    description: Old flag
    default: false
    deprecationMessage: Use version instead
outputs:
  path:
    description: Install location
runs:
  using: node20
  main: dist/index.js
branding:
  icon: box
  color: blue
"#;

    #[test]
    fn test_parse_node_action() {
        let manifest = ActionManifest::from_yaml(NODE_ACTION).unwrap();
        assert_eq!(manifest.name, "Setup Widget");
        assert_eq!(manifest.author.as_deref(), Some("Acme"));
        assert_eq!(manifest.inputs.len(), 3);
        assert_eq!(manifest.inputs["version"].default.as_deref(), Some("1.2"));
        assert!(manifest.inputs["token"].required);
        assert_eq!(manifest.inputs["legacy"].default.as_deref(), Some("false"));
        assert_eq!(
            manifest.inputs["legacy"].deprecation_message.as_deref(),
            Some("Use version instead")
        );
        assert_eq!(manifest.branding.as_ref().unwrap().icon, "box");
        assert!(manifest.validate().is_empty());
    }

    #[test]
    fn test_validate_missing_fields() {
        let manifest = ActionManifest::from_yaml("inputs:\n  x: {}\n").unwrap();
        let errors = manifest.validate();
        assert!(errors.iter().any(|e| e.contains("'name'")));
        assert!(errors.iter().any(|e| e.contains("'description'")));
        assert!(errors.iter().any(|e| e.contains("'runs.using'")));
        assert!(errors.iter().any(|e| e.contains("input 'x'")));
    }

    #[test]
    fn test_validate_runtime_requirements() {
        let docker = ActionManifest::from_yaml(
            "name: d\ndescription: d\nruns:\n  using: docker\n",
        )
        .unwrap();
        assert_eq!(docker.validate(), vec!["docker actions require 'runs.image'"]);

        let unknown = ActionManifest::from_yaml(
            "name: u\ndescription: u\nruns:\n  using: python3\n",
        )
        .unwrap();
        assert!(unknown.validate()[0].starts_with("unsupported runs.using 'python3'"));
    }

    #[test]
    fn test_validate_composite_steps() {
        let manifest = ActionManifest::from_yaml(
            r#"
name: c
description: c
runs:
  using: composite
  steps:
    - run: echo hi
    - uses: actions/checkout@v4
    - name: empty
"#,
        )
        .unwrap();
        let errors = manifest.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("step 1 uses 'run' without 'shell'"));
        assert!(errors[1].contains("step 3 must define either"));
        assert!(manifest.is_composite());
    }

    #[test]
    fn test_parse_file_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("action.yml");
        assert!(matches!(parse(&missing), Err(ManifestError::FileRead { .. })));

        std::fs::write(&missing, "name: [").unwrap();
        assert!(matches!(parse(&missing), Err(ManifestError::Parse { .. })));
    }
}
