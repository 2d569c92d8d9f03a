//! Dependency analysis for composite actions
//!
//! Every `uses:` reference in a composite action's steps is classified by
//! how it is pinned. Only full commit SHAs are immutable; tags and branches
//! can move under the caller.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::manifest::ActionManifest;

lazy_static! {
    /// `owner/repo[/path]@ref`
    static ref REMOTE_USES: Regex =
        Regex::new(r"^(?P<repo>[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+)(?P<path>/[^@]+)?@(?P<ref>.+)$")
            .expect("valid regex");
    static ref FULL_SHA: Regex = Regex::new(r"^[0-9a-f]{40}$").expect("valid regex");
    static ref VERSION_TAG: Regex =
        Regex::new(r"^v?\d+(\.\d+){0,2}([-+][0-9A-Za-z.-]+)?$").expect("valid regex");
}

/// How a dependency reference is pinned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyKind {
    /// `./path` inside the same repository
    Local,
    /// `docker://image`
    Docker,
    /// `owner/repo@<40 hex chars>`
    PinnedSha,
    /// `owner/repo@v1.2.3`
    Tag,
    /// Anything else after `@`, usually a branch name
    Branch,
}

impl DependencyKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Docker => "docker",
            Self::PinnedSha => "pinned-sha",
            Self::Tag => "tag",
            Self::Branch => "branch",
        }
    }

    /// Whether the reference is immutable
    pub fn is_pinned(&self) -> bool {
        matches!(self, Self::Local | Self::PinnedSha)
    }
}

/// One `uses:` reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    /// The raw `uses:` value
    pub uses: String,
    /// `owner/repo`, or the path / image for local and docker references
    pub name: String,
    /// The ref after `@`, empty for local references
    pub version: String,
    pub kind: DependencyKind,
    /// Name of the step that declared it, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
}

/// Classify a single `uses:` value
pub fn classify(uses: &str) -> Dependency {
    let uses = uses.trim();

    if uses.starts_with("./") || uses.starts_with("../") {
        return dependency(uses, uses, "", DependencyKind::Local);
    }

    if let Some(image) = uses.strip_prefix("docker://") {
        let (name, version) = match image.rsplit_once(':') {
            Some((name, tag)) if !tag.contains('/') => (name, tag),
            _ => (image, "latest"),
        };
        return dependency(uses, name, version, DependencyKind::Docker);
    }

    match REMOTE_USES.captures(uses) {
        Some(caps) => {
            let name = format!(
                "{}{}",
                &caps["repo"],
                caps.name("path").map(|m| m.as_str()).unwrap_or_default()
            );
            let version = &caps["ref"];
            let kind = if FULL_SHA.is_match(version) {
                DependencyKind::PinnedSha
            } else if VERSION_TAG.is_match(version) {
                DependencyKind::Tag
            } else {
                DependencyKind::Branch
            };
            dependency(uses, &name, version, kind)
        }
        // No ref at all behaves like a floating branch
        None => dependency(uses, uses, "", DependencyKind::Branch),
    }
}

fn dependency(uses: &str, name: &str, version: &str, kind: DependencyKind) -> Dependency {
    Dependency {
        uses: uses.to_string(),
        name: name.to_string(),
        version: version.to_string(),
        kind,
        step: None,
    }
}

/// All `uses:` references of a composite action, in step order
pub fn analyze(manifest: &ActionManifest) -> Vec<Dependency> {
    if !manifest.is_composite() {
        return Vec::new();
    }

    manifest
        .runs
        .steps
        .iter()
        .filter_map(|step| {
            step.uses.as_deref().map(|uses| Dependency {
                step: step.name.clone().or_else(|| step.id.clone()),
                ..classify(uses)
            })
        })
        .collect()
}

/// Pinning advice for dependencies that are not immutable
pub fn security_notes(dependencies: &[Dependency]) -> Vec<String> {
    dependencies
        .iter()
        .filter_map(|dep| match dep.kind {
            DependencyKind::Branch => Some(format!(
                "{} tracks a branch; pin it to a full commit SHA",
                dep.uses
            )),
            DependencyKind::Tag => Some(format!(
                "{} uses a mutable tag; consider pinning to a commit SHA",
                dep.uses
            )),
            DependencyKind::Docker if dep.version == "latest" => Some(format!(
                "{} uses the 'latest' image tag; pin a specific version or digest",
                dep.uses
            )),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_references() {
        assert_eq!(classify("./local/action").kind, DependencyKind::Local);
        assert_eq!(classify("actions/checkout@v4").kind, DependencyKind::Tag);
        assert_eq!(classify("actions/checkout@v4.1.1").kind, DependencyKind::Tag);
        assert_eq!(classify("actions/checkout@main").kind, DependencyKind::Branch);
        assert_eq!(
            classify("actions/checkout@b4ffde65f46336ab88eb53be808477a3936bae11").kind,
            DependencyKind::PinnedSha
        );
        assert_eq!(classify("actions/checkout").kind, DependencyKind::Branch);
    }

    #[test]
    fn test_classify_subpath_and_docker() {
        let dep = classify("github/codeql-action/init@v3");
        assert_eq!(dep.name, "github/codeql-action/init");
        assert_eq!(dep.version, "v3");

        let docker = classify("docker://alpine:3.19");
        assert_eq!(docker.kind, DependencyKind::Docker);
        assert_eq!(docker.name, "alpine");
        assert_eq!(docker.version, "3.19");

        let latest = classify("docker://ghcr.io/org/image");
        assert_eq!(latest.version, "latest");
    }

    #[test]
    fn test_analyze_composite_steps() {
        let manifest = ActionManifest::from_yaml(
            r#"
name: c
description: c
runs:
  using: composite
  steps:
    - name: Checkout
      uses: actions/checkout@v4
    - run: echo hi
      shell: bash
    - id: cache
      uses: actions/cache@main
"#,
        )
        .unwrap();

        let deps = analyze(&manifest);
        assert_eq!(deps.len(), 2);
        assert_eq!(deps[0].step.as_deref(), Some("Checkout"));
        assert_eq!(deps[1].step.as_deref(), Some("cache"));

        let notes = security_notes(&deps);
        assert_eq!(notes.len(), 2);
        assert!(notes[1].contains("tracks a branch"));
    }

    #[test]
    fn test_non_composite_has_no_dependencies() {
        let manifest = ActionManifest::from_yaml(
            "name: n\ndescription: n\nruns:\n  using: node20\n  main: index.js\n",
        )
        .unwrap();
        assert!(analyze(&manifest).is_empty());
    }
}
