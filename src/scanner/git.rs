//! Git repository utilities

use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::trace;
use url::Url;

use super::filesystem::absolute_path;

/// Organization and name of a hosted repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoIdentity {
    pub organization: String,
    pub name: String,
}

impl RepoIdentity {
    pub fn new(organization: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            name: name.into(),
        }
    }

    /// `org/name`, the key used by `repo_overrides`
    pub fn key(&self) -> String {
        format!("{}/{}", self.organization, self.name)
    }
}

/// Detect the repository from the `origin` remote of `root`
pub fn detect_repository(root: &Path) -> Option<RepoIdentity> {
    let output = Command::new("git")
        .args(["remote", "get-url", "origin"])
        .current_dir(root)
        .output()
        .ok()?;

    if !output.status.success() {
        trace!(root = %root.display(), "No origin remote");
        return None;
    }

    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    parse_remote_url(&url)
}

/// Parse organization and repository name from a git remote URL
pub fn parse_remote_url(url: &str) -> Option<RepoIdentity> {
    // SCP-like syntax: git@github.com:owner/repo.git
    if !url.contains("://") {
        let (_, path) = url.split_once(':')?;
        return identity_from_path(path);
    }

    let parsed = Url::parse(url).ok()?;
    identity_from_path(parsed.path())
}

fn identity_from_path(path: &str) -> Option<RepoIdentity> {
    let path = path.trim_matches('/').trim_end_matches(".git");
    let mut segments = path.rsplit('/');
    let name = segments.next().filter(|s| !s.is_empty())?;
    let organization = segments.next().filter(|s| !s.is_empty())?;
    Some(RepoIdentity::new(organization, name))
}

/// Nearest ancestor of `start` (inclusive) containing a `.git` entry.
///
/// Relative paths are resolved against the working directory first, so the
/// search climbs past it; the returned root is always absolute.
pub fn find_repository_root(start: &Path) -> Option<PathBuf> {
    let absolute = absolute_path(start)?;
    let start = if absolute.is_file() {
        absolute.parent()?
    } else {
        absolute.as_path()
    };
    start
        .ancestors()
        .find(|dir| is_git_repository(dir))
        .map(Path::to_path_buf)
}

/// Check if the directory is a git repository
pub fn is_git_repository(root: &Path) -> bool {
    root.join(".git").exists()
}
