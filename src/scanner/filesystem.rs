//! File system scanning utilities

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// File names recognised as action manifests
pub const ACTION_FILE_NAMES: [&str; 2] = ["action.yml", "action.yaml"];

/// Whether `path` is named like an action manifest
pub fn is_action_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| ACTION_FILE_NAMES.contains(&name))
}

/// `path` joined onto the working directory when relative, with `.`
/// components dropped
pub fn absolute_path(path: &Path) -> Option<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().ok()?.join(path)
    };
    Some(joined.components().collect())
}

/// Walk `root` and return every action manifest below it
pub fn scan_directory(root: &Path, recursive: bool) -> Vec<PathBuf> {
    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .ignore(true)
        .parents(true)
        .require_git(false);
    if !recursive {
        builder.max_depth(Some(1));
    }

    let mut files = Vec::new();
    for entry in builder.build().flatten() {
        let path = entry.path();

        // Skip .git directory
        if path.components().any(|c| c.as_os_str() == ".git") {
            continue;
        }

        if entry.file_type().is_some_and(|t| t.is_file()) && is_action_file(path) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    files
}
