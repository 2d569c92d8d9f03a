//! Scanner module - Action file discovery and repository detection

mod filesystem;
pub mod git;

use std::path::{Path, PathBuf};
use tracing::debug;

pub use filesystem::{absolute_path, is_action_file, ACTION_FILE_NAMES};
pub use git::{find_repository_root, RepoIdentity};

use crate::error::DiscoveryError;

/// Find the action manifests to process.
///
/// A file path must itself be named `action.yml` or `action.yaml`. A
/// directory is searched, descending into subdirectories when `recursive`
/// is set. Results are sorted.
pub fn discover_action_files(path: &Path, recursive: bool) -> Result<Vec<PathBuf>, DiscoveryError> {
    if !path.exists() {
        return Err(DiscoveryError::NotFound {
            path: path.to_path_buf(),
        });
    }

    if path.is_file() {
        return if is_action_file(path) {
            Ok(vec![path.to_path_buf()])
        } else {
            Err(DiscoveryError::NotAnActionFile {
                path: path.to_path_buf(),
            })
        };
    }

    let files = filesystem::scan_directory(path, recursive);
    debug!(root = %path.display(), count = files.len(), "Discovered action files");

    if files.is_empty() {
        return Err(DiscoveryError::NoActionFiles {
            path: path.to_path_buf(),
        });
    }

    Ok(files)
}
