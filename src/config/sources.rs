//! Configuration source loaders
//!
//! Each loader returns `Ok(None)` when its source has no data. A file that
//! exists but cannot be read or parsed is always an error.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use super::{Config, ConfigSource, APP_NAME, REPO_CONFIG_STEM};
use crate::error::ConfigError;

/// Prefix of the variables layered in during the global step
pub const ENV_PREFIX: &str = "GH_ACTION_README_";

/// Tool-specific token variable, checked first
pub const TOKEN_ENV: &str = "GH_README_GITHUB_TOKEN";

/// Standard token variable, checked when [`TOKEN_ENV`] is unset or empty
pub const FALLBACK_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// File names looked up in each global search directory
const GLOBAL_FILE_NAMES: [&str; 2] = ["config.yaml", "config.yml"];

/// Per-directory action config file name
pub const ACTION_CONFIG_FILE: &str = "config.yaml";

/// Where environment variables are read from
#[derive(Debug, Clone, Default)]
pub enum EnvLookup {
    /// The process environment
    #[default]
    Process,
    /// A fixed set of variables, nothing else is visible
    Fixed(HashMap<String, String>),
}

impl EnvLookup {
    pub fn fixed<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Fixed(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// No variables at all
    pub fn empty() -> Self {
        Self::Fixed(HashMap::new())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match self {
            Self::Process => std::env::var(key).ok(),
            Self::Fixed(vars) => vars.get(key).cloned(),
        }
    }

    /// Value of `key` if it is set and non-empty
    pub fn non_empty(&self, key: &str) -> Option<String> {
        self.get(key).filter(|value| !value.is_empty())
    }
}

/// Directories searched for the global config file, in order: XDG config
/// dir, current dir, `$HOME/.config/<app>`, `/etc/<app>`.
pub fn global_search_dirs(env: &EnvLookup) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    let xdg = env
        .non_empty("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dirs::config_dir);
    if let Some(xdg) = xdg {
        candidates.push(xdg.join(APP_NAME));
    }

    candidates.push(PathBuf::from("."));

    let home = env
        .non_empty("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir);
    if let Some(home) = home {
        candidates.push(home.join(".config").join(APP_NAME));
    }

    candidates.push(PathBuf::from("/etc").join(APP_NAME));

    let mut seen = Vec::new();
    candidates.retain(|dir| {
        if seen.contains(dir) {
            false
        } else {
            seen.push(dir.clone());
            true
        }
    });
    candidates
}

/// Locate the global config file. An explicit path is returned as-is,
/// whether or not it exists.
pub fn find_global_config(explicit: Option<&Path>, env: &EnvLookup) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    global_search_dirs(env).into_iter().find_map(|dir| {
        GLOBAL_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

/// Default location for writing a new global config file
pub fn default_global_config_path(env: &EnvLookup) -> Option<PathBuf> {
    env.non_empty("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .map(|dir| dir.join(APP_NAME).join(GLOBAL_FILE_NAMES[0]))
}

/// Read and parse one config file.
///
/// Returns `Ok(None)` only when the file does not exist.
pub fn load_file(source: ConfigSource, path: &Path) -> Result<Option<Config>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            trace!(source = source.name(), path = %path.display(), "Config file not found");
            return Ok(None);
        }
        Err(e) => {
            return Err(ConfigError::Read {
                source_name: source.name(),
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    parse_fragment(source, path, &content).map(Some)
}

fn parse_fragment(source: ConfigSource, path: &Path, content: &str) -> Result<Config, ConfigError> {
    if content.trim().is_empty() {
        return Ok(Config::default());
    }

    serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
        source_name: source.name(),
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load the global config file.
///
/// An explicit path that does not exist is an error; an implicit search
/// that finds nothing is not.
pub fn load_global(
    explicit: Option<&Path>,
    env: &EnvLookup,
) -> Result<Option<(PathBuf, Config)>, ConfigError> {
    let Some(path) = find_global_config(explicit, env) else {
        debug!("No global config file found");
        return Ok(None);
    };

    match load_file(ConfigSource::Global, &path)? {
        Some(config) => Ok(Some((path, config))),
        None if explicit.is_some() => Err(ConfigError::Read {
            source_name: ConfigSource::Global.name(),
            path,
            source: io::Error::new(io::ErrorKind::NotFound, "file does not exist"),
        }),
        None => Ok(None),
    }
}

/// Build a fragment from `GH_ACTION_README_*` variables.
pub fn load_env_fragment(env: &EnvLookup) -> Result<Config, ConfigError> {
    let mut fragment = Config::default();

    {
        let strings: [(&str, &mut String); 11] = [
            ("ORGANIZATION", &mut fragment.organization),
            ("REPOSITORY", &mut fragment.repository),
            ("VERSION", &mut fragment.version),
            ("THEME", &mut fragment.theme),
            ("OUTPUT_FORMAT", &mut fragment.output_format),
            ("OUTPUT_DIR", &mut fragment.output_dir),
            ("TEMPLATE", &mut fragment.template),
            ("HEADER", &mut fragment.header),
            ("FOOTER", &mut fragment.footer),
            ("SCHEMA", &mut fragment.schema),
            ("GITHUB_TOKEN", &mut fragment.github_token),
        ];
        for (suffix, slot) in strings {
            if let Some(value) = env.non_empty(&format!("{ENV_PREFIX}{suffix}")) {
                *slot = value;
            }
        }
    }

    let flags: [(&str, &mut bool); 4] = [
        ("VERBOSE", &mut fragment.verbose),
        ("QUIET", &mut fragment.quiet),
        ("ANALYZE_DEPENDENCIES", &mut fragment.analyze_dependencies),
        ("SHOW_SECURITY_INFO", &mut fragment.show_security_info),
    ];
    for (suffix, slot) in flags {
        let key = format!("{ENV_PREFIX}{suffix}");
        if let Some(raw) = env.non_empty(&key) {
            *slot = parse_env_bool(&key, &raw)?;
        }
    }

    Ok(fragment)
}

fn parse_env_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::EnvValue {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Hidden config candidates at a repository root, highest priority first
pub fn repo_config_candidates(repo_root: &Path) -> [PathBuf; 3] {
    [
        repo_root.join(format!(".{REPO_CONFIG_STEM}.yaml")),
        repo_root.join(".config").join(format!("{REPO_CONFIG_STEM}.yaml")),
        repo_root.join(".github").join(format!("{REPO_CONFIG_STEM}.yaml")),
    ]
}

/// Load the first hidden config file present at `repo_root`. Lower
/// priority candidates are never read, even when the first is malformed.
pub fn load_repo_config(repo_root: &Path) -> Result<Option<(PathBuf, Config)>, ConfigError> {
    let Some(path) = repo_config_candidates(repo_root)
        .into_iter()
        .find(|candidate| candidate.is_file())
    else {
        return Ok(None);
    };

    Ok(load_file(ConfigSource::RepoConfig, &path)?.map(|config| (path, config)))
}

/// Load `config.yaml` directly inside `target_dir`
pub fn load_action_config(target_dir: &Path) -> Result<Option<(PathBuf, Config)>, ConfigError> {
    let path = target_dir.join(ACTION_CONFIG_FILE);
    if !path.is_file() {
        return Ok(None);
    }

    Ok(load_file(ConfigSource::ActionConfig, &path)?.map(|config| (path, config)))
}

/// Token from the environment: tool-specific variable first, then the
/// standard one. Empty values are ignored.
pub fn token_from_env(env: &EnvLookup) -> Option<String> {
    env.non_empty(TOKEN_ENV)
        .or_else(|| env.non_empty(FALLBACK_TOKEN_ENV))
}
