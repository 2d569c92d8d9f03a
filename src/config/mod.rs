//! # Configuration Module
//!
//! Configuration is resolved from layered sources, merged in precedence
//! order (later sources win):
//!
//! | Source | Where it comes from | May supply a token |
//! |--------|---------------------|--------------------|
//! | `Defaults` | compiled in | no |
//! | `Global` | `config.yaml` on the global search path, plus `GH_ACTION_README_*` | yes |
//! | `RepoOverride` | `repo_overrides.<org>/<repo>` of the merged global config | no |
//! | `RepoConfig` | `.ghreadme.yaml`, `.config/ghreadme.yaml`, `.github/ghreadme.yaml` | no |
//! | `ActionConfig` | `config.yaml` next to the action | no |
//! | `Environment` | `GH_README_GITHUB_TOKEN`, then `GITHUB_TOKEN` | yes |
//! | `CliFlags` | command line | no |
//!
//! ## Submodules
//!
//! - [`merge`] - field-level merge rules
//! - [`sources`] - one loader per source
//! - [`loader`] - the resolver that runs the sources in order

pub mod loader;
pub mod merge;
pub mod sources;

pub use loader::{
    apply_cli_overrides, load_configuration, validate_configuration, CliOverrides, ConfigLoader,
    GitRemoteDetector, RepositoryDetector,
};
pub use merge::merge_configs;
pub use sources::EnvLookup;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Directory name used under the global config locations
pub const APP_NAME: &str = "gh-action-readme";

/// File stem of the hidden per-repository config files
pub const REPO_CONFIG_STEM: &str = "ghreadme";

/// Schema path used when nothing else is configured
pub const DEFAULT_SCHEMA_PATH: &str = "schemas/action.schema.json";

/// Resolved configuration, also used for the partial fragments each source
/// produces. An empty string or `false` means "unset".
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub organization: String,
    pub repository: String,
    pub version: String,

    /// Built-in theme name or a path to a theme directory / template file
    pub theme: String,
    pub output_format: String,
    pub output_dir: String,
    pub template: String,
    pub header: String,
    pub footer: String,
    pub schema: String,

    pub verbose: bool,
    pub quiet: bool,
    pub analyze_dependencies: bool,
    pub show_security_info: bool,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub github_token: String,

    pub permissions: BTreeMap<String, String>,
    pub variables: BTreeMap<String, String>,
    pub runs_on: Vec<String>,

    /// Per-repository fragments keyed by `org/repo`
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub repo_overrides: BTreeMap<String, Config>,
}

impl Config {
    /// Compiled-in defaults
    pub fn defaults() -> Self {
        Self {
            theme: Theme::Default.name().to_string(),
            output_format: OutputFormat::Md.as_str().to_string(),
            output_dir: ".".to_string(),
            schema: DEFAULT_SCHEMA_PATH.to_string(),
            ..Default::default()
        }
    }

    /// Parsed output format, if the configured value is known
    pub fn format(&self) -> Option<OutputFormat> {
        self.output_format.parse().ok()
    }

    /// Parsed theme, if the configured value is a built-in name or a path
    pub fn theme(&self) -> Option<Theme> {
        Theme::parse(&self.theme)
    }

    /// Whether a GitHub token was resolved
    pub fn has_token(&self) -> bool {
        !self.github_token.is_empty()
    }

    /// Copy with the token masked, suitable for printing
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.has_token() {
            copy.github_token = "***".to_string();
        }
        for fragment in copy.repo_overrides.values_mut() {
            *fragment = fragment.redacted();
        }
        copy
    }

    /// Render as YAML
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("organization", &self.organization)
            .field("repository", &self.repository)
            .field("version", &self.version)
            .field("theme", &self.theme)
            .field("output_format", &self.output_format)
            .field("output_dir", &self.output_dir)
            .field("template", &self.template)
            .field("header", &self.header)
            .field("footer", &self.footer)
            .field("schema", &self.schema)
            .field("verbose", &self.verbose)
            .field("quiet", &self.quiet)
            .field("analyze_dependencies", &self.analyze_dependencies)
            .field("show_security_info", &self.show_security_info)
            .field("github_token", &if self.has_token() { "***" } else { "" })
            .field("permissions", &self.permissions)
            .field("variables", &self.variables)
            .field("runs_on", &self.runs_on)
            .field("repo_overrides", &self.repo_overrides.keys())
            .finish()
    }
}

/// Documentation theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Theme {
    Default,
    Github,
    Gitlab,
    Minimal,
    Professional,
    /// User supplied theme directory or template file
    Path(PathBuf),
}

impl Theme {
    /// Names of the built-in themes
    pub const BUILT_IN: [&'static str; 5] =
        ["default", "github", "gitlab", "minimal", "professional"];

    /// Parse a theme value. Returns `None` for a bare word that is not a
    /// built-in theme.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "default" => Some(Self::Default),
            "github" => Some(Self::Github),
            "gitlab" => Some(Self::Gitlab),
            "minimal" => Some(Self::Minimal),
            "professional" => Some(Self::Professional),
            other if is_path_like(other) => Some(Self::Path(PathBuf::from(other))),
            _ => None,
        }
    }

    /// Theme name, or the path for custom themes
    pub fn name(&self) -> &str {
        match self {
            Self::Default => "default",
            Self::Github => "github",
            Self::Gitlab => "gitlab",
            Self::Minimal => "minimal",
            Self::Professional => "professional",
            Self::Path(path) => path.to_str().unwrap_or("<non-utf8 path>"),
        }
    }
}

fn is_path_like(value: &str) -> bool {
    !value.is_empty()
        && (Path::new(value).is_absolute() || value.contains('/') || value.contains('\\'))
}

/// Output format for generated documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum OutputFormat {
    Md,
    Html,
    Json,
    Asciidoc,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [Self::Md, Self::Html, Self::Json, Self::Asciidoc];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Md => "md",
            Self::Html => "html",
            Self::Json => "json",
            Self::Asciidoc => "asciidoc",
        }
    }

    /// File name of the generated document
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Md => "README.md",
            Self::Html => "README.html",
            Self::Json => "action-docs.json",
            Self::Asciidoc => "README.adoc",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "md" => Ok(Self::Md),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            "asciidoc" => Ok(Self::Asciidoc),
            other => Err(format!(
                "unsupported output format '{other}' (expected md, html, json or asciidoc)"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration sources, in merge order. Later sources win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigSource {
    Defaults,
    Global,
    RepoOverride,
    RepoConfig,
    ActionConfig,
    Environment,
    CliFlags,
}

impl ConfigSource {
    pub const ALL: [ConfigSource; 7] = [
        Self::Defaults,
        Self::Global,
        Self::RepoOverride,
        Self::RepoConfig,
        Self::ActionConfig,
        Self::Environment,
        Self::CliFlags,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Defaults => "defaults",
            Self::Global => "global",
            Self::RepoOverride => "repo-override",
            Self::RepoConfig => "repo",
            Self::ActionConfig => "action",
            Self::Environment => "environment",
            Self::CliFlags => "cli",
        }
    }

    /// Whether this source is trusted to supply `github_token`
    pub fn allows_tokens(&self) -> bool {
        matches!(self, Self::Global | Self::Environment)
    }
}

impl FromStr for ConfigSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|source| source.name() == s)
            .ok_or_else(|| {
                format!(
                    "unknown config source '{s}' (expected one of: {})",
                    Self::ALL.map(|src| src.name()).join(", ")
                )
            })
    }
}

/// Which sources a [`ConfigLoader`] runs. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderOptions {
    enabled: BTreeSet<ConfigSource>,
}

impl LoaderOptions {
    /// Every source enabled
    pub fn all() -> Self {
        Self {
            enabled: ConfigSource::ALL.into_iter().collect(),
        }
    }

    /// Only the given sources enabled
    pub fn only(sources: &[ConfigSource]) -> Self {
        Self {
            enabled: sources.iter().copied().collect(),
        }
    }

    /// All sources except `source`
    pub fn without(mut self, source: ConfigSource) -> Self {
        self.enabled.remove(&source);
        self
    }

    pub fn is_enabled(&self, source: ConfigSource) -> bool {
        self.enabled.contains(&source)
    }
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::defaults();
        assert_eq!(config.theme, "default");
        assert_eq!(config.output_format, "md");
        assert_eq!(config.output_dir, ".");
        assert_eq!(config.schema, DEFAULT_SCHEMA_PATH);
        assert!(!config.verbose && !config.quiet);
        assert!(!config.has_token());
    }

    #[test]
    fn test_theme_parse() {
        assert_eq!(Theme::parse("github"), Some(Theme::Github));
        assert_eq!(
            Theme::parse("./themes/corp"),
            Some(Theme::Path(PathBuf::from("./themes/corp")))
        );
        assert_eq!(
            Theme::parse("/opt/themes/corp"),
            Some(Theme::Path(PathBuf::from("/opt/themes/corp")))
        );
        assert_eq!(Theme::parse("fancy"), None);
        assert_eq!(Theme::parse(""), None);
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("md".parse::<OutputFormat>(), Ok(OutputFormat::Md));
        assert_eq!("asciidoc".parse::<OutputFormat>(), Ok(OutputFormat::Asciidoc));
        assert!("pdf".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_source_ordering() {
        assert!(ConfigSource::Defaults < ConfigSource::Global);
        assert!(ConfigSource::Global < ConfigSource::RepoOverride);
        assert!(ConfigSource::RepoConfig < ConfigSource::ActionConfig);
        assert!(ConfigSource::Environment < ConfigSource::CliFlags);
        assert!(ConfigSource::Global.allows_tokens());
        assert!(!ConfigSource::RepoConfig.allows_tokens());
    }

    #[test]
    fn test_loader_options() {
        let options = LoaderOptions::all().without(ConfigSource::Environment);
        assert!(options.is_enabled(ConfigSource::Global));
        assert!(!options.is_enabled(ConfigSource::Environment));

        let preview = LoaderOptions::only(&[ConfigSource::Defaults, ConfigSource::Global]);
        assert!(preview.is_enabled(ConfigSource::Defaults));
        assert!(!preview.is_enabled(ConfigSource::RepoConfig));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config {
            github_token: "ghp_secret".into(),
            ..Config::defaults()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("ghp_secret"));
        assert_eq!(config.redacted().github_token, "***");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r#"
theme: github
output_format: html
runs_on: [ubuntu-latest, macos-latest]
permissions:
  contents: read
repo_overrides:
  acme/widgets:
    theme: professional
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.theme, "github");
        assert_eq!(config.runs_on.len(), 2);
        assert_eq!(config.permissions.get("contents").map(String::as_str), Some("read"));
        assert_eq!(config.repo_overrides["acme/widgets"].theme, "professional");
        assert_eq!(config.output_dir, "");
    }
}
