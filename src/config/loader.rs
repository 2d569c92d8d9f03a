//! Configuration resolver
//!
//! Runs the enabled sources in precedence order, merging each fragment
//! into an accumulator that starts empty.

use std::path::Path;
use tracing::{debug, info};

use super::merge::{merge_configs, merge_repo_overrides};
use super::sources::{self, EnvLookup};
use super::{Config, ConfigSource, LoaderOptions, OutputFormat, Theme};
use crate::error::ConfigError;
use crate::scanner::git::{self, RepoIdentity};

/// Detects which repository a directory belongs to
pub trait RepositoryDetector: Send + Sync {
    fn detect(&self, root: &Path) -> Option<RepoIdentity>;
}

/// Reads the `origin` remote with `git`
#[derive(Debug, Clone, Copy, Default)]
pub struct GitRemoteDetector;

impl RepositoryDetector for GitRemoteDetector {
    fn detect(&self, root: &Path) -> Option<RepoIdentity> {
        git::detect_repository(root)
    }
}

/// Resolves a [`Config`] from the enabled sources
pub struct ConfigLoader {
    options: LoaderOptions,
    env: EnvLookup,
    detector: Box<dyn RepositoryDetector>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(LoaderOptions::all())
    }
}

impl ConfigLoader {
    /// Loader reading the process environment and detecting repositories with git
    pub fn new(options: LoaderOptions) -> Self {
        Self {
            options,
            env: EnvLookup::Process,
            detector: Box::new(GitRemoteDetector),
        }
    }

    pub fn with_env(mut self, env: EnvLookup) -> Self {
        self.env = env;
        self
    }

    pub fn with_detector(mut self, detector: impl RepositoryDetector + 'static) -> Self {
        self.detector = Box::new(detector);
        self
    }

    /// Resolve the configuration.
    ///
    /// # Arguments
    ///
    /// * `explicit_file` - Global config file to use instead of the search path
    /// * `repo_root` - Repository root for repo overrides and hidden config files
    /// * `target_dir` - Directory whose `config.yaml` applies on top
    ///
    /// # Errors
    ///
    /// Returns the first read or parse error of any source. Missing optional
    /// files are not errors.
    pub fn load_configuration(
        &self,
        explicit_file: Option<&Path>,
        repo_root: Option<&Path>,
        target_dir: Option<&Path>,
    ) -> Result<Config, ConfigError> {
        let mut config = Config::default();

        if self.options.is_enabled(ConfigSource::Defaults) {
            merge_configs(&mut config, &Config::defaults(), false);
        }

        if self.options.is_enabled(ConfigSource::Global) {
            self.apply_global(&mut config, explicit_file)?;
        }

        let repo_root = repo_root.filter(|root| !root.as_os_str().is_empty());

        if let Some(root) = repo_root {
            if self.options.is_enabled(ConfigSource::RepoOverride) {
                self.apply_repo_override(&mut config, root);
            }

            if self.options.is_enabled(ConfigSource::RepoConfig) {
                if let Some((path, fragment)) = sources::load_repo_config(root)? {
                    debug!(path = %path.display(), "Merging repository config");
                    merge_configs(&mut config, &fragment, false);
                }
            }
        }

        if let Some(dir) = target_dir.filter(|dir| !dir.as_os_str().is_empty()) {
            config = self.action_view(&config, dir)?;
        }

        if self.options.is_enabled(ConfigSource::Environment) {
            self.apply_env_token(&mut config);
        }

        info!(
            theme = %config.theme,
            format = %config.output_format,
            token = config.has_token(),
            "Configuration resolved"
        );
        Ok(config)
    }

    /// `base` with the `config.yaml` of `action_dir` merged on top.
    ///
    /// Used per action during batch runs. Environment tokens already in
    /// `base` are unaffected since action config may not carry a token.
    pub fn action_view(&self, base: &Config, action_dir: &Path) -> Result<Config, ConfigError> {
        let mut config = base.clone();
        if !self.options.is_enabled(ConfigSource::ActionConfig) {
            return Ok(config);
        }

        if let Some((path, fragment)) = sources::load_action_config(action_dir)? {
            debug!(path = %path.display(), "Merging action config");
            merge_configs(&mut config, &fragment, false);
        }
        Ok(config)
    }

    fn apply_global(&self, config: &mut Config, explicit: Option<&Path>) -> Result<(), ConfigError> {
        let mut fragment = match sources::load_global(explicit, &self.env)? {
            Some((path, fragment)) => {
                debug!(path = %path.display(), "Merging global config");
                fragment
            }
            None => Config::default(),
        };

        let env_fragment = sources::load_env_fragment(&self.env)?;
        merge_configs(&mut fragment, &env_fragment, true);

        merge_configs(config, &fragment, true);
        merge_repo_overrides(config, &fragment);
        Ok(())
    }

    fn apply_repo_override(&self, config: &mut Config, root: &Path) {
        let Some(identity) = self.detector.detect(root) else {
            debug!(root = %root.display(), "No repository detected");
            return;
        };

        if config.organization.is_empty() {
            config.organization = identity.organization.clone();
        }
        if config.repository.is_empty() {
            config.repository = identity.name.clone();
        }

        let key = identity.key();
        if let Some(fragment) = config.repo_overrides.get(&key).cloned() {
            debug!(repository = %key, "Merging repository override");
            merge_configs(config, &fragment, false);
        }
    }

    fn apply_env_token(&self, config: &mut Config) {
        if let Some(token) = sources::token_from_env(&self.env) {
            debug!("Using GitHub token from environment");
            config.github_token = token;
        }
    }
}

/// Resolve configuration with every source enabled
pub fn load_configuration(
    explicit_file: Option<&Path>,
    repo_root: Option<&Path>,
    target_dir: Option<&Path>,
) -> Result<Config, ConfigError> {
    ConfigLoader::default().load_configuration(explicit_file, repo_root, target_dir)
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub theme: Option<String>,
    pub output_format: Option<OutputFormat>,
    pub output_dir: Option<String>,
    pub verbose: bool,
    pub quiet: bool,
}

/// Merge command line values on top of a resolved configuration.
///
/// A CLI `--quiet` clears a configured `verbose` and vice versa.
pub fn apply_cli_overrides(config: &mut Config, overrides: &CliOverrides) {
    let fragment = Config {
        theme: overrides.theme.clone().unwrap_or_default(),
        output_format: overrides
            .output_format
            .map(|f| f.as_str().to_string())
            .unwrap_or_default(),
        output_dir: overrides.output_dir.clone().unwrap_or_default(),
        verbose: overrides.verbose,
        quiet: overrides.quiet,
        ..Default::default()
    };
    merge_configs(config, &fragment, false);

    if overrides.quiet && !overrides.verbose {
        config.verbose = false;
    }
    if overrides.verbose && !overrides.quiet {
        config.quiet = false;
    }
}

/// Check a resolved configuration for consistency.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] when the output format is unknown, the
/// output directory is empty, both `verbose` and `quiet` are set, or the
/// theme is neither built in nor path-like.
pub fn validate_configuration(config: &Config) -> Result<(), ConfigError> {
    if config.output_format.parse::<OutputFormat>().is_err() {
        return Err(ConfigError::invalid(format!(
            "unsupported output format '{}' (expected one of: {})",
            config.output_format,
            OutputFormat::ALL.map(|f| f.as_str()).join(", ")
        )));
    }

    if config.output_dir.is_empty() {
        return Err(ConfigError::invalid("output directory cannot be empty"));
    }

    if config.verbose && config.quiet {
        return Err(ConfigError::invalid(
            "verbose and quiet cannot both be enabled",
        ));
    }

    if Theme::parse(&config.theme).is_none() {
        return Err(ConfigError::invalid(format!(
            "unknown theme '{}' (expected one of: {}, or a path)",
            config.theme,
            Theme::BUILT_IN.join(", ")
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct FixedDetector(Option<RepoIdentity>);

    impl RepositoryDetector for FixedDetector {
        fn detect(&self, _root: &Path) -> Option<RepoIdentity> {
            self.0.clone()
        }
    }

    fn isolated_env(home: &Path) -> EnvLookup {
        EnvLookup::fixed([
            ("XDG_CONFIG_HOME", home.join("xdg").display().to_string()),
            ("HOME", home.join("home").display().to_string()),
        ])
    }

    fn loader(home: &Path) -> ConfigLoader {
        ConfigLoader::new(LoaderOptions::all())
            .with_env(isolated_env(home))
            .with_detector(FixedDetector(None))
    }

    fn write(path: PathBuf, content: &str) -> PathBuf {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_only_defaults_when_nothing_present() {
        let home = TempDir::new().unwrap();
        let config = loader(home.path())
            .load_configuration(None, None, None)
            .unwrap();
        assert_eq!(config, Config::defaults());
        validate_configuration(&config).unwrap();
    }

    #[test]
    fn test_disabled_defaults_leave_zero_value() {
        let home = TempDir::new().unwrap();
        let config = ConfigLoader::new(LoaderOptions::all().without(ConfigSource::Defaults))
            .with_env(isolated_env(home.path()))
            .load_configuration(None, None, None)
            .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_global_from_xdg_search_path() {
        let home = TempDir::new().unwrap();
        write(
            home.path().join("xdg/gh-action-readme/config.yaml"),
            "theme: gitlab\ngithub_token: ghp_global\n",
        );

        let config = loader(home.path())
            .load_configuration(None, None, None)
            .unwrap();
        assert_eq!(config.theme, "gitlab");
        assert_eq!(config.github_token, "ghp_global");
    }

    #[test]
    fn test_global_env_prefix_layers_over_file() {
        let home = TempDir::new().unwrap();
        let global = write(home.path().join("global.yaml"), "theme: gitlab\n");
        let env = EnvLookup::fixed([
            ("XDG_CONFIG_HOME", home.path().join("xdg").display().to_string()),
            ("GH_ACTION_README_THEME", "minimal".to_string()),
        ]);

        let config = ConfigLoader::default()
            .with_env(env)
            .with_detector(FixedDetector(None))
            .load_configuration(Some(&global), None, None)
            .unwrap();
        assert_eq!(config.theme, "minimal");
    }

    #[test]
    fn test_malformed_global_on_search_path_is_error() {
        let home = TempDir::new().unwrap();
        write(home.path().join("xdg/gh-action-readme/config.yaml"), "theme: [");

        let err = loader(home.path())
            .load_configuration(None, None, None)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { source_name: "global", .. }));
    }

    #[test]
    fn test_layered_example() {
        let home = TempDir::new().unwrap();
        let global = write(
            home.path().join("global.yaml"),
            "theme: default\noutput_format: md\ngithub_token: base-token\n",
        );
        let repo = home.path().join("repo");
        write(
            repo.join(".ghreadme.yaml"),
            "theme: github\noutput_format: html\nverbose: true\n",
        );
        let action = repo.join("actions/build");
        write(
            action.join("config.yaml"),
            "theme: professional\noutput_dir: output\n",
        );

        let config = loader(home.path())
            .load_configuration(Some(&global), Some(&repo), Some(&action))
            .unwrap();
        assert_eq!(config.theme, "professional");
        assert_eq!(config.output_format, "html");
        assert_eq!(config.output_dir, "output");
        assert!(config.verbose);
        assert_eq!(config.github_token, "base-token");
    }

    #[test]
    fn test_repo_and_action_tokens_are_ignored() {
        let home = TempDir::new().unwrap();
        let repo = home.path().join("repo");
        write(repo.join(".github/ghreadme.yaml"), "github_token: repo-token\n");
        let action = repo.join("action");
        write(action.join("config.yaml"), "github_token: action-token\n");

        let config = loader(home.path())
            .load_configuration(None, Some(&repo), Some(&action))
            .unwrap();
        assert!(config.github_token.is_empty());
    }

    #[test]
    fn test_repo_override_applies_for_detected_repository() {
        let home = TempDir::new().unwrap();
        let global = write(
            home.path().join("global.yaml"),
            r#"
theme: github
repo_overrides:
  acme/widgets:
    theme: professional
    github_token: override-token
  acme/other:
    theme: minimal
"#,
        );
        let repo = home.path().join("repo");
        fs::create_dir_all(&repo).unwrap();

        let config = ConfigLoader::default()
            .with_env(isolated_env(home.path()))
            .with_detector(FixedDetector(Some(RepoIdentity::new("acme", "widgets"))))
            .load_configuration(Some(&global), Some(&repo), None)
            .unwrap();
        assert_eq!(config.theme, "professional");
        assert_eq!(config.organization, "acme");
        assert_eq!(config.repository, "widgets");
        assert!(config.github_token.is_empty());
    }

    #[test]
    fn test_repo_override_skipped_without_detection() {
        let home = TempDir::new().unwrap();
        let global = write(
            home.path().join("global.yaml"),
            "repo_overrides:\n  acme/widgets:\n    theme: professional\n",
        );
        let repo = home.path().join("repo");
        fs::create_dir_all(&repo).unwrap();

        let config = loader(home.path())
            .load_configuration(Some(&global), Some(&repo), None)
            .unwrap();
        assert_eq!(config.theme, "default");
    }

    #[test]
    fn test_environment_token_overrides_global() {
        let home = TempDir::new().unwrap();
        let global = write(home.path().join("global.yaml"), "github_token: file-token\n");

        let with_tool = ConfigLoader::default()
            .with_env(EnvLookup::fixed([
                ("GH_README_GITHUB_TOKEN", "tool-token"),
                ("GITHUB_TOKEN", "std-token"),
            ]))
            .with_detector(FixedDetector(None))
            .load_configuration(Some(&global), None, None)
            .unwrap();
        assert_eq!(with_tool.github_token, "tool-token");

        let with_std = ConfigLoader::default()
            .with_env(EnvLookup::fixed([("GITHUB_TOKEN", "std-token")]))
            .with_detector(FixedDetector(None))
            .load_configuration(Some(&global), None, None)
            .unwrap();
        assert_eq!(with_std.github_token, "std-token");

        let with_empty = ConfigLoader::default()
            .with_env(EnvLookup::fixed([("GH_README_GITHUB_TOKEN", ""), ("GITHUB_TOKEN", "")]))
            .with_detector(FixedDetector(None))
            .load_configuration(Some(&global), None, None)
            .unwrap();
        assert_eq!(with_empty.github_token, "file-token");
    }

    #[test]
    fn test_selective_loading_skips_repo_config() {
        let home = TempDir::new().unwrap();
        let repo = home.path().join("repo");
        write(repo.join(".ghreadme.yaml"), "theme: github\n");

        let config = ConfigLoader::new(LoaderOptions::only(&[
            ConfigSource::Defaults,
            ConfigSource::Global,
        ]))
        .with_env(isolated_env(home.path()))
        .with_detector(FixedDetector(None))
        .load_configuration(None, Some(&repo), None)
        .unwrap();
        assert_eq!(config.theme, "default");
    }

    #[test]
    fn test_loading_is_idempotent() {
        let home = TempDir::new().unwrap();
        let global = write(
            home.path().join("global.yaml"),
            "theme: gitlab\npermissions:\n  contents: read\n",
        );
        let repo = home.path().join("repo");
        write(repo.join(".ghreadme.yaml"), "runs_on: [ubuntu-latest]\n");

        let loader = loader(home.path());
        let first = loader
            .load_configuration(Some(&global), Some(&repo), None)
            .unwrap();
        let second = loader
            .load_configuration(Some(&global), Some(&repo), None)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_action_config_error_is_propagated() {
        let home = TempDir::new().unwrap();
        let action = home.path().join("action");
        write(action.join("config.yaml"), "output_dir: [");

        let err = loader(home.path())
            .load_configuration(None, None, Some(&action))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { source_name: "action", .. }));
    }

    #[test]
    fn test_cli_overrides_win() {
        let mut config = Config {
            verbose: true,
            ..Config::defaults()
        };
        apply_cli_overrides(
            &mut config,
            &CliOverrides {
                theme: Some("minimal".into()),
                output_format: Some(OutputFormat::Json),
                quiet: true,
                ..Default::default()
            },
        );
        assert_eq!(config.theme, "minimal");
        assert_eq!(config.output_format, "json");
        assert!(config.quiet);
        assert!(!config.verbose);
        validate_configuration(&config).unwrap();
    }

    #[test]
    fn test_validate_rejects_verbose_and_quiet() {
        let config = Config {
            verbose: true,
            quiet: true,
            ..Config::defaults()
        };
        assert!(matches!(
            validate_configuration(&config),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_format = Config {
            output_format: "pdf".into(),
            ..Config::defaults()
        };
        assert!(validate_configuration(&bad_format).is_err());

        for alias in ["markdown", "adoc", "MD"] {
            let aliased = Config {
                output_format: alias.into(),
                ..Config::defaults()
            };
            assert!(validate_configuration(&aliased).is_err(), "{alias}");
        }

        let empty_dir = Config {
            output_dir: String::new(),
            ..Config::defaults()
        };
        assert!(validate_configuration(&empty_dir).is_err());

        let bad_theme = Config {
            theme: "sparkly".into(),
            ..Config::defaults()
        };
        assert!(validate_configuration(&bad_theme).is_err());

        let path_theme = Config {
            theme: "./themes/corp".into(),
            ..Config::defaults()
        };
        assert!(validate_configuration(&path_theme).is_ok());
    }
}
