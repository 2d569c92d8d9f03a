//! Config command - Inspect and initialize configuration

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use super::{global_overrides, ConfigArgs, ConfigCommand, ConfigInitArgs, ConfigShowArgs};
use crate::cli::{exit_codes, GlobalOptions};
use crate::config::sources::{
    default_global_config_path, find_global_config, global_search_dirs, repo_config_candidates,
};
use crate::config::{
    apply_cli_overrides, ConfigLoader, ConfigSource, EnvLookup, GitRemoteDetector,
    RepositoryDetector, Theme,
};
use crate::error::ActionDocsError;
use crate::scanner::find_repository_root;

const STARTER_CONFIG: &str = r#"# gh-action-readme configuration
# Every key is optional; unset keys fall back to lower-priority sources.

# organization: my-org
# repository: my-repo
# version: v1

theme: default          # default | github | gitlab | minimal | professional | <path>
output_format: md       # md | html | json | asciidoc
output_dir: "."

# template: path/to/template.tera
# header: path/to/header.md
# footer: path/to/footer.md

analyze_dependencies: false
show_security_info: false

# permissions:
#   contents: read
# runs_on:
#   - ubuntu-latest
"#;

pub async fn execute(args: ConfigArgs, global: &GlobalOptions) -> Result<i32> {
    match args.action {
        ConfigCommand::Show(show) => show_config(&show, global),
        ConfigCommand::Init(init) => init_config(&init, global),
        ConfigCommand::Themes => {
            list_themes();
            Ok(exit_codes::SUCCESS)
        }
        ConfigCommand::Path => {
            show_paths(global);
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn repo_root_for(global: &GlobalOptions) -> PathBuf {
    let base = global.base_dir();
    find_repository_root(&base).unwrap_or(base)
}

fn show_config(args: &ConfigShowArgs, global: &GlobalOptions) -> Result<i32> {
    let options = args.loader_options();
    let apply_cli = options.is_enabled(ConfigSource::CliFlags);
    let loader = ConfigLoader::new(options);

    let repo_root = repo_root_for(global);
    let target = args.path.as_deref().map(|p| global.resolve(Some(p)));

    let mut config = loader.load_configuration(
        global.config.as_deref(),
        Some(&repo_root),
        target.as_deref(),
    )
    .map_err(ActionDocsError::from)?;
    if apply_cli {
        apply_cli_overrides(&mut config, &global_overrides(global));
    }

    let redacted = config.redacted();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&redacted)?);
    } else {
        print!("{}", redacted.to_yaml()?);
    }

    Ok(exit_codes::SUCCESS)
}

fn init_config(args: &ConfigInitArgs, global: &GlobalOptions) -> Result<i32> {
    let (path, content) = if args.global {
        let path = default_global_config_path(&EnvLookup::Process)
            .context("Could not determine the user configuration directory")?;
        (path, STARTER_CONFIG.to_string())
    } else {
        let repo_root = repo_root_for(global);
        let path = repo_config_candidates(&repo_root)[0].clone();
        (path, starter_for_repository(&repo_root))
    };

    if path.exists() && !args.force {
        eprintln!(
            "{} {} already exists. Use --force to overwrite.",
            "Error:".red().bold(),
            path.display()
        );
        return Ok(exit_codes::ERROR);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, content)
        .with_context(|| format!("Failed to write configuration file {}", path.display()))?;

    println!(
        "{} Created {}",
        "Success:".green().bold(),
        path.display().to_string().cyan()
    );
    Ok(exit_codes::SUCCESS)
}

/// Starter config with organization and repository filled from `origin`
fn starter_for_repository(repo_root: &Path) -> String {
    match GitRemoteDetector.detect(repo_root) {
        Some(identity) => STARTER_CONFIG
            .replace(
                "# organization: my-org",
                &format!("organization: {}", identity.organization),
            )
            .replace(
                "# repository: my-repo",
                &format!("repository: {}", identity.name),
            ),
        None => STARTER_CONFIG.to_string(),
    }
}

fn list_themes() {
    for name in Theme::BUILT_IN {
        println!("  {:<14} {}", name.cyan(), theme_description(name).dimmed());
    }
    println!("\n  A path to a template file or a directory containing readme.tera also works.");
}

fn theme_description(name: &str) -> &'static str {
    match name {
        "default" => "Plain sections with input and output tables",
        "github" => "GitHub flavored, with badges and alerts",
        "gitlab" => "GitLab flavored, with a table of contents",
        "minimal" => "Name, description, usage and bullet lists",
        "professional" => "Centered header, table of contents, permissions",
        _ => "",
    }
}

fn show_paths(global: &GlobalOptions) {
    let env = EnvLookup::Process;
    let active = find_global_config(global.config.as_deref(), &env);

    println!("{}", "Global configuration:".bold());
    if let Some(explicit) = &global.config {
        println!("  {} {}", "→".green(), explicit.display());
    } else {
        for dir in global_search_dirs(&env) {
            let marker = match &active {
                Some(found) if found.starts_with(&dir) => "→".green(),
                _ => " ".normal(),
            };
            println!("  {} {}", marker, dir.display());
        }
    }

    println!("\n{}", "Repository configuration (first match wins):".bold());
    let repo_root = repo_root_for(global);
    let mut found = false;
    for candidate in repo_config_candidates(&repo_root) {
        let marker = if !found && candidate.is_file() {
            found = true;
            "→".green()
        } else {
            " ".normal()
        };
        println!("  {} {}", marker, candidate.display());
    }

    println!(
        "\n{} config.yaml next to each action.yml",
        "Action configuration:".bold()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::TempDir;

    #[test]
    fn test_starter_config_parses() {
        let config: Config = serde_yaml::from_str(STARTER_CONFIG).unwrap();
        assert_eq!(config.theme, "default");
        assert_eq!(config.output_format, "md");
        assert_eq!(config.output_dir, ".");
    }

    #[test]
    fn test_every_theme_is_described() {
        for name in Theme::BUILT_IN {
            assert!(!theme_description(name).is_empty(), "{name}");
        }
    }

    #[test]
    fn test_starter_without_remote_is_unchanged() {
        let dir = TempDir::new().unwrap();
        assert_eq!(starter_for_repository(dir.path()), STARTER_CONFIG);
    }
}
