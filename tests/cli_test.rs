//! Integration tests for the gh-action-readme CLI

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const NODE_ACTION: &str = r#"name: Hello World
description: Greets someone
inputs:
  who:
    description: Who to greet
    required: true
  greeting:
    description: Greeting word
    default: Hello
outputs:
  time:
    description: When the greeting happened
runs:
  using: node20
  main: index.js
"#;

const COMPOSITE_ACTION: &str = r#"name: Build
description: Builds things
runs:
  using: composite
  steps:
    - uses: actions/checkout@v4
    - uses: actions/cache@main
    - run: make
      shell: bash
"#;

const BROKEN_ACTION: &str = "description: No name here\nruns:\n  using: node20\n  main: index.js\n";

#[allow(deprecated)]
fn get_cmd() -> Command {
    Command::cargo_bin("gh-action-readme").unwrap()
}

/// Command isolated from the user's configuration and environment
fn cmd_in(dir: &Path) -> Command {
    let mut cmd = get_cmd();
    cmd.current_dir(dir)
        .env("HOME", dir.join("home"))
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env("NO_COLOR", "1")
        .env_remove("GITHUB_TOKEN")
        .env_remove("GH_README_GITHUB_TOKEN")
        .env_remove("GH_ACTION_README_THEME")
        .env_remove("RUST_LOG");
    cmd
}

fn write_action(root: &Path, dir: &str, content: &str) {
    let dir = root.join(dir);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("action.yml"), content).unwrap();
}

#[test]
fn test_gen_writes_readme_next_to_each_action() {
    let temp_dir = TempDir::new().unwrap();
    write_action(temp_dir.path(), "hello", NODE_ACTION);
    write_action(temp_dir.path(), "build", COMPOSITE_ACTION);

    cmd_in(temp_dir.path())
        .arg("gen")
        .assert()
        .success()
        .stdout(predicate::str::contains("GEN SUMMARY"))
        .stdout(predicate::str::contains("2 processed, 2 succeeded, 0 failed"));

    let readme = fs::read_to_string(temp_dir.path().join("hello/README.md")).unwrap();
    assert!(readme.starts_with("# Hello World"));
    assert!(readme.contains("| `who` | Who to greet | true |"));
    assert!(temp_dir.path().join("build/README.md").exists());
}

#[test]
fn test_gen_uses_repository_config() {
    let temp_dir = TempDir::new().unwrap();
    write_action(temp_dir.path(), "hello", NODE_ACTION);
    fs::write(
        temp_dir.path().join(".ghreadme.yaml"),
        "organization: acme\nrepository: tools\noutput_format: html\noutput_dir: docs\n",
    )
    .unwrap();

    cmd_in(temp_dir.path()).arg("gen").assert().success();

    let html = fs::read_to_string(temp_dir.path().join("hello/docs/README.html")).unwrap();
    assert!(html.contains("<h1>Hello World</h1>"));
    // autoescape encodes the slashes in the uses: reference
    assert!(html.contains("hello@v1"));
    assert!(html.contains("acme"));
}

#[test]
fn test_action_config_overrides_cli_less_sources() {
    let temp_dir = TempDir::new().unwrap();
    write_action(temp_dir.path(), "hello", NODE_ACTION);
    fs::write(
        temp_dir.path().join("hello/config.yaml"),
        "output_format: json\n",
    )
    .unwrap();

    cmd_in(temp_dir.path()).arg("gen").assert().success();
    let json = fs::read_to_string(temp_dir.path().join("hello/action-docs.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["name"], "Hello World");
}

#[test]
fn test_cli_format_wins_over_action_config() {
    let temp_dir = TempDir::new().unwrap();
    write_action(temp_dir.path(), "hello", NODE_ACTION);
    fs::write(
        temp_dir.path().join("hello/config.yaml"),
        "output_format: json\n",
    )
    .unwrap();

    cmd_in(temp_dir.path())
        .args(["gen", "--output-format", "asciidoc"])
        .assert()
        .success();
    assert!(temp_dir.path().join("hello/README.adoc").exists());
    assert!(!temp_dir.path().join("hello/action-docs.json").exists());
}

#[test]
fn test_repository_config_found_from_subdirectory() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join(".git")).unwrap();
    fs::write(
        temp_dir.path().join(".ghreadme.yaml"),
        "organization: acme\nrepository: tools\noutput_format: json\n",
    )
    .unwrap();
    write_action(temp_dir.path(), "actions/build", COMPOSITE_ACTION);
    let nested = temp_dir.path().join("actions/build");

    let mut cmd = cmd_in(temp_dir.path());
    cmd.current_dir(&nested).arg("gen").assert().success();

    let json = fs::read_to_string(nested.join("action-docs.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["uses"], "acme/tools/actions/build@v1");
}

#[test]
fn test_gen_dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    write_action(temp_dir.path(), "hello", NODE_ACTION);

    cmd_in(temp_dir.path())
        .args(["gen", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 file(s) would be written"));

    assert!(!temp_dir.path().join("hello/README.md").exists());
}

#[test]
fn test_gen_reports_item_errors_and_continues() {
    let temp_dir = TempDir::new().unwrap();
    write_action(temp_dir.path(), "good", NODE_ACTION);
    write_action(temp_dir.path(), "bad", BROKEN_ACTION);

    cmd_in(temp_dir.path())
        .arg("gen")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("1 of 2 action(s) failed"))
        .stderr(predicate::str::contains("missing required field 'name'"));

    assert!(temp_dir.path().join("good/README.md").exists());
    assert!(!temp_dir.path().join("bad/README.md").exists());
}

#[test]
fn test_fail_fast_skips_remaining_items() {
    let temp_dir = TempDir::new().unwrap();
    for name in ["a", "b", "c"] {
        write_action(temp_dir.path(), name, BROKEN_ACTION);
    }

    let output = cmd_in(temp_dir.path())
        .args(["validate", "--fail-fast", "--concurrency", "1", "--json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["summary"]["processed"], 1);
    assert_eq!(report["summary"]["errored"], 1);
    assert_eq!(report["summary"]["skipped"], 2);
}

#[test]
fn test_validate_strict_reports_schema_violations() {
    let temp_dir = TempDir::new().unwrap();
    write_action(
        temp_dir.path(),
        "odd",
        "name: Odd\ndescription: Odd\ninputs:\n  x:\n    description: x\n    color: red\nruns:\n  using: node20\n  main: index.js\n",
    );

    cmd_in(temp_dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 succeeded"));

    cmd_in(temp_dir.path())
        .args(["validate", "--strict"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("schema /inputs/x"));
}

#[test]
fn test_validate_single_file() {
    let temp_dir = TempDir::new().unwrap();
    write_action(temp_dir.path(), "hello", NODE_ACTION);

    cmd_in(temp_dir.path())
        .args(["validate", "hello/action.yml", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"processed\": 1"));
}

#[test]
fn test_no_action_files_is_runtime_error() {
    let temp_dir = TempDir::new().unwrap();

    cmd_in(temp_dir.path())
        .arg("gen")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("no action.yml or action.yaml files found"));
}

#[test]
fn test_non_recursive_only_checks_top_level() {
    let temp_dir = TempDir::new().unwrap();
    write_action(temp_dir.path(), "nested", NODE_ACTION);

    cmd_in(temp_dir.path())
        .args(["validate", "--no-recursive"])
        .assert()
        .code(3);
}

#[test]
fn test_invalid_arguments_exit_code() {
    let temp_dir = TempDir::new().unwrap();

    cmd_in(temp_dir.path())
        .args(["gen", "--output-format", "pdf"])
        .assert()
        .code(4);
}

#[test]
fn test_unknown_theme_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    write_action(temp_dir.path(), "hello", NODE_ACTION);

    cmd_in(temp_dir.path())
        .args(["gen", "--theme", "fancy"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown theme 'fancy'"));
}

#[test]
fn test_malformed_repo_config_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    write_action(temp_dir.path(), "hello", NODE_ACTION);
    fs::write(temp_dir.path().join(".ghreadme.yaml"), "theme: [unclosed").unwrap();

    cmd_in(temp_dir.path())
        .arg("gen")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("failed to parse repo config"));
}

#[test]
fn test_config_show_masks_token() {
    let temp_dir = TempDir::new().unwrap();
    let global = temp_dir.path().join("global.yaml");
    fs::write(&global, "theme: github\ngithub_token: ghp_secret_value\n").unwrap();

    cmd_in(temp_dir.path())
        .args(["-c", global.to_str().unwrap(), "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("theme: github"))
        .stdout(predicate::str::contains("***"))
        .stdout(predicate::str::contains("ghp_secret_value").not());
}

#[test]
fn test_config_show_ignores_repo_token() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".ghreadme.yaml"),
        "github_token: from-repo\n",
    )
    .unwrap();

    cmd_in(temp_dir.path())
        .args(["config", "show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("github_token").not());
}

#[test]
fn test_config_show_environment_layers() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".ghreadme.yaml"), "theme: gitlab\n").unwrap();

    cmd_in(temp_dir.path())
        .env("GH_ACTION_README_THEME", "minimal")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("theme: gitlab"));

    cmd_in(temp_dir.path())
        .env("GH_ACTION_README_THEME", "minimal")
        .args(["config", "show", "--skip", "repo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("theme: minimal"));
}

#[test]
fn test_config_show_only_defaults() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".ghreadme.yaml"), "theme: gitlab\n").unwrap();

    cmd_in(temp_dir.path())
        .args(["config", "show", "--only", "defaults"])
        .assert()
        .success()
        .stdout(predicate::str::contains("theme: default"));
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let temp_dir = TempDir::new().unwrap();

    cmd_in(temp_dir.path())
        .args(["config", "init"])
        .assert()
        .success();
    let content = fs::read_to_string(temp_dir.path().join(".ghreadme.yaml")).unwrap();
    assert!(content.contains("theme: default"));

    cmd_in(temp_dir.path())
        .args(["config", "init"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("already exists"));

    cmd_in(temp_dir.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_config_themes_lists_builtins() {
    let temp_dir = TempDir::new().unwrap();

    cmd_in(temp_dir.path())
        .args(["config", "themes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("professional"))
        .stdout(predicate::str::contains("minimal"));
}

#[test]
fn test_deps_json() {
    let temp_dir = TempDir::new().unwrap();
    write_action(temp_dir.path(), "build", COMPOSITE_ACTION);

    let output = cmd_in(temp_dir.path())
        .args(["deps", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let deps = value[0]["dependencies"].as_array().unwrap();
    assert_eq!(deps.len(), 2);
    assert_eq!(deps[0]["kind"], "tag");
    assert_eq!(deps[1]["kind"], "branch");
}

#[test]
fn test_schema_command_prints_json() {
    let temp_dir = TempDir::new().unwrap();

    let output = cmd_in(temp_dir.path()).arg("schema").output().unwrap();
    assert!(output.status.success());
    let schema: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(schema["required"][0], "name");
}

#[test]
fn test_directory_flag() {
    let temp_dir = TempDir::new().unwrap();
    let work = temp_dir.path().join("work");
    write_action(&work, "hello", NODE_ACTION);

    cmd_in(temp_dir.path())
        .args(["-C", work.to_str().unwrap(), "gen", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(work.join("hello/README.md").exists());
}

#[test]
fn test_version_flag() {
    get_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
