//! # Documentation Rendering
//!
//! Turns a parsed [`ActionManifest`] into documentation.
//!
//! Markdown, HTML and AsciiDoc go through [tera](https://keats.github.io/tera/)
//! templates; JSON is the serialized template context. The template is
//! chosen in this order:
//!
//! 1. `template` from the configuration
//! 2. a theme path: a file is the template, a directory must contain
//!    `readme.tera`
//! 3. the built-in template for the theme and format
//!
//! `header` and `footer` files are wrapped around text output.

mod templates;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Context, Tera, Value};
use tracing::debug;

use crate::config::{Config, OutputFormat, Theme};
use crate::deps::{self, Dependency};
use crate::error::RenderError;
use crate::manifest::{ActionManifest, Branding};
use crate::scanner::absolute_path;

/// File looked up inside a theme directory
pub const THEME_TEMPLATE_FILE: &str = "readme.tera";

const CUSTOM_TEMPLATE: &str = "custom";
const HTML_TEMPLATE: &str = "page.html";
const ADOC_TEMPLATE: &str = "page.adoc";

/// Version used in usage snippets when none is configured
pub const DEFAULT_USAGE_VERSION: &str = "v1";

/// Per-render options
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Directory of the action relative to the repository root, used in the
    /// `uses:` line of the usage snippet
    pub subpath: Option<String>,
    /// Timestamp printed in the footer, omitted when `None`
    pub generated_at: Option<DateTime<Utc>>,
}

impl RenderOptions {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            subpath: None,
            generated_at: None,
        }
    }

    pub fn with_subpath(mut self, subpath: Option<String>) -> Self {
        self.subpath = subpath.filter(|s| !s.is_empty() && s != ".");
        self
    }

    pub fn with_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }
}

#[derive(Debug, Serialize)]
struct InputRow<'a> {
    name: &'a str,
    description: &'a str,
    required: bool,
    default: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    deprecation_message: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    name: &'a str,
    description: &'a str,
}

/// Data handed to templates, and the document produced for JSON output
#[derive(Debug, Serialize)]
struct DocContext<'a> {
    name: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<&'a str>,
    version: &'a str,
    runs_using: &'a str,
    uses: String,
    usage: String,
    inputs: Vec<InputRow<'a>>,
    outputs: Vec<OutputRow<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    branding: Option<&'a Branding>,
    permissions: &'a BTreeMap<String, String>,
    runs_on: &'a [String],
    variables: &'a BTreeMap<String, String>,
    dependencies: Vec<Dependency>,
    security_notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generated_at: Option<String>,
}

/// Template-backed renderer for one resolved configuration
pub struct Renderer {
    tera: Tera,
    config: Config,
    theme: Theme,
    has_custom_template: bool,
    header: Option<String>,
    footer: Option<String>,
}

impl Renderer {
    /// Compile built-in templates and load any custom template, header and
    /// footer named by the configuration
    pub fn new(config: &Config) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.register_filter("md_cell", md_cell);
        tera.add_raw_templates(vec![
            ("default", templates::DEFAULT_MD),
            ("github", templates::GITHUB_MD),
            ("gitlab", templates::GITLAB_MD),
            ("minimal", templates::MINIMAL_MD),
            ("professional", templates::PROFESSIONAL_MD),
            (HTML_TEMPLATE, templates::PAGE_HTML),
            (ADOC_TEMPLATE, templates::PAGE_ADOC),
        ])?;

        let theme = config.theme().unwrap_or(Theme::Default);

        let custom = if !config.template.is_empty() {
            Some(PathBuf::from(&config.template))
        } else if let Theme::Path(path) = &theme {
            Some(if path.is_dir() {
                path.join(THEME_TEMPLATE_FILE)
            } else {
                path.clone()
            })
        } else {
            None
        };

        let has_custom_template = match custom {
            Some(path) => {
                debug!("Using custom template {}", path.display());
                let content = read_file(&path)?;
                tera.add_raw_template(CUSTOM_TEMPLATE, &content)?;
                true
            }
            None => false,
        };

        Ok(Self {
            tera,
            config: config.clone(),
            theme,
            has_custom_template,
            header: optional_file(&config.header)?,
            footer: optional_file(&config.footer)?,
        })
    }

    /// Render documentation for one manifest
    pub fn render(
        &self,
        manifest: &ActionManifest,
        options: &RenderOptions,
    ) -> Result<String, RenderError> {
        let context = self.context(manifest, options);

        if options.format == OutputFormat::Json {
            let mut json = serde_json::to_string_pretty(&context)?;
            json.push('\n');
            return Ok(json);
        }

        let template = self.template_name(options.format);
        let body = self
            .tera
            .render(template, &Context::from_serialize(&context)?)?;

        let mut parts: Vec<&str> = Vec::with_capacity(3);
        if let Some(header) = &self.header {
            parts.push(header.trim_end());
        }
        parts.push(body.trim_end());
        if let Some(footer) = &self.footer {
            parts.push(footer.trim_end());
        }

        let mut document = parts.join("\n\n");
        document.push('\n');
        Ok(document)
    }

    fn template_name(&self, format: OutputFormat) -> &'static str {
        if self.has_custom_template {
            return CUSTOM_TEMPLATE;
        }
        match format {
            OutputFormat::Html => HTML_TEMPLATE,
            OutputFormat::Asciidoc => ADOC_TEMPLATE,
            OutputFormat::Md | OutputFormat::Json => match self.theme {
                Theme::Github => "github",
                Theme::Gitlab => "gitlab",
                Theme::Minimal => "minimal",
                Theme::Professional => "professional",
                Theme::Default | Theme::Path(_) => "default",
            },
        }
    }

    fn context<'a>(
        &'a self,
        manifest: &'a ActionManifest,
        options: &RenderOptions,
    ) -> DocContext<'a> {
        let inputs: Vec<InputRow<'a>> = manifest
            .inputs
            .iter()
            .map(|(name, input)| InputRow {
                name,
                description: input.description.trim(),
                required: input.required,
                default: input.default.as_deref().unwrap_or_default(),
                deprecation_message: input.deprecation_message.as_deref(),
            })
            .collect();

        let outputs = manifest
            .outputs
            .iter()
            .map(|(name, output)| OutputRow {
                name,
                description: output.description.trim(),
            })
            .collect();

        let dependencies = if self.config.analyze_dependencies || self.config.show_security_info
        {
            deps::analyze(manifest)
        } else {
            Vec::new()
        };
        let security_notes = if self.config.show_security_info {
            deps::security_notes(&dependencies)
        } else {
            Vec::new()
        };

        let uses = uses_reference(&self.config, options.subpath.as_deref());
        let usage = usage_snippet(&uses, &inputs);

        DocContext {
            name: &manifest.name,
            description: manifest.description.trim(),
            author: manifest.author.as_deref(),
            version: &self.config.version,
            runs_using: &manifest.runs.using,
            uses,
            usage,
            inputs,
            outputs,
            branding: manifest.branding.as_ref(),
            permissions: &self.config.permissions,
            runs_on: &self.config.runs_on,
            variables: &self.config.variables,
            dependencies: if self.config.analyze_dependencies {
                dependencies
            } else {
                Vec::new()
            },
            security_notes,
            generated_at: options
                .generated_at
                .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
        }
    }
}

/// The `uses:` value for the usage snippet
fn uses_reference(config: &Config, subpath: Option<&str>) -> String {
    let version = if config.version.is_empty() {
        DEFAULT_USAGE_VERSION
    } else {
        &config.version
    };

    if config.organization.is_empty() || config.repository.is_empty() {
        return match subpath {
            Some(sub) => format!("./{sub}"),
            None => "./".to_string(),
        };
    }

    match subpath {
        Some(sub) => format!(
            "{}/{}/{}@{}",
            config.organization, config.repository, sub, version
        ),
        None => format!("{}/{}@{}", config.organization, config.repository, version),
    }
}

fn usage_snippet(uses: &str, inputs: &[InputRow<'_>]) -> String {
    let mut snippet = format!("- uses: {uses}");
    if inputs.is_empty() {
        return snippet;
    }

    snippet.push_str("\n  with:");
    for input in inputs {
        let value = if input.default.is_empty() {
            "\"\"".to_string()
        } else {
            input.default.to_string()
        };
        snippet.push_str(&format!("\n    {}: {}", input.name, value));
        if input.required {
            snippet.push_str(" # required");
        }
    }
    snippet
}

/// Escape a value for a Markdown table cell
fn md_cell(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    };
    let escaped = text
        .trim()
        .replace('|', "\\|")
        .replace("\r\n", "\n")
        .replace('\n', "<br>");
    Ok(Value::String(escaped))
}

fn read_file(path: &Path) -> Result<String, RenderError> {
    fs::read_to_string(path).map_err(|e| RenderError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

fn optional_file(path: &str) -> Result<Option<String>, RenderError> {
    if path.is_empty() {
        return Ok(None);
    }
    read_file(Path::new(path)).map(Some)
}

/// Where the documentation for `action_file` goes.
///
/// A relative `output_dir` is resolved against the action's directory; an
/// absolute one mirrors the action's location relative to `root`.
pub fn output_path(action_file: &Path, root: &Path, config: &Config) -> PathBuf {
    let file_name = config.format().unwrap_or(OutputFormat::Md).file_name();
    let action_dir = action_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let output_dir = Path::new(&config.output_dir);
    let dir = if output_dir.is_absolute() {
        let root_dir = if root.is_file() {
            root.parent().unwrap_or(root)
        } else {
            root
        };
        match action_dir.strip_prefix(root_dir) {
            Ok(relative) if !relative.as_os_str().is_empty() => output_dir.join(relative),
            _ => output_dir.to_path_buf(),
        }
    } else if config.output_dir.is_empty() || config.output_dir == "." {
        action_dir.to_path_buf()
    } else {
        action_dir.join(output_dir)
    };

    dir.join(file_name)
}

/// Action directory relative to `root`, as used in `owner/repo/<subpath>@v`.
///
/// Either path may be relative to the working directory.
pub fn action_subpath(action_file: &Path, root: &Path) -> Option<String> {
    let action_dir = absolute_path(action_file.parent()?)?;
    let root = absolute_path(root)?;
    let relative = action_dir.strip_prefix(&root).ok()?;
    let text = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Write a rendered document, creating parent directories
pub fn write_output(path: &Path, content: &str) -> Result<(), RenderError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| RenderError::FileWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    fs::write(path, content).map_err(|e| RenderError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
