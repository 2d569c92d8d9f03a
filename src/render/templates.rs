//! Built-in templates
//!
//! Markdown themes share the same context; HTML and AsciiDoc have one layout
//! each. Templates named `*.html` are autoescaped by tera.

pub const DEFAULT_MD: &str = r#"# {{ name }}

{{ description }}
{% if author %}
Author: {{ author }}
{% endif %}
## Usage

```yaml
{{ usage }}
```
{% if inputs | length > 0 %}
## Inputs

| Name | Description | Required | Default |
|------|-------------|----------|---------|
{% for input in inputs -%}
| `{{ input.name }}` | {{ input.description | md_cell }} | {{ input.required }} | {% if input.default %}`{{ input.default | md_cell }}`{% endif %} |
{% endfor -%}
{% endif %}
{%- if outputs | length > 0 %}
## Outputs

| Name | Description |
|------|-------------|
{% for output in outputs -%}
| `{{ output.name }}` | {{ output.description | md_cell }} |
{% endfor -%}
{% endif %}
{%- if dependencies | length > 0 %}
## Dependencies

| Action | Version | Pinning |
|--------|---------|---------|
{% for dep in dependencies -%}
| `{{ dep.name }}` | {{ dep.version }} | {{ dep.kind }} |
{% endfor -%}
{% endif %}
{%- if security_notes | length > 0 %}
## Security

{% for note in security_notes -%}
- {{ note }}
{% endfor -%}
{% endif %}
{%- if generated_at %}
---
Generated by gh-action-readme on {{ generated_at }}
{% endif %}"#;

pub const GITHUB_MD: &str = r#"# {{ name }}
{% if branding %}
![icon: {{ branding.icon }}](https://img.shields.io/badge/icon-{{ branding.icon }}-{{ branding.color }})
{% endif %}
> {{ description }}

## :rocket: Usage

```yaml
{{ usage }}
```
{% if permissions | length > 0 %}
### Permissions

```yaml
permissions:
{% for scope, level in permissions %}  {{ scope }}: {{ level }}
{% endfor %}```
{% endif %}
{%- if runs_on | length > 0 %}
Runs on: {% for runner in runs_on %}`{{ runner }}`{% if not loop.last %}, {% endif %}{% endfor %}
{% endif %}
{%- if inputs | length > 0 %}
## :inbox_tray: Inputs

| Input | Description | Required | Default |
|:------|:------------|:--------:|:--------|
{% for input in inputs -%}
| `{{ input.name }}` | {{ input.description | md_cell }}{% if input.deprecation_message %} **Deprecated:** {{ input.deprecation_message | md_cell }}{% endif %} | {% if input.required %}:white_check_mark:{% else %}:x:{% endif %} | {% if input.default %}`{{ input.default | md_cell }}`{% endif %} |
{% endfor -%}
{% endif %}
{%- if outputs | length > 0 %}
## :outbox_tray: Outputs

| Output | Description |
|:-------|:------------|
{% for output in outputs -%}
| `{{ output.name }}` | {{ output.description | md_cell }} |
{% endfor -%}
{% endif %}
{%- if dependencies | length > 0 %}
## :package: Dependencies

{% for dep in dependencies -%}
- `{{ dep.uses }}` ({{ dep.kind }})
{% endfor -%}
{% endif %}
{%- if security_notes | length > 0 %}
> [!WARNING]
{% for note in security_notes -%}
> {{ note }}
{% endfor -%}
{% endif %}
{%- if generated_at %}
<sub>Generated by gh-action-readme on {{ generated_at }}</sub>
{% endif %}"#;

pub const GITLAB_MD: &str = r#"# {{ name }}

{{ description }}

[[_TOC_]]

## Usage

```yaml
{{ usage }}
```
{% if inputs | length > 0 %}
## Parameters

| Parameter | Description | Mandatory | Default value |
| --- | --- | --- | --- |
{% for input in inputs -%}
| `{{ input.name }}` | {{ input.description | md_cell }} | {% if input.required %}yes{% else %}no{% endif %} | {{ input.default | md_cell }} |
{% endfor -%}
{% endif %}
{%- if outputs | length > 0 %}
## Results

| Result | Description |
| --- | --- |
{% for output in outputs -%}
| `{{ output.name }}` | {{ output.description | md_cell }} |
{% endfor -%}
{% endif %}
{%- if variables | length > 0 %}
## Variables

{% for key, value in variables -%}
- `{{ key }}`: {{ value }}
{% endfor -%}
{% endif %}
{%- if security_notes | length > 0 %}
## Security notes

{% for note in security_notes -%}
- {{ note }}
{% endfor -%}
{% endif %}"#;

pub const MINIMAL_MD: &str = r#"# {{ name }}

{{ description }}

```yaml
{{ usage }}
```
{% if inputs | length > 0 %}
Inputs:
{% for input in inputs -%}
- `{{ input.name }}`{% if input.required %} (required){% endif %}: {{ input.description }}
{% endfor -%}
{% endif %}
{%- if outputs | length > 0 %}
Outputs:
{% for output in outputs -%}
- `{{ output.name }}`: {{ output.description }}
{% endfor -%}
{% endif %}"#;

pub const PROFESSIONAL_MD: &str = r#"<div align="center">

# {{ name }}

{{ description }}
{% if version %}
**Version:** `{{ version }}`{% if author %} | **Author:** {{ author }}{% endif %}
{% endif %}
</div>

## Table of Contents

- [Overview](#overview)
- [Usage](#usage)
{% if inputs | length > 0 %}- [Inputs](#inputs)
{% endif %}{% if outputs | length > 0 %}- [Outputs](#outputs)
{% endif %}{% if dependencies | length > 0 %}- [Dependencies](#dependencies)
{% endif %}
## Overview

{{ description }}

This action runs on `{{ runs_using }}`.
{% if runs_on | length > 0 %}
Tested runners: {% for runner in runs_on %}`{{ runner }}`{% if not loop.last %}, {% endif %}{% endfor %}
{% endif %}
## Usage

```yaml
{{ usage }}
```
{% if permissions | length > 0 %}
### Required permissions

| Scope | Access |
|-------|--------|
{% for scope, level in permissions -%}
| `{{ scope }}` | {{ level }} |
{% endfor -%}
{% endif %}
{%- if inputs | length > 0 %}
## Inputs

| Name | Description | Required | Default |
|------|-------------|:--------:|---------|
{% for input in inputs -%}
| `{{ input.name }}` | {{ input.description | md_cell }}{% if input.deprecation_message %}<br>*Deprecated: {{ input.deprecation_message | md_cell }}*{% endif %} | {% if input.required %}**Yes**{% else %}No{% endif %} | {% if input.default %}`{{ input.default | md_cell }}`{% else %}-{% endif %} |
{% endfor -%}
{% endif %}
{%- if outputs | length > 0 %}
## Outputs

| Name | Description |
|------|-------------|
{% for output in outputs -%}
| `{{ output.name }}` | {{ output.description | md_cell }} |
{% endfor -%}
{% endif %}
{%- if dependencies | length > 0 %}
## Dependencies

| Action | Version | Pinning | Step |
|--------|---------|---------|------|
{% for dep in dependencies -%}
| `{{ dep.name }}` | `{{ dep.version }}` | {{ dep.kind }} | {{ dep.step | default(value="-") }} |
{% endfor -%}
{% endif %}
{%- if security_notes | length > 0 %}
## Security

{% for note in security_notes -%}
- {{ note }}
{% endfor -%}
{% endif %}
---
{% if generated_at %}
*Documentation generated by gh-action-readme on {{ generated_at }}.*
{% endif %}"#;

pub const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{ name }}</title>
<style>
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; color: #24292f; }
table { border-collapse: collapse; width: 100%; margin-bottom: 1.5rem; }
th, td { border: 1px solid #d0d7de; padding: 6px 12px; text-align: left; }
th { background: #f6f8fa; }
pre { background: #f6f8fa; padding: 1rem; overflow-x: auto; }
.required { color: #cf222e; font-weight: 600; }
</style>
</head>
<body>
<h1>{{ name }}</h1>
<p>{{ description }}</p>
<h2>Usage</h2>
<pre><code>{{ usage }}</code></pre>
{% if inputs | length > 0 %}
<h2>Inputs</h2>
<table>
<tr><th>Name</th><th>Description</th><th>Required</th><th>Default</th></tr>
{% for input in inputs %}<tr><td><code>{{ input.name }}</code></td><td>{{ input.description }}</td><td>{% if input.required %}<span class="required">yes</span>{% else %}no{% endif %}</td><td>{% if input.default %}<code>{{ input.default }}</code>{% endif %}</td></tr>
{% endfor %}</table>
{% endif %}
{% if outputs | length > 0 %}
<h2>Outputs</h2>
<table>
<tr><th>Name</th><th>Description</th></tr>
{% for output in outputs %}<tr><td><code>{{ output.name }}</code></td><td>{{ output.description }}</td></tr>
{% endfor %}</table>
{% endif %}
{% if dependencies | length > 0 %}
<h2>Dependencies</h2>
<ul>
{% for dep in dependencies %}<li><code>{{ dep.uses }}</code> ({{ dep.kind }})</li>
{% endfor %}</ul>
{% endif %}
{% if security_notes | length > 0 %}
<h2>Security</h2>
<ul>
{% for note in security_notes %}<li>{{ note }}</li>
{% endfor %}</ul>
{% endif %}
{% if generated_at %}<footer><small>Generated by gh-action-readme on {{ generated_at }}</small></footer>{% endif %}
</body>
</html>
"#;

pub const PAGE_ADOC: &str = r#"= {{ name }}
{% if author %}{{ author }}
{% endif %}
{{ description }}

== Usage

[source,yaml]
----
{{ usage }}
----
{% if inputs | length > 0 %}
== Inputs

[cols="1,3,1,1",options="header"]
|===
|Name |Description |Required |Default
{% for input in inputs %}
|`{{ input.name }}`
|{{ input.description | replace(from="|", to="\|") }}
|{{ input.required }}
|{{ input.default | replace(from="|", to="\|") }}
{% endfor %}
|===
{% endif %}
{%- if outputs | length > 0 %}
== Outputs

[cols="1,3",options="header"]
|===
|Name |Description
{% for output in outputs %}
|`{{ output.name }}`
|{{ output.description | replace(from="|", to="\|") }}
{% endfor %}
|===
{% endif %}
{%- if security_notes | length > 0 %}
== Security

{% for note in security_notes -%}
* {{ note }}
{% endfor -%}
{% endif %}"#;
