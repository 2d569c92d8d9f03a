//! Field-level merge rules for configuration fragments
//!
//! - scalars: `src` wins only when it is set (non-empty / `true`)
//! - `github_token`: copied only when the merge allows tokens
//! - maps: key-wise union, `src` wins per key
//! - lists: replaced wholesale when `src` is non-empty
//! - `repo_overrides`: never merged here, see [`merge_repo_overrides`]

use super::Config;

/// Merge `src` into `dst`.
pub fn merge_configs(dst: &mut Config, src: &Config, allow_tokens: bool) {
    merge_string(&mut dst.organization, &src.organization);
    merge_string(&mut dst.repository, &src.repository);
    merge_string(&mut dst.version, &src.version);

    merge_string(&mut dst.theme, &src.theme);
    merge_string(&mut dst.output_format, &src.output_format);
    merge_string(&mut dst.output_dir, &src.output_dir);
    merge_string(&mut dst.template, &src.template);
    merge_string(&mut dst.header, &src.header);
    merge_string(&mut dst.footer, &src.footer);
    merge_string(&mut dst.schema, &src.schema);

    merge_flag(&mut dst.verbose, src.verbose);
    merge_flag(&mut dst.quiet, src.quiet);
    merge_flag(&mut dst.analyze_dependencies, src.analyze_dependencies);
    merge_flag(&mut dst.show_security_info, src.show_security_info);

    if allow_tokens {
        merge_string(&mut dst.github_token, &src.github_token);
    }

    for (key, value) in &src.permissions {
        dst.permissions.insert(key.clone(), value.clone());
    }
    for (key, value) in &src.variables {
        dst.variables.insert(key.clone(), value.clone());
    }

    if !src.runs_on.is_empty() {
        dst.runs_on = src.runs_on.clone();
    }
}

/// Merge the `repo_overrides` table of a global fragment into `dst`.
///
/// Only the global source may call this. A fragment's own nested
/// `repo_overrides` are dropped.
pub fn merge_repo_overrides(dst: &mut Config, src: &Config) {
    for (repo, fragment) in &src.repo_overrides {
        let mut fragment = fragment.clone();
        fragment.repo_overrides.clear();
        dst.repo_overrides.insert(repo.clone(), fragment);
    }
}

fn merge_string(dst: &mut String, src: &str) {
    if !src.is_empty() {
        *dst = src.to_string();
    }
}

fn merge_flag(dst: &mut bool, src: bool) {
    if src {
        *dst = true;
    }
}
