//! Release-notes generation.
//!
//! Builds a serializable release context from the commit set and renders it
//! through a Tera template. The template is swappable; the default body
//! groups entries by conventional-commit kind and links the release to the
//! repository's compare view.

use chrono::Utc;
use serde::Serialize;
use tera::{Context, Tera};

use crate::repo::Commit;
use crate::result::Result;
use crate::version::BASELINE_VERSION;

/// Default changelog body template.
pub const DEFAULT_BODY: &str = r#"# [{{ version }}]({{ link }}) - {{ timestamp | date(format="%Y-%m-%d") }}
{% for group, commits in commits | group_by(attribute="group") %}
### {{ group }}
{% for commit in commits %}
{% if commit.breaking -%}
- {% if commit.scope %}_({{ commit.scope }})_ {% endif %}[**breaking**] {{ commit.title }}
{% else -%}
- {% if commit.scope %}_({{ commit.scope }})_ {% endif %}{{ commit.title }}
{% endif -%}
{% endfor %}
{% endfor %}
"#;

/// Changelog generator configuration.
#[derive(Debug, Clone)]
pub struct ChangelogConfig {
    /// Tera template string for the changelog body.
    pub body: String,
    /// Repository URL used for release and compare links.
    pub repo_url: String,
}

/// A single rendered changelog entry.
#[derive(Debug, Serialize)]
struct Entry {
    group: String,
    title: String,
    scope: Option<String>,
    breaking: bool,
}

/// Template context for one release.
#[derive(Debug, Serialize)]
struct ReleaseContext {
    version: String,
    previous_tag: String,
    link: String,
    timestamp: i64,
    commits: Vec<Entry>,
}

/// Renders release notes for a computed version.
pub struct Changelog {
    config: ChangelogConfig,
}

impl Changelog {
    pub fn new(config: ChangelogConfig) -> Self {
        Self { config }
    }

    /// Render notes for the span from `previous_tag` to `new_tag`. Invoked
    /// on every path that computes a version, including pre-release runs
    /// whose tag is never pushed.
    pub fn render(
        &self,
        previous_tag: &str,
        new_tag: &str,
        commits: &[Commit],
    ) -> Result<String> {
        let link = if previous_tag == BASELINE_VERSION {
            format!("{}/releases/tag/{}", self.config.repo_url, new_tag)
        } else {
            format!(
                "{}/compare/{}...{}",
                self.config.repo_url, previous_tag, new_tag
            )
        };

        let context = ReleaseContext {
            version: new_tag.to_string(),
            previous_tag: previous_tag.to_string(),
            link,
            timestamp: Utc::now().timestamp(),
            commits: commits.iter().map(entry_for).collect(),
        };

        let context = Context::from_serialize(&context)?;
        let notes = Tera::one_off(&self.config.body, &context, false)?;

        Ok(strip_extra_lines(&notes))
    }
}

/// Map a commit into its changelog entry. Non-conventional commits land in
/// the Miscellaneous group with their first line as the title.
fn entry_for(commit: &Commit) -> Entry {
    match git_conventional::Commit::parse(&commit.message) {
        Ok(parsed) => Entry {
            group: group_for(parsed.type_().as_str()).to_string(),
            title: parsed.description().to_string(),
            scope: parsed.scope().map(|s| s.as_str().to_string()),
            breaking: parsed.breaking(),
        },
        Err(_) => Entry {
            group: "Miscellaneous".to_string(),
            title: commit
                .message
                .lines()
                .next()
                .unwrap_or_default()
                .to_string(),
            scope: None,
            breaking: false,
        },
    }
}

fn group_for(commit_type: &str) -> &'static str {
    match commit_type {
        "feat" => "Features",
        "fix" => "Bug Fixes",
        "perf" => "Performance",
        "docs" => "Documentation",
        "revert" => "Reverts",
        _ => "Miscellaneous",
    }
}

/// Collapse runs of blank lines left behind by template conditionals.
fn strip_extra_lines(notes: &str) -> String {
    let mut out = String::with_capacity(notes.len());
    let mut blank_run = 0usize;

    for line in notes.trim().lines() {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out.trim_end().to_string()
}
