//! GitHub Actions environment adapter.
//!
//! All reads of action inputs and workflow environment variables, and all
//! writes of step outputs, go through this module. Orchestration logic never
//! touches the ambient environment directly.
//!
//! Inputs follow the Actions convention of `INPUT_<NAME>` environment
//! variables. A blank value is treated the same as an unset one: the runner
//! exports blank `INPUT_*` variables for inputs omitted from the workflow, so
//! the two cases are indistinguishable to the action anyway.

use color_eyre::eyre::Context;
use log::*;
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::{error::SemtagError, result::Result};

/// Default tag prefix when the `tag_prefix` input is blank.
pub const DEFAULT_TAG_PREFIX: &str = "v";
/// Default release branch patterns when `release_branches` is blank.
pub const DEFAULT_RELEASE_BRANCHES: &str = "master,main";
/// Default commit-message grammar preset.
pub const DEFAULT_PRESET: &str = "conventional";

/// Heredoc delimiter for multiline values in the `GITHUB_OUTPUT` file.
const OUTPUT_DELIMITER: &str = "__SEMTAG_OUTPUT__";

/// Read an action input from the environment. Blank means absent.
pub fn lookup_input(name: &str) -> Option<String> {
    let key = format!("INPUT_{}", name.to_ascii_uppercase());
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Action inputs with defaults applied.
#[derive(Debug, Clone)]
pub struct Inputs {
    /// Fallback bump when no commit implies one. `None` disables the
    /// fallback (input blank or the literal string "false").
    pub default_bump: Option<String>,
    /// Commit-message grammar preset for the classifier.
    pub preset: String,
    /// Prefix prepended to version numbers to form tag names.
    pub tag_prefix: String,
    /// Comma-separated regex patterns naming release branches.
    pub release_branches: String,
    /// Create an annotated tag object instead of a lightweight ref.
    pub create_annotated_tag: bool,
    /// Compute everything but never publish a tag.
    pub dry_run: bool,
    /// Token for the GitHub API.
    pub github_token: String,
}

impl Inputs {
    /// Resolve inputs through the provided lookup. Only `github_token` is
    /// required; everything else falls back to a default.
    pub fn resolve<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_bump =
            get("default_bump").filter(|v| !v.eq_ignore_ascii_case("false"));

        let github_token = get("github_token")
            .ok_or_else(|| SemtagError::MissingInput("github_token".into()))?;

        Ok(Self {
            default_bump,
            preset: get("message_parser_preset")
                .unwrap_or_else(|| DEFAULT_PRESET.into()),
            tag_prefix: get("tag_prefix")
                .unwrap_or_else(|| DEFAULT_TAG_PREFIX.into()),
            release_branches: get("release_branches")
                .unwrap_or_else(|| DEFAULT_RELEASE_BRANCHES.into()),
            create_annotated_tag: get("create_annotated_tag")
                .is_some_and(|v| v.eq_ignore_ascii_case("true")),
            dry_run: get("dry_run")
                .is_some_and(|v| v.eq_ignore_ascii_case("true")),
            github_token,
        })
    }

    /// Resolve inputs from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::resolve(lookup_input)
    }
}

/// Required workflow environment for the current head.
#[derive(Debug, Clone)]
pub struct WorkflowEnv {
    /// Full ref path, e.g. `refs/heads/main`.
    pub git_ref: String,
    /// Commit sha of the current head.
    pub sha: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
}

impl WorkflowEnv {
    /// Resolve required variables through the provided lookup. Any missing
    /// variable is a fatal configuration error.
    pub fn resolve<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| {
            get(name).ok_or_else(|| SemtagError::MissingEnv(name.into()))
        };

        let git_ref = require("GITHUB_REF")?;
        let sha = require("GITHUB_SHA")?;
        let repository = require("GITHUB_REPOSITORY")?;

        let (owner, repo) =
            repository.split_once('/').ok_or_else(|| {
                SemtagError::InvalidConfig(format!(
                    "GITHUB_REPOSITORY must be owner/repo, got: {repository}"
                ))
            })?;

        Ok(Self {
            git_ref,
            sha,
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::resolve(|name| {
            env::var(name).ok().filter(|v| !v.is_empty())
        })
    }

    /// Branch name with any leading `refs/heads/` stripped.
    pub fn branch(&self) -> &str {
        self.git_ref
            .strip_prefix("refs/heads/")
            .unwrap_or(&self.git_ref)
    }

    /// Repository URL used for changelog links.
    pub fn repo_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repo)
    }
}

/// Named step outputs, recorded incrementally and flushed once at exit.
#[derive(Debug, Default)]
pub struct Outputs {
    entries: Vec<(String, String)>,
}

impl Outputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an output value. Setting the same key again replaces the
    /// earlier value.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        info!("output {key}={value}");
        if let Some(entry) =
            self.entries.iter_mut().find(|(k, _)| k == key)
        {
            entry.1 = value;
        } else {
            self.entries.push((key.to_string(), value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Append all recorded outputs to the file at `path` in the
    /// `GITHUB_OUTPUT` format. Multiline values use the heredoc form.
    pub fn flush_to(&self, path: &Path) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .wrap_err("failed to open output file")?;

        for (key, value) in &self.entries {
            if value.contains('\n') {
                writeln!(
                    file,
                    "{key}<<{OUTPUT_DELIMITER}\n{value}\n{OUTPUT_DELIMITER}"
                )?;
            } else {
                writeln!(file, "{key}={value}")?;
            }
        }

        Ok(())
    }

    /// Flush to the file named by `GITHUB_OUTPUT`, if set. Outside of a
    /// workflow run the outputs only appear in the log.
    pub fn flush(&self) -> Result<()> {
        if let Some(path) = env::var_os("GITHUB_OUTPUT") {
            self.flush_to(Path::new(&path))?;
        } else {
            debug!("GITHUB_OUTPUT not set: skipping output file");
        }
        Ok(())
    }
}
