//! Git gateway for release tagging workflows.
//!
//! Wraps the git CLI behind the [`Vcs`] trait so orchestration logic can be
//! tested against a mock. Commands are executed through the captured-result
//! runner; this gateway interprets output content rather than raising on
//! non-zero exits, so "no result" and "command produced nothing" look the
//! same to callers.

use async_trait::async_trait;
use log::*;
use serde::Serialize;

#[cfg(test)]
use mockall::automock;

use crate::command::run_captured;
use crate::result::Result;

/// Literal separator between commit records in extracted log text, chosen to
/// be unlikely to collide with real commit content.
pub const COMMIT_DELIMITER: &str = "----DELIMITER----";

/// A single commit message extracted from the log, subject and body joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    pub message: String,
}

/// Read and mutate operations against the local checkout.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Vcs {
    /// Convert a shallow checkout into a full-history one.
    async fn ensure_full_history(&self) -> Result<()>;

    /// Fetch all tags from the remote.
    async fn fetch_tags(&self) -> Result<()>;

    /// Whether any tags exist in the checkout.
    async fn has_tags(&self) -> bool;

    /// Most recent tag matching `prefix`, by topological order.
    async fn latest_tag(&self, prefix: &str) -> Option<String>;

    /// Commit sha a tag ultimately points at.
    async fn tag_sha(&self, tag: &str) -> Option<String>;

    /// Raw delimiter-separated log text for `range` (`prev..HEAD`), or the
    /// entire history when `range` is `None`.
    async fn log_text(&self, range: Option<String>) -> String;

    /// Whether a tag with this exact name already exists.
    async fn tag_exists(&self, tag: &str) -> bool;
}

/// [`Vcs`] implementation shelling out to git in the working directory.
pub struct GitRepo;

#[async_trait]
impl Vcs for GitRepo {
    async fn ensure_full_history(&self) -> Result<()> {
        let result =
            run_captured("git", &["rev-parse", "--is-shallow-repository"])
                .await;

        if result.stdout.trim() == "true" {
            info!("shallow checkout detected: fetching full history");
            run_captured("git", &["fetch", "--prune", "--unshallow"]).await;
        }

        Ok(())
    }

    async fn fetch_tags(&self) -> Result<()> {
        run_captured("git", &["fetch", "--tags"]).await;
        Ok(())
    }

    async fn has_tags(&self) -> bool {
        let result = run_captured("git", &["tag"]).await;
        !result.stdout.trim().is_empty()
    }

    async fn latest_tag(&self, prefix: &str) -> Option<String> {
        let pattern = format!("--tags={prefix}*");
        let result = run_captured(
            "git",
            &["rev-list", &pattern, "--topo-order", "--max-count=1"],
        )
        .await;

        let sha = result.stdout.trim();
        if sha.is_empty() {
            return None;
        }

        let result =
            run_captured("git", &["describe", "--tags", sha]).await;
        let tag = result.stdout.trim();

        if tag.is_empty() {
            None
        } else {
            Some(tag.to_string())
        }
    }

    async fn tag_sha(&self, tag: &str) -> Option<String> {
        let result = run_captured("git", &["rev-list", "-n", "1", tag]).await;
        let sha = result.stdout.trim();

        if sha.is_empty() {
            None
        } else {
            Some(sha.to_string())
        }
    }

    async fn log_text(&self, range: Option<String>) -> String {
        let format = format!("--pretty=format:%s%n%b{COMMIT_DELIMITER}");

        let result = match range {
            Some(range) => {
                run_captured("git", &["log", &range, &format]).await
            }
            None => run_captured("git", &["log", &format]).await,
        };

        result.stdout
    }

    async fn tag_exists(&self, tag: &str) -> bool {
        let refspec = format!("refs/tags/{tag}");
        let result =
            run_captured("git", &["rev-parse", "-q", "--verify", &refspec])
                .await;

        result.success() && !result.stdout.trim().is_empty()
    }
}

/// Split raw log text into commits: records are separated by
/// [`COMMIT_DELIMITER`], trimmed of whitespace and of leading/trailing
/// single quotes left behind by shell quoting in some CI environments.
/// Empty records are discarded.
pub fn parse_commits(raw: &str) -> Vec<Commit> {
    raw.split(COMMIT_DELIMITER)
        .map(|record| {
            record
                .trim()
                .trim_matches('\'')
                .trim()
                .to_string()
        })
        .filter(|message| !message.is_empty())
        .map(|message| Commit { message })
        .collect()
}
