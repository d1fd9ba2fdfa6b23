//! Version resolution and orchestration.
//!
//! Drives the run end to end: classify the branch, discover the previous
//! tag, extract commits, resolve the bump, compute the next version and tag,
//! render the changelog, and publish the tag unless a gate stops the run
//! first. All external effects go through the [`Vcs`] and [`Forge`]
//! gateways; outputs accumulate in the caller-owned [`Outputs`] so values
//! recorded before a failure still reach the output file at process exit.

use log::*;
use regex::Regex;
use std::str::FromStr;

use crate::action::{Inputs, Outputs, WorkflowEnv};
use crate::analyzer::{Analyzer, Bump, Preset};
use crate::changelog::{Changelog, ChangelogConfig, DEFAULT_BODY};
use crate::error::SemtagError;
use crate::forge::request::{CreateRefRequest, CreateTagObjectRequest};
use crate::forge::traits::Forge;
use crate::repo::{Vcs, parse_commits};
use crate::result::Result;
use crate::version::{
    BASELINE_VERSION, next_version, prerelease_variant, tag_name,
};

pub struct Orchestrator {
    inputs: Inputs,
    env: WorkflowEnv,
    vcs: Box<dyn Vcs + Send + Sync>,
    forge: Box<dyn Forge + Send + Sync>,
    analyzer: Analyzer,
    changelog: Changelog,
}

impl Orchestrator {
    pub fn new(
        inputs: Inputs,
        env: WorkflowEnv,
        vcs: Box<dyn Vcs + Send + Sync>,
        forge: Box<dyn Forge + Send + Sync>,
    ) -> Result<Self> {
        let preset = Preset::from_name(&inputs.preset)?;
        let changelog = Changelog::new(ChangelogConfig {
            body: DEFAULT_BODY.into(),
            repo_url: env.repo_url(),
        });

        Ok(Self {
            inputs,
            env,
            vcs,
            forge,
            analyzer: Analyzer::new(preset),
            changelog,
        })
    }

    /// Execute the full decision procedure, recording outputs as each stage
    /// is reached. Values already recorded survive a later fatal error; the
    /// caller flushes them at process exit either way.
    pub async fn run(&self, outputs: &mut Outputs) -> Result<()> {
        let branch = self.env.branch();
        let prerelease =
            !is_release_branch(&self.inputs.release_branches, branch)?;

        if prerelease {
            info!("{branch} matches no release branch: pre-release run");
        }

        self.vcs.ensure_full_history().await?;
        self.vcs.fetch_tags().await?;

        let previous_tag = if self.vcs.has_tags().await {
            self.vcs.latest_tag(&self.inputs.tag_prefix).await
        } else {
            None
        };

        let (previous_tag, log_range) = match previous_tag {
            Some(tag) => {
                let range = format!("{tag}..HEAD");
                (tag, Some(range))
            }
            None => {
                debug!("no matching tags found: starting from {BASELINE_VERSION}");
                (BASELINE_VERSION.to_string(), None)
            }
        };

        outputs.set("previous_tag", previous_tag.as_str());

        // Idempotence guard: re-running on an already-tagged head is a no-op.
        if log_range.is_some()
            && self.vcs.tag_sha(&previous_tag).await.as_deref()
                == Some(self.env.sha.as_str())
        {
            info!(
                "no new commits since {previous_tag}: nothing to do"
            );
            return Ok(());
        }

        let log = self.vcs.log_text(log_range).await;
        let commits = parse_commits(&log);
        debug!("extracted {} commits since {previous_tag}", commits.len());

        let bump = match self.analyzer.classify(&commits) {
            Some(bump) => bump,
            None => match &self.inputs.default_bump {
                Some(default) => {
                    let bump = Bump::from_str(default)?;
                    info!("no conventional commits: using default bump {bump}");
                    bump
                }
                None => return Err(SemtagError::NothingToBump.into()),
            },
        };

        let version =
            next_version(&previous_tag, &self.inputs.tag_prefix, bump)?;

        let new_version = if prerelease {
            prerelease_variant(&version, &self.env.sha)
        } else {
            version.to_string()
        };
        let new_tag = tag_name(&self.inputs.tag_prefix, &new_version);

        info!("bump {bump}: {previous_tag} -> {new_tag}");
        outputs.set("new_version", new_version.as_str());
        outputs.set("new_tag", new_tag.as_str());

        let notes =
            self.changelog.render(&previous_tag, &new_tag, &commits)?;
        outputs.set("changelog", notes);

        if prerelease {
            info!(
                "{branch} is not a release branch: skipping tag creation"
            );
            return Ok(());
        }

        if self.vcs.tag_exists(&new_tag).await {
            info!("tag {new_tag} already exists: skipping tag creation");
            return Ok(());
        }

        if self.inputs.dry_run {
            info!("dry run: skipping tag creation");
            outputs.set("dry_run", "true");
            return Ok(());
        }

        self.create_tag(&new_tag).await?;
        self.vcs.fetch_tags().await?;
        info!("created and pushed tag {new_tag}");

        Ok(())
    }

    async fn create_tag(&self, tag: &str) -> Result<()> {
        let target = if self.inputs.create_annotated_tag {
            self.forge
                .create_tag_object(CreateTagObjectRequest::for_commit(
                    tag,
                    &self.env.sha,
                ))
                .await?
        } else {
            self.env.sha.clone()
        };

        self.forge
            .create_ref(CreateRefRequest {
                tag: tag.to_string(),
                sha: target,
            })
            .await
    }
}

/// A branch is a release branch when any configured pattern matches it.
/// Patterns are comma separated and tested unanchored.
pub fn is_release_branch(patterns: &str, branch: &str) -> Result<bool> {
    for pattern in patterns.split(',') {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            continue;
        }

        let re = Regex::new(pattern).map_err(SemtagError::PatternError)?;
        if re.is_match(branch) {
            return Ok(true);
        }
    }

    Ok(false)
}
