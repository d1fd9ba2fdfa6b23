//! Common test utilities for orchestrator tests.

use crate::action::{Inputs, WorkflowEnv};

pub use crate::action::Outputs;
use crate::forge::traits::MockForge;
use crate::orchestrator::Orchestrator;
use crate::repo::{COMMIT_DELIMITER, MockVcs};

/// Head commit for every test run.
pub const HEAD_SHA: &str = "abc1234def5678900aa";
/// Sha the previous tag points at when the head has new commits.
pub const OLD_TAG_SHA: &str = "1111111aaaaaaa22222";

pub fn test_inputs() -> Inputs {
    Inputs {
        default_bump: None,
        preset: "conventional".into(),
        tag_prefix: "v".into(),
        release_branches: "master,main".into(),
        create_annotated_tag: false,
        dry_run: false,
        github_token: "test-token".into(),
    }
}

pub fn test_env() -> WorkflowEnv {
    WorkflowEnv {
        git_ref: "refs/heads/main".into(),
        sha: HEAD_SHA.into(),
        owner: "acme".into(),
        repo: "widgets".into(),
    }
}

pub fn create_orchestrator(
    inputs: Inputs,
    env: WorkflowEnv,
    vcs: MockVcs,
    forge: MockForge,
) -> Orchestrator {
    Orchestrator::new(inputs, env, Box::new(vcs), Box::new(forge)).unwrap()
}

/// Join commit messages into raw log text the way git emits it.
pub fn log_of(messages: &[&str]) -> String {
    let mut raw = String::new();
    for message in messages {
        raw.push_str(message);
        raw.push_str(COMMIT_DELIMITER);
    }
    raw
}

/// Mock checkout with a previous tag and the given commits since it.
pub fn vcs_with_history(previous_tag: &str, messages: &[&str]) -> MockVcs {
    let mut vcs = MockVcs::new();
    vcs.expect_ensure_full_history().returning(|| Ok(()));
    vcs.expect_fetch_tags().returning(|| Ok(()));
    vcs.expect_has_tags().returning(|| true);

    let tag = previous_tag.to_string();
    vcs.expect_latest_tag().returning(move |_| Some(tag.clone()));
    vcs.expect_tag_sha()
        .returning(|_| Some(OLD_TAG_SHA.to_string()));

    let log = log_of(messages);
    vcs.expect_log_text().returning(move |_| log.clone());

    vcs
}

/// Mock checkout with no tags at all.
pub fn vcs_without_tags(messages: &[&str]) -> MockVcs {
    let mut vcs = MockVcs::new();
    vcs.expect_ensure_full_history().returning(|| Ok(()));
    vcs.expect_fetch_tags().returning(|| Ok(()));
    vcs.expect_has_tags().returning(|| false);

    let log = log_of(messages);
    vcs.expect_log_text()
        .withf(|range| range.is_none())
        .returning(move |_| log.clone());

    vcs
}
