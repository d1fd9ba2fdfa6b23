//! Tests for annotated versus lightweight tag publication.

use super::common::*;
use crate::forge::traits::MockForge;

#[tokio::test]
async fn annotated_mode_creates_object_then_ref() {
    let mut vcs = vcs_with_history("v1.2.3", &["feat: add export"]);
    vcs.expect_tag_exists().returning(|_| false);

    let mut forge = MockForge::new();
    forge
        .expect_create_tag_object()
        .times(1)
        .withf(|req| {
            req.tag == "v1.3.0"
                && req.message == "v1.3.0"
                && req.object == HEAD_SHA
                && req.object_type == "commit"
        })
        .returning(|_| Ok("tag-object-sha".to_string()));
    forge
        .expect_create_ref()
        .times(1)
        .withf(|req| req.tag == "v1.3.0" && req.sha == "tag-object-sha")
        .returning(|_| Ok(()));

    let mut inputs = test_inputs();
    inputs.create_annotated_tag = true;

    let orchestrator =
        create_orchestrator(inputs, test_env(), vcs, forge);

    let mut outputs = Outputs::new();
    orchestrator.run(&mut outputs).await.unwrap();
}

#[tokio::test]
async fn lightweight_mode_creates_ref_at_head() {
    let mut vcs = vcs_with_history("v1.2.3", &["fix: leak"]);
    vcs.expect_tag_exists().returning(|_| false);

    let mut forge = MockForge::new();
    forge.expect_create_tag_object().never();
    forge
        .expect_create_ref()
        .times(1)
        .withf(|req| req.sha == HEAD_SHA)
        .returning(|_| Ok(()));

    let orchestrator =
        create_orchestrator(test_inputs(), test_env(), vcs, forge);

    let mut outputs = Outputs::new();
    orchestrator.run(&mut outputs).await.unwrap();
}

#[tokio::test]
async fn forge_failure_propagates_to_the_top_level() {
    let mut vcs = vcs_with_history("v1.2.3", &["fix: leak"]);
    vcs.expect_tag_exists().returning(|_| false);

    let mut forge = MockForge::new();
    forge.expect_create_ref().returning(|_| {
        Err(crate::error::SemtagError::ForgeError(
            "reference already exists".into(),
        )
        .into())
    });

    let orchestrator =
        create_orchestrator(test_inputs(), test_env(), vcs, forge);

    let mut outputs = Outputs::new();
    let err = orchestrator.run(&mut outputs).await.unwrap_err();
    assert!(err.to_string().contains("reference already exists"));
    // everything recorded before the remote call is still available
    assert_eq!(outputs.get("previous_tag"), Some("v1.2.3"));
    assert_eq!(outputs.get("new_tag"), Some("v1.2.4"));
    assert!(outputs.get("changelog").is_some());
}
