//! Implements the Forge trait for GitHub.
use async_trait::async_trait;
use log::*;
use octocrab::{Octocrab, params::repos::Reference};

use crate::forge::{
    config::RemoteConfig,
    request::{CreateRefRequest, CreateTagObjectRequest, TagObject},
    traits::Forge,
};
use crate::result::Result;

/// GitHub API client for tag publication.
pub struct Github {
    config: RemoteConfig,
    instance: Octocrab,
}

impl Github {
    /// Create a client with personal access token authentication.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let instance = Octocrab::builder()
            .personal_token(config.token.clone())
            .build()?;

        Ok(Self { config, instance })
    }
}

#[async_trait]
impl Forge for Github {
    async fn create_tag_object(
        &self,
        req: CreateTagObjectRequest,
    ) -> Result<String> {
        debug!("creating annotated tag object for {}", req.tag);

        let route = format!(
            "/repos/{}/{}/git/tags",
            self.config.owner, self.config.repo
        );

        let tag_object: TagObject =
            self.instance.post(route, Some(&req)).await?;

        Ok(tag_object.sha)
    }

    async fn create_ref(&self, req: CreateRefRequest) -> Result<()> {
        debug!("creating ref refs/tags/{} at {}", req.tag, req.sha);

        self.instance
            .repos(&self.config.owner, &self.config.repo)
            .create_ref(&Reference::Tag(req.tag), req.sha)
            .await?;

        Ok(())
    }
}
