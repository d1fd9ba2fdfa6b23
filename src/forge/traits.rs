//! Gateway trait for remote tag publication.

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::forge::request::{CreateRefRequest, CreateTagObjectRequest};
use crate::result::Result;

/// Remote operations needed to publish a tag. Implementations perform no
/// retries; failures propagate to the top-level failure handler.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forge {
    /// Create an annotated tag object and return its sha.
    async fn create_tag_object(
        &self,
        req: CreateTagObjectRequest,
    ) -> Result<String>;

    /// Create `refs/tags/{tag}` pointing at the requested sha.
    async fn create_ref(&self, req: CreateRefRequest) -> Result<()>;
}
