//! Request types for tag publication.

use serde::{Deserialize, Serialize};

/// Request to create an annotated tag object.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTagObjectRequest {
    /// Tag name, e.g. `v1.3.0`.
    pub tag: String,
    /// Tag message. The tag name doubles as the message.
    pub message: String,
    /// Sha of the commit the tag object points at.
    pub object: String,
    /// Target object type. Always `commit` for release tags.
    #[serde(rename = "type")]
    pub object_type: String,
}

impl CreateTagObjectRequest {
    pub fn for_commit(tag: &str, sha: &str) -> Self {
        Self {
            tag: tag.to_string(),
            message: tag.to_string(),
            object: sha.to_string(),
            object_type: "commit".to_string(),
        }
    }
}

/// Tag object returned by the host after creation.
#[derive(Debug, Clone, Deserialize)]
pub struct TagObject {
    pub sha: String,
}

/// Request to create a tag reference pointing at `sha`.
#[derive(Debug, Clone)]
pub struct CreateRefRequest {
    /// Tag name the ref is created for.
    pub tag: String,
    /// Target object: the head commit for lightweight tags, the tag object
    /// for annotated ones.
    pub sha: String,
}
