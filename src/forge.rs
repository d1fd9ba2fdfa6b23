//! Remote tag-publishing gateway.
//!
//! Narrow interface over the repository host's API: creating tag objects and
//! references. Invoked only on the success path, after every local gating
//! check has passed.

/// Connection configuration for the remote repository.
pub mod config;

/// GitHub API client implementation.
pub mod github;

/// Request and response types for tag publication.
pub mod request;

/// Gateway trait for tag publication.
pub mod traits;
