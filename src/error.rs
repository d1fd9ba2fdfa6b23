//! Typed error variants for semtag's fatal conditions.

use thiserror::Error;

/// Main error type for semtag operations.
#[derive(Error, Debug)]
pub enum SemtagError {
    // Configuration errors
    #[error("Missing required input: {0}")]
    MissingInput(String),

    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Resolution errors
    #[error("Nothing to bump: no conventional commits found and no default bump configured")]
    NothingToBump,

    #[error("Unrecognized bump type: {0}")]
    InvalidBump(String),

    // Version arithmetic errors
    #[error("Invalid version format: {0}")]
    InvalidVersion(#[from] semver::Error),

    // Changelog errors
    #[error("Template rendering failed: {0}")]
    TemplateError(#[from] tera::Error),

    // Remote errors
    #[error("GitHub API request failed: {0}")]
    ApiError(#[from] octocrab::Error),

    #[error("Forge operation failed: {0}")]
    ForgeError(String),

    // Pattern errors
    #[error("Invalid release branch pattern: {0}")]
    PatternError(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
