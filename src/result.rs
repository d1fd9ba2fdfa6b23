//! Unified result type for semtag.
//!
//! All fallible functions in this crate return [`Result`], an alias for
//! `color_eyre::eyre::Result`, so errors can be wrapped with context as they
//! propagate and reported once at the top level.

use color_eyre::eyre::Result as EyreResult;

/// Standard result type used throughout semtag.
pub type Result<T> = EyreResult<T>;
