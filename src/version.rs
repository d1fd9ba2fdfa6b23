//! Semantic-version arithmetic for tag computation.
//!
//! Increment rules follow node-semver with an empty pre-release identifier:
//! stable bumps clear any pre-release suffix (only advancing the number when
//! the base was already stable at that level), `pre*` bumps start or advance
//! a numeric pre-release component.

use semver::{BuildMetadata, Prerelease, Version};

use crate::analyzer::Bump;
use crate::error::SemtagError;
use crate::result::Result;

/// Sentinel baseline used when no prior tag exists.
pub const BASELINE_VERSION: &str = "0.0.0";

/// Parse the previous tag (prefix stripped) and apply `bump`. A malformed
/// base version is fatal.
pub fn next_version(
    previous_tag: &str,
    prefix: &str,
    bump: Bump,
) -> Result<Version> {
    let base = previous_tag
        .strip_prefix(prefix)
        .unwrap_or(previous_tag);
    let base = Version::parse(base).map_err(SemtagError::InvalidVersion)?;
    Ok(increment(&base, bump))
}

/// Apply a bump to a parsed version.
pub fn increment(base: &Version, bump: Bump) -> Version {
    let mut next = base.clone();
    next.build = BuildMetadata::EMPTY;

    match bump {
        Bump::Major => {
            if next.pre.is_empty() || next.minor != 0 || next.patch != 0 {
                next.major += 1;
            }
            next.minor = 0;
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        Bump::Minor => {
            if next.pre.is_empty() || next.patch != 0 {
                next.minor += 1;
            }
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        Bump::Patch => {
            if next.pre.is_empty() {
                next.patch += 1;
            }
            next.pre = Prerelease::EMPTY;
        }
        Bump::Premajor => {
            next.major += 1;
            next.minor = 0;
            next.patch = 0;
            next.pre = Prerelease::new("0").unwrap();
        }
        Bump::Preminor => {
            next.minor += 1;
            next.patch = 0;
            next.pre = Prerelease::new("0").unwrap();
        }
        Bump::Prepatch => {
            next.patch += 1;
            next.pre = Prerelease::new("0").unwrap();
        }
        Bump::Prerelease => {
            if next.pre.is_empty() {
                next.patch += 1;
                next.pre = Prerelease::new("0").unwrap();
            } else {
                next.pre = advance_prerelease(next.pre.as_str());
            }
        }
    }

    next
}

/// Increment the trailing numeric pre-release component, or append `.0` when
/// the suffix has no numeric tail.
fn advance_prerelease(pre: &str) -> Prerelease {
    let mut parts: Vec<String> =
        pre.split('.').map(str::to_string).collect();

    match parts.last().and_then(|p| p.parse::<u64>().ok()) {
        Some(n) => {
            let last = parts.len() - 1;
            parts[last] = (n + 1).to_string();
        }
        None => parts.push("0".to_string()),
    }

    // components came from a valid prerelease, so rejoining cannot fail
    Prerelease::new(&parts.join(".")).unwrap()
}

/// Render the pre-release variant of a computed version: the version string
/// with the first 7 characters of the head sha appended after a hyphen.
pub fn prerelease_variant(version: &Version, sha: &str) -> String {
    let short = &sha[..sha.len().min(7)];
    format!("{version}-{short}")
}

/// Full tag name: configured prefix plus the version string.
pub fn tag_name(prefix: &str, version: &str) -> String {
    format!("{prefix}{version}")
}
