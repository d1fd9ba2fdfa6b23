//! Commit classification: maps conventional commit messages to the version
//! bump they require.
//!
//! Message parsing is delegated to the `git-conventional` crate; this module
//! only owns the grammar preset selection and the highest-severity fold
//! across the commit set.

use std::fmt;
use std::str::FromStr;

use crate::error::SemtagError;
use crate::repo::Commit;
use crate::result::Result;

/// Version-bump magnitude, in increasing order of severity for the release
/// kinds. The `pre*` variants are only reachable through the configured
/// default bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bump {
    Major,
    Minor,
    Patch,
    Premajor,
    Preminor,
    Prepatch,
    Prerelease,
}

impl FromStr for Bump {
    type Err = SemtagError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "major" => Ok(Bump::Major),
            "minor" => Ok(Bump::Minor),
            "patch" => Ok(Bump::Patch),
            "premajor" => Ok(Bump::Premajor),
            "preminor" => Ok(Bump::Preminor),
            "prepatch" => Ok(Bump::Prepatch),
            "prerelease" => Ok(Bump::Prerelease),
            other => Err(SemtagError::InvalidBump(other.to_string())),
        }
    }
}

impl fmt::Display for Bump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Bump::Major => "major",
            Bump::Minor => "minor",
            Bump::Patch => "patch",
            Bump::Premajor => "premajor",
            Bump::Preminor => "preminor",
            Bump::Prepatch => "prepatch",
            Bump::Prerelease => "prerelease",
        };
        write!(f, "{name}")
    }
}

/// Commit-message grammar preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Conventional commits: `feat` is minor, `fix` is patch, breaking
    /// changes are major.
    Conventional,
    /// Angular convention: additionally counts `perf` and `revert` as patch.
    Angular,
}

impl Preset {
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "conventional" | "conventionalcommits" => Ok(Preset::Conventional),
            "angular" => Ok(Preset::Angular),
            other => Err(SemtagError::InvalidConfig(format!(
                "unknown message parser preset: {other}"
            ))
            .into()),
        }
    }
}

/// Internal severity lattice for the fold. Higher wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Severity {
    Patch,
    Minor,
    Major,
}

impl From<Severity> for Bump {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Major => Bump::Major,
            Severity::Minor => Bump::Minor,
            Severity::Patch => Bump::Patch,
        }
    }
}

/// Classifies commit sets into a required version bump.
pub struct Analyzer {
    preset: Preset,
}

impl Analyzer {
    pub fn new(preset: Preset) -> Self {
        Self { preset }
    }

    /// Scan all commits and return the highest-severity bump any of them
    /// implies, or `None` when no commit carries a conventional marker.
    pub fn classify(&self, commits: &[Commit]) -> Option<Bump> {
        commits
            .iter()
            .filter_map(|commit| self.severity_of(&commit.message))
            .max()
            .map(Bump::from)
    }

    fn severity_of(&self, message: &str) -> Option<Severity> {
        let parsed = git_conventional::Commit::parse(message).ok()?;

        if parsed.breaking() {
            return Some(Severity::Major);
        }

        if parsed.type_() == git_conventional::Type::FEAT {
            return Some(Severity::Minor);
        }

        let patch_types: &[&str] = match self.preset {
            Preset::Conventional => &["fix"],
            Preset::Angular => &["fix", "perf", "revert"],
        };

        if patch_types.contains(&parsed.type_().as_str()) {
            Some(Severity::Patch)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commits(messages: &[&str]) -> Vec<Commit> {
        messages
            .iter()
            .map(|m| Commit {
                message: m.to_string(),
            })
            .collect()
    }

    #[test]
    fn feat_implies_minor() {
        let analyzer = Analyzer::new(Preset::Conventional);
        let bump =
            analyzer.classify(&commits(&["feat: add login button"]));
        assert_eq!(bump, Some(Bump::Minor));
    }

    #[test]
    fn fix_implies_patch() {
        let analyzer = Analyzer::new(Preset::Conventional);
        let bump = analyzer.classify(&commits(&["fix: stop the bleeding"]));
        assert_eq!(bump, Some(Bump::Patch));
    }

    #[test]
    fn bang_marker_implies_major() {
        let analyzer = Analyzer::new(Preset::Conventional);
        let bump =
            analyzer.classify(&commits(&["feat!: drop legacy endpoint"]));
        assert_eq!(bump, Some(Bump::Major));
    }

    #[test]
    fn breaking_change_footer_implies_major() {
        let analyzer = Analyzer::new(Preset::Conventional);
        let message = "fix: rework auth\n\nBREAKING CHANGE: tokens rotate";
        let bump = analyzer.classify(&commits(&[message]));
        assert_eq!(bump, Some(Bump::Major));
    }

    #[test]
    fn highest_severity_wins() {
        let analyzer = Analyzer::new(Preset::Conventional);
        let bump = analyzer.classify(&commits(&[
            "fix: small thing",
            "feat: bigger thing",
            "chore: noise",
        ]));
        assert_eq!(bump, Some(Bump::Minor));
    }

    #[test]
    fn unmarked_commits_classify_as_none() {
        let analyzer = Analyzer::new(Preset::Conventional);
        let bump = analyzer.classify(&commits(&[
            "update readme",
            "wip",
            "chore: bump deps",
        ]));
        assert_eq!(bump, None);
    }

    #[test]
    fn angular_counts_perf_as_patch() {
        let conventional = Analyzer::new(Preset::Conventional);
        let angular = Analyzer::new(Preset::Angular);
        let set = commits(&["perf: faster hashing"]);

        assert_eq!(conventional.classify(&set), None);
        assert_eq!(angular.classify(&set), Some(Bump::Patch));
    }

    #[test]
    fn bump_parses_from_string() {
        assert_eq!("minor".parse::<Bump>().unwrap(), Bump::Minor);
        assert_eq!("PATCH".parse::<Bump>().unwrap(), Bump::Patch);
        assert!("gigantic".parse::<Bump>().is_err());
    }

    #[test]
    fn preset_defaults_reject_unknown_names() {
        assert!(Preset::from_name("conventional").is_ok());
        assert!(Preset::from_name("angular").is_ok());
        assert!(Preset::from_name("haiku").is_err());
    }
}
