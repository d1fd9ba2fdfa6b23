//! Configuration for the remote repository connection.
use secrecy::SecretString;

/// Identity and credentials for the repository the tag is published to.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Access token for authentication. Never logged.
    pub token: SecretString,
}

impl RemoteConfig {
    pub fn new(owner: &str, repo: &str, token: &str) -> Self {
        Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            token: SecretString::from(token.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_does_not_expose_token() {
        let config = RemoteConfig::new("acme", "widgets", "hunter2");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
    }
}
