//! GitHub REST client, username validation, and the data gatherer.

mod client;
mod gather;

pub use client::{GithubClient, GithubConfig};
pub use gather::{GatherLimits, gather_quick, gather_user_data};

use crate::{Result, RoastError};

/// Maximum length of a GitHub username.
pub const MAX_USERNAME_LEN: usize = 39;

/// Validate a GitHub username before any upstream call sees it.
///
/// GitHub's rule: 1–39 characters, alphanumeric or hyphen, must start
/// and end with an alphanumeric character.
pub fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() || username.len() > MAX_USERNAME_LEN {
        return Err(RoastError::InvalidUsername(format!(
            "must be 1-{MAX_USERNAME_LEN} characters"
        )));
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(RoastError::InvalidUsername(
            "only alphanumeric characters and hyphens are allowed".into(),
        ));
    }
    if username.starts_with('-') || username.ends_with('-') {
        return Err(RoastError::InvalidUsername(
            "may not start or end with a hyphen".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_usernames() {
        for name in ["octocat", "a", "torvalds", "rust-lang", "x0", "A1-B2-C3"] {
            assert!(validate_username(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_empty_and_overlong() {
        assert!(validate_username("").is_err());
        let long = "a".repeat(MAX_USERNAME_LEN + 1);
        assert!(validate_username(&long).is_err());
        let max = "a".repeat(MAX_USERNAME_LEN);
        assert!(validate_username(&max).is_ok());
    }

    #[test]
    fn rejects_bad_charset() {
        for name in ["octo cat", "octo_cat", "octo.cat", "octo/cat", "日本語"] {
            assert!(validate_username(name).is_err(), "{name} should be invalid");
        }
    }

    #[test]
    fn rejects_edge_hyphens() {
        assert!(validate_username("-octocat").is_err());
        assert!(validate_username("octocat-").is_err());
        assert!(validate_username("octo-cat").is_ok());
    }
}
