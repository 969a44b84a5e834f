//! Repository URL parsing.

use reqwest::Url;

use super::RepoRef;
use crate::error::{Error, Result};

/// Message shown for any URL that does not name a repository on the host.
pub const INVALID_URL_MESSAGE: &str =
    "Please enter a valid GitHub repository URL (e.g., https://github.com/owner/repo)";

/// Parses `https://<host>/<owner>/<repo>[.git]` into a [`RepoRef`].
///
/// Extra path segments after the repository name are ignored.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for malformed URLs, non-http(s) schemes,
/// hosts other than `host`, or paths with fewer than two segments.
pub fn parse_repo_url(input: &str, host: &str) -> Result<RepoRef> {
    let invalid = || Error::InvalidInput(INVALID_URL_MESSAGE.to_string());

    let url = Url::parse(input.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    if !url.host_str().is_some_and(|h| h.eq_ignore_ascii_case(host)) {
        return Err(invalid());
    }

    let mut segments = url.path_segments().into_iter().flatten().filter(|s| !s.is_empty());
    let owner = segments.next().ok_or_else(invalid)?;
    let name = segments.next().ok_or_else(invalid)?;
    let name = name.strip_suffix(".git").unwrap_or(name);
    if name.is_empty() {
        return Err(invalid());
    }

    Ok(RepoRef::new(owner, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = "github.com";

    #[test]
    fn parses_owner_and_repo() {
        let repo = parse_repo_url("https://github.com/rust-lang/cargo", HOST).unwrap();
        assert_eq!(repo, RepoRef::new("rust-lang", "cargo"));
    }

    #[test]
    fn strips_git_suffix_and_trailing_segments() {
        assert_eq!(
            parse_repo_url("https://github.com/o/r.git", HOST).unwrap(),
            RepoRef::new("o", "r")
        );
        assert_eq!(
            parse_repo_url("https://github.com/o/r/tree/main/src", HOST).unwrap(),
            RepoRef::new("o", "r")
        );
        assert_eq!(
            parse_repo_url("  https://GitHub.com//o/r/  ", HOST).unwrap(),
            RepoRef::new("o", "r")
        );
    }

    #[test]
    fn rejects_malformed_or_foreign_urls() {
        for input in [
            "not a url",
            "github.com/o/r",
            "https://gitlab.com/o/r",
            "https://github.com/only-owner",
            "ftp://github.com/o/r",
            "https://github.com/o/.git",
            "",
        ] {
            let err = parse_repo_url(input, HOST).unwrap_err();
            assert_eq!(err, Error::InvalidInput(INVALID_URL_MESSAGE.into()), "input {input:?}");
        }
    }

    #[test]
    fn honours_configured_host() {
        let repo = parse_repo_url("https://git.example.com/team/app", "git.example.com").unwrap();
        assert_eq!(repo.to_string(), "team/app");
    }
}
