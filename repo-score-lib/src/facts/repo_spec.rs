use crate::Result;
use core::fmt::{Display, Formatter};
use ohno::{IntoAppError, bail};
use std::sync::Arc;
use url::Url;

const GITHUB_HOSTS: &[&str] = &["github.com", "www.github.com"];

/// Identifies a GitHub repository by owner and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSpec {
    owner: Arc<str>,
    repo: Arc<str>,
}

impl RepoSpec {
    /// Parse user input as either `owner/repo` or a GitHub repository URL.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            bail!("please enter a repository");
        }

        if input.contains("://") {
            let url = Url::parse(input).into_app_err_with(|| format!("parsing repository URL '{input}'"))?;
            return Self::from_url(&url);
        }

        match input.split('/').collect::<Vec<_>>().as_slice() {
            [owner, repo] if !owner.is_empty() && !repo.is_empty() => Ok(Self::from_parts(owner, repo)),
            _ => bail!("invalid repository '{input}': expected format owner/repository"),
        }
    }

    /// Extract the repository from a GitHub URL, ignoring any path past `owner/repo`.
    pub fn from_url(url: &Url) -> Result<Self> {
        let host = url.host_str().unwrap_or_default();
        if !GITHUB_HOSTS.contains(&host) {
            bail!("unsupported repository host '{host}': only github.com repositories can be scored");
        }

        let path_segments: Vec<_> = url.path_segments().map(Iterator::collect).unwrap_or_default();

        match path_segments.as_slice() {
            [owner, repo, ..] if !owner.is_empty() && !repo.is_empty() => {
                Ok(Self::from_parts(owner, repo.trim_end_matches(".git")))
            }
            _ => bail!("invalid repository URL '{url}': expected https://github.com/owner/repository"),
        }
    }

    fn from_parts(owner: &str, repo: &str) -> Self {
        Self {
            owner: Arc::from(owner),
            repo: Arc::from(repo),
        }
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// The `owner/repo` key under which scores are cached.
    #[must_use]
    pub fn cache_key(&self) -> String {
        self.to_string()
    }
}

impl Display for RepoSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
