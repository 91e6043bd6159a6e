use super::queries::Repository;
use crate::scoring::RepoMetrics;
use chrono::{DateTime, Utc};

/// Everything the provider learns about a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoData {
    pub name: String,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub metrics: RepoMetrics,
}

impl From<Repository> for RepoData {
    fn from(repo: Repository) -> Self {
        let recent_commits = repo
            .default_branch_ref
            .and_then(|branch| branch.target)
            .and_then(|target| target.history)
            .map_or(0, |history| history.nodes.len() as u64);

        let has_workflows = repo.workflows.is_some_and(|tree| !tree.entries.is_empty());

        Self {
            name: repo.name,
            description: repo.description.filter(|d| !d.trim().is_empty()),
            created_at: repo.created_at,
            metrics: RepoMetrics {
                stars: repo.stargazer_count.unwrap_or_default(),
                forks: repo.fork_count.unwrap_or_default(),
                has_readme: repo.has_readme.is_some(),
                has_license: repo.has_license.is_some(),
                recent_commits,
                has_workflows,
                last_updated: repo.updated_at,
            },
        }
    }
}
