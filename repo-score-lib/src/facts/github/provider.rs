use super::RepoData;
use super::client::{ApiResult, Client, RateLimitInfo};
use super::queries::{COMMIT_SAMPLE_SIZE, REPO_DATA_QUERY, REPO_EXISTS_QUERY, Repository, RepositoryEnvelope};
use crate::Result;
use crate::facts::{ProviderResult, RepoSpec};
use core::time::Duration;
use ohno::{EnrichableExt, app_err};
use serde::de::IgnoredAny;
use serde_json::json;
use std::sync::Arc;

const LOG_TARGET: &str = "  provider";

/// Fetches repository data from the GitHub GraphQL API.
///
/// Every lookup is a single request: there is no retry and no backoff, so a
/// transient failure is reported straight back to the caller.
#[derive(Debug, Clone)]
pub struct Provider {
    client: Client,
}

impl Provider {
    pub fn new(github_token: Option<&str>, api_url: &str, timeout: Duration) -> Result<Self> {
        if github_token.is_none() {
            log::debug!(target: LOG_TARGET, "No GitHub token supplied, requests are sent unauthenticated");
        }

        let client = Client::new(github_token, api_url, timeout)?;
        log::debug!(target: LOG_TARGET, "Sending GraphQL queries to {}", client.graphql_url());

        Ok(Self { client })
    }

    /// Check whether a repository exists.
    ///
    /// A repository that does not exist yields `NotFound`, while a lookup that
    /// could not be completed yields `Error`, so callers can tell the two apart.
    pub async fn repo_exists(&self, repo_spec: &RepoSpec) -> ProviderResult<()> {
        log::debug!(target: LOG_TARGET, "Checking that '{repo_spec}' exists");

        let result = self
            .client
            .query::<RepositoryEnvelope<IgnoredAny>>(REPO_EXISTS_QUERY, variables(repo_spec))
            .await;

        match into_provider_result(result, repo_spec, "checking existence of") {
            ProviderResult::Found(RepositoryEnvelope { repository: Some(_) }) => ProviderResult::Found(()),
            ProviderResult::Found(RepositoryEnvelope { repository: None }) | ProviderResult::NotFound => ProviderResult::NotFound,
            ProviderResult::Error(e) => ProviderResult::Error(e),
        }
    }

    /// Fetch the metrics needed to score a repository.
    pub async fn fetch_repo_data(&self, repo_spec: &RepoSpec) -> ProviderResult<RepoData> {
        log::info!(target: LOG_TARGET, "Fetching repository data for '{repo_spec}'");

        let mut vars = variables(repo_spec);
        vars["commits"] = json!(COMMIT_SAMPLE_SIZE);

        let result = self.client.query::<RepositoryEnvelope<Repository>>(REPO_DATA_QUERY, vars).await;

        match into_provider_result(result, repo_spec, "fetching data for") {
            ProviderResult::Found(RepositoryEnvelope { repository: Some(repo) }) => {
                let data = RepoData::from(repo);
                log::debug!(target: LOG_TARGET, "Fetched '{repo_spec}': {:?}", data.metrics);
                ProviderResult::Found(data)
            }
            ProviderResult::Found(RepositoryEnvelope { repository: None }) | ProviderResult::NotFound => ProviderResult::NotFound,
            ProviderResult::Error(e) => ProviderResult::Error(e),
        }
    }
}

fn variables(repo_spec: &RepoSpec) -> serde_json::Value {
    json!({ "owner": repo_spec.owner(), "repo": repo_spec.repo() })
}

fn into_provider_result<T>(result: ApiResult<T>, repo_spec: &RepoSpec, operation: &str) -> ProviderResult<T> {
    match result {
        ApiResult::Success(data) => ProviderResult::Found(data),
        ApiResult::NotFound => {
            log::debug!(target: LOG_TARGET, "Repository '{repo_spec}' not found");
            ProviderResult::NotFound
        }
        ApiResult::RateLimited(rate_limit) => {
            log::warn!(target: LOG_TARGET, "Hit GitHub rate limit while {operation} '{repo_spec}'");
            ProviderResult::Error(Arc::new(rate_limit_error(rate_limit)))
        }
        ApiResult::Failed(e) => {
            let error = e.enrich_with(|| format!("{operation} repository '{repo_spec}'"));
            ProviderResult::Error(Arc::new(error))
        }
    }
}

fn rate_limit_error(rate_limit: Option<RateLimitInfo>) -> ohno::AppError {
    rate_limit.map_or_else(
        || app_err!("GitHub API rate limit exceeded"),
        |rl| {
            app_err!(
                "GitHub API rate limit exceeded, resets at {}",
                rl.reset_at.with_timezone(&chrono::Local).format("%T")
            )
        },
    )
}
