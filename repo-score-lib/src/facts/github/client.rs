//! GitHub GraphQL client
//!
//! Minimal client that posts GraphQL queries and classifies the outcome.

use chrono::{DateTime, Utc};
use core::time::Duration;
use ohno::app_err;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

/// GraphQL error type GitHub reports for repositories that do not exist.
const NOT_FOUND_ERROR: &str = "NOT_FOUND";

/// GraphQL error type GitHub reports when the query budget is exhausted.
const RATE_LIMITED_ERROR: &str = "RATE_LIMITED";

/// Envelope around every GraphQL response.
#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    #[serde(rename = "type")]
    kind: Option<String>,
    message: String,
}

/// Rate limit information from response headers
#[derive(Debug, Clone, Copy)]
pub struct RateLimitInfo {
    pub remaining: usize,
    pub reset_at: DateTime<Utc>,
}

/// Result of a GraphQL call
#[derive(Debug)]
pub enum ApiResult<T> {
    /// Request succeeded and returned data
    Success(T),

    /// The requested repository does not exist
    NotFound,

    /// The API refused the request because a rate limit was hit
    RateLimited(Option<RateLimitInfo>),

    /// Request failed for any other reason
    Failed(ohno::AppError),
}

/// GitHub GraphQL API client
#[derive(Debug, Clone)]
#[expect(clippy::struct_field_names, reason = "client field stores the underlying HTTP client")]
pub struct Client {
    client: reqwest::Client,
    graphql_url: String,
}

impl Client {
    /// Create a new client with an optional authentication token.
    ///
    /// `api_url` is the API root, e.g. `https://api.github.com`; queries are posted to `{api_url}/graphql`.
    pub fn new(token: Option<&str>, api_url: &str, timeout: Duration) -> crate::Result<Self> {
        use reqwest::header::{AUTHORIZATION, HeaderValue};

        let mut client_builder = reqwest::Client::builder().user_agent("repo-score").timeout(timeout);

        if let Some(t) = token {
            let mut auth_val = HeaderValue::from_str(&format!("bearer {t}"))?;
            auth_val.set_sensitive(true);

            let mut headers = HeaderMap::new();
            let _ = headers.insert(AUTHORIZATION, auth_val);

            client_builder = client_builder.default_headers(headers);
        }

        Ok(Self {
            client: client_builder.build()?,
            graphql_url: format!("{}/graphql", api_url.trim_end_matches('/')),
        })
    }

    #[must_use]
    pub fn graphql_url(&self) -> &str {
        &self.graphql_url
    }

    /// Run a query and classify the result.
    pub async fn query<T: DeserializeOwned>(&self, query: &str, variables: serde_json::Value) -> ApiResult<T> {
        let body = json!({ "query": query, "variables": variables });

        let resp = match self.client.post(&self.graphql_url).json(&body).send().await {
            Ok(r) => r,
            Err(e) => return ApiResult::Failed(e.into()),
        };

        let rate_limit = extract_rate_limit_from_headers(resp.headers());

        let status = resp.status();
        if !status.is_success() {
            return classify_error_status(status, rate_limit);
        }

        let response: GraphQlResponse<T> = match resp.json().await {
            Ok(r) => r,
            Err(e) => return ApiResult::Failed(e.into()),
        };

        classify_response(response, rate_limit)
    }
}

fn classify_error_status<T>(status: StatusCode, rate_limit: Option<RateLimitInfo>) -> ApiResult<T> {
    match status {
        StatusCode::NOT_FOUND => ApiResult::NotFound,
        StatusCode::TOO_MANY_REQUESTS => ApiResult::RateLimited(rate_limit),

        // GitHub also answers 403 once the primary rate limit is exhausted
        StatusCode::FORBIDDEN if rate_limit.is_some_and(|rl| rl.remaining == 0) => ApiResult::RateLimited(rate_limit),

        StatusCode::UNAUTHORIZED => ApiResult::Failed(app_err!("GitHub rejected the credentials (HTTP 401); supply a valid token")),
        _ => ApiResult::Failed(app_err!("GitHub API request failed with HTTP {status}")),
    }
}

fn classify_response<T>(response: GraphQlResponse<T>, rate_limit: Option<RateLimitInfo>) -> ApiResult<T> {
    if response.errors.iter().any(|e| e.kind.as_deref() == Some(RATE_LIMITED_ERROR)) {
        return ApiResult::RateLimited(rate_limit);
    }

    if response.errors.iter().any(|e| e.kind.as_deref() == Some(NOT_FOUND_ERROR)) {
        return ApiResult::NotFound;
    }

    match response.data {
        Some(data) if response.errors.is_empty() => ApiResult::Success(data),
        _ => {
            let messages: Vec<_> = response.errors.iter().map(|e| e.message.as_str()).collect();
            if messages.is_empty() {
                ApiResult::Failed(app_err!("GitHub API returned no data"))
            } else {
                ApiResult::Failed(app_err!("GitHub API returned errors: {}", messages.join("; ")))
            }
        }
    }
}

/// Extract rate limit information from API response headers
fn extract_rate_limit_from_headers(headers: &HeaderMap) -> Option<RateLimitInfo> {
    let remaining = headers.get("x-ratelimit-remaining")?.to_str().ok()?.parse::<usize>().ok()?;

    let reset_timestamp = headers.get("x-ratelimit-reset")?.to_str().ok()?.parse::<i64>().ok()?;

    let reset_at = DateTime::from_timestamp(reset_timestamp, 0)?;

    Some(RateLimitInfo { remaining, reset_at })
}
