//! GraphQL documents and the response shapes they produce.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::IgnoredAny;

/// Number of default-branch commits sampled for the activity metric.
pub const COMMIT_SAMPLE_SIZE: u32 = 10;

pub const REPO_EXISTS_QUERY: &str = r"
query checkRepo($owner: String!, $repo: String!) {
  repository(owner: $owner, name: $repo) {
    id
  }
}
";

pub const REPO_DATA_QUERY: &str = r#"
query getRepoData($owner: String!, $repo: String!, $commits: Int!) {
  repository(owner: $owner, name: $repo) {
    name
    description
    stargazerCount
    forkCount
    createdAt
    updatedAt
    hasReadme: object(expression: "HEAD:README.md") { id }
    hasLicense: licenseInfo { id }
    defaultBranchRef {
      target {
        ... on Commit {
          history(first: $commits) {
            nodes {
              committedDate
            }
          }
        }
      }
    }
    workflows: object(expression: "HEAD:.github/workflows") {
      ... on Tree {
        entries {
          name
        }
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
pub struct RepositoryEnvelope<T> {
    pub repository: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub name: String,
    pub description: Option<String>,
    pub stargazer_count: Option<u64>,
    pub fork_count: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub has_readme: Option<IgnoredAny>,
    pub has_license: Option<IgnoredAny>,
    pub default_branch_ref: Option<BranchRef>,
    pub workflows: Option<Tree>,
}

#[derive(Debug, Deserialize)]
pub struct BranchRef {
    pub target: Option<CommitTarget>,
}

/// The default branch target. Only commits carry a history; other object kinds deserialize as empty.
#[derive(Debug, Deserialize)]
pub struct CommitTarget {
    pub history: Option<History>,
}

#[derive(Debug, Deserialize)]
pub struct History {
    #[serde(default)]
    pub nodes: Vec<IgnoredAny>,
}

/// The workflows directory. A blob at that path deserializes with no entries.
#[derive(Debug, Deserialize)]
pub struct Tree {
    #[serde(default)]
    pub entries: Vec<IgnoredAny>,
}
