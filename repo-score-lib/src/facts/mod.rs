//! Data collection for GitHub repositories
//!
//! This module turns user input into a [`RepoSpec`] and gathers the raw metrics the
//! scorer needs from the GitHub GraphQL API.
//!
//! # Implementation Model
//!
//! The [`Provider`] answers two questions about a repository: does it exist, and what
//! are its metrics. Each answer is wrapped in a [`ProviderResult`] which is `Found`,
//! `NotFound`, or `Error`. Keeping `NotFound` and `Error` apart lets callers report
//! "repository not found" only when GitHub said so, and surface network failures,
//! rate limits and credential problems as what they are.

mod github;
mod provider_result;
mod repo_spec;

pub use github::{Provider, RepoData};
pub use provider_result::ProviderResult;
pub use repo_spec::RepoSpec;
