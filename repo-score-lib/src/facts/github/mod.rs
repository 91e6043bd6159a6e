mod client;
mod provider;
mod queries;
mod repo_data;

pub use provider::Provider;
pub use repo_data::RepoData;
