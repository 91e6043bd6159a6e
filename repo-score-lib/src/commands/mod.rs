//! Command-line interface and orchestration for repo-score
//!
//! This module implements the CLI commands and ties the scorer, the GitHub
//! provider, the cache and the report generators together.
//!
//! ## Commands
//!
//! - **score**: For each repository, look up a cached score, otherwise check
//!   that the repository exists, fetch its metrics, score them, cache the
//!   result, and report
//! - **cache**: Show cache statistics or clear the cache
//! - **init**: Generate a default configuration file
//!
//! The `run` function parses command-line arguments using clap and routes
//! to the appropriate command handler. The reference time used for scoring and
//! cache freshness is read once per invocation.

mod cache;
mod common;
mod config;
mod host;
mod init;
mod run;
mod score;

pub use cache::{CacheArgs, manage_cache};
pub use common::{ColorMode, LogLevel};
pub use config::Config;
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use score::{ScoreArgs, analyze_repo, process_repos};
