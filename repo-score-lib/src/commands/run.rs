//! Command dispatch logic for repo-score

use super::{CacheArgs, InitArgs, ScoreArgs, init_config, manage_cache, process_repos};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "repo-score", version, author, long_about = None)]
#[command(about = "Score the quality of GitHub repositories")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: RepoScoreSubcommand,
}

#[derive(Subcommand, Debug)]
enum RepoScoreSubcommand {
    /// Score repositories and report the breakdown
    Score(Box<ScoreArgs>),
    /// Inspect or clear the score cache
    Cache(CacheArgs),
    /// Generate a default configuration file
    Init(InitArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Errors
///
/// Returns an error if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        RepoScoreSubcommand::Score(score_args) => process_repos(host, score_args).await,
        RepoScoreSubcommand::Cache(cache_args) => manage_cache(host, cache_args).await,
        RepoScoreSubcommand::Init(init_args) => init_config(host, init_args),
    }
}
