//! Options and setup shared between commands.

use super::config::Config;
use crate::Result;
use crate::cache::ScoreCache;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use directories::BaseDirs;
use ohno::IntoAppError;
use std::io::IsTerminal;
use std::path::PathBuf;

const LOG_TARGET: &str = "  commands";

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

impl ColorMode {
    /// Decide whether to emit colors on standard output
    pub fn use_colors(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::stdout().is_terminal(),
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Arguments shared by every command that touches the cache
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Path to configuration file (default is `repo-score.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Directory where computed scores are cached
    #[arg(long, value_name = "PATH")]
    pub cache_dir: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

/// Resolved configuration and cache location for a command invocation
#[derive(Debug)]
pub struct Common {
    pub config: Config,
    pub cache_dir: PathBuf,
    pub use_colors: bool,
}

impl Common {
    /// Initialize logging, load the configuration, and resolve the cache directory
    pub fn new(args: &CommonArgs) -> Result<Self> {
        init_logging(args.log_level);

        let config = Config::load(Utf8Path::new("."), args.config.as_ref())?;

        // Use the provided path or the platform's cache directory
        let cache_dir = if let Some(cache_path) = &args.cache_dir {
            cache_path.as_std_path().to_path_buf()
        } else {
            BaseDirs::new()
                .into_app_err("could not determine cache directory")?
                .cache_dir()
                .join("repo-score")
        };

        log::debug!(target: LOG_TARGET, "Using cache directory '{}'", cache_dir.display());

        Ok(Self {
            config,
            cache_dir,
            use_colors: args.color.use_colors(),
        })
    }

    /// Open the score cache as of `now`
    pub fn score_cache(&self, now: DateTime<Utc>, ignore_cached: bool) -> ScoreCache {
        ScoreCache::new(
            &self.cache_dir,
            self.config.cache_ttl,
            self.config.cache_max_entries,
            now,
            ignore_cached,
        )
    }
}

/// Initialize logger based on log level
fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // A logger may already be installed when commands run repeatedly in one process
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}
