use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use url::Url;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up when `--config` is not given
pub const CONFIG_FILENAME: &str = "repo-score.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// How long a computed score stays in the cache
    #[serde(default = "default_cache_ttl", with = "humantime_serde")]
    pub cache_ttl: Duration,

    /// Maximum number of cached scores to keep
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: usize,

    /// Base URL of the GitHub API
    #[serde(default = "default_github_api_url")]
    pub github_api_url: String,

    /// Timeout for each GitHub API request
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
}

const fn default_cache_ttl() -> Duration {
    Duration::from_hours(24)
}

const fn default_cache_max_entries() -> usize {
    50
}

fn default_github_api_url() -> String {
    "https://api.github.com".into()
}

const fn default_request_timeout() -> Duration {
    Duration::from_secs(60)
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// When `config_path` is `None`, `repo-score.toml` is looked up in `base_dir` and
    /// its absence is not an error.
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading repo-score configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILENAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
                Err(e) => return Err(e).into_app_err_with(|| format!("reading repo-score configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.cache_max_entries == 0 {
            return Err(app_err!("cache_max_entries must be at least 1"));
        }

        if self.request_timeout.is_zero() {
            return Err(app_err!("request_timeout must be greater than zero"));
        }

        let url = Url::parse(&self.github_api_url).into_app_err_with(|| format!("github_api_url '{}' is not a valid URL", self.github_api_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(app_err!(
                "github_api_url must use http or https, got '{}'",
                self.github_api_url
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
