use chrono::{DateTime, Utc};

/// Raw repository metrics consumed by the scorer.
///
/// Counts are unsigned, so a missing count from the data source is represented
/// as zero, which every normalization rule maps to a zero score.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoMetrics {
    pub stars: u64,
    pub forks: u64,
    pub has_readme: bool,
    pub has_license: bool,

    /// Number of commits in the sampled recent window (the provider samples up to 10).
    pub recent_commits: u64,

    /// Whether the repository has any CI workflow files.
    pub has_workflows: bool,

    /// When the repository was last updated, if known.
    pub last_updated: Option<DateTime<Utc>>,
}
