use serde::{Deserialize, Serialize};

/// One line of a score breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricScore {
    /// Display name, e.g. `Has Readme`.
    pub metric: String,

    /// Normalized value on the 0–10 scale, rounded to one decimal.
    pub score: f64,

    /// Fraction of the overall score this metric accounts for.
    pub weight: f64,

    /// `score * weight` computed from the unrounded value, then rounded to one decimal.
    pub weighted: f64,
}

/// The subset of the input metrics echoed back with a score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMetrics {
    pub stars: u64,
    pub forks: u64,
    pub has_readme: bool,
    pub has_license: bool,
    pub has_workflows: bool,
    pub recent_commits: u64,
}

/// A repository score with its per-metric breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// Overall score on the 0–10 scale, rounded to one decimal.
    pub score: f64,

    /// One entry per metric, in [`MetricKey`](super::MetricKey) order.
    pub breakdown: Vec<MetricScore>,

    pub raw_metrics: RawMetrics,
}

impl ScoreResult {
    /// Sum of the displayed weighted values.
    ///
    /// May differ slightly from [`Self::score`] since each weighted value is rounded on its own.
    #[must_use]
    pub fn weighted_sum(&self) -> f64 {
        self.breakdown.iter().map(|m| m.weighted).sum()
    }
}
