use super::normalize::{calculate_recent_activity, flag_score, normalize_forks, normalize_stars};
use super::{MetricKey, MetricScore, RawMetrics, RepoMetrics, ScoreResult, Weights};
use chrono::{DateTime, Utc};
use strum::IntoEnumIterator;

/// Score a repository.
///
/// `now` is the reference time that recency is measured against. Callers pass the
/// current time; tests pass a fixed instant.
#[must_use]
pub fn calculate_score(metrics: &RepoMetrics, now: DateTime<Utc>) -> ScoreResult {
    let weights = &Weights::DEFAULT;

    let values: Vec<(MetricKey, f64)> = MetricKey::iter().map(|key| (key, normalized_value(key, metrics, now))).collect();

    let weighted_score: f64 = values.iter().map(|&(key, value)| value * weights.get(key)).sum();

    let breakdown = values
        .iter()
        .map(|&(key, value)| {
            let weight = weights.get(key);
            MetricScore {
                metric: key.display_name(),
                score: round_to_tenth(value),
                weight,
                weighted: round_to_tenth(value * weight),
            }
        })
        .collect();

    ScoreResult {
        score: round_to_tenth(weighted_score),
        breakdown,
        raw_metrics: RawMetrics {
            stars: metrics.stars,
            forks: metrics.forks,
            has_readme: metrics.has_readme,
            has_license: metrics.has_license,
            has_workflows: metrics.has_workflows,
            recent_commits: metrics.recent_commits,
        },
    }
}

/// Round to one decimal place, halves away from zero.
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn normalized_value(key: MetricKey, metrics: &RepoMetrics, now: DateTime<Utc>) -> f64 {
    match key {
        MetricKey::Stars => normalize_stars(metrics.stars),
        MetricKey::Forks => normalize_forks(metrics.forks),
        MetricKey::HasReadme => flag_score(metrics.has_readme),
        MetricKey::HasLicense => flag_score(metrics.has_license),
        MetricKey::RecentActivity => calculate_recent_activity(metrics.last_updated, metrics.recent_commits, now),
        MetricKey::HasWorkflows => flag_score(metrics.has_workflows),
    }
}
