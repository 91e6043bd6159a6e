//! Normalization curves mapping raw metrics onto the 0–10 scale.

use chrono::{DateTime, Utc};

/// Upper bound of every normalized metric and of the overall score.
pub const MAX_SCORE: f64 = 10.0;

const STAR_SATURATION: u64 = 10_000;
const STAR_SCALE: f64 = 2.5;

const FORK_SATURATION: u64 = 1_000;
const FORK_SCALE: f64 = 3.33;

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Staleness tiers as (maximum age in days, points), checked in order.
const STALENESS_TIERS: [(f64, f64); 3] = [(7.0, 5.0), (30.0, 3.0), (90.0, 1.0)];

const POINTS_PER_COMMIT: f64 = 0.5;
const MAX_COMMIT_POINTS: f64 = 5.0;

/// Normalize a star count: 0 for none, 10 from 10 000 stars up, logarithmic in between.
#[must_use]
pub fn normalize_stars(stars: u64) -> f64 {
    log_scale(stars, STAR_SATURATION, STAR_SCALE)
}

/// Normalize a fork count: 0 for none, 10 from 1 000 forks up, logarithmic in between.
#[must_use]
pub fn normalize_forks(forks: u64) -> f64 {
    log_scale(forks, FORK_SATURATION, FORK_SCALE)
}

/// Binary presence score.
#[must_use]
pub const fn flag_score(present: bool) -> f64 {
    if present { MAX_SCORE } else { 0.0 }
}

/// Score how active a repository is.
///
/// Adds a staleness tier based on the days elapsed between `last_updated` and `now`
/// to a bonus of half a point per recent commit (capped at 5), then caps the total
/// at 10. An unknown update time earns no staleness points. An update time later
/// than `now` has a negative age and lands in the freshest tier.
#[must_use]
pub fn calculate_recent_activity(last_updated: Option<DateTime<Utc>>, recent_commits: u64, now: DateTime<Utc>) -> f64 {
    let staleness = last_updated.map_or(0.0, |updated| staleness_points(days_between(updated, now)));

    #[expect(clippy::cast_precision_loss, reason = "the commit bonus is capped well below the precision limit")]
    let commits = (recent_commits as f64 * POINTS_PER_COMMIT).min(MAX_COMMIT_POINTS);

    (staleness + commits).min(MAX_SCORE)
}

fn log_scale(count: u64, saturation: u64, scale: f64) -> f64 {
    if count == 0 {
        return 0.0;
    }

    if count >= saturation {
        return MAX_SCORE;
    }

    #[expect(clippy::cast_precision_loss, reason = "counts below saturation are exactly representable")]
    let count = (count + 1) as f64;

    count.log10() * scale
}

fn days_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    #[expect(clippy::cast_precision_loss, reason = "fractional days only need millisecond accuracy")]
    let millis = later.signed_duration_since(earlier).num_milliseconds() as f64;

    millis / MILLIS_PER_DAY
}

fn staleness_points(days_since_update: f64) -> f64 {
    STALENESS_TIERS
        .iter()
        .find(|(max_days, _)| days_since_update <= *max_days)
        .map_or(0.0, |(_, points)| *points)
}
