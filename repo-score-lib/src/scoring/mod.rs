//! Repository quality scoring
//!
//! This module turns a [`RepoMetrics`] record into a [`ScoreResult`]: a single
//! 0–10 score plus an itemized breakdown of the six metrics that make it up.
//!
//! # Implementation Model
//!
//! Each [`MetricKey`] has its own normalization rule mapping a raw count or flag
//! onto the common 0–10 scale:
//! - **Stars** and **forks** use a logarithmic curve that saturates at 10 000 stars
//!   and 1 000 forks respectively
//! - **Readme**, **license** and **workflows** are binary: 10 when present, 0 otherwise
//! - **Recent activity** combines a staleness tier (days since the last update) with
//!   a bonus for the number of recent commits
//!
//! The normalized values are combined with the fixed [`Weights`] table. The top-level
//! score is the rounded sum of the unrounded weighted values, while every breakdown
//! entry rounds its own fields. The displayed weighted values therefore do not always
//! add up to the top-level score exactly; the drift is bounded by the accumulated
//! rounding error of six terms.
//!
//! Scoring never reads the clock. The recency rule measures age against the `now`
//! argument, so the same metrics and the same `now` always produce the same result.

mod metric_key;
mod normalize;
mod repo_metrics;
mod score_result;
mod scorer;
mod weights;

pub use metric_key::{MetricKey, display_name};
pub use normalize::{MAX_SCORE, calculate_recent_activity, flag_score, normalize_forks, normalize_stars};
pub use repo_metrics::RepoMetrics;
pub use score_result::{MetricScore, RawMetrics, ScoreResult};
pub use scorer::{calculate_score, round_to_tenth};
pub use weights::Weights;
