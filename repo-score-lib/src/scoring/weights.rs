use super::MetricKey;
use crate::Result;
use ohno::bail;
use strum::IntoEnumIterator;

/// Allowed deviation of the weight sum from 1.0.
const SUM_TOLERANCE: f64 = 1e-9;

/// Immutable table of the fraction each metric contributes to the overall score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    stars: f64,
    forks: f64,
    has_readme: f64,
    has_license: f64,
    recent_activity: f64,
    has_workflows: f64,
}

impl Weights {
    /// The weights every score is computed with.
    pub const DEFAULT: Self = Self {
        stars: 0.25,
        forks: 0.15,
        has_readme: 0.15,
        has_license: 0.10,
        recent_activity: 0.20,
        has_workflows: 0.15,
    };

    /// The weight of a single metric.
    #[must_use]
    pub const fn get(&self, key: MetricKey) -> f64 {
        match key {
            MetricKey::Stars => self.stars,
            MetricKey::Forks => self.forks,
            MetricKey::HasReadme => self.has_readme,
            MetricKey::HasLicense => self.has_license,
            MetricKey::RecentActivity => self.recent_activity,
            MetricKey::HasWorkflows => self.has_workflows,
        }
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        MetricKey::iter().map(|key| self.get(key)).sum()
    }

    /// Check that every weight is a fraction and that together they sum to 1.0.
    pub fn validate(&self) -> Result<()> {
        for key in MetricKey::iter() {
            let weight = self.get(key);
            if !(0.0..=1.0).contains(&weight) {
                bail!("weight for '{}' must be between 0 and 1, got {weight}", key.key());
            }
        }

        let total = self.total();
        if (total - 1.0).abs() > SUM_TOLERANCE {
            bail!("metric weights must sum to 1.0, got {total}");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_are_valid() {
        Weights::DEFAULT.validate().unwrap();
    }

    #[test]
    fn test_default_weights_values() {
        let w = Weights::DEFAULT;
        assert!((w.get(MetricKey::Stars) - 0.25).abs() < f64::EPSILON);
        assert!((w.get(MetricKey::Forks) - 0.15).abs() < f64::EPSILON);
        assert!((w.get(MetricKey::HasReadme) - 0.15).abs() < f64::EPSILON);
        assert!((w.get(MetricKey::HasLicense) - 0.10).abs() < f64::EPSILON);
        assert!((w.get(MetricKey::RecentActivity) - 0.20).abs() < f64::EPSILON);
        assert!((w.get(MetricKey::HasWorkflows) - 0.15).abs() < f64::EPSILON);
    }

    #[test]
    fn test_total_is_one() {
        assert!((Weights::DEFAULT.total() - 1.0).abs() < SUM_TOLERANCE);
    }

    #[test]
    fn test_validate_rejects_bad_sum() {
        let w = Weights { stars: 0.5, ..Weights::DEFAULT };
        let err = w.validate().unwrap_err();
        assert!(err.to_string().contains("sum to 1.0"), "got: {err}");
    }

    #[test]
    fn test_validate_rejects_negative_weight() {
        let w = Weights {
            stars: -0.25,
            forks: 0.65,
            ..Weights::DEFAULT
        };
        let err = w.validate().unwrap_err();
        assert!(err.to_string().contains("stars"), "got: {err}");
    }
}
