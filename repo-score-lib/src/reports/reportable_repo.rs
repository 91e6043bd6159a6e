use crate::facts::RepoSpec;
use crate::scoring::ScoreResult;

/// A scored repository, ready for reporting.
#[derive(Debug, Clone)]
pub struct ReportableRepo {
    pub spec: RepoSpec,
    pub description: Option<String>,
    pub result: ScoreResult,

    /// Whether the score came from the cache rather than a fresh fetch.
    pub cached: bool,
}

impl ReportableRepo {
    #[must_use]
    #[expect(clippy::missing_const_for_fn, reason = "Cannot be const due to non-const parameter types")]
    pub fn new(spec: RepoSpec, description: Option<String>, result: ScoreResult, cached: bool) -> Self {
        Self {
            spec,
            description,
            result,
            cached,
        }
    }
}
