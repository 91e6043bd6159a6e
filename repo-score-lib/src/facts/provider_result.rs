use std::sync::Arc;

/// Outcome of asking a provider about one repository.
#[derive(Debug, Clone)]
pub enum ProviderResult<T> {
    /// The operation succeeded and data was found.
    Found(T),

    /// The repository does not exist or is not visible with the supplied credentials.
    NotFound,

    /// The provider could not answer, e.g. a network failure or rate limit.
    Error(Arc<ohno::AppError>),
}
