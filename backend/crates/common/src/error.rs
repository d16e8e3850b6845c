use thiserror::Error;

#[derive(Debug, Error)]
pub enum BreezoError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation error: {0}")]
    Validation(String),

    /// A collaborator exists but is not ready to serve requests.
    #[error("unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type BreezoResult<T> = Result<T, BreezoError>;
