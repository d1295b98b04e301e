use thiserror::Error;

/// Core-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("argument entity must be string, byte sequence, or metadata record: {0}")]
    InvalidArgument(String),
}

impl CoreError {
    /// ## Summary
    /// Builds an `InvalidArgument` error with the given detail.
    #[must_use]
    pub fn invalid_argument(detail: impl Into<String>) -> Self {
        Self::InvalidArgument(detail.into())
    }
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
