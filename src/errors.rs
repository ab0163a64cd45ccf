//! Error types for the flyweight pool

use thiserror::Error;

/// Error produced by a caller-supplied factory when it cannot build a value
/// for a key.
///
/// The pool surfaces this verbatim inside [`PoolError::Factory`]; it never
/// catches, suppresses, or retries on the caller's behalf.
///
/// # Examples
///
/// ```
/// use flyweight_pool::FactoryError;
///
/// let err = FactoryError::new("no descriptor for flavor");
/// assert_eq!(err.to_string(), "no descriptor for flavor");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FactoryError {
    message: String,
}

impl FactoryError {
    /// Create a factory error with the given message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("Key rejected by validator before value creation")]
    InvalidKey,

    #[error("Factory failed to produce a value: {0}")]
    Factory(#[from] FactoryError),
}

pub type PoolResult<T> = Result<T, PoolError>;
