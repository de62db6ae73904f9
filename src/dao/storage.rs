use std::error::Error;
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends regardless of the underlying database.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be reached or failed while serving the request.
    #[error("storage unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// A write collided with the uniqueness constraint on name and producer.
    #[error("a game named `{name}` by `{producer}` is already stored")]
    Duplicate { name: String, producer: String },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }

    /// Construct a uniqueness violation for the given game identity.
    pub fn duplicate(name: impl Into<String>, producer: impl Into<String>) -> Self {
        StorageError::Duplicate {
            name: name.into(),
            producer: producer.into(),
        }
    }
}
