use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;

use crate::dao::storage::StorageError;

/// Outcomes of catalog operations other than success.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Another game already carries the requested name and producer.
    #[error("This game is already registered")]
    AlreadyRegistered,
    /// The referenced game identifier does not exist.
    #[error("This game is not registered")]
    NotRegistered,
    /// Storage backend is unavailable.
    #[error("storage unavailable")]
    Unavailable(#[source] StorageError),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Duplicate { .. } => ServiceError::AlreadyRegistered,
            other => ServiceError::Unavailable(other),
        }
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Requested resource not found. Rendered as a bare text body.
    #[error("{0}")]
    NotFound(String),
    /// Storage backend could not serve the request.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::AlreadyRegistered | ServiceError::NotRegistered => {
                AppError::NotFound(err.to_string())
            }
            ServiceError::Unavailable(source) => AppError::ServiceUnavailable(source.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        // Catalog 404s carry a short sentence, not a JSON document.
        if let AppError::NotFound(message) = self {
            return (status, message).into_response();
        }

        let payload = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, payload).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io;

    #[test]
    fn duplicate_storage_errors_become_already_registered() {
        let err: ServiceError = StorageError::duplicate("Fifa 21", "EA").into();
        assert!(matches!(err, ServiceError::AlreadyRegistered));
    }

    #[test]
    fn backend_failures_stay_unavailable() {
        let err: ServiceError = StorageError::unavailable(
            "connection reset".into(),
            io::Error::new(io::ErrorKind::ConnectionReset, "reset"),
        )
        .into();
        assert!(matches!(err, ServiceError::Unavailable(_)));

        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn not_found_is_rendered_as_plain_text() {
        let response = AppError::NotFound("Game not registered!".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());
        assert_eq!(content_type, Some("text/plain; charset=utf-8"));
    }

    #[test]
    fn not_registered_description_is_human_readable() {
        assert_eq!(
            ServiceError::NotRegistered.to_string(),
            "This game is not registered"
        );
    }
}
