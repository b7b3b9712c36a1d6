use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use player_store::StoreError;
use thiserror::Error;

use crate::core::http::response_envelope::ApiResponse;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("missing required environment variable: {0}")]
    MissingEnv(&'static str),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("not found")]
    NotFound,

    /// Rich HTTP error mapped from lower layers with specific status & code.
    #[error("{message}")]
    Http {
        status: StatusCode,
        code: &'static str,
        message: String,
    },
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // startup-only
            AppError::MissingEnv(_) => StatusCode::INTERNAL_SERVER_ERROR,

            // 4xx
            AppError::NotFound => StatusCode::NOT_FOUND,

            // custom mapped
            AppError::Http { status, .. } => *status,

            // 5xx
            AppError::Bind(_) | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::MissingEnv(_) => "MISSING_ENV",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::NotFound => "NOT_FOUND",
            AppError::Http { code, .. } => code,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        ApiResponse::<()>::error(self.error_code(), self.to_string(), Vec::new())
            .into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Convert `StoreError` to `AppError::Http` with precise HTTP status & code.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidUpdate(msg) => AppError::Http {
                status: StatusCode::BAD_REQUEST,
                code: "INVALID_UPDATE",
                message: msg,
            },
            StoreError::Qdrant(msg) => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "VECTOR_STORE_ERROR",
                message: format!("Vector store operation failed: {msg}"),
            },
            StoreError::Provider(msg) => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "EMBEDDING_ERROR",
                message: format!("Embedding backend failed: {msg}"),
            },
            StoreError::Io(e) => AppError::Http {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "IO_ERROR",
                message: format!("Filesystem error: {e}"),
            },
            other => AppError::Http {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "STORE_ERROR",
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_update_maps_to_bad_request() {
        let err: AppError = StoreError::InvalidUpdate("no name".into()).into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "INVALID_UPDATE");
    }

    #[test]
    fn qdrant_failure_maps_to_bad_gateway() {
        let err: AppError = StoreError::Qdrant("down".into()).into();
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }
}
