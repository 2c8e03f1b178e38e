use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use std::fmt;

use crate::services::UploadError;
use crate::web::views;

/// Web-boundary error. Internal detail is logged server-side and never
/// echoed into the response body.
#[derive(Debug)]
pub enum PageError {
    Validation(String),

    Conflict(String),

    Upload(UploadError),

    Database(sea_orm::DbErr),

    Internal(anyhow::Error),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::Upload(e) => write!(f, "Upload error: {e}"),
            Self::Database(e) => write!(f, "Database error: {e}"),
            Self::Internal(e) => write!(f, "Internal error: {e}"),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::Upload(e) => {
                let status = match e {
                    UploadError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                    UploadError::DisallowedType(_) => StatusCode::BAD_REQUEST,
                    UploadError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.to_string())
            }
            Self::Database(e) => {
                if let Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) = e.sql_err() {
                    tracing::warn!("Duplicate key: {detail}");
                    (StatusCode::CONFLICT, "Already exists".to_string())
                } else {
                    tracing::error!("Database error: {e}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "A database error occurred".to_string(),
                    )
                }
            }
            Self::Internal(e) => {
                tracing::error!("Internal error: {e:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = views::error_page(status.as_u16(), &message);
        (status, Html(body)).into_response()
    }
}

impl From<anyhow::Error> for PageError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<sea_orm::DbErr>() {
            Ok(db_err) => Self::Database(db_err),
            Err(err) => Self::Internal(err),
        }
    }
}

impl From<sea_orm::DbErr> for PageError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err)
    }
}

impl From<UploadError> for PageError {
    fn from(err: UploadError) -> Self {
        Self::Upload(err)
    }
}
