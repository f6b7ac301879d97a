use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

use crate::views;

#[derive(Debug, ThisError)]
pub enum AppError {
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Upstream error with status: {0}")]
    UpstreamStatus(StatusCode),

    #[error("Failed to decode stored value: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Record not found")]
    NotFound,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "The requested record does not exist."),
            AppError::DatabaseError(_)
            | AppError::Decode(_)
            | AppError::Json(_)
            | AppError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal server error occurred.",
            ),
            AppError::Reqwest(_) | AppError::UrlParse(_) => {
                (StatusCode::BAD_GATEWAY, "The data service is unavailable.")
            }
            AppError::UpstreamStatus(code) => match code {
                StatusCode::UNAUTHORIZED => (code, "The data service rejected the session."),
                StatusCode::FORBIDDEN => (code, "Permission denied by the data service."),
                _ => (StatusCode::BAD_GATEWAY, "The data service returned an error."),
            },
        };
        (status, Html(views::error_page(status, message))).into_response()
    }
}
