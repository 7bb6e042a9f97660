// Application error type shared by the notes and weather apps.
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::pages;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("username already exists")]
    DuplicateUser,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("not found")]
    NotFound,

    #[error("session token error")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("password hashing failed")]
    Hash(#[from] bcrypt::BcryptError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("upstream request failed")]
    Upstream(#[from] reqwest::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::DuplicateUser => StatusCode::CONFLICT,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Token(_) => StatusCode::UNAUTHORIZED,
            AppError::Hash(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Client-safe message. Internal causes stay in the logs.
    pub fn message(&self) -> &'static str {
        match self {
            AppError::DuplicateUser => "Username already exists",
            AppError::InvalidCredentials => "Invalid credentials",
            AppError::NotFound => "Not found",
            AppError::Token(_) => "Invalid session",
            AppError::Hash(_) | AppError::Database(_) => {
                "An error occurred while processing your request"
            }
            AppError::Upstream(_) => "Upstream service unavailable",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Hash(e) => tracing::error!("password hashing error: {}", e),
            AppError::Database(e) => tracing::error!("database error: {}", e),
            AppError::Upstream(e) => tracing::error!("upstream error: {}", e),
            _ => {}
        }
        let status = self.status_code();
        (status, Html(pages::error_page(status, self.message()))).into_response()
    }
}
