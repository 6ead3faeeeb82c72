use crate::model::StatusResponse;
use axum::extract::rejection::JsonRejection;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use shortcut_core::{CoreError, RegistryError};
use thiserror::Error;
use tracing::{error, info};

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("invalid alias")]
    InvalidAlias,
    #[error("unauthorized")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    #[error("alias already exists")]
    AliasConflict,
    #[error("failed to generate alias")]
    OutOfAttempts,
    #[error("internal error")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::InvalidAlias => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::AliasConflict => StatusCode::CONFLICT,
            AppError::OutOfAttempts | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RegistryError> for AppError {
    fn from(value: RegistryError) -> Self {
        match value {
            RegistryError::AliasConflict(_) => AppError::AliasConflict,
            RegistryError::NotFound(_) => AppError::NotFound,
            RegistryError::OutOfAttempts { .. } => AppError::OutOfAttempts,
            RegistryError::Store(err) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<CoreError> for AppError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidAlias(_) => AppError::InvalidAlias,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(value: JsonRejection) -> Self {
        AppError::BadRequest(format!("failed to decode request: {}", value.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::Internal(detail) => error!(error = %detail, "request failed"),
            AppError::OutOfAttempts => error!("alias space exhausted"),
            other => info!(status = status.as_u16(), reason = %other, "request rejected"),
        }

        let mut response = (status, Json(StatusResponse::error(self.to_string()))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Basic realm=\"shortcut\""),
            );
        }
        response
    }
}
