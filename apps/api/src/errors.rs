use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::extractor::ExtractError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so JSON handlers can return `Result<T, AppError>`;
/// the HTML handlers turn it into a banner via `user_message`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnsupportedFormat(what) => AppError::UnsupportedFormat(what),
            ExtractError::Unreadable(msg) => AppError::UnprocessableEntity(msg),
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Timeout(after) => {
                AppError::Timeout(format!("no response from the model within {after:?}"))
            }
            other if other.is_auth_failure() => {
                AppError::Provider(format!("authentication failed: {other}"))
            }
            other => AppError::Provider(other.to_string()),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Provider(_) => StatusCode::BAD_GATEWAY,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            AppError::UnprocessableEntity(_) => "UNPROCESSABLE_ENTITY",
            AppError::Provider(_) => "PROVIDER_ERROR",
            AppError::Timeout(_) => "TIMEOUT",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show the user. Provider and internal details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::PayloadTooLarge(_) => {
                "Upload too large. Please upload smaller files.".to_string()
            }
            AppError::UnsupportedFormat(what) => {
                format!("Upload rejected: {what} is not supported. Please upload a PDF or plain-text file.")
            }
            AppError::UnprocessableEntity(msg) => format!("Upload rejected: {msg}"),
            AppError::Provider(_) => {
                "The analysis service could not be reached or returned an error. Please try again.".to_string()
            }
            AppError::Timeout(_) => {
                "The analysis service took too long to respond. Please try again.".to_string()
            }
            AppError::Internal(_) => "An internal error occurred. Please try again.".to_string(),
        }
    }

    /// Logs server-side failures. Client mistakes are not worth an error line.
    pub fn log(&self) {
        match self {
            AppError::Provider(msg) => tracing::error!("Provider error: {msg}"),
            AppError::Timeout(msg) => tracing::error!("Provider timeout: {msg}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            other => tracing::info!("Request rejected: {other}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.user_message()
            }
        }));

        (self.status(), body).into_response()
    }
}
