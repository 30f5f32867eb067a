/*
 * Responsibility
 * - アプリ共通の AppError 定義 (taxonomy は 6 種で固定)
 * - IntoResponse 実装 (HTTP status / JSON error envelope)
 * - status ↔ code の対応はここだけで定義する (handler は増やさない)
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::id_codec::IdCodecError;
use crate::services::risk::evaluator::RiskError;

/// Wire shape of every failure response:
/// `{ "error": { "error", "code", "details"? }, "status" }`.
/// `status` duplicates the HTTP status code for clients that only see the
/// body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub status: u16,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    // The contract names the message field `error`.
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation {
        message: String,
        details: Option<Value>,
    },
    // One message for "unknown email" and "wrong password": responses must
    // not reveal whether an account exists.
    #[error("invalid email or password")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("{resource} not found")]
    NotFound { resource: &'static str },
    #[error("{message}")]
    Conflict { message: String },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn validation(message: impl Into<String>, details: Option<Value>) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Conflict { .. } => (StatusCode::CONFLICT, "CONFLICT"),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR"),
        };

        let message = self.to_string();
        let details = match self {
            AppError::Validation { details, .. } => details,
            _ => None,
        };

        let body = ErrorResponse {
            error: ErrorBody {
                error: message,
                code,
                details,
            },
            status: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict => AppError::conflict("conflict"),
            RepoError::Db(e) => {
                // Sole choke point for unexpected persistence failures:
                // full context server-side, generic 500 to the caller.
                tracing::error!(error = ?e, "persistence call failed");
                AppError::Internal
            }
        }
    }
}

impl From<IdCodecError> for AppError {
    fn from(e: IdCodecError) -> Self {
        match e {
            // Client supplied a malformed public id (e.g. /content/{id})
            IdCodecError::InvalidPublicId => AppError::validation("invalid content id", None),

            // These indicate server-side config / programming errors
            IdCodecError::InvalidMinLength(_)
            | IdCodecError::Codec(_)
            | IdCodecError::NegativeId(_) => {
                tracing::error!(error = %e, "id codec failed");
                AppError::Internal
            }
        }
    }
}

impl From<RiskError> for AppError {
    fn from(e: RiskError) -> Self {
        tracing::error!(error = %e, "risk evaluation failed");
        AppError::Internal
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::json;

    use super::*;

    async fn envelope(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_renders_details_and_code() {
        let details = json!([{"field": "password", "message": "too short"}]);
        let (status, body) = envelope(AppError::validation(
            "Validation failed",
            Some(details.clone()),
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["error"], "Validation failed");
        assert_eq!(body["error"]["details"], details);
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn status_field_always_matches_http_status() {
        for (err, expected, code) in [
            (AppError::Unauthorized, 401, "UNAUTHORIZED"),
            (AppError::Forbidden, 403, "FORBIDDEN"),
            (AppError::not_found("user"), 404, "NOT_FOUND"),
            (AppError::conflict("email is already registered"), 409, "CONFLICT"),
            (AppError::Internal, 500, "INTERNAL_SERVER_ERROR"),
        ] {
            let (status, body) = envelope(err).await;
            assert_eq!(status.as_u16(), expected);
            assert_eq!(body["status"], expected);
            assert_eq!(body["error"]["code"], code);
        }
    }

    #[tokio::test]
    async fn internal_error_leaks_no_detail() {
        let db_err = RepoError::Db(sqlx::Error::PoolClosed);
        let (status, body) = envelope(db_err.into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["error"], "internal server error");
        assert!(body["error"].get("details").is_none());
    }
}
