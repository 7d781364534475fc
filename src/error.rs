use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::error;

use crate::validate::FieldError;

/// Application error taxonomy. Each variant maps to exactly one HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Unexpected error")]
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Internal(e)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".into()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ApiError::Conflict("Duplicate or constraint violation".into())
            }
            other => ApiError::Internal(other.into()),
        }
    }
}

/// Carried in response extensions so the envelope middleware can fill in
/// the request path, which is unknown at the point the error is built.
#[derive(Clone)]
pub struct ErrorDetails {
    pub message: String,
    pub errors: Option<Vec<FieldError>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Internal(e) = &self {
            error!(error = %e, "internal error");
        }
        let message = self.to_string();
        let errors = match self {
            ApiError::Validation(errors) => Some(errors),
            _ => None,
        };
        let mut res = status.into_response();
        res.extensions_mut().insert(ErrorDetails { message, errors });
        res
    }
}

/// Uniform body for every 4xx/5xx response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub timestamp: String,
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// Outermost middleware: rewrites every error response into the envelope.
/// Framework rejections (bad JSON, unknown route, wrong method) carry no
/// `ErrorDetails` and get the status reason as their message.
pub async fn error_envelope(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_owned();
    let mut res = next.run(req).await;

    let status = res.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return res;
    }

    let reason = status.canonical_reason().unwrap_or("Error").to_string();
    let details = res
        .extensions_mut()
        .remove::<ErrorDetails>()
        .unwrap_or_else(|| ErrorDetails {
            message: reason.clone(),
            errors: None,
        });

    let body = ErrorBody {
        timestamp: OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default(),
        status: status.as_u16(),
        error: reason,
        message: details.message,
        path,
        errors: details.errors,
    };
    (status, Json(body)).into_response()
}
