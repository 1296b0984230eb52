use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const REQUIRED_FIELDS_MESSAGE: &str = "El nombre y la fecha son obligatorios";
pub const MISSING_FIELDS_MESSAGE: &str = "Faltan campos obligatorios";
pub const NOT_FOUND_MESSAGE: &str = "Evento no encontrado";

#[derive(Debug, Error)]
pub enum EventError {
    #[error("{0}")]
    Validation(String),

    #[error("Evento no encontrado")]
    NotFound,

    #[error(transparent)]
    Storage(sqlx::Error),
}

pub type EventResult<T> = Result<T, EventError>;

impl From<sqlx::Error> for EventError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db)
                if matches!(db.kind(), sqlx::error::ErrorKind::NotNullViolation)
                    || db.message().starts_with("NOT NULL constraint failed") =>
            {
                EventError::Validation(MISSING_FIELDS_MESSAGE.to_string())
            }
            _ => EventError::Storage(err),
        }
    }
}

impl From<validator::ValidationErrors> for EventError {
    fn from(_: validator::ValidationErrors) -> Self {
        EventError::Validation(REQUIRED_FIELDS_MESSAGE.to_string())
    }
}

impl From<axum::extract::rejection::JsonRejection> for EventError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        EventError::Validation(rejection.body_text())
    }
}

impl EventError {
    pub fn status(&self) -> StatusCode {
        match self {
            EventError::Validation(_) => StatusCode::BAD_REQUEST,
            EventError::NotFound => StatusCode::NOT_FOUND,
            EventError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Body of every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Storage failure: {:?}", self);
        } else {
            tracing::warn!("Request rejected ({}): {}", status, self);
        }
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
