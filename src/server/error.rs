use axum::{
    http::StatusCode,
    response::{IntoResponse, Response}
};
use anyhow;
use log::error;

use tally::LedgerError;

pub(crate) enum ServerError{
    BadRequest(String),
    NotFound(String),
    InternalError(anyhow::Error)
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(msg) =>
                (StatusCode::BAD_REQUEST, format!("Invalid input: {}", msg)).into_response(),
            Self::NotFound(msg) =>
                (StatusCode::NOT_FOUND, format!("Resource not found: {}", msg)).into_response(),
            Self::InternalError(err) => {
                error!("request failed: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Internal error: {}", err)).into_response()
            }
        }
    }
}

impl From<LedgerError> for ServerError {
    fn from(err: LedgerError) -> Self {
        if err.is_validation() {
            Self::BadRequest(err.to_string())
        } else {
            Self::InternalError(err.into())
        }
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(err)
    }
}
