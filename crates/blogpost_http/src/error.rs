//! Failure taxonomy and status mapping for HTTP responses.
//!
//! The status table is a value owned by `AppState`, so deployments and tests
//! can swap codes per failure kind without touching handlers.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use blogpost_core::RepoError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

const PROBLEM_JSON: &str = "application/problem+json";

/// Failure kinds the adapter knows how to map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Storage,
}

/// Errors produced while serving a request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller input violates a precondition.
    #[error("{0}")]
    Validation(String),
    /// Repository or service failure.
    #[error(transparent)]
    Repo(#[from] RepoError),
    /// The storage task could not run to completion.
    #[error("storage task failed: {0}")]
    Storage(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Repo(RepoError::NotFound(_)) => ErrorKind::NotFound,
            Self::Repo(_) | Self::Storage(_) => ErrorKind::Storage,
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(value: validator::ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

/// Maps failure kinds to response status codes.
#[derive(Debug, Clone)]
pub struct ErrorStatusMap {
    statuses: HashMap<ErrorKind, StatusCode>,
    fallback: StatusCode,
}

impl ErrorStatusMap {
    /// Creates an empty table; every kind resolves to `fallback`.
    pub fn new(fallback: StatusCode) -> Self {
        Self {
            statuses: HashMap::new(),
            fallback,
        }
    }

    /// Returns the table with `kind` mapped to `status`.
    pub fn with(mut self, kind: ErrorKind, status: StatusCode) -> Self {
        self.statuses.insert(kind, status);
        self
    }

    pub fn status_for(&self, kind: ErrorKind) -> StatusCode {
        self.statuses.get(&kind).copied().unwrap_or(self.fallback)
    }
}

impl Default for ErrorStatusMap {
    fn default() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR)
            .with(ErrorKind::NotFound, StatusCode::NOT_FOUND)
            .with(ErrorKind::Validation, StatusCode::BAD_REQUEST)
            .with(ErrorKind::Storage, StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// JSON problem body returned for every failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub cause: String,
}

/// Failure response with its resolved status.
#[derive(Debug)]
pub struct ErrorReply {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ErrorReply {
    pub fn new(status: StatusCode, message: impl Into<String>, cause: &ApiError) -> Self {
        Self {
            status,
            body: ErrorBody {
                message: message.into(),
                cause: cause.to_string(),
            },
        }
    }
}

impl IntoResponse for ErrorReply {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.body)).into_response();
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(PROBLEM_JSON));
        response
    }
}
