//! HTTP error taxonomy. Every fallible handler step returns
//! `Result<T, HandlerError>`; a single [`IntoResponse`] impl performs the
//! HTTP status mapping, and [`HandlerError::to_diameter_result_code`] gives
//! the RTR/PPR paths the matching Diameter-side answer.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::cx::result_codes::DIAMETER_UNABLE_TO_COMPLY;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("not found")]
    NotFound,
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("upstream overloaded: {0}")]
    UpstreamOverload(String),
    #[error("upstream error: {0}")]
    UpstreamError(String),
    #[error("internal error: {0}")]
    LocalError(String),
}

impl HandlerError {
    /// The RTR/PPR answer result code an error of this kind maps to. Every
    /// variant is a local or upstream failure on these paths, so every
    /// variant maps to `UNABLE_TO_COMPLY` — there is no distinct "not
    /// found"/"forbidden" answer code on the inbound Diameter surface.
    pub fn to_diameter_result_code(&self) -> i32 {
        DIAMETER_UNABLE_TO_COMPLY
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = match &self {
            HandlerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            HandlerError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            HandlerError::NotFound => StatusCode::NOT_FOUND,
            HandlerError::Forbidden(_) => StatusCode::FORBIDDEN,
            HandlerError::UpstreamOverload(_) => StatusCode::GATEWAY_TIMEOUT,
            HandlerError::UpstreamError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HandlerError::LocalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if matches!(status, StatusCode::INTERNAL_SERVER_ERROR) {
            tracing::error!(error = %self, "handler returned an internal error");
        }
        (status, self.to_string()).into_response()
    }
}

impl From<crate::cache::CacheError> for HandlerError {
    fn from(e: crate::cache::CacheError) -> Self {
        match e {
            crate::cache::CacheError::NotFound => HandlerError::NotFound,
            crate::cache::CacheError::InvalidRequest(m) => HandlerError::InvalidRequest(m),
            crate::cache::CacheError::Unavailable => {
                HandlerError::UpstreamOverload("cache unavailable".to_string())
            },
            crate::cache::CacheError::Connection(m) => HandlerError::UpstreamOverload(m),
            crate::cache::CacheError::Unknown(m) => HandlerError::UpstreamOverload(m),
        }
    }
}

impl From<crate::diameter::DiameterError> for HandlerError {
    fn from(e: crate::diameter::DiameterError) -> Self {
        match e {
            crate::diameter::DiameterError::Timeout => {
                HandlerError::UpstreamOverload("Diameter request timed out".to_string())
            },
            crate::diameter::DiameterError::Unavailable(m) => HandlerError::UpstreamOverload(m),
            crate::diameter::DiameterError::Malformed(m) => HandlerError::LocalError(m),
        }
    }
}
