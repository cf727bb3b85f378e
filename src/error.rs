//! Error types.
//!
//! [`ApiError`] is what the HTTP surface can return. Each variant renders as
//! a JSON body `{"error": <title>, "message": <detail>}` with a matching
//! status code. [`ConfigError`] covers settings rejected at startup.

use std::fmt;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::models::ErrorBody;

pub const RATE_LIMIT_MESSAGE: &str = "You have exceeded the rate limit. Please try again later.";

/// Errors rendered as HTTP responses.
///
/// - `TooManyRequests` → 429
/// - `NotFound` → 404
/// - `MethodNotAllowed` → 405
/// - `Internal` → 500
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The caller's bucket had no token left.
    TooManyRequests,
    NotFound,
    MethodNotAllowed,
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        let (error, message) = match self {
            ApiError::TooManyRequests => ("Too Many Requests", RATE_LIMIT_MESSAGE.to_string()),
            ApiError::NotFound => (
                "Not Found",
                "The requested resource could not be found".to_string(),
            ),
            ApiError::MethodNotAllowed => (
                "Method Not Allowed",
                "The requested method is not allowed for this resource".to_string(),
            ),
            ApiError::Internal(detail) => ("Internal Server Error", detail.clone()),
        };
        ErrorBody {
            error: error.to_string(),
            message,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self.body();
        write!(f, "{}: {}", body.error, body.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

/// Settings that cannot produce a working limiter.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Refill period of zero would mean an infinite rate.
    ZeroRefillPeriod,
    /// Rate must be a finite number of tokens per second above zero.
    InvalidRate(f64),
    /// A bucket that holds no token rejects everything.
    ZeroBurst,
    ZeroSweepInterval,
    /// Sweep interval above the allowed maximum.
    SweepIntervalTooLong(std::time::Duration),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroRefillPeriod => write!(f, "refill period must be greater than zero"),
            ConfigError::InvalidRate(rate) => {
                write!(f, "rate must be finite and positive, got {}", rate)
            }
            ConfigError::ZeroBurst => write!(f, "burst must be at least 1"),
            ConfigError::ZeroSweepInterval => {
                write!(f, "sweep interval must be greater than zero")
            }
            ConfigError::SweepIntervalTooLong(interval) => write!(
                f,
                "sweep interval must be at most {}s, got {}s",
                crate::config::MAX_SWEEP_INTERVAL.as_secs(),
                interval.as_secs()
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
