// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

//! HTTP error handling and response formatting.

use axum::{
	Json,
	http::StatusCode,
	response::{IntoResponse, Response},
};
use kondate_type::{Error, ErrorKind};
use serde::{Deserialize, Serialize};

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
	/// Machine-readable error code.
	pub code: String,
	/// Human-readable error message.
	pub error: String,
}

impl ErrorResponse {
	pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
		Self {
			code: code.into(),
			error: error.into(),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
	MissingCredentials,
	InvalidApiKey,
	InvalidHeader,
}

/// Application error type that converts to HTTP responses.
#[derive(Debug)]
pub enum AppError {
	Auth(AuthError),
	/// Failure reported by the engine.
	Engine(Error),
	/// Request could not be decoded.
	BadRequest(String),
}

impl From<AuthError> for AppError {
	fn from(e: AuthError) -> Self {
		AppError::Auth(e)
	}
}

impl From<Error> for AppError {
	fn from(e: Error) -> Self {
		AppError::Engine(e)
	}
}

impl std::fmt::Display for AppError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			AppError::Auth(e) => write!(f, "Authentication error: {:?}", e),
			AppError::Engine(e) => write!(f, "Engine error: {}", e),
			AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
		}
	}
}

impl std::error::Error for AppError {}

pub fn status_of(kind: ErrorKind) -> StatusCode {
	match kind {
		ErrorKind::Validation => StatusCode::BAD_REQUEST,
		ErrorKind::NotFound => StatusCode::NOT_FOUND,
		ErrorKind::Conflict => StatusCode::CONFLICT,
		ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
		ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
	}
}

impl IntoResponse for AppError {
	fn into_response(self) -> Response {
		let (status, body) = match self {
			AppError::Auth(AuthError::MissingCredentials) => {
				(StatusCode::UNAUTHORIZED, ErrorResponse::new("AUTH_REQUIRED", "Authentication required"))
			}
			AppError::Auth(AuthError::InvalidApiKey) => {
				(StatusCode::UNAUTHORIZED, ErrorResponse::new("INVALID_API_KEY", "Invalid API key"))
			}
			AppError::Auth(AuthError::InvalidHeader) => {
				(StatusCode::BAD_REQUEST, ErrorResponse::new("INVALID_HEADER", "Malformed X-Api-Key header"))
			}
			AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new("BAD_REQUEST", msg)),
			AppError::Engine(err) => {
				let status = status_of(err.kind());
				match err.kind() {
					ErrorKind::Internal => {
						tracing::error!(code = err.code(), "Internal error: {}", err.0.render());
						(status, ErrorResponse::new(err.code(), "Internal server error"))
					}
					_ => {
						tracing::debug!(code = err.code(), "Request failed: {}", err);
						(status, ErrorResponse::new(err.code(), err.message()))
					}
				}
			}
		};

		(status, Json(body)).into_response()
	}
}

#[cfg(test)]
mod tests {
	use kondate_type::{error, error::diagnostic::constraint::duplicate_entry};

	use super::*;

	#[test]
	fn test_error_response_serialization() {
		let resp = ErrorResponse::new("TEST_CODE", "Test error message");
		let json = serde_json::to_string(&resp).unwrap();
		assert_eq!(json, r#"{"code":"TEST_CODE","error":"Test error message"}"#);
	}

	#[test]
	fn test_status_by_kind() {
		assert_eq!(status_of(ErrorKind::Validation), StatusCode::BAD_REQUEST);
		assert_eq!(status_of(ErrorKind::NotFound), StatusCode::NOT_FOUND);
		assert_eq!(status_of(ErrorKind::Conflict), StatusCode::CONFLICT);
		assert_eq!(status_of(ErrorKind::Timeout), StatusCode::GATEWAY_TIMEOUT);
		assert_eq!(status_of(ErrorKind::Internal), StatusCode::INTERNAL_SERVER_ERROR);
	}

	#[test]
	fn test_conflict_response() {
		let err = AppError::from(error!(duplicate_entry("42", "dishes", "PRIMARY")));
		assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
	}

	#[test]
	fn test_app_error_display() {
		let err = AppError::BadRequest("Invalid JSON".to_string());
		assert_eq!(err.to_string(), "Bad request: Invalid JSON");
	}
}
