// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use std::sync::Arc;

use axum::http::HeaderMap;
use kondate_engine::Engine;

use crate::error::{AppError, AuthError};

pub const API_KEY_HEADER: &str = "x-api-key";

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
	engine: Engine,
	api_key: Option<Arc<str>>,
}

impl AppState {
	pub fn new(engine: Engine, api_key: Option<String>) -> Self {
		Self {
			engine,
			api_key: api_key.map(Arc::from),
		}
	}

	pub fn engine(&self) -> &Engine {
		&self.engine
	}

	/// Admits the request when no key is configured, or when `X-Api-Key`
	/// matches it.
	pub fn authorize(&self, headers: &HeaderMap) -> Result<(), AppError> {
		let Some(expected) = &self.api_key else {
			return Ok(());
		};

		let Some(value) = headers.get(API_KEY_HEADER) else {
			return Err(AuthError::MissingCredentials.into());
		};
		let key = value.to_str().map_err(|_| AuthError::InvalidHeader)?;

		if key.as_bytes() != expected.as_bytes() {
			tracing::debug!("rejected write with invalid API key");
			return Err(AuthError::InvalidApiKey.into());
		}
		Ok(())
	}
}
