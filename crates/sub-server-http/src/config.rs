// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpConfig {
	/// Address and port to bind to, e.g. `"0.0.0.0:8080"`.
	pub bind_addr: String,
	/// When set, write endpoints require a matching `X-Api-Key` header.
	pub api_key: Option<String>,
	pub request_timeout: Duration,
	pub max_concurrent_requests: usize,
}

impl Default for HttpConfig {
	fn default() -> Self {
		Self {
			bind_addr: "127.0.0.1:8080".to_string(),
			api_key: None,
			request_timeout: Duration::from_secs(6),
			max_concurrent_requests: 1024,
		}
	}
}

impl HttpConfig {
	pub fn new(bind_addr: impl Into<String>) -> Self {
		Self {
			bind_addr: bind_addr.into(),
			..Self::default()
		}
	}

	pub fn api_key(mut self, api_key: Option<String>) -> Self {
		self.api_key = api_key.filter(|key| !key.is_empty());
		self
	}

	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = timeout;
		self
	}

	pub fn max_concurrent_requests(mut self, max: usize) -> Self {
		self.max_concurrent_requests = max.max(1);
		self
	}
}
