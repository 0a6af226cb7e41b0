// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use std::time::Duration;

/// Limits applied to every engine call.
#[derive(Debug, Clone)]
pub struct EngineConfig {
	/// Budget for one repository call, from validation to commit.
	pub query_timeout: Duration,
	pub default_page_size: u32,
	pub max_page_size: u32,
	pub max_batch_size: usize,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			query_timeout: Duration::from_secs(5),
			default_page_size: 10,
			max_page_size: 100,
			max_batch_size: 500,
		}
	}
}

impl EngineConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn query_timeout(mut self, timeout: Duration) -> Self {
		self.query_timeout = timeout;
		self
	}

	pub fn default_page_size(mut self, size: u32) -> Self {
		self.default_page_size = size;
		self
	}

	pub fn max_page_size(mut self, size: u32) -> Self {
		self.max_page_size = size.max(1);
		self
	}

	pub fn max_batch_size(mut self, size: usize) -> Self {
		self.max_batch_size = size.max(1);
		self
	}
}
