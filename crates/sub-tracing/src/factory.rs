// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use crate::builder::{TracingBuilder, TracingError};

pub type TracingConfigurator = Box<dyn FnOnce(TracingBuilder) -> TracingBuilder + Send>;

/// Deferred tracing setup: collects a configurator at startup and installs
/// the subscriber once [`TracingFactory::init`] runs.
pub struct TracingFactory {
	configurator: Option<TracingConfigurator>,
}

impl TracingFactory {
	pub fn new() -> Self {
		Self {
			configurator: None,
		}
	}

	pub fn with_configurator<F>(configurator: F) -> Self
	where
		F: FnOnce(TracingBuilder) -> TracingBuilder + Send + 'static,
	{
		Self {
			configurator: Some(Box::new(configurator)),
		}
	}

	pub fn builder(self) -> TracingBuilder {
		match self.configurator {
			Some(configurator) => configurator(TracingBuilder::new()),
			None => TracingBuilder::default(),
		}
	}

	pub fn init(self) -> Result<(), TracingError> {
		self.builder().try_init()
	}
}

impl Default for TracingFactory {
	fn default() -> Self {
		Self::new()
	}
}
