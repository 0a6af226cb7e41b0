// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use std::{fmt, str::FromStr};

use tracing::Level;
use tracing_subscriber::{
	EnvFilter, Layer, Registry,
	filter::{LevelFilter, ParseError},
	fmt as subscriber_fmt,
	layer::{Layered, SubscriberExt},
	util::{SubscriberInitExt, TryInitError},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
	#[default]
	Pretty,
	Compact,
	Json,
}

impl Format {
	pub fn as_str(&self) -> &'static str {
		match self {
			Format::Pretty => "pretty",
			Format::Compact => "compact",
			Format::Json => "json",
		}
	}
}

impl fmt::Display for Format {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Format {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"pretty" => Ok(Format::Pretty),
			"compact" => Ok(Format::Compact),
			"json" => Ok(Format::Json),
			other => Err(format!("unknown log format '{other}' (expected pretty, compact or json)")),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum TracingError {
	#[error("invalid filter directive: {0}")]
	Filter(#[from] ParseError),
	#[error("global subscriber already installed: {0}")]
	Install(#[from] TryInitError),
}

type Filtered = Layered<EnvFilter, Registry>;

/// Assembles the process-wide `tracing` subscriber.
#[derive(Debug, Clone)]
pub struct TracingBuilder {
	level: Level,
	directive: Option<String>,
	format: Format,
	ansi: bool,
}

impl Default for TracingBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl TracingBuilder {
	pub fn new() -> Self {
		Self {
			level: Level::INFO,
			directive: None,
			format: Format::default(),
			ansi: true,
		}
	}

	/// Level used when neither a directive nor `RUST_LOG` is given.
	pub fn level(mut self, level: Level) -> Self {
		self.level = level;
		self
	}

	/// `EnvFilter` directive that takes precedence over `RUST_LOG`, e.g.
	/// `"kondate_store_sqlite=debug,info"`.
	pub fn directive(mut self, directive: impl Into<String>) -> Self {
		self.directive = Some(directive.into());
		self
	}

	pub fn format(mut self, format: Format) -> Self {
		self.format = format;
		self
	}

	pub fn ansi(mut self, ansi: bool) -> Self {
		self.ansi = ansi;
		self
	}

	pub fn filter(&self) -> Result<EnvFilter, TracingError> {
		if let Some(directive) = &self.directive {
			return Ok(EnvFilter::try_new(directive)?);
		}

		Ok(EnvFilter::builder().with_default_directive(LevelFilter::from_level(self.level).into()).from_env_lossy())
	}

	fn layer(&self) -> Box<dyn Layer<Filtered> + Send + Sync> {
		let layer = subscriber_fmt::layer().with_ansi(self.ansi).with_target(true);
		match self.format {
			Format::Pretty => layer.pretty().boxed(),
			Format::Compact => layer.compact().boxed(),
			Format::Json => layer.json().with_current_span(true).boxed(),
		}
	}

	/// Installs the subscriber. Fails without side effects when one is
	/// already installed.
	pub fn try_init(self) -> Result<(), TracingError> {
		let filter = self.filter()?;
		tracing_subscriber::registry().with(filter).with(self.layer()).try_init()?;
		Ok(())
	}
}
