// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use std::{path::PathBuf, process::ExitCode, time::Duration};

use clap::Parser;
use kondate_engine::{Engine, EngineConfig};
use kondate_store_sqlite::{SqliteConfig, SqliteStore};
use kondate_sub_server_http::{AppState, HttpConfig, HttpSubsystem};
use kondate_sub_tracing::{Format, TracingBuilder, TracingFactory};
use tracing::Level;

/// School-lunch menu API server.
#[derive(Debug, Parser)]
#[command(name = "kondate-server", version)]
struct Config {
	/// Database file, or an existing directory to hold `kondate.db`.
	#[arg(long, env = "KONDATE_DB_PATH", default_value = "data/kondate.db")]
	db_path: PathBuf,

	#[arg(long, env = "KONDATE_BIND", default_value = "127.0.0.1:8080")]
	bind: String,

	/// Required on write endpoints when set.
	#[arg(long, env = "KONDATE_API_KEY")]
	api_key: Option<String>,

	#[arg(long, env = "KONDATE_QUERY_TIMEOUT_MS", default_value_t = 5000)]
	query_timeout_ms: u64,

	#[arg(long, env = "KONDATE_MAX_POOL_SIZE", default_value_t = 8)]
	max_pool_size: u32,

	#[arg(long, env = "KONDATE_LOG_LEVEL", default_value = "info")]
	log_level: Level,

	#[arg(long, env = "KONDATE_LOG_FORMAT", default_value = "pretty")]
	log_format: Format,
}

impl Config {
	fn query_timeout(&self) -> Duration {
		Duration::from_millis(self.query_timeout_ms)
	}

	fn sqlite(&self) -> SqliteConfig {
		SqliteConfig::new(&self.db_path).max_pool_size(self.max_pool_size)
	}

	fn engine(&self) -> EngineConfig {
		EngineConfig::new().query_timeout(self.query_timeout())
	}

	/// Requests get one second more than the query timeout.
	fn http(&self) -> HttpConfig {
		HttpConfig::new(self.bind.clone())
			.api_key(self.api_key.clone())
			.request_timeout(self.query_timeout() + Duration::from_secs(1))
	}
}

fn tracing_configuration(level: Level, format: Format) -> impl FnOnce(TracingBuilder) -> TracingBuilder + Send {
	move |tracing| tracing.level(level).format(format).ansi(format != Format::Json)
}

async fn run(config: Config) -> kondate_type::Result<()> {
	let store = SqliteStore::open(config.sqlite())?;
	tracing::info!(db_file = %store.db_file().display(), "store opened");

	let engine = Engine::new(store, config.engine());
	let http_config = config.http();
	if http_config.api_key.is_none() {
		tracing::warn!("no API key configured; write endpoints are open");
	}

	let state = AppState::new(engine, http_config.api_key.clone());
	let mut http = HttpSubsystem::new(http_config, state);
	http.start().await?;

	let _ = tokio::signal::ctrl_c().await;
	tracing::info!("shutting down");
	http.shutdown().await;
	Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
	let config = Config::parse();

	if let Err(err) = TracingFactory::with_configurator(tracing_configuration(config.log_level, config.log_format)).init()
	{
		eprintln!("failed to initialise tracing: {err}");
	}

	match run(config).await {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			tracing::error!(code = err.code(), "{}", err.0.render());
			eprintln!("{}", err.0.render());
			ExitCode::FAILURE
		}
	}
}
