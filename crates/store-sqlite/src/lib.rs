// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

//! SQLite storage for menus, dishes, cities and allergens.
//!
//! [`SqliteStore`] implements every repository trait from `kondate-core`.
//! Reads go through the aggregate builder, writes through the transactional
//! coordinator; both are bound to the caller's deadline.

pub mod aggregate;
pub mod config;
pub mod conflict;
mod connection;
mod coordinator;
pub mod ordering;
mod repository;
pub mod row;
pub mod schema;
pub mod statement;

use std::{
	fs,
	ops::Deref,
	path::PathBuf,
	sync::Arc,
	time::Duration,
};

pub use config::{JournalMode, OpenFlags, SqliteConfig, SynchronousMode, TempStore};
pub use connection::{BoundConnection, SqliteConnectionManager};
use kondate_type::{
	Deadline, Diagnostic, IntoDiagnostic, Result, error,
	error::diagnostic::{
		runtime::deadline_exceeded,
		store::{connection_failed, schema_failed},
	},
};
use r2d2::Pool;
use tracing::{info, instrument};

use crate::schema::SCHEMA;

#[derive(Debug, thiserror::Error)]
pub enum OpenError {
	#[error("failed to create directory '{path}': {source}")]
	CreateDir {
		path: String,
		#[source]
		source: std::io::Error,
	},
	#[error("failed to build connection pool: {0}")]
	Pool(#[from] r2d2::Error),
	#[error("failed to set journal mode: {0}")]
	JournalMode(#[source] rusqlite::Error),
	#[error("{0}")]
	Schema(#[source] rusqlite::Error),
}

impl IntoDiagnostic for OpenError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			OpenError::Schema(err) => schema_failed(err.to_string()),
			other => connection_failed(other.to_string()),
		}
	}
}

#[derive(Clone)]
pub struct SqliteStore(Arc<SqliteStoreInner>);

pub struct SqliteStoreInner {
	pool: Pool<SqliteConnectionManager>,
	busy_timeout: Duration,
	db_file: PathBuf,
}

impl Deref for SqliteStore {
	type Target = SqliteStoreInner;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl SqliteStore {
	/// Opens the database, creating it and its schema if needed.
	#[instrument(name = "store::sqlite::open", level = "info", skip(config), fields(
		db_file = ?config.db_file(),
		journal_mode = %config.journal_mode.as_str(),
		max_pool_size = config.max_pool_size
	))]
	pub fn open(config: SqliteConfig) -> Result<Self> {
		Self::try_open(&config).map_err(|err| error!(err.into_diagnostic()))
	}

	fn try_open(config: &SqliteConfig) -> std::result::Result<Self, OpenError> {
		let db_file = config.db_file();
		if let Some(parent) = db_file.parent().filter(|parent| !parent.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|source| OpenError::CreateDir {
				path: parent.display().to_string(),
				source,
			})?;
		}

		let manager = SqliteConnectionManager::new(config);
		let pool = Pool::builder()
			.max_size(config.max_pool_size)
			.connection_timeout(config.busy_timeout)
			.build(manager)?;

		{
			let conn = pool.get()?;
			let mode: String = conn
				.pragma_update_and_check(None, "journal_mode", config.journal_mode.as_str(), |row| row.get(0))
				.map_err(OpenError::JournalMode)?;
			conn.execute_batch(SCHEMA).map_err(OpenError::Schema)?;
			info!(journal_mode = %mode, "schema ready");
		}

		Ok(Self(Arc::new(SqliteStoreInner {
			pool,
			busy_timeout: config.busy_timeout,
			db_file,
		})))
	}

	pub fn db_file(&self) -> &PathBuf {
		&self.db_file
	}

	/// Checks out a connection bound to `deadline`, waiting at most until it.
	pub fn acquire(&self, deadline: Deadline, operation: &str) -> Result<BoundConnection> {
		deadline.check(operation)?;

		let conn = self.pool.get_timeout(deadline.remaining()).map_err(|err| {
			if deadline.is_expired() {
				error!(deadline_exceeded(operation))
			} else {
				error!(connection_failed(err.to_string()))
			}
		})?;

		BoundConnection::bind(conn, deadline, self.busy_timeout)
			.map_err(|err| conflict::read_error(err, deadline, operation))
	}
}
