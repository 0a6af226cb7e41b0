// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

//! Pooled SQLite connections.

use std::{
	ops::{Deref, DerefMut},
	path::PathBuf,
	time::{Duration, Instant},
};

use kondate_type::Deadline;
use r2d2::{ManageConnection, PooledConnection};
use rusqlite::Connection;

use crate::config::{OpenFlags, SqliteConfig, SynchronousMode, TempStore};

/// Virtual machine instructions between two deadline checks.
const PROGRESS_INTERVAL: i32 = 1_000;

/// Opens connections with the per-connection pragmas applied.
///
/// Foreign keys are switched on for every connection; SQLite leaves them off
/// by default.
#[derive(Debug)]
pub struct SqliteConnectionManager {
	path: PathBuf,
	flags: rusqlite::OpenFlags,
	synchronous_mode: SynchronousMode,
	temp_store: TempStore,
	busy_timeout: Duration,
}

impl SqliteConnectionManager {
	pub fn new(config: &SqliteConfig) -> Self {
		Self {
			path: config.db_file(),
			flags: convert_flags(&config.flags),
			synchronous_mode: config.synchronous_mode,
			temp_store: config.temp_store,
			busy_timeout: config.busy_timeout,
		}
	}
}

impl ManageConnection for SqliteConnectionManager {
	type Connection = Connection;
	type Error = rusqlite::Error;

	fn connect(&self) -> Result<Connection, rusqlite::Error> {
		let conn = Connection::open_with_flags(&self.path, self.flags)?;
		conn.pragma_update(None, "foreign_keys", "ON")?;
		conn.pragma_update(None, "synchronous", self.synchronous_mode.as_str())?;
		conn.pragma_update(None, "temp_store", self.temp_store.as_str())?;
		conn.busy_timeout(self.busy_timeout)?;
		Ok(conn)
	}

	fn is_valid(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
		conn.execute_batch("SELECT 1")
	}

	fn has_broken(&self, _conn: &mut Connection) -> bool {
		false
	}
}

pub(crate) fn convert_flags(flags: &OpenFlags) -> rusqlite::OpenFlags {
	let mut rusqlite_flags = rusqlite::OpenFlags::empty();

	if flags.read_write {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE;
	}
	if flags.create {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_CREATE;
	}
	if flags.full_mutex {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_FULL_MUTEX;
	}
	if flags.no_mutex {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX;
	}
	if flags.shared_cache {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_SHARED_CACHE;
	}
	if flags.private_cache {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_PRIVATE_CACHE;
	}
	if flags.uri {
		rusqlite_flags |= rusqlite::OpenFlags::SQLITE_OPEN_URI;
	}

	rusqlite_flags
}

/// A pooled connection bound to a deadline.
///
/// While bound, lock waits are capped at the remaining time and running
/// statements are interrupted once the deadline passes. Returning the
/// connection to the pool restores its defaults.
pub struct BoundConnection {
	conn: PooledConnection<SqliteConnectionManager>,
	default_busy_timeout: Duration,
}

impl BoundConnection {
	pub(crate) fn bind(
		conn: PooledConnection<SqliteConnectionManager>,
		deadline: Deadline,
		default_busy_timeout: Duration,
	) -> rusqlite::Result<Self> {
		conn.busy_timeout(deadline.remaining())?;
		arm(&conn, deadline.instant());
		Ok(Self {
			conn,
			default_busy_timeout,
		})
	}
}

impl Deref for BoundConnection {
	type Target = Connection;

	fn deref(&self) -> &Connection {
		&self.conn
	}
}

impl DerefMut for BoundConnection {
	fn deref_mut(&mut self) -> &mut Connection {
		&mut self.conn
	}
}

impl Drop for BoundConnection {
	fn drop(&mut self) {
		disarm(&self.conn);
		let _ = self.conn.busy_timeout(self.default_busy_timeout);
	}
}

/// Installs a progress handler that aborts statements after `instant`.
pub(crate) fn arm(conn: &Connection, instant: Instant) {
	let _ = conn.progress_handler(PROGRESS_INTERVAL, Some(move || Instant::now() >= instant));
}

/// Removes the deadline progress handler.
pub(crate) fn disarm(conn: &Connection) {
	let _ = conn.progress_handler(0, None::<fn() -> bool>);
}
