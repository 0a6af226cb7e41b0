// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use std::{
	path::{Path, PathBuf},
	time::Duration,
};

/// Configuration for the SQLite store.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
	/// Database file, or a directory to place `kondate.db` in.
	pub path: PathBuf,
	pub flags: OpenFlags,
	pub journal_mode: JournalMode,
	pub synchronous_mode: SynchronousMode,
	pub temp_store: TempStore,
	pub max_pool_size: u32,
	/// Busy timeout for connections used outside a deadline.
	pub busy_timeout: Duration,
}

impl SqliteConfig {
	/// Durable defaults for a long-running server.
	pub fn new(path: impl AsRef<Path>) -> Self {
		Self {
			path: path.as_ref().to_path_buf(),
			flags: OpenFlags::default(),
			journal_mode: JournalMode::Wal,
			synchronous_mode: SynchronousMode::Normal,
			temp_store: TempStore::Memory,
			max_pool_size: 8,
			busy_timeout: Duration::from_secs(5),
		}
	}

	/// Trades durability for speed; meant for tests.
	pub fn fast(path: impl AsRef<Path>) -> Self {
		Self {
			synchronous_mode: SynchronousMode::Off,
			max_pool_size: 4,
			..Self::new(path)
		}
	}

	pub fn flags(mut self, flags: OpenFlags) -> Self {
		self.flags = flags;
		self
	}

	pub fn journal_mode(mut self, mode: JournalMode) -> Self {
		self.journal_mode = mode;
		self
	}

	pub fn synchronous_mode(mut self, mode: SynchronousMode) -> Self {
		self.synchronous_mode = mode;
		self
	}

	pub fn temp_store(mut self, store: TempStore) -> Self {
		self.temp_store = store;
		self
	}

	pub fn max_pool_size(mut self, size: u32) -> Self {
		self.max_pool_size = size.max(1);
		self
	}

	pub fn busy_timeout(mut self, timeout: Duration) -> Self {
		self.busy_timeout = timeout;
		self
	}

	/// The database file this configuration resolves to.
	pub fn db_file(&self) -> PathBuf {
		if self.path.is_dir() {
			self.path.join("kondate.db")
		} else {
			self.path.clone()
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenFlags {
	pub read_write: bool,
	pub create: bool,
	pub full_mutex: bool,
	pub no_mutex: bool,
	pub shared_cache: bool,
	pub private_cache: bool,
	pub uri: bool,
}

impl Default for OpenFlags {
	fn default() -> Self {
		Self {
			read_write: true,
			create: true,
			full_mutex: false,
			no_mutex: true,
			shared_cache: false,
			private_cache: false,
			uri: false,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalMode {
	Delete,
	Truncate,
	Persist,
	Memory,
	Wal,
	Off,
}

impl JournalMode {
	pub fn as_str(&self) -> &'static str {
		match self {
			JournalMode::Delete => "DELETE",
			JournalMode::Truncate => "TRUNCATE",
			JournalMode::Persist => "PERSIST",
			JournalMode::Memory => "MEMORY",
			JournalMode::Wal => "WAL",
			JournalMode::Off => "OFF",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynchronousMode {
	Off,
	Normal,
	Full,
	Extra,
}

impl SynchronousMode {
	pub fn as_str(&self) -> &'static str {
		match self {
			SynchronousMode::Off => "OFF",
			SynchronousMode::Normal => "NORMAL",
			SynchronousMode::Full => "FULL",
			SynchronousMode::Extra => "EXTRA",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempStore {
	Default,
	File,
	Memory,
}

impl TempStore {
	pub fn as_str(&self) -> &'static str {
		match self {
			TempStore::Default => "DEFAULT",
			TempStore::File => "FILE",
			TempStore::Memory => "MEMORY",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_builder_overrides_defaults() {
		let config = SqliteConfig::new("/tmp/menus.db")
			.journal_mode(JournalMode::Delete)
			.synchronous_mode(SynchronousMode::Full)
			.max_pool_size(0)
			.busy_timeout(Duration::from_millis(250));

		assert_eq!(config.journal_mode, JournalMode::Delete);
		assert_eq!(config.synchronous_mode.as_str(), "FULL");
		assert_eq!(config.max_pool_size, 1);
		assert_eq!(config.busy_timeout, Duration::from_millis(250));
	}

	#[test]
	fn test_fast_keeps_wal() {
		let config = SqliteConfig::fast("/tmp/menus.db");
		assert_eq!(config.journal_mode, JournalMode::Wal);
		assert_eq!(config.synchronous_mode, SynchronousMode::Off);
	}

	#[test]
	fn test_db_file_for_plain_path() {
		let config = SqliteConfig::new("/tmp/does-not-exist/menus.db");
		assert_eq!(config.db_file(), PathBuf::from("/tmp/does-not-exist/menus.db"));
	}
}
