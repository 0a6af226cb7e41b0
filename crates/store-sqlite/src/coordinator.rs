// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

//! Units of work.

use kondate_type::{
	Deadline, Error, Result, error,
	error::diagnostic::{
		runtime::deadline_exceeded,
		store::{rollback_failed, transaction_failed},
	},
};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use tracing::debug;

use crate::{
	SqliteStore,
	conflict::{Classification, classify},
	connection::disarm,
};

impl SqliteStore {
	/// Runs `f` inside one immediate transaction.
	///
	/// Commits when `f` succeeds before the deadline, otherwise rolls back
	/// and returns the failure. A failed rollback is reported together with
	/// the failure that caused it.
	pub fn run_in_transaction<T, F>(&self, deadline: Deadline, operation: &str, f: F) -> Result<T>
	where
		F: FnOnce(&Transaction<'_>) -> Result<T>,
	{
		let mut conn = self.acquire(deadline, operation)?;
		let tx = conn
			.transaction_with_behavior(TransactionBehavior::Immediate)
			.map_err(|err| begin_error(err, deadline, operation))?;

		let outcome = f(&tx).and_then(|value| {
			deadline.check(operation)?;
			Ok(value)
		});
		disarm(&tx);

		match outcome {
			Ok(value) => {
				tx.commit().map_err(|err| {
					tracing::error!(operation, error = %err, "commit failed");
					error!(transaction_failed("commit", err.to_string()))
				})?;
				debug!(operation, "committed");
				Ok(value)
			}
			Err(err) => {
				// an interrupted write may already have been rolled back by SQLite
				let rollback = if tx.is_autocommit() {
					Ok(())
				} else {
					tx.rollback()
				};
				Err(settle_failure(rollback, err, operation))
			}
		}
	}

	/// Runs `f` on a connection outside an explicit transaction.
	pub fn read<T, F>(&self, deadline: Deadline, operation: &str, f: F) -> Result<T>
	where
		F: FnOnce(&Connection) -> Result<T>,
	{
		let conn = self.acquire(deadline, operation)?;
		f(&conn)
	}
}

fn begin_error(err: rusqlite::Error, deadline: Deadline, operation: &str) -> Error {
	match classify(&err) {
		Classification::Interrupted => error!(deadline_exceeded(operation)),
		Classification::Busy if deadline.is_expired() => error!(deadline_exceeded(operation)),
		_ => error!(transaction_failed("begin", err.to_string())),
	}
}

pub(crate) fn settle_failure(rollback: rusqlite::Result<()>, err: Error, operation: &str) -> Error {
	match rollback {
		Ok(()) => {
			debug!(operation, code = err.code(), "rolled back");
			err
		}
		Err(rollback_err) => {
			tracing::error!(operation, error = %rollback_err, original = %err, "rollback failed");
			error!(rollback_failed(rollback_err.to_string(), err.diagnostic()))
		}
	}
}
