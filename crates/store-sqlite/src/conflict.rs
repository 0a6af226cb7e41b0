// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

//! Classification of failed statements.
//!
//! SQLite names the violated index but never the offending value, so
//! duplicates are resolved against the still-open unit of work before the
//! error is reported.

use std::collections::HashSet;

use kondate_type::{
	Deadline, Error,
	error::diagnostic::{
		constraint::{duplicate_entry, duplicate_unresolved, missing_reference},
		runtime::deadline_exceeded,
		store::database_error,
	},
};
use rusqlite::{Connection, ErrorCode, OptionalExtension, ffi, params_from_iter, types::Value};
use tracing::{error, warn};

const UNIQUE_FAILED: &str = "UNIQUE constraint failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
	Duplicate,
	MissingReference,
	Interrupted,
	Busy,
	Other,
}

pub fn classify(err: &rusqlite::Error) -> Classification {
	let rusqlite::Error::SqliteFailure(failure, message) = err else {
		return Classification::Other;
	};

	match failure.code {
		ErrorCode::ConstraintViolation => match failure.extended_code {
			ffi::SQLITE_CONSTRAINT_PRIMARYKEY | ffi::SQLITE_CONSTRAINT_UNIQUE => Classification::Duplicate,
			ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Classification::MissingReference,
			// no extended code, fall back to the driver text
			ffi::SQLITE_CONSTRAINT
				if message.as_deref().is_some_and(|text| text.contains(UNIQUE_FAILED)) =>
			{
				Classification::Duplicate
			}
			_ => Classification::Other,
		},
		ErrorCode::OperationInterrupted => Classification::Interrupted,
		ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => Classification::Busy,
		_ => Classification::Other,
	}
}

/// The rows a failed insert attempted, used to name the colliding key.
#[derive(Debug, Clone)]
pub struct WriteTarget<'a> {
	pub table: &'a str,
	/// Index name used in the conflict text, `PRIMARY` for primary keys.
	pub index: &'a str,
	pub key_columns: &'a [&'a str],
	/// One key tuple per attempted row, in statement order.
	pub keys: Vec<Vec<Value>>,
}

impl<'a> WriteTarget<'a> {
	pub fn primary(table: &'a str, key_columns: &'a [&'a str], keys: Vec<Vec<Value>>) -> Self {
		Self {
			table,
			index: "PRIMARY",
			key_columns,
			keys,
		}
	}
}

/// Turns a failed read into an [`Error`].
pub fn read_error(err: rusqlite::Error, deadline: Deadline, operation: &str) -> Error {
	match classify(&err) {
		Classification::Interrupted => Error(Box::new(deadline_exceeded(operation))),
		Classification::Busy if deadline.is_expired() => Error(Box::new(deadline_exceeded(operation))),
		_ => {
			error!(operation, error = %err, "database read failed");
			Error(Box::new(database_error(err.to_string())))
		}
	}
}

/// Turns a failed write into an [`Error`], resolving the duplicate key
/// through `conn` when the failure is a uniqueness violation.
pub fn write_error(
	conn: &Connection,
	err: rusqlite::Error,
	target: &WriteTarget<'_>,
	deadline: Deadline,
	operation: &str,
) -> Error {
	match classify(&err) {
		Classification::Duplicate => {
			let diagnostic = match resolve_duplicate(conn, target) {
				Some(key) => duplicate_entry(key, target.table, target.index),
				None => duplicate_unresolved(target.table, target.index, err.to_string()),
			};
			warn!(operation, table = target.table, conflict = %diagnostic.message, "uniqueness violation");
			Error(Box::new(diagnostic))
		}
		Classification::MissingReference => {
			warn!(operation, table = target.table, "foreign key violation");
			Error(Box::new(missing_reference(target.table, err.to_string())))
		}
		Classification::Interrupted => Error(Box::new(deadline_exceeded(operation))),
		Classification::Busy if deadline.is_expired() => Error(Box::new(deadline_exceeded(operation))),
		_ => {
			error!(operation, table = target.table, error = %err, "database write failed");
			Error(Box::new(database_error(err.to_string())))
		}
	}
}

/// Finds the key that collided: first a repeat within the attempted rows,
/// otherwise the first attempted key already stored.
pub fn resolve_duplicate(conn: &Connection, target: &WriteTarget<'_>) -> Option<String> {
	let mut seen = HashSet::new();
	for key in &target.keys {
		let rendered = render_key(key);
		if !seen.insert(rendered.clone()) {
			return Some(rendered);
		}
	}

	let predicate: Vec<String> = target.key_columns.iter().map(|column| format!("{} = ?", column)).collect();
	let sql = format!("SELECT 1 FROM {} WHERE {} LIMIT 1", target.table, predicate.join(" AND "));
	let mut stmt = conn.prepare_cached(&sql).ok()?;

	for key in &target.keys {
		let found = stmt.query_row(params_from_iter(key.iter()), |_| Ok(())).optional();
		match found {
			Ok(Some(())) => return Some(render_key(key)),
			Ok(None) => {}
			Err(_) => return None,
		}
	}
	None
}

/// Composite keys are joined with `-`.
pub fn render_key(key: &[Value]) -> String {
	key.iter()
		.map(|value| match value {
			Value::Text(text) => text.clone(),
			Value::Integer(number) => number.to_string(),
			Value::Real(number) => number.to_string(),
			Value::Null => "NULL".to_string(),
			Value::Blob(bytes) => format!("{:?}", bytes),
		})
		.collect::<Vec<_>>()
		.join("-")
}

#[cfg(test)]
mod tests {
	use std::time::{Duration, Instant};

	use kondate_type::ErrorKind;

	use super::*;

	fn failure(code: i32, message: &str) -> rusqlite::Error {
		rusqlite::Error::SqliteFailure(ffi::Error::new(code), Some(message.to_string()))
	}

	fn table() -> Connection {
		let conn = Connection::open_in_memory().unwrap();
		conn.execute_batch("CREATE TABLE dishes (id TEXT PRIMARY KEY, name TEXT NOT NULL);").unwrap();
		conn.execute("INSERT INTO dishes (id, name) VALUES ('B', 'Miso soup')", []).unwrap();
		conn
	}

	fn keys(ids: &[&str]) -> Vec<Vec<Value>> {
		ids.iter().map(|id| vec![Value::Text(id.to_string())]).collect()
	}

	#[test]
	fn test_classify_structured_duplicates() {
		let err = failure(ffi::SQLITE_CONSTRAINT_PRIMARYKEY, "UNIQUE constraint failed: dishes.id");
		assert_eq!(classify(&err), Classification::Duplicate);

		let err = failure(ffi::SQLITE_CONSTRAINT_UNIQUE, "UNIQUE constraint failed: allergens.name");
		assert_eq!(classify(&err), Classification::Duplicate);
	}

	#[test]
	fn test_classify_text_fallback_without_extended_code() {
		let err = failure(ffi::SQLITE_CONSTRAINT, "UNIQUE constraint failed: dishes.id");
		assert_eq!(classify(&err), Classification::Duplicate);

		let err = failure(ffi::SQLITE_CONSTRAINT, "CHECK constraint failed: calories");
		assert_eq!(classify(&err), Classification::Other);
	}

	#[test]
	fn test_classify_text_ignored_with_other_extended_code() {
		let err = failure(ffi::SQLITE_CONSTRAINT_NOTNULL, "UNIQUE constraint failed: looks like one");
		assert_eq!(classify(&err), Classification::Other);
	}

	#[test]
	fn test_classify_foreign_key_and_interrupt() {
		let err = failure(ffi::SQLITE_CONSTRAINT_FOREIGNKEY, "FOREIGN KEY constraint failed");
		assert_eq!(classify(&err), Classification::MissingReference);

		let err = failure(ffi::SQLITE_INTERRUPT, "interrupted");
		assert_eq!(classify(&err), Classification::Interrupted);

		let err = failure(ffi::SQLITE_BUSY, "database is locked");
		assert_eq!(classify(&err), Classification::Busy);

		assert_eq!(classify(&rusqlite::Error::QueryReturnedNoRows), Classification::Other);
	}

	#[test]
	fn test_resolve_prefers_repeat_within_batch() {
		let conn = table();
		let target = WriteTarget::primary("dishes", &["id"], keys(&["B", "C", "D", "C"]));
		assert_eq!(resolve_duplicate(&conn, &target), Some("C".to_string()));
	}

	#[test]
	fn test_resolve_falls_back_to_stored_key() {
		let conn = table();
		let target = WriteTarget::primary("dishes", &["id"], keys(&["A", "B", "C"]));
		assert_eq!(resolve_duplicate(&conn, &target), Some("B".to_string()));

		let target = WriteTarget::primary("dishes", &["id"], keys(&["X", "Y"]));
		assert_eq!(resolve_duplicate(&conn, &target), None);
	}

	#[test]
	fn test_write_error_builds_compatibility_text() {
		let conn = table();
		let target = WriteTarget::primary("dishes", &["id"], keys(&["B"]));
		let err = failure(ffi::SQLITE_CONSTRAINT_PRIMARYKEY, "UNIQUE constraint failed: dishes.id");

		let err = write_error(&conn, err, &target, Deadline::after(Duration::from_secs(5)), "create dish");
		assert_eq!(err.kind(), ErrorKind::Conflict);
		assert_eq!(err.code(), "CONFLICT_001");
		assert_eq!(err.message(), "Duplicate entry 'B' for key 'dishes.PRIMARY'");
	}

	#[test]
	fn test_write_error_unresolved_duplicate_is_still_conflict() {
		let conn = table();
		let target = WriteTarget::primary("dishes", &["id"], keys(&["Z"]));
		let err = failure(ffi::SQLITE_CONSTRAINT_PRIMARYKEY, "UNIQUE constraint failed: dishes.id");

		let err = write_error(&conn, err, &target, Deadline::after(Duration::from_secs(5)), "create dish");
		assert_eq!(err.code(), "CONFLICT_002");
		assert!(err.is_conflict());
	}

	#[test]
	fn test_busy_maps_to_timeout_only_after_deadline() {
		let conn = table();
		let target = WriteTarget::primary("dishes", &["id"], keys(&["Z"]));

		let err = write_error(&conn, failure(ffi::SQLITE_BUSY, "database is locked"), &target, Deadline::at(Instant::now()), "op");
		assert!(err.is_timeout());

		let err = write_error(
			&conn,
			failure(ffi::SQLITE_BUSY, "database is locked"),
			&target,
			Deadline::after(Duration::from_secs(5)),
			"op",
		);
		assert_eq!(err.kind(), ErrorKind::Internal);
	}

	#[test]
	fn test_failed_delete_is_a_store_error() {
		let conn = table();
		let target = WriteTarget::primary("dish_allergens", &["dish_id"], keys(&["01H"]));
		let err = failure(ffi::SQLITE_IOERR, "disk I/O error");

		let err = write_error(&conn, err, &target, Deadline::after(Duration::from_secs(5)), "assign allergens");
		assert_eq!(err.code(), "STORE_001");
		assert_eq!(err.kind(), ErrorKind::Internal);
	}

	#[test]
	fn test_render_composite_key() {
		let key = vec![Value::Text("01H".to_string()), Value::Integer(7)];
		assert_eq!(render_key(&key), "01H-7");
	}
}
