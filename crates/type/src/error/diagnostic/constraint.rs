// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use super::Diagnostic;

/// Uniqueness violation with the offending key resolved.
///
/// The message text is a compatibility surface: callers match on
/// `Duplicate entry '<key>' for key '<table>.<index>'` verbatim.
pub fn duplicate_entry(key: impl Into<String>, table: &str, index: &str) -> Diagnostic {
	let key = key.into();
	Diagnostic {
		code: "CONFLICT_001".to_string(),
		message: format!("Duplicate entry '{}' for key '{}.{}'", key, table, index),
		label: Some("duplicate key".to_string()),
		help: Some("Use a fresh identifier, or read the existing row instead of inserting it again".to_string()),
		notes: vec![format!("table: {}", table)],
		cause: None,
	}
}

/// Uniqueness violation where the store did not reveal which key collided.
pub fn duplicate_unresolved(table: &str, index: &str, driver_message: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "CONFLICT_002".to_string(),
		message: format!("Duplicate entry for key '{}.{}'", table, index),
		label: Some("duplicate key".to_string()),
		help: None,
		notes: vec![driver_message.into()],
		cause: None,
	}
}

/// A write referenced a row that does not exist (foreign key violation).
pub fn missing_reference(table: &str, detail: impl Into<String>) -> Diagnostic {
	let detail = detail.into();
	Diagnostic {
		code: "NOT_FOUND_002".to_string(),
		message: format!("Referenced row does not exist while writing '{}': {}", table, detail),
		label: Some("missing reference".to_string()),
		help: Some("Create the referenced row before associating with it".to_string()),
		notes: vec![],
		cause: None,
	}
}
