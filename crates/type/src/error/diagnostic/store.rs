// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use super::Diagnostic;

pub fn database_error(message: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "STORE_001".to_string(),
		message: format!("Database error: {}", message.into()),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn schema_failed(message: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "STORE_002".to_string(),
		message: format!("Failed to apply schema: {}", message.into()),
		label: None,
		help: Some("Check that the database file is writable and not held by another process".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn connection_failed(message: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "POOL_001".to_string(),
		message: format!("Failed to acquire a database connection: {}", message.into()),
		label: None,
		help: Some("Raise max_pool_size or the request deadline".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn transaction_failed(stage: &str, message: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "TXN_001".to_string(),
		message: format!("Failed to {} transaction: {}", stage, message.into()),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}

/// Rollback after a failed unit of work also failed.
///
/// Both messages are kept; the original failure becomes the cause.
pub fn rollback_failed(rollback_message: impl Into<String>, original: Diagnostic) -> Diagnostic {
	Diagnostic {
		code: "TXN_002".to_string(),
		message: format!("{}: {}", rollback_message.into(), original.message),
		label: Some("rollback failed".to_string()),
		help: None,
		notes: vec![],
		cause: Some(Box::new(original)),
	}
}

pub fn empty_bulk_insert(table: &str) -> Diagnostic {
	Diagnostic {
		code: "STATEMENT_001".to_string(),
		message: format!("Bulk insert into '{}' has no rows", table),
		label: Some("empty batch".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn row_arity_mismatch(table: &str, row: usize, expected: usize, actual: usize) -> Diagnostic {
	Diagnostic {
		code: "STATEMENT_002".to_string(),
		message: format!(
			"Bulk insert into '{}': row {} has {} values, expected {}",
			table, row, actual, expected
		),
		label: Some("arity mismatch".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn too_many_parameters(table: &str, count: usize, limit: usize) -> Diagnostic {
	Diagnostic {
		code: "STATEMENT_003".to_string(),
		message: format!("Bulk insert into '{}' binds {} parameters (limit: {})", table, count, limit),
		label: Some("too many parameters".to_string()),
		help: Some("Split the batch into smaller chunks".to_string()),
		notes: vec![],
		cause: None,
	}
}
