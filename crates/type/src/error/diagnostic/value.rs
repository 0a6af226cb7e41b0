// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use super::Diagnostic;

pub fn invalid_id(entity: &str, text: &str) -> Diagnostic {
	Diagnostic {
		code: "ID_001".to_string(),
		message: format!("Invalid {} id '{}'", entity, text),
		label: Some("not a ULID".to_string()),
		help: Some("Identifiers are 26-character Crockford base32 ULIDs".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn invalid_date(text: &str) -> Diagnostic {
	Diagnostic {
		code: "DATE_001".to_string(),
		message: format!("Invalid date '{}'", text),
		label: Some("not a calendar date".to_string()),
		help: Some("Dates use the YYYY-MM-DD format".to_string()),
		notes: vec![],
		cause: None,
	}
}

/// A stored column could not be decoded into its typed field.
pub fn column_decode(column: &str, reason: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "DECODE_001".to_string(),
		message: format!("Failed to decode column '{}': {}", column, reason.into()),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}
