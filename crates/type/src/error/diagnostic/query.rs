// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use std::fmt::Display;

use super::Diagnostic;

pub fn row_not_found(entity: &str, id: impl Display) -> Diagnostic {
	Diagnostic {
		code: "NOT_FOUND_001".to_string(),
		message: format!("{} '{}' not found", entity, id),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn empty_text(field: &str) -> Diagnostic {
	Diagnostic {
		code: "VALIDATION_001".to_string(),
		message: format!("Field '{}' must not be empty", field),
		label: Some("empty value".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn text_too_long(field: &str, actual: usize, max: usize) -> Diagnostic {
	Diagnostic {
		code: "VALIDATION_002".to_string(),
		message: format!("Field '{}' exceeds maximum length: {} characters (max: {})", field, actual, max),
		label: Some("value too long".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn out_of_range(field: &str, value: i64, min: i64, max: i64) -> Diagnostic {
	Diagnostic {
		code: "VALIDATION_003".to_string(),
		message: format!("Field '{}' is out of range: {} (allowed: {}..={})", field, value, min, max),
		label: Some("value out of range".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn invalid_pagination(limit: i64, offset: i64, max_limit: u32) -> Diagnostic {
	Diagnostic {
		code: "VALIDATION_004".to_string(),
		message: format!("Invalid pagination: limit={} offset={}", limit, offset),
		label: Some("invalid pagination".to_string()),
		help: Some(format!("limit must be between 1 and {}, offset must not be negative", max_limit)),
		notes: vec![],
		cause: None,
	}
}

pub fn inverted_date_range(from: impl Display, until: impl Display) -> Diagnostic {
	Diagnostic {
		code: "VALIDATION_005".to_string(),
		message: format!("Date range start {} is after its end {}", from, until),
		label: Some("inverted range".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn invalid_batch_size(actual: usize, max: usize) -> Diagnostic {
	Diagnostic {
		code: "VALIDATION_006".to_string(),
		message: format!("Batch size {} is not allowed (allowed: 1..={})", actual, max),
		label: Some("invalid batch size".to_string()),
		help: Some("Split large batches into several requests".to_string()),
		notes: vec![],
		cause: None,
	}
}
