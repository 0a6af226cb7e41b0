// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use super::Diagnostic;

/// The caller's deadline elapsed before the operation finished.
pub fn deadline_exceeded(operation: &str) -> Diagnostic {
	Diagnostic {
		code: "TIMEOUT_001".to_string(),
		message: format!("Deadline exceeded during {}", operation),
		label: Some("operation timed out".to_string()),
		help: Some("Retry the request, or raise the configured query timeout".to_string()),
		notes: vec!["Any open transaction was rolled back; nothing was committed".to_string()],
		cause: None,
	}
}

pub fn internal(reason: impl Into<String>) -> Diagnostic {
	let reason = reason.into();
	Diagnostic {
		code: "INTERNAL_001".to_string(),
		message: format!("Internal error: {}", reason),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn task_failed(reason: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "INTERNAL_002".to_string(),
		message: format!("Background task failed: {}", reason.into()),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}
