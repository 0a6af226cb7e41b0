// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use std::fmt::Display;

use super::Diagnostic;

pub fn bind_failed(addr: &str, reason: impl Display) -> Diagnostic {
	Diagnostic {
		code: "SERVER_001".to_string(),
		message: format!("Failed to bind {}: {}", addr, reason),
		label: None,
		help: Some("Check that the address is valid and the port is free".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn address_unavailable(reason: impl Display) -> Diagnostic {
	Diagnostic {
		code: "SERVER_002".to_string(),
		message: format!("Bound address unavailable: {}", reason),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}
