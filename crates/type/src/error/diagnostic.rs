// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

pub mod constraint;
pub mod query;
pub mod runtime;
pub mod server;
pub mod store;
pub mod value;

use std::fmt::{Display, Formatter, Write};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
	pub code: String,
	pub message: String,
	pub label: Option<String>,
	pub help: Option<String>,
	pub notes: Vec<String>,
	pub cause: Option<Box<Diagnostic>>,
}

/// Conversion from a library-local error enum into a [`Diagnostic`].
pub trait IntoDiagnostic {
	fn into_diagnostic(self) -> Diagnostic;
}

impl Diagnostic {
	pub fn with_cause(mut self, cause: Diagnostic) -> Self {
		self.cause = Some(Box::new(cause));
		self
	}

	pub fn with_note(mut self, note: impl Into<String>) -> Self {
		self.notes.push(note.into());
		self
	}

	/// Multi-line rendering including help, notes and the cause chain.
	pub fn render(&self) -> String {
		let mut out = String::new();
		self.render_into(&mut out, 0);
		out
	}

	fn render_into(&self, out: &mut String, depth: usize) {
		let indent = "  ".repeat(depth);
		let _ = writeln!(out, "{indent}Error {}: {}", self.code, self.message);
		if let Some(label) = &self.label {
			let _ = writeln!(out, "{indent}  = {label}");
		}
		if let Some(help) = &self.help {
			let _ = writeln!(out, "{indent}  help: {help}");
		}
		for note in &self.notes {
			let _ = writeln!(out, "{indent}  note: {note}");
		}
		if let Some(cause) = &self.cause {
			let _ = writeln!(out, "{indent}  caused by:");
			cause.render_into(out, depth + 1);
		}
	}
}

impl Display for Diagnostic {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.code)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_render_includes_cause_chain() {
		let original = constraint::duplicate_entry("abc", "dishes", "PRIMARY");
		let diagnostic = store::rollback_failed("disk I/O error", original);
		let rendered = diagnostic.render();
		assert!(rendered.contains("Error TXN_002"));
		assert!(rendered.contains("caused by:"));
		assert!(rendered.contains("Error CONFLICT_001"));
	}

	#[test]
	fn test_serialization_roundtrips_through_json() {
		let diagnostic = query::row_not_found("menu", "01ARZ3NDEKTSV4RRFFQ69G5FAV");
		let json = serde_json::to_string(&diagnostic).unwrap();
		let back: Diagnostic = serde_json::from_str(&json).unwrap();
		assert_eq!(back, diagnostic);
	}
}
