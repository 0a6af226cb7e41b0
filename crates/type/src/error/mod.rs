// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

pub mod diagnostic;

use std::fmt::{Display, Formatter};

pub use diagnostic::{Diagnostic, IntoDiagnostic};

pub type Result<T> = std::result::Result<T, Error>;

/// Wraps a [`Diagnostic`]; the diagnostic code decides the [`ErrorKind`].
#[derive(Debug, Clone, PartialEq)]
pub struct Error(pub Box<Diagnostic>);

/// Coarse classification of an [`Error`], used to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// Malformed identity, row, statement or request field.
	Validation,
	/// Uniqueness violation on insert.
	Conflict,
	/// No row matched, or a write referenced a missing row.
	NotFound,
	/// The caller's deadline elapsed.
	Timeout,
	/// Anything else: connectivity, transaction or driver failures.
	Internal,
}

impl ErrorKind {
	pub fn from_code(code: &str) -> Self {
		let family = code.split('_').next().unwrap_or_default();
		match family {
			"ID" | "DATE" | "VALIDATION" | "STATEMENT" | "DECODE" => ErrorKind::Validation,
			"CONFLICT" => ErrorKind::Conflict,
			"NOT" if code.starts_with("NOT_FOUND_") => ErrorKind::NotFound,
			"TIMEOUT" => ErrorKind::Timeout,
			_ => ErrorKind::Internal,
		}
	}
}

impl Error {
	pub fn diagnostic(self) -> Diagnostic {
		*self.0
	}

	pub fn code(&self) -> &str {
		&self.0.code
	}

	pub fn message(&self) -> &str {
		&self.0.message
	}

	pub fn kind(&self) -> ErrorKind {
		ErrorKind::from_code(&self.0.code)
	}

	pub fn is_conflict(&self) -> bool {
		self.kind() == ErrorKind::Conflict
	}

	pub fn is_timeout(&self) -> bool {
		self.kind() == ErrorKind::Timeout
	}
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0.message)
	}
}

impl std::error::Error for Error {}

impl From<Diagnostic> for Error {
	fn from(diagnostic: Diagnostic) -> Self {
		Error(Box::new(diagnostic))
	}
}

/// Builds an [`Error`] from a diagnostic constructor call.
///
/// ```ignore
/// return Err(error!(row_not_found("menu", id)));
/// ```
#[macro_export]
macro_rules! error {
	($diagnostic:expr) => {
		$crate::error::Error(Box::new($diagnostic))
	};
}

/// Returns early with an [`Error`] built from a diagnostic.
#[macro_export]
macro_rules! return_error {
	($diagnostic:expr) => {
		return Err($crate::error!($diagnostic))
	};
}
