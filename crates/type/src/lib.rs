// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

//! Shared value types and the diagnostic error model used across the Kondate
//! workspace.
//!
//! Every fallible operation returns [`Result`], whose error wraps a
//! [`Diagnostic`] carrying a stable code. Callers branch on [`ErrorKind`]
//! rather than on message text.

pub mod deadline;
pub mod error;
pub mod value;

pub use deadline::Deadline;
pub use error::{Diagnostic, Error, ErrorKind, IntoDiagnostic, Result};
pub use value::{
	date::Date,
	id::{DishId, MenuId},
};
