// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use std::time::{Duration, Instant};

use crate::error::{Error, diagnostic::runtime::deadline_exceeded};

/// Absolute instant after which an operation must abort and roll back.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Deadline(Instant);

impl Deadline {
	pub fn after(timeout: Duration) -> Self {
		Self(Instant::now() + timeout)
	}

	pub fn at(instant: Instant) -> Self {
		Self(instant)
	}

	pub fn instant(&self) -> Instant {
		self.0
	}

	/// Time left, zero once expired.
	pub fn remaining(&self) -> Duration {
		self.0.saturating_duration_since(Instant::now())
	}

	pub fn is_expired(&self) -> bool {
		Instant::now() >= self.0
	}

	pub fn check(&self, operation: &str) -> crate::Result<()> {
		if self.is_expired() {
			return Err(Error(Box::new(deadline_exceeded(operation))));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ErrorKind;

	#[test]
	fn test_future_deadline_passes_check() {
		let deadline = Deadline::after(Duration::from_secs(60));
		assert!(!deadline.is_expired());
		assert!(deadline.remaining() > Duration::from_secs(50));
		deadline.check("test").unwrap();
	}

	#[test]
	fn test_expired_deadline_fails_check() {
		let deadline = Deadline::at(Instant::now());
		assert!(deadline.is_expired());
		assert_eq!(deadline.remaining(), Duration::ZERO);

		let err = deadline.check("list menus").unwrap_err();
		assert_eq!(err.code(), "TIMEOUT_001");
		assert_eq!(err.kind(), ErrorKind::Timeout);
		assert!(err.message().contains("list menus"));
	}
}
