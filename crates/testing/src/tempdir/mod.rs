// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use std::{env, fs, path::Path};

use uuid::Uuid;

/// Runs `f` with a fresh, uniquely named directory and removes it afterwards.
pub fn temp_dir<F, R>(f: F) -> R
where
	F: FnOnce(&Path) -> R,
{
	let mut path = env::temp_dir();
	path.push(format!("kondate-{}", Uuid::new_v4()));

	fs::create_dir(&path).unwrap_or_else(|err| panic!("failed to create {}: {}", path.display(), err));
	let result = f(&path);

	let _ = fs::remove_dir_all(&path);
	result
}
