// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use std::cmp::Ordering;

use crate::aggregate::MenuKey;

/// `ORDER BY` clause matching [`newest_first`], for queries over `menus`.
pub const MENU_ORDER: &str = "offered_at DESC, id DESC";

/// Latest `offered_at` first; equal dates put the newer identity first.
pub fn newest_first(a: &MenuKey, b: &MenuKey) -> Ordering {
	b.offered_at.cmp(&a.offered_at).then_with(|| b.id.cmp(&a.id))
}
