// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

//! Reassembly of parent + children aggregates from flat join rows.

use std::hash::Hash;

use indexmap::IndexMap;
use kondate_core::MenuWithDishes;
use kondate_type::{Date, MenuId, Result};

use crate::{ordering::newest_first, row::MenuDishRow};

/// A row of a one-to-many join.
pub trait JoinRow {
	type Key: Hash + Eq;
	type Parent;
	type Child;

	/// Identity of the parent this row belongs to.
	fn key(&self) -> Result<Self::Key>;

	fn parent(&self) -> Result<Self::Parent>;

	/// The child carried by this row, `None` for a parent without children.
	fn child(&self) -> Result<Option<Self::Child>>;
}

/// Grouping key of a menu aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuKey {
	pub id: MenuId,
	pub offered_at: Date,
}

/// Groups rows by key in first-seen order.
///
/// The parent is decoded from the first row of each key. Children are
/// appended in arrival order without de-duplication. Any row that fails to
/// decode fails the whole build.
pub fn group<R, I>(rows: I) -> Result<IndexMap<R::Key, (R::Parent, Vec<R::Child>)>>
where
	R: JoinRow,
	I: IntoIterator<Item = R>,
{
	let mut groups: IndexMap<R::Key, (R::Parent, Vec<R::Child>)> = IndexMap::new();

	for row in rows {
		let key = row.key()?;
		let child = row.child()?;

		let (_, children) = match groups.entry(key) {
			indexmap::map::Entry::Occupied(entry) => entry.into_mut(),
			indexmap::map::Entry::Vacant(entry) => entry.insert((row.parent()?, Vec::new())),
		};
		if let Some(child) = child {
			children.push(child);
		}
	}

	Ok(groups)
}

/// Builds menu aggregates, newest `offered_at` first.
pub fn menus_with_dishes(rows: Vec<MenuDishRow>) -> Result<Vec<MenuWithDishes>> {
	let mut groups: Vec<(MenuKey, MenuWithDishes)> = group(rows)?
		.into_iter()
		.map(|(key, (menu, dishes))| {
			(key, MenuWithDishes {
				menu,
				dishes,
			})
		})
		.collect();

	groups.sort_by(|(a, _), (b, _)| newest_first(a, b));
	Ok(groups.into_iter().map(|(_, aggregate)| aggregate).collect())
}
