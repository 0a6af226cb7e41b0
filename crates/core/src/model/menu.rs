// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use kondate_type::{Date, MenuId};
use serde::{Deserialize, Serialize};

use super::{CityCode, Dish};

/// A lunch menu served in one city on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
	pub id: MenuId,
	pub offered_at: Date,
	pub photo_url: Option<String>,
	pub elementary_school_calories: i32,
	pub junior_high_school_calories: i32,
	pub city_code: CityCode,
}

/// A menu together with its dishes in association order.
///
/// Materialized on read from the menu/dish join; never stored as such.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuWithDishes {
	#[serde(flatten)]
	pub menu: Menu,
	pub dishes: Vec<Dish>,
}

impl MenuWithDishes {
	pub fn new(menu: Menu) -> Self {
		Self {
			menu,
			dishes: Vec::new(),
		}
	}

	pub fn id(&self) -> MenuId {
		self.menu.id
	}

	pub fn offered_at(&self) -> Date {
		self.menu.offered_at
	}
}
