// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

//! Raw rows as read from SQLite and their typed decoding.
//!
//! Raw rows hold column values untouched so that reading the result set and
//! validating it stay separate steps; a malformed identity or date surfaces
//! as a validation error instead of a driver error.

use kondate_core::{Allergen, AllergenId, City, CityCode, Dish, Menu};
use kondate_type::{Date, DishId, Error, MenuId, Result, error::diagnostic::value::column_decode};
use rusqlite::Row;

use crate::aggregate::{JoinRow, MenuKey};

/// Column list shared by every query that decodes a [`RawMenuRow`].
pub const MENU_COLUMNS: &str =
	"m.id, m.offered_at, m.photo_url, m.elementary_school_calories, m.junior_high_school_calories, m.city_code";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMenuRow {
	pub id: String,
	pub offered_at: String,
	pub photo_url: Option<String>,
	pub elementary_school_calories: i32,
	pub junior_high_school_calories: i32,
	pub city_code: i32,
}

impl RawMenuRow {
	pub fn from_sql_row(row: &Row<'_>) -> rusqlite::Result<Self> {
		Ok(Self {
			id: row.get(0)?,
			offered_at: row.get(1)?,
			photo_url: row.get(2)?,
			elementary_school_calories: row.get(3)?,
			junior_high_school_calories: row.get(4)?,
			city_code: row.get(5)?,
		})
	}

	pub fn decode(&self) -> Result<Menu> {
		Ok(Menu {
			id: MenuId::parse(&self.id)?,
			offered_at: Date::parse(&self.offered_at)?,
			photo_url: self.photo_url.clone(),
			elementary_school_calories: self.elementary_school_calories,
			junior_high_school_calories: self.junior_high_school_calories,
			city_code: CityCode(self.city_code),
		})
	}
}

/// One row of the menu/dish join: the menu columns followed by the dish
/// columns, which are both `NULL` for a menu without dishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuDishRow {
	pub menu: RawMenuRow,
	pub dish_id: Option<String>,
	pub dish_name: Option<String>,
}

impl MenuDishRow {
	pub fn from_sql_row(row: &Row<'_>) -> rusqlite::Result<Self> {
		Ok(Self {
			menu: RawMenuRow::from_sql_row(row)?,
			dish_id: row.get(6)?,
			dish_name: row.get(7)?,
		})
	}
}

impl JoinRow for MenuDishRow {
	type Key = MenuKey;
	type Parent = Menu;
	type Child = Dish;

	fn key(&self) -> Result<MenuKey> {
		Ok(MenuKey {
			id: MenuId::parse(&self.menu.id)?,
			offered_at: Date::parse(&self.menu.offered_at)?,
		})
	}

	fn parent(&self) -> Result<Menu> {
		self.menu.decode()
	}

	fn child(&self) -> Result<Option<Dish>> {
		match (&self.dish_id, &self.dish_name) {
			(None, None) => Ok(None),
			(Some(id), Some(name)) => Ok(Some(Dish {
				id: DishId::parse(id)?,
				name: name.clone(),
			})),
			(Some(_), None) => Err(Error(Box::new(column_decode("dishes.name", "missing while dish id is present")))),
			(None, Some(_)) => Err(Error(Box::new(column_decode("dishes.id", "missing while dish name is present")))),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDishRow {
	pub id: String,
	pub name: String,
}

impl RawDishRow {
	pub fn from_sql_row(row: &Row<'_>) -> rusqlite::Result<Self> {
		Ok(Self {
			id: row.get(0)?,
			name: row.get(1)?,
		})
	}

	pub fn decode(self) -> Result<Dish> {
		Ok(Dish {
			id: DishId::parse(&self.id)?,
			name: self.name,
		})
	}
}

pub fn city_from_sql_row(row: &Row<'_>) -> rusqlite::Result<City> {
	Ok(City {
		city_code: CityCode(row.get(0)?),
		prefecture_code: row.get(1)?,
		city_name: row.get(2)?,
		prefecture_name: row.get(3)?,
		school_lunch_info_available: row.get(4)?,
	})
}

pub fn allergen_from_sql_row(row: &Row<'_>) -> rusqlite::Result<Allergen> {
	Ok(Allergen {
		id: AllergenId(row.get(0)?),
		name: row.get(1)?,
	})
}
