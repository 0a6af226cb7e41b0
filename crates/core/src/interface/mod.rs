// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

//! Repository traits.
//!
//! Every method is blocking and bound to a [`Deadline`]; implementations
//! abort and roll back once it elapses and report `TIMEOUT_001`. Callers on
//! an async runtime dispatch these through a blocking pool.

use kondate_type::{Deadline, DishId, MenuId, Result};

use crate::{
	filter::{CityFilter, DishFilter, MenuFilter},
	model::{Allergen, AllergenId, City, CityCode, Dish, Menu, MenuWithDishes},
};

pub trait MenuRepository: Send + Sync {
	fn create(&self, deadline: Deadline, menu: &Menu) -> Result<()>;

	/// One menu with its dishes. `filter.city_code` further restricts the
	/// match; no matching row is `NOT_FOUND_001`.
	fn get_with_dishes(&self, deadline: Deadline, id: MenuId, filter: &MenuFilter) -> Result<MenuWithDishes>;

	/// Menus with their dishes, newest `offered_at` first. The page bounds
	/// distinct menus, not joined rows.
	fn list_with_dishes(&self, deadline: Deadline, filter: &MenuFilter) -> Result<Vec<MenuWithDishes>>;

	fn list(&self, deadline: Deadline, filter: &MenuFilter) -> Result<Vec<Menu>>;
}

pub trait DishRepository: Send + Sync {
	/// Inserts the dish and its association to `menu_id` as one unit of work.
	fn create_dish(&self, deadline: Deadline, menu_id: MenuId, dish: &Dish) -> Result<()>;

	/// Inserts all dishes and their associations as one unit of work. Any
	/// duplicate identity, within the batch or against stored dishes, commits
	/// nothing.
	fn create_dishes(&self, deadline: Deadline, menu_id: MenuId, dishes: &[Dish]) -> Result<()>;

	fn get(&self, deadline: Deadline, id: DishId) -> Result<Dish>;

	fn list_by_menu(&self, deadline: Deadline, menu_id: MenuId) -> Result<Vec<Dish>>;

	fn list(&self, deadline: Deadline, filter: &DishFilter) -> Result<Vec<Dish>>;
}

pub trait CityRepository: Send + Sync {
	fn create(&self, deadline: Deadline, city: &City) -> Result<()>;

	fn get(&self, deadline: Deadline, code: CityCode) -> Result<City>;

	fn list(&self, deadline: Deadline, filter: &CityFilter) -> Result<Vec<City>>;
}

pub trait AllergenRepository: Send + Sync {
	fn create(&self, deadline: Deadline, name: &str) -> Result<Allergen>;

	fn list(&self, deadline: Deadline) -> Result<Vec<Allergen>>;

	fn list_by_dish(&self, deadline: Deadline, dish_id: DishId) -> Result<Vec<Allergen>>;

	/// Associates every allergen with the dish in one unit of work.
	fn assign_allergens(&self, deadline: Deadline, dish_id: DishId, allergen_ids: &[AllergenId]) -> Result<()>;
}
