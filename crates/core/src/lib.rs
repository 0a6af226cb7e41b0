// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

//! Domain model and repository interfaces.
//!
//! Storage backends implement the traits in [`interface`]; the engine only
//! ever talks to those traits.

pub mod filter;
pub mod interface;
pub mod model;

pub use filter::{CityFilter, DishFilter, MenuFilter, Page};
pub use interface::{AllergenRepository, CityRepository, DishRepository, MenuRepository};
pub use model::{Allergen, AllergenId, City, CityCode, Dish, Menu, MenuWithDishes};
