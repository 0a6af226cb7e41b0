// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

mod allergen;
mod city;
mod dish;
mod menu;

pub use allergen::{Allergen, AllergenId};
pub use city::{City, CityCode};
pub use dish::Dish;
pub use menu::{Menu, MenuWithDishes};
