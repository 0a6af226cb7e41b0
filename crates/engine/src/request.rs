// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

//! Unvalidated inputs, as they arrive from a caller.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMenu {
	pub offered_at: String,
	#[serde(default)]
	pub photo_url: Option<String>,
	pub elementary_school_calories: i32,
	pub junior_high_school_calories: i32,
	pub city_code: i32,
}

/// A dish to create. Without an `id` the engine assigns a fresh one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDish {
	#[serde(default)]
	pub id: Option<String>,
	pub name: String,
}

impl NewDish {
	pub fn named(name: impl Into<String>) -> Self {
		Self {
			id: None,
			name: name.into(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCity {
	pub city_code: i32,
	pub prefecture_code: i32,
	pub city_name: String,
	pub prefecture_name: String,
	#[serde(default)]
	pub school_lunch_info_available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAllergen {
	pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MenuQuery {
	pub offered_from: Option<String>,
	pub offered_until: Option<String>,
	pub city_code: Option<i32>,
	pub limit: Option<i64>,
	pub offset: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DishQuery {
	pub name_prefix: Option<String>,
	pub limit: Option<i64>,
	pub offset: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CityQuery {
	pub prefecture_code: Option<i32>,
	pub available: Option<bool>,
	pub limit: Option<i64>,
	pub offset: Option<i64>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_new_dish_id_is_optional() {
		let dish: NewDish = serde_json::from_str(r#"{"name": "Curry rice"}"#).unwrap();
		assert_eq!(dish, NewDish::named("Curry rice"));
	}

	#[test]
	fn test_new_city_availability_defaults_off() {
		let city: NewCity = serde_json::from_str(
			r#"{"city_code": 131016, "prefecture_code": 13, "city_name": "Chiyoda", "prefecture_name": "Tokyo"}"#,
		)
		.unwrap();
		assert!(!city.school_lunch_info_available);
	}
}
