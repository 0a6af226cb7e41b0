// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

//! Input checks run before any repository call.

use kondate_core::{City, CityCode, Dish, Menu, Page};
use kondate_type::{
	Date, DishId, MenuId, Result,
	error::diagnostic::query::{
		empty_text, invalid_batch_size, invalid_pagination, inverted_date_range, out_of_range, text_too_long,
	},
	return_error,
};

use crate::{
	EngineConfig,
	request::{NewCity, NewDish, NewMenu},
};

pub const MAX_NAME_LENGTH: usize = 128;
pub const MAX_CALORIES: i32 = 5000;

/// Trims `value` and checks it is non-empty and at most [`MAX_NAME_LENGTH`]
/// characters.
pub fn name(field: &str, value: &str) -> Result<String> {
	let trimmed = value.trim();
	if trimmed.is_empty() {
		return_error!(empty_text(field));
	}

	let length = trimmed.chars().count();
	if length > MAX_NAME_LENGTH {
		return_error!(text_too_long(field, length, MAX_NAME_LENGTH));
	}

	Ok(trimmed.to_string())
}

pub fn calories(field: &str, value: i32) -> Result<i32> {
	if !(0..=MAX_CALORIES).contains(&value) {
		return_error!(out_of_range(field, value.into(), 0, MAX_CALORIES.into()));
	}
	Ok(value)
}

pub fn page(limit: Option<i64>, offset: Option<i64>, config: &EngineConfig) -> Result<Page> {
	let limit_value = limit.unwrap_or(config.default_page_size.into());
	let offset_value = offset.unwrap_or(0);

	if limit_value < 1 || limit_value > i64::from(config.max_page_size) || offset_value < 0 {
		return_error!(invalid_pagination(limit_value, offset_value, config.max_page_size));
	}

	let Ok(offset) = u32::try_from(offset_value) else {
		return_error!(invalid_pagination(limit_value, offset_value, config.max_page_size));
	};

	// bounded by max_page_size above
	Ok(Page::new(limit_value as u32, offset))
}

pub fn date(value: Option<&str>) -> Result<Option<Date>> {
	value.map(Date::parse).transpose()
}

pub fn range(from: Option<&str>, until: Option<&str>) -> Result<(Option<Date>, Option<Date>)> {
	let from = date(from)?;
	let until = date(until)?;

	if let (Some(from), Some(until)) = (from, until) {
		if from > until {
			return_error!(inverted_date_range(from, until));
		}
	}

	Ok((from, until))
}

pub fn batch_size(actual: usize, config: &EngineConfig) -> Result<()> {
	if actual == 0 || actual > config.max_batch_size {
		return_error!(invalid_batch_size(actual, config.max_batch_size));
	}
	Ok(())
}

pub fn menu(request: NewMenu) -> Result<Menu> {
	Ok(Menu {
		id: MenuId::generate(),
		offered_at: Date::parse(&request.offered_at)?,
		photo_url: request.photo_url.map(|url| url.trim().to_string()).filter(|url| !url.is_empty()),
		elementary_school_calories: calories("elementary_school_calories", request.elementary_school_calories)?,
		junior_high_school_calories: calories("junior_high_school_calories", request.junior_high_school_calories)?,
		city_code: CityCode(request.city_code),
	})
}

pub fn dish(request: NewDish) -> Result<Dish> {
	let id = match request.id.as_deref() {
		Some(id) => DishId::parse(id)?,
		None => DishId::generate(),
	};

	Ok(Dish {
		id,
		name: name("name", &request.name)?,
	})
}

pub fn city(request: NewCity) -> Result<City> {
	Ok(City {
		city_code: CityCode(request.city_code),
		prefecture_code: request.prefecture_code,
		city_name: name("city_name", &request.city_name)?,
		prefecture_name: name("prefecture_name", &request.prefecture_name)?,
		school_lunch_info_available: request.school_lunch_info_available,
	})
}
