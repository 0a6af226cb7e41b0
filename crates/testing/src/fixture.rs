// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

//! Domain values with fresh identities.

use kondate_core::{City, CityCode, Dish, Menu};
use kondate_type::{Date, DishId, MenuId};

pub const CITY_CODE: CityCode = CityCode(131016);

pub fn date(text: &str) -> Date {
	Date::parse(text).unwrap_or_else(|err| panic!("bad fixture date {text}: {err}"))
}

pub fn menu(offered_at: &str) -> Menu {
	menu_in(CITY_CODE, offered_at)
}

pub fn menu_in(city_code: CityCode, offered_at: &str) -> Menu {
	Menu {
		id: MenuId::generate(),
		offered_at: date(offered_at),
		photo_url: None,
		elementary_school_calories: 620,
		junior_high_school_calories: 830,
		city_code,
	}
}

pub fn dish(name: &str) -> Dish {
	Dish {
		id: DishId::generate(),
		name: name.to_string(),
	}
}

/// `count` dishes named `"<prefix> <n>"`.
pub fn dishes(prefix: &str, count: usize) -> Vec<Dish> {
	(0..count).map(|n| dish(&format!("{prefix} {n}"))).collect()
}

pub fn city(code: i32, prefecture_code: i32, name: &str) -> City {
	City {
		city_code: CityCode(code),
		prefecture_code,
		city_name: name.to_string(),
		prefecture_name: format!("Prefecture {prefecture_code}"),
		school_lunch_info_available: true,
	}
}
