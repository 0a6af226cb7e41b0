// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use kondate_type::Date;

use crate::model::CityCode;

/// Limit/offset window over distinct top-level rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
	pub limit: u32,
	pub offset: u32,
}

impl Page {
	pub const fn new(limit: u32, offset: u32) -> Self {
		Self {
			limit,
			offset,
		}
	}
}

impl Default for Page {
	fn default() -> Self {
		Self::new(10, 0)
	}
}

/// Selects menus. Both date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuFilter {
	pub offered_from: Option<Date>,
	pub offered_until: Option<Date>,
	pub city_code: Option<CityCode>,
	pub page: Page,
}

impl MenuFilter {
	pub fn with_city(mut self, city_code: CityCode) -> Self {
		self.city_code = Some(city_code);
		self
	}

	pub fn with_range(mut self, from: Option<Date>, until: Option<Date>) -> Self {
		self.offered_from = from;
		self.offered_until = until;
		self
	}

	pub fn with_page(mut self, page: Page) -> Self {
		self.page = page;
		self
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DishFilter {
	pub name_prefix: Option<String>,
	pub page: Page,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityFilter {
	pub prefecture_code: Option<i32>,
	pub school_lunch_info_available: Option<bool>,
	pub page: Page,
}
