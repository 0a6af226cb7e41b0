// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Local government code of a municipality.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CityCode(pub i32);

impl Display for CityCode {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self.0, f)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
	pub city_code: CityCode,
	pub prefecture_code: i32,
	pub city_name: String,
	pub prefecture_name: String,
	/// Whether the municipality publishes school lunch menus at all.
	pub school_lunch_info_available: bool,
}
