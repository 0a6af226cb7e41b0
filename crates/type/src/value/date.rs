// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{
	Deserialize, Deserializer, Serialize, Serializer,
	de::{self, Visitor},
};
use time::{Month, format_description::FormatItem, macros::format_description};

use crate::error::{Error, diagnostic::value::invalid_date};

const FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// A calendar date without time of day, the day a menu is served.
///
/// Rendered and parsed as `YYYY-MM-DD`. Orders chronologically, which for
/// four-digit years is also the lexicographic order of the text form, so the
/// stored column sorts the same way as this type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Date(time::Date);

impl Date {
	pub fn new(year: i32, month: u8, day: u8) -> Option<Self> {
		let month = Month::try_from(month).ok()?;
		time::Date::from_calendar_date(year, month, day).ok().map(Self)
	}

	pub fn parse(text: &str) -> crate::Result<Self> {
		time::Date::parse(text, FORMAT).map(Self).map_err(|_| Error(Box::new(invalid_date(text))))
	}

	pub fn year(&self) -> i32 {
		self.0.year()
	}

	pub fn month(&self) -> u8 {
		self.0.month().into()
	}

	pub fn day(&self) -> u8 {
		self.0.day()
	}
}

impl Display for Date {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
	}
}

impl FromStr for Date {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl Serialize for Date {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.collect_str(self)
	}
}

struct DateVisitor;

impl<'de> Visitor<'de> for DateVisitor {
	type Value = Date;

	fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
		formatter.write_str("a date in YYYY-MM-DD format")
	}

	fn visit_str<E>(self, value: &str) -> Result<Date, E>
	where
		E: de::Error,
	{
		Date::parse(value).map_err(|err| E::custom(err.message()))
	}
}

impl<'de> Deserialize<'de> for Date {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_str(DateVisitor)
	}
}
