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
use ulid::Ulid;

use crate::error::{Error, diagnostic::value::invalid_id};

macro_rules! define_id {
	($(#[$meta:meta])* $name:ident, $entity:literal) => {
		$(#[$meta])*
		#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
		pub struct $name(Ulid);

		impl $name {
			pub fn generate() -> Self {
				Self(Ulid::new())
			}

			pub fn parse(text: &str) -> crate::Result<Self> {
				Ulid::from_string(text).map(Self).map_err(|_| Error(Box::new(invalid_id($entity, text))))
			}

			pub fn from_ulid(ulid: Ulid) -> Self {
				Self(ulid)
			}
		}

		impl Display for $name {
			fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
				Display::fmt(&self.0, f)
			}
		}

		impl FromStr for $name {
			type Err = Error;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::parse(s)
			}
		}

		impl Serialize for $name {
			fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
			where
				S: Serializer,
			{
				serializer.collect_str(self)
			}
		}

		impl<'de> Deserialize<'de> for $name {
			fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
			where
				D: Deserializer<'de>,
			{
				struct IdVisitor;

				impl<'de> Visitor<'de> for IdVisitor {
					type Value = $name;

					fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
						formatter.write_str(concat!("a ", $entity, " id (26-character ULID)"))
					}

					fn visit_str<E>(self, value: &str) -> Result<$name, E>
					where
						E: de::Error,
					{
						$name::parse(value).map_err(|err| E::custom(err.message()))
					}
				}

				deserializer.deserialize_str(IdVisitor)
			}
		}
	};
}

define_id!(
	/// Identity of a menu. Sorts by creation time.
	MenuId,
	"menu"
);

define_id!(
	/// Identity of a dish.
	DishId,
	"dish"
);

#[cfg(test)]
mod tests {
	use super::*;

	const KNOWN: &str = "01ARZ3NDEKTSV4RRFFQ69G5FAV";

	#[test]
	fn test_parse_and_display_roundtrip() {
		let id = MenuId::parse(KNOWN).unwrap();
		assert_eq!(id.to_string(), KNOWN);
	}

	#[test]
	fn test_parse_rejects_malformed() {
		for text in ["", "not-a-ulid", "01ARZ3NDEKTSV4RRFFQ69G5FA", "01ARZ3NDEKTSV4RRFFQ69G5FAVX"] {
			let err = DishId::parse(text).unwrap_err();
			assert_eq!(err.code(), "ID_001", "{text}");
			assert!(err.message().contains("dish"));
		}
	}

	#[test]
	fn test_generated_ids_are_unique_and_valid() {
		let a = DishId::generate();
		let b = DishId::generate();
		assert_ne!(a, b);
		assert_eq!(DishId::parse(&a.to_string()).unwrap(), a);
	}

	#[test]
	fn test_ordering_matches_text_ordering() {
		let earlier = MenuId::from_ulid(Ulid::from_parts(1_000, 7));
		let later = MenuId::from_ulid(Ulid::from_parts(2_000, 3));
		assert!(earlier < later);
		assert!(earlier.to_string() < later.to_string());
	}

	#[test]
	fn test_serde_as_string() {
		let id = MenuId::parse(KNOWN).unwrap();
		let json = serde_json::to_string(&id).unwrap();
		assert_eq!(json, format!("\"{KNOWN}\""));
		assert_eq!(serde_json::from_str::<MenuId>(&json).unwrap(), id);
		assert!(serde_json::from_str::<MenuId>("\"nope\"").is_err());
	}
}
