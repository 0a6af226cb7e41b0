// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

/// Idempotent schema, applied when the store opens.
///
/// `menu_dishes` keeps its rowid: reads order a menu's dishes by it to
/// reproduce association order.
pub const SCHEMA: &str = "
BEGIN;

CREATE TABLE IF NOT EXISTS cities (
	city_code                   INTEGER PRIMARY KEY,
	prefecture_code             INTEGER NOT NULL,
	city_name                   TEXT    NOT NULL,
	prefecture_name             TEXT    NOT NULL,
	school_lunch_info_available INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS menus (
	id                          TEXT    NOT NULL PRIMARY KEY,
	offered_at                  TEXT    NOT NULL,
	photo_url                   TEXT,
	elementary_school_calories  INTEGER NOT NULL,
	junior_high_school_calories INTEGER NOT NULL,
	city_code                   INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS menus_city_code_offered_at ON menus (city_code, offered_at);
CREATE INDEX IF NOT EXISTS menus_offered_at ON menus (offered_at);

CREATE TABLE IF NOT EXISTS dishes (
	id   TEXT NOT NULL PRIMARY KEY,
	name TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS dishes_name ON dishes (name);

CREATE TABLE IF NOT EXISTS menu_dishes (
	menu_id TEXT NOT NULL REFERENCES menus (id),
	dish_id TEXT NOT NULL REFERENCES dishes (id),
	PRIMARY KEY (menu_id, dish_id)
);

CREATE INDEX IF NOT EXISTS menu_dishes_dish_id ON menu_dishes (dish_id);

CREATE TABLE IF NOT EXISTS allergens (
	id   INTEGER PRIMARY KEY AUTOINCREMENT,
	name TEXT    NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS dish_allergens (
	dish_id     TEXT    NOT NULL REFERENCES dishes (id),
	allergen_id INTEGER NOT NULL REFERENCES allergens (id),
	PRIMARY KEY (dish_id, allergen_id)
);

COMMIT;
";
