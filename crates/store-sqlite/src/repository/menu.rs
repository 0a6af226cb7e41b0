// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use kondate_core::{Menu, MenuFilter, MenuRepository, MenuWithDishes};
use kondate_type::{Deadline, MenuId, Result, error, error::diagnostic::query::row_not_found};
use rusqlite::{params, types::Value};
use tracing::instrument;

use super::{push_page, push_where, query_all};
use crate::{
	SqliteStore,
	aggregate::menus_with_dishes,
	conflict::{WriteTarget, read_error, write_error},
	ordering::MENU_ORDER,
	row::{MENU_COLUMNS, MenuDishRow, RawMenuRow},
};

const DISH_JOIN: &str = "LEFT JOIN menu_dishes md ON md.menu_id = m.id LEFT JOIN dishes d ON d.id = md.dish_id";

/// Filter conditions over `menus`, with every column qualified by `alias`.
fn conditions(filter: &MenuFilter, alias: &str) -> (Vec<String>, Vec<Value>) {
	let mut conditions = Vec::new();
	let mut params = Vec::new();

	if let Some(from) = filter.offered_from {
		conditions.push(format!("{alias}offered_at >= ?"));
		params.push(Value::Text(from.to_string()));
	}
	if let Some(until) = filter.offered_until {
		conditions.push(format!("{alias}offered_at <= ?"));
		params.push(Value::Text(until.to_string()));
	}
	if let Some(city_code) = filter.city_code {
		conditions.push(format!("{alias}city_code = ?"));
		params.push(Value::Integer(city_code.0.into()));
	}

	(conditions, params)
}

/// Pages over distinct menus first, then joins their dishes, so the limit
/// counts menus rather than joined rows.
pub(crate) fn list_with_dishes_sql(filter: &MenuFilter) -> (String, Vec<Value>) {
	let (conditions, mut params) = conditions(filter, "");

	let mut sql = format!("SELECT {MENU_COLUMNS}, d.id, d.name FROM (SELECT id FROM menus");
	push_where(&mut sql, &conditions);
	sql.push_str(&format!(" ORDER BY {MENU_ORDER}"));
	push_page(&mut sql, &mut params, filter.page);
	sql.push_str(&format!(
		") AS page JOIN menus m ON m.id = page.id {DISH_JOIN} ORDER BY m.offered_at DESC, m.id DESC, md.rowid"
	));

	(sql, params)
}

impl MenuRepository for SqliteStore {
	#[instrument(name = "store::menu::create", level = "debug", skip(self, menu), fields(id = %menu.id))]
	fn create(&self, deadline: Deadline, menu: &Menu) -> Result<()> {
		const OPERATION: &str = "create menu";

		self.run_in_transaction(deadline, OPERATION, |tx| {
			tx.execute(
				"INSERT INTO menus (id, offered_at, photo_url, elementary_school_calories, junior_high_school_calories, city_code) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
				params![
					menu.id.to_string(),
					menu.offered_at.to_string(),
					menu.photo_url,
					menu.elementary_school_calories,
					menu.junior_high_school_calories,
					menu.city_code.0,
				],
			)
			.map_err(|err| {
				let target = WriteTarget::primary("menus", &["id"], vec![vec![Value::Text(menu.id.to_string())]]);
				write_error(tx, err, &target, deadline, OPERATION)
			})?;
			Ok(())
		})
	}

	#[instrument(name = "store::menu::get_with_dishes", level = "debug", skip(self, filter), fields(id = %id))]
	fn get_with_dishes(&self, deadline: Deadline, id: MenuId, filter: &MenuFilter) -> Result<MenuWithDishes> {
		const OPERATION: &str = "get menu with dishes";

		let (mut conditions, filter_params) = conditions(filter, "m.");
		conditions.insert(0, "m.id = ?".to_string());
		let mut params = vec![Value::Text(id.to_string())];
		params.extend(filter_params);

		let mut sql = format!("SELECT {MENU_COLUMNS}, d.id, d.name FROM menus m {DISH_JOIN}");
		push_where(&mut sql, &conditions);
		sql.push_str(" ORDER BY md.rowid");

		self.read(deadline, OPERATION, |conn| {
			let rows = query_all(conn, &sql, &params, MenuDishRow::from_sql_row)
				.map_err(|err| read_error(err, deadline, OPERATION))?;
			menus_with_dishes(rows)?.into_iter().next().ok_or_else(|| error!(row_not_found("menu", id)))
		})
	}

	#[instrument(name = "store::menu::list_with_dishes", level = "debug", skip(self, filter), fields(
		limit = filter.page.limit,
		offset = filter.page.offset
	))]
	fn list_with_dishes(&self, deadline: Deadline, filter: &MenuFilter) -> Result<Vec<MenuWithDishes>> {
		const OPERATION: &str = "list menus with dishes";

		let (sql, params) = list_with_dishes_sql(filter);
		self.read(deadline, OPERATION, |conn| {
			let rows = query_all(conn, &sql, &params, MenuDishRow::from_sql_row)
				.map_err(|err| read_error(err, deadline, OPERATION))?;
			menus_with_dishes(rows)
		})
	}

	#[instrument(name = "store::menu::list", level = "debug", skip(self, filter), fields(
		limit = filter.page.limit,
		offset = filter.page.offset
	))]
	fn list(&self, deadline: Deadline, filter: &MenuFilter) -> Result<Vec<Menu>> {
		const OPERATION: &str = "list menus";

		let (conditions, mut params) = conditions(filter, "m.");
		let mut sql = format!("SELECT {MENU_COLUMNS} FROM menus m");
		push_where(&mut sql, &conditions);
		sql.push_str(" ORDER BY m.offered_at DESC, m.id DESC");
		push_page(&mut sql, &mut params, filter.page);

		self.read(deadline, OPERATION, |conn| {
			query_all(conn, &sql, &params, RawMenuRow::from_sql_row)
				.map_err(|err| read_error(err, deadline, OPERATION))?
				.iter()
				.map(RawMenuRow::decode)
				.collect()
		})
	}
}

#[cfg(test)]
mod tests {
	use kondate_core::{CityCode, Page};
	use kondate_type::Date;

	use super::*;

	#[test]
	fn test_list_sql_pages_menus_before_join() {
		let filter = MenuFilter::default().with_page(Page::new(5, 5));
		let (sql, params) = list_with_dishes_sql(&filter);

		assert_eq!(
			sql,
			"SELECT m.id, m.offered_at, m.photo_url, m.elementary_school_calories, m.junior_high_school_calories, m.city_code, d.id, d.name \
			 FROM (SELECT id FROM menus ORDER BY offered_at DESC, id DESC LIMIT ? OFFSET ?) AS page \
			 JOIN menus m ON m.id = page.id \
			 LEFT JOIN menu_dishes md ON md.menu_id = m.id LEFT JOIN dishes d ON d.id = md.dish_id \
			 ORDER BY m.offered_at DESC, m.id DESC, md.rowid"
		);
		assert_eq!(params, vec![Value::Integer(5), Value::Integer(5)]);
	}

	#[test]
	fn test_list_sql_binds_filters_before_page() {
		let filter = MenuFilter::default()
			.with_city(CityCode(131016))
			.with_range(Date::new(2024, 4, 1), Date::new(2024, 4, 30))
			.with_page(Page::new(10, 0));
		let (sql, params) = list_with_dishes_sql(&filter);

		assert!(sql.contains("WHERE offered_at >= ? AND offered_at <= ? AND city_code = ?"));
		assert_eq!(params, vec![
			Value::Text("2024-04-01".to_string()),
			Value::Text("2024-04-30".to_string()),
			Value::Integer(131016),
			Value::Integer(10),
			Value::Integer(0),
		]);
	}
}
