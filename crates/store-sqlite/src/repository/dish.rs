// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use kondate_core::{Dish, DishFilter, DishRepository};
use kondate_type::{Deadline, DishId, MenuId, Result, error, error::diagnostic::query::row_not_found};
use rusqlite::{OptionalExtension, params, types::Value};
use tracing::{debug, instrument};

use super::{escape_like_prefix, push_page, push_where, query_all};
use crate::{
	SqliteStore,
	conflict::{WriteTarget, read_error, write_error},
	row::RawDishRow,
	statement::BulkInsert,
};

const DISH_COLUMNS: &[&str] = &["id", "name"];
const ASSOCIATION_COLUMNS: &[&str] = &["menu_id", "dish_id"];

fn dish_target(dishes: &[Dish]) -> WriteTarget<'static> {
	WriteTarget::primary("dishes", &["id"], dishes.iter().map(|dish| vec![Value::Text(dish.id.to_string())]).collect())
}

fn association_target(menu_id: MenuId, dishes: &[Dish]) -> WriteTarget<'static> {
	WriteTarget::primary("menu_dishes", ASSOCIATION_COLUMNS, association_rows(menu_id, dishes))
}

fn association_rows(menu_id: MenuId, dishes: &[Dish]) -> Vec<Vec<Value>> {
	dishes.iter().map(|dish| vec![Value::Text(menu_id.to_string()), Value::Text(dish.id.to_string())]).collect()
}

impl DishRepository for SqliteStore {
	#[instrument(name = "store::dish::create_dish", level = "debug", skip(self, dish), fields(dish_id = %dish.id))]
	fn create_dish(&self, deadline: Deadline, menu_id: MenuId, dish: &Dish) -> Result<()> {
		const OPERATION: &str = "create dish";
		let single = std::slice::from_ref(dish);

		self.run_in_transaction(deadline, OPERATION, |tx| {
			tx.execute("INSERT INTO dishes (id, name) VALUES (?1, ?2)", params![dish.id.to_string(), dish.name])
				.map_err(|err| write_error(tx, err, &dish_target(single), deadline, OPERATION))?;

			tx.execute(
				"INSERT INTO menu_dishes (menu_id, dish_id) VALUES (?1, ?2)",
				params![menu_id.to_string(), dish.id.to_string()],
			)
			.map_err(|err| write_error(tx, err, &association_target(menu_id, single), deadline, OPERATION))?;

			Ok(())
		})
	}

	#[instrument(name = "store::dish::create_dishes", level = "debug", skip(self, dishes), fields(count = dishes.len()))]
	fn create_dishes(&self, deadline: Deadline, menu_id: MenuId, dishes: &[Dish]) -> Result<()> {
		const OPERATION: &str = "create dishes";

		let insert_dishes = BulkInsert::build(
			"dishes",
			DISH_COLUMNS,
			dishes.iter().map(|dish| vec![Value::Text(dish.id.to_string()), Value::Text(dish.name.clone())]).collect(),
		)?;
		let insert_associations = BulkInsert::build("menu_dishes", ASSOCIATION_COLUMNS, association_rows(menu_id, dishes))?;

		self.run_in_transaction(deadline, OPERATION, |tx| {
			insert_dishes.execute(tx).map_err(|err| write_error(tx, err, &dish_target(dishes), deadline, OPERATION))?;

			insert_associations
				.execute(tx)
				.map_err(|err| write_error(tx, err, &association_target(menu_id, dishes), deadline, OPERATION))?;

			debug!(menu_id = %menu_id, rows = insert_dishes.rows(), "dishes inserted");
			Ok(())
		})
	}

	#[instrument(name = "store::dish::get", level = "trace", skip(self), fields(id = %id))]
	fn get(&self, deadline: Deadline, id: DishId) -> Result<Dish> {
		const OPERATION: &str = "get dish";

		self.read(deadline, OPERATION, |conn| {
			conn.query_row("SELECT id, name FROM dishes WHERE id = ?1", params![id.to_string()], RawDishRow::from_sql_row)
				.optional()
				.map_err(|err| read_error(err, deadline, OPERATION))?
				.ok_or_else(|| error!(row_not_found("dish", id)))?
				.decode()
		})
	}

	#[instrument(name = "store::dish::list_by_menu", level = "debug", skip(self), fields(menu_id = %menu_id))]
	fn list_by_menu(&self, deadline: Deadline, menu_id: MenuId) -> Result<Vec<Dish>> {
		const OPERATION: &str = "list dishes by menu";

		self.read(deadline, OPERATION, |conn| {
			query_all(
				conn,
				"SELECT d.id, d.name FROM menu_dishes md JOIN dishes d ON d.id = md.dish_id WHERE md.menu_id = ? ORDER BY md.rowid",
				&[Value::Text(menu_id.to_string())],
				RawDishRow::from_sql_row,
			)
			.map_err(|err| read_error(err, deadline, OPERATION))?
			.into_iter()
			.map(RawDishRow::decode)
			.collect()
		})
	}

	#[instrument(name = "store::dish::list", level = "debug", skip(self, filter), fields(
		limit = filter.page.limit,
		offset = filter.page.offset
	))]
	fn list(&self, deadline: Deadline, filter: &DishFilter) -> Result<Vec<Dish>> {
		const OPERATION: &str = "list dishes";

		let mut conditions = Vec::new();
		let mut params = Vec::new();
		if let Some(prefix) = &filter.name_prefix {
			conditions.push("name LIKE ? ESCAPE '!'".to_string());
			params.push(Value::Text(escape_like_prefix(prefix)));
		}

		let mut sql = "SELECT id, name FROM dishes".to_string();
		push_where(&mut sql, &conditions);
		sql.push_str(" ORDER BY id");
		push_page(&mut sql, &mut params, filter.page);

		self.read(deadline, OPERATION, |conn| {
			query_all(conn, &sql, &params, RawDishRow::from_sql_row)
				.map_err(|err| read_error(err, deadline, OPERATION))?
				.into_iter()
				.map(RawDishRow::decode)
				.collect()
		})
	}
}
