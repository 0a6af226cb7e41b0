// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use kondate_core::{Allergen, AllergenId, AllergenRepository};
use kondate_type::{Deadline, DishId, Result, error::diagnostic::constraint::missing_reference, return_error};
use rusqlite::{OptionalExtension, params, types::Value};
use tracing::instrument;

use super::query_all;
use crate::{
	SqliteStore,
	conflict::{WriteTarget, read_error, write_error},
	row::allergen_from_sql_row,
	statement::BulkInsert,
};

const DISH_ALLERGEN_COLUMNS: &[&str] = &["dish_id", "allergen_id"];

impl AllergenRepository for SqliteStore {
	#[instrument(name = "store::allergen::create", level = "debug", skip(self))]
	fn create(&self, deadline: Deadline, name: &str) -> Result<Allergen> {
		const OPERATION: &str = "create allergen";

		self.run_in_transaction(deadline, OPERATION, |tx| {
			tx.execute("INSERT INTO allergens (name) VALUES (?1)", params![name]).map_err(|err| {
				let target = WriteTarget {
					table: "allergens",
					index: "name",
					key_columns: &["name"],
					keys: vec![vec![Value::Text(name.to_string())]],
				};
				write_error(tx, err, &target, deadline, OPERATION)
			})?;

			Ok(Allergen {
				id: AllergenId(tx.last_insert_rowid()),
				name: name.to_string(),
			})
		})
	}

	#[instrument(name = "store::allergen::list", level = "debug", skip(self))]
	fn list(&self, deadline: Deadline) -> Result<Vec<Allergen>> {
		const OPERATION: &str = "list allergens";

		self.read(deadline, OPERATION, |conn| {
			query_all(conn, "SELECT id, name FROM allergens ORDER BY id", &[], allergen_from_sql_row)
				.map_err(|err| read_error(err, deadline, OPERATION))
		})
	}

	#[instrument(name = "store::allergen::list_by_dish", level = "debug", skip(self), fields(dish_id = %dish_id))]
	fn list_by_dish(&self, deadline: Deadline, dish_id: DishId) -> Result<Vec<Allergen>> {
		const OPERATION: &str = "list allergens by dish";

		self.read(deadline, OPERATION, |conn| {
			query_all(
				conn,
				"SELECT a.id, a.name FROM dish_allergens da JOIN allergens a ON a.id = da.allergen_id WHERE da.dish_id = ? ORDER BY a.id",
				&[Value::Text(dish_id.to_string())],
				allergen_from_sql_row,
			)
			.map_err(|err| read_error(err, deadline, OPERATION))
		})
	}

	/// Replaces the allergens of a dish.
	#[instrument(name = "store::allergen::assign", level = "debug", skip(self, allergen_ids), fields(
		dish_id = %dish_id,
		count = allergen_ids.len()
	))]
	fn assign_allergens(&self, deadline: Deadline, dish_id: DishId, allergen_ids: &[AllergenId]) -> Result<()> {
		const OPERATION: &str = "assign allergens";

		let rows: Vec<Vec<Value>> = allergen_ids
			.iter()
			.map(|allergen_id| vec![Value::Text(dish_id.to_string()), Value::Integer(allergen_id.0)])
			.collect();
		// an empty list clears the dish's allergens
		let insert = match rows.is_empty() {
			true => None,
			false => Some(BulkInsert::build("dish_allergens", DISH_ALLERGEN_COLUMNS, rows.clone())?),
		};

		self.run_in_transaction(deadline, OPERATION, |tx| {
			let dish = tx
				.query_row("SELECT 1 FROM dishes WHERE id = ?1", params![dish_id.to_string()], |_| Ok(()))
				.optional()
				.map_err(|err| read_error(err, deadline, OPERATION))?;
			if dish.is_none() {
				return_error!(missing_reference("dish_allergens", format!("dish '{}' does not exist", dish_id)));
			}

			tx.execute("DELETE FROM dish_allergens WHERE dish_id = ?1", params![dish_id.to_string()]).map_err(|err| {
				let target =
					WriteTarget::primary("dish_allergens", &["dish_id"], vec![vec![Value::Text(dish_id.to_string())]]);
				write_error(tx, err, &target, deadline, OPERATION)
			})?;

			if let Some(insert) = &insert {
				insert.execute(tx).map_err(|err| {
					let target = WriteTarget::primary("dish_allergens", DISH_ALLERGEN_COLUMNS, rows);
					write_error(tx, err, &target, deadline, OPERATION)
				})?;
			}

			Ok(())
		})
	}
}
