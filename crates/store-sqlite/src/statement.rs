// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use kondate_type::{
	Result,
	error::diagnostic::store::{empty_bulk_insert, row_arity_mismatch, too_many_parameters},
	return_error,
};
use rusqlite::{Connection, params_from_iter, types::Value};

/// SQLite's ceiling on host parameters in one statement.
pub const MAX_HOST_PARAMETERS: usize = 32_766;

/// One `INSERT` statement inserting many rows.
///
/// Row `i` of a table with `k` columns owns parameters `i*k .. i*k + k`.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkInsert {
	sql: String,
	params: Vec<Value>,
	rows: usize,
}

impl BulkInsert {
	pub fn build(table: &str, columns: &[&str], rows: Vec<Vec<Value>>) -> Result<Self> {
		if rows.is_empty() {
			return_error!(empty_bulk_insert(table));
		}

		let width = columns.len();
		let total = rows.len() * width;
		if total > MAX_HOST_PARAMETERS {
			return_error!(too_many_parameters(table, total, MAX_HOST_PARAMETERS));
		}

		let group = format!("({})", vec!["?"; width].join(", "));
		let mut sql = format!("INSERT INTO {} ({}) VALUES ", table, columns.join(", "));
		let mut params = Vec::with_capacity(total);
		let count = rows.len();

		for (index, row) in rows.into_iter().enumerate() {
			if row.len() != width {
				return_error!(row_arity_mismatch(table, index, width, row.len()));
			}
			if index > 0 {
				sql.push_str(", ");
			}
			sql.push_str(&group);
			params.extend(row);
		}

		Ok(Self {
			sql,
			params,
			rows: count,
		})
	}

	pub fn sql(&self) -> &str {
		&self.sql
	}

	pub fn params(&self) -> &[Value] {
		&self.params
	}

	pub fn rows(&self) -> usize {
		self.rows
	}

	pub fn execute(&self, conn: &Connection) -> rusqlite::Result<usize> {
		conn.execute(&self.sql, params_from_iter(self.params.iter()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn text(value: &str) -> Value {
		Value::Text(value.to_string())
	}

	#[test]
	fn test_one_group_per_row_in_order() {
		let rows = vec![vec![text("a"), text("Rice")], vec![text("b"), text("Miso soup")], vec![
			text("c"),
			text("Pickles"),
		]];

		let insert = BulkInsert::build("dishes", &["id", "name"], rows).unwrap();
		assert_eq!(insert.sql(), "INSERT INTO dishes (id, name) VALUES (?, ?), (?, ?), (?, ?)");
		assert_eq!(insert.rows(), 3);
		assert_eq!(insert.params().len(), 6);
		assert_eq!(insert.params()[2], text("b"));
		assert_eq!(insert.params()[3], text("Miso soup"));
		assert_eq!(insert.params()[4], text("c"));
	}

	#[test]
	fn test_single_row() {
		let insert = BulkInsert::build("menu_dishes", &["menu_id", "dish_id"], vec![vec![text("m"), text("d")]])
			.unwrap();
		assert_eq!(insert.sql(), "INSERT INTO menu_dishes (menu_id, dish_id) VALUES (?, ?)");
	}

	#[test]
	fn test_empty_rows_rejected() {
		let err = BulkInsert::build("dishes", &["id", "name"], vec![]).unwrap_err();
		assert_eq!(err.code(), "STATEMENT_001");
	}

	#[test]
	fn test_arity_mismatch_rejected() {
		let rows = vec![vec![text("a"), text("Rice")], vec![text("b")]];
		let err = BulkInsert::build("dishes", &["id", "name"], rows).unwrap_err();
		assert_eq!(err.code(), "STATEMENT_002");
		assert!(err.message().contains("row 1"));
	}

	#[test]
	fn test_parameter_ceiling() {
		let rows = (0..16_384).map(|i| vec![Value::Integer(i), Value::Integer(i)]).collect();
		let err = BulkInsert::build("dish_allergens", &["dish_id", "allergen_id"], rows).unwrap_err();
		assert_eq!(err.code(), "STATEMENT_003");

		let rows = (0..16_383).map(|i| vec![Value::Integer(i), Value::Integer(i)]).collect();
		assert!(BulkInsert::build("dish_allergens", &["dish_id", "allergen_id"], rows).is_ok());
	}

	#[test]
	fn test_executes_against_connection() {
		let conn = Connection::open_in_memory().unwrap();
		conn.execute_batch("CREATE TABLE dishes (id TEXT PRIMARY KEY, name TEXT NOT NULL);").unwrap();

		let rows = vec![vec![text("a"), text("Rice")], vec![text("b"), text("Natto")]];
		let inserted = BulkInsert::build("dishes", &["id", "name"], rows).unwrap().execute(&conn).unwrap();
		assert_eq!(inserted, 2);

		let name: String = conn.query_row("SELECT name FROM dishes WHERE id = 'b'", [], |row| row.get(0)).unwrap();
		assert_eq!(name, "Natto");
	}
}
