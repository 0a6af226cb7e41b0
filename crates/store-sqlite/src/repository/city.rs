// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

use kondate_core::{City, CityCode, CityFilter, CityRepository};
use kondate_type::{Deadline, Result, error, error::diagnostic::query::row_not_found};
use rusqlite::{OptionalExtension, params, types::Value};
use tracing::instrument;

use super::{push_page, push_where, query_all};
use crate::{
	SqliteStore,
	conflict::{WriteTarget, read_error, write_error},
	row::city_from_sql_row,
};

const CITY_SELECT: &str =
	"SELECT city_code, prefecture_code, city_name, prefecture_name, school_lunch_info_available FROM cities";

impl CityRepository for SqliteStore {
	#[instrument(name = "store::city::create", level = "debug", skip(self, city), fields(city_code = %city.city_code))]
	fn create(&self, deadline: Deadline, city: &City) -> Result<()> {
		const OPERATION: &str = "create city";

		self.run_in_transaction(deadline, OPERATION, |tx| {
			tx.execute(
				"INSERT INTO cities (city_code, prefecture_code, city_name, prefecture_name, school_lunch_info_available) VALUES (?1, ?2, ?3, ?4, ?5)",
				params![
					city.city_code.0,
					city.prefecture_code,
					city.city_name,
					city.prefecture_name,
					city.school_lunch_info_available,
				],
			)
			.map_err(|err| {
				let target =
					WriteTarget::primary("cities", &["city_code"], vec![vec![Value::Integer(city.city_code.0.into())]]);
				write_error(tx, err, &target, deadline, OPERATION)
			})?;
			Ok(())
		})
	}

	#[instrument(name = "store::city::get", level = "trace", skip(self), fields(city_code = %code))]
	fn get(&self, deadline: Deadline, code: CityCode) -> Result<City> {
		const OPERATION: &str = "get city";

		let sql = format!("{CITY_SELECT} WHERE city_code = ?1");
		self.read(deadline, OPERATION, |conn| {
			conn.query_row(&sql, params![code.0], city_from_sql_row)
				.optional()
				.map_err(|err| read_error(err, deadline, OPERATION))?
				.ok_or_else(|| error!(row_not_found("city", code)))
		})
	}

	#[instrument(name = "store::city::list", level = "debug", skip(self, filter), fields(
		limit = filter.page.limit,
		offset = filter.page.offset
	))]
	fn list(&self, deadline: Deadline, filter: &CityFilter) -> Result<Vec<City>> {
		const OPERATION: &str = "list cities";

		let mut conditions = Vec::new();
		let mut params = Vec::new();
		if let Some(prefecture_code) = filter.prefecture_code {
			conditions.push("prefecture_code = ?".to_string());
			params.push(Value::Integer(prefecture_code.into()));
		}
		if let Some(available) = filter.school_lunch_info_available {
			conditions.push("school_lunch_info_available = ?".to_string());
			params.push(Value::Integer(available.into()));
		}

		let mut sql = CITY_SELECT.to_string();
		push_where(&mut sql, &conditions);
		sql.push_str(" ORDER BY city_code");
		push_page(&mut sql, &mut params, filter.page);

		self.read(deadline, OPERATION, |conn| {
			query_all(conn, &sql, &params, city_from_sql_row).map_err(|err| read_error(err, deadline, OPERATION))
		})
	}
}
