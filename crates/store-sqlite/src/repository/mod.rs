// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Kondate

mod allergen;
mod city;
mod dish;
mod menu;

use kondate_core::Page;
use rusqlite::{Connection, Row, params_from_iter, types::Value};

pub(crate) fn query_all<T, F>(conn: &Connection, sql: &str, params: &[Value], f: F) -> rusqlite::Result<Vec<T>>
where
	F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
	let mut stmt = conn.prepare_cached(sql)?;
	let rows = stmt.query_map(params_from_iter(params.iter()), f)?;
	rows.collect()
}

/// Appends `WHERE ...` when there are any conditions.
pub(crate) fn push_where(sql: &mut String, conditions: &[String]) {
	if !conditions.is_empty() {
		sql.push_str(" WHERE ");
		sql.push_str(&conditions.join(" AND "));
	}
}

pub(crate) fn push_page(sql: &mut String, params: &mut Vec<Value>, page: Page) {
	sql.push_str(" LIMIT ? OFFSET ?");
	params.push(Value::Integer(page.limit.into()));
	params.push(Value::Integer(page.offset.into()));
}

/// Escapes `LIKE` wildcards; pair with `ESCAPE '!'`.
pub(crate) fn escape_like_prefix(prefix: &str) -> String {
	let mut out = String::with_capacity(prefix.len() + 1);
	for c in prefix.chars() {
		if matches!(c, '!' | '%' | '_') {
			out.push('!');
		}
		out.push(c);
	}
	out.push('%');
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_escape_like_prefix() {
		assert_eq!(escape_like_prefix("Curry"), "Curry%");
		assert_eq!(escape_like_prefix("100%_!"), "100!%!_!!%");
	}

	#[test]
	fn test_push_where_and_page() {
		let mut sql = "SELECT id FROM dishes".to_string();
		let mut params = Vec::new();
		push_where(&mut sql, &[]);
		push_page(&mut sql, &mut params, Page::new(5, 10));
		assert_eq!(sql, "SELECT id FROM dishes LIMIT ? OFFSET ?");
		assert_eq!(params, vec![Value::Integer(5), Value::Integer(10)]);

		let mut sql = "SELECT id FROM dishes".to_string();
		push_where(&mut sql, &["a = ?".to_string(), "b = ?".to_string()]);
		assert_eq!(sql, "SELECT id FROM dishes WHERE a = ? AND b = ?");
	}
}
