//! Settings table operations.
//!
//! One row per `(tn_id, name)` pair. The rowid is surfaced as `s_id` so
//! callers get a stable insert id back.

use sqlx::{Row, SqlitePool};

use crate::utils::*;
use tenantry::prelude::*;
use tenantry::store_adapter::Setting;

pub(crate) async fn read(db: &SqlitePool, tn_id: TnId, name: &str) -> TnResult<Option<Setting>> {
	let row = sqlx::query(
		"SELECT rowid AS s_id, tn_id, name, value FROM settings WHERE tn_id = ? AND name = ?",
	)
	.bind(tn_id.0)
	.bind(name)
	.fetch_optional(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	match row {
		Some(row) => {
			Ok(Some(setting_from_row(&row).inspect_err(inspect).map_err(|_| Error::DbError)?))
		}
		None => Ok(None),
	}
}

/// All of a tenant's settings whose name is not in `except`.
pub(crate) async fn list_except(
	db: &SqlitePool,
	tn_id: TnId,
	except: &[Box<str>],
) -> TnResult<Vec<Setting>> {
	let mut query = sqlx::QueryBuilder::new(
		"SELECT rowid AS s_id, tn_id, name, value FROM settings WHERE tn_id=",
	);
	query.push_bind(tn_id.0);
	if !except.is_empty() {
		query.push(" AND name NOT IN ");
		query = push_in(query, except);
	}

	let rows = query
		.build()
		.fetch_all(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	collect_res(rows.iter().map(setting_from_row))
}

/// Insert a new setting, returning its row id.
pub(crate) async fn create(
	db: &SqlitePool,
	tn_id: TnId,
	name: &str,
	value: &str,
) -> TnResult<i64> {
	let res = sqlx::query(
		"INSERT INTO settings (tn_id, name, value) VALUES (?, ?, ?) RETURNING rowid",
	)
	.bind(tn_id.0)
	.bind(name)
	.bind(value)
	.fetch_one(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	res.try_get("rowid").or(Err(Error::DbError))
}

/// Update an existing setting's value, returning the affected-row count.
pub(crate) async fn update(
	db: &SqlitePool,
	tn_id: TnId,
	name: &str,
	value: &str,
) -> TnResult<u64> {
	let res = sqlx::query("UPDATE settings SET value = ? WHERE tn_id = ? AND name = ?")
		.bind(value)
		.bind(tn_id.0)
		.bind(name)
		.execute(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	Ok(res.rows_affected())
}

/// Delete a setting, returning the affected-row count.
pub(crate) async fn delete(db: &SqlitePool, tn_id: TnId, name: &str) -> TnResult<u64> {
	let res = sqlx::query("DELETE FROM settings WHERE tn_id = ? AND name = ?")
		.bind(tn_id.0)
		.bind(name)
		.execute(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	Ok(res.rows_affected())
}

// vim: ts=4
