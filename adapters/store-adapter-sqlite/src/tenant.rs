//! Tenant table operations.
//!
//! Creation leaves `active` and `type` to their column defaults; the store
//! assigns the id. Partial updates are built dynamically from the patched
//! fields only.

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::utils::*;
use tenantry::prelude::*;
use tenantry::store_adapter::{Tenant, TenantType, UpdateTenantData};

fn tenant_from_row(row: &SqliteRow) -> TnResult<Tenant> {
	let typ = TenantType::from_i64(row.try_get("type").or(Err(Error::DbError))?)
		.ok_or(Error::DbError)?;
	Ok(Tenant {
		tn_id: TnId(row.try_get("tn_id").or(Err(Error::DbError))?),
		name: row.try_get("name").or(Err(Error::DbError))?,
		url_prefix: row.try_get("url_prefix").or(Err(Error::DbError))?,
		local_prefix: row.try_get("local_prefix").or(Err(Error::DbError))?,
		active: row.try_get("active").or(Err(Error::DbError))?,
		typ,
		created_at: row.try_get("created_at").map(Timestamp).or(Err(Error::DbError))?,
	})
}

/// All tenants except the reserved "default" row.
pub(crate) async fn list(db: &SqlitePool) -> TnResult<Vec<Tenant>> {
	let rows = sqlx::query(
		"SELECT tn_id, name, url_prefix, local_prefix, active, type, created_at
		FROM tenants WHERE name != 'default'",
	)
	.fetch_all(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	rows.iter().map(tenant_from_row).collect()
}

pub(crate) async fn read(db: &SqlitePool, tn_id: TnId) -> TnResult<Option<Tenant>> {
	let row = sqlx::query(
		"SELECT tn_id, name, url_prefix, local_prefix, active, type, created_at
		FROM tenants WHERE tn_id = ?",
	)
	.bind(tn_id.0)
	.fetch_optional(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	row.as_ref().map(tenant_from_row).transpose()
}

/// Exact match against the NOCASE-collated url_prefix column.
pub(crate) async fn read_by_prefix(db: &SqlitePool, url_prefix: &str) -> TnResult<Option<Tenant>> {
	let row = sqlx::query(
		"SELECT tn_id, name, url_prefix, local_prefix, active, type, created_at
		FROM tenants WHERE url_prefix = ?",
	)
	.bind(url_prefix)
	.fetch_optional(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	row.as_ref().map(tenant_from_row).transpose()
}

pub(crate) async fn read_by_name(db: &SqlitePool, name: &str) -> TnResult<Option<Tenant>> {
	let row = sqlx::query(
		"SELECT tn_id, name, url_prefix, local_prefix, active, type, created_at
		FROM tenants WHERE name = ?",
	)
	.bind(name)
	.fetch_optional(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	row.as_ref().map(tenant_from_row).transpose()
}

/// Insert a new tenant, returning the store-assigned id.
pub(crate) async fn create(
	db: &SqlitePool,
	name: &str,
	url_prefix: &str,
	local_prefix: &str,
) -> TnResult<Option<TnId>> {
	let row = sqlx::query(
		"INSERT INTO tenants (name, url_prefix, local_prefix) VALUES (?, ?, ?) RETURNING tn_id",
	)
	.bind(name)
	.bind(url_prefix)
	.bind(local_prefix)
	.fetch_optional(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	match row {
		Some(row) => Ok(Some(TnId(row.try_get("tn_id").or(Err(Error::DbError))?))),
		None => Ok(None),
	}
}

/// Apply the patched fields of `data` to an existing tenant row.
/// True iff the store reports the row updated.
pub(crate) async fn update(
	db: &SqlitePool,
	tn_id: TnId,
	data: &UpdateTenantData,
) -> TnResult<bool> {
	let mut query = sqlx::QueryBuilder::new("UPDATE tenants SET ");
	let mut has_updates = false;

	has_updates = push_patch!(query, has_updates, "active", &data.active, |v| *v);
	has_updates = push_patch!(query, has_updates, "name", &data.name, |v| &**v);
	has_updates = push_patch!(query, has_updates, "url_prefix", &data.url_prefix, |v| &**v);
	has_updates = push_patch!(query, has_updates, "type", &data.typ, |v| v.as_i64());

	if !has_updates {
		// Nothing to apply
		return Ok(false);
	}

	query.push(" WHERE tn_id=").push_bind(tn_id.0);

	let res = query
		.build()
		.execute(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	Ok(res.rows_affected() > 0)
}

// vim: ts=4
