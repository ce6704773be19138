//! Shared helpers for the SQLite adapter: error inspection and query-builder
//! utilities used across the table modules.

use sqlx::{Row, sqlite::SqliteRow};

use tenantry::prelude::*;

pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

/// Applies a `Patch` field to an UPDATE query with proper binding; the
/// closure converts the patched value into something bindable.
/// Evaluates to the new has_updates flag.
macro_rules! push_patch {
	($query:expr, $has_updates:expr, $field:literal, $patch:expr, |$v:ident| $convert:expr) => {{
		match $patch {
			Patch::Undefined => $has_updates,
			Patch::Null => {
				if $has_updates {
					$query.push(", ");
				}
				$query.push(concat!($field, "=NULL"));
				true
			}
			Patch::Value($v) => {
				if $has_updates {
					$query.push(", ");
				}
				$query.push(concat!($field, "=")).push_bind($convert);
				true
			}
		}
	}};
}

pub(crate) use push_patch;

/// Build a parenthesized, parameterized value list for IN / NOT IN clauses.
pub(crate) fn push_in<'a>(
	mut query: sqlx::QueryBuilder<'a, sqlx::Sqlite>,
	values: &'a [impl AsRef<str>],
) -> sqlx::QueryBuilder<'a, sqlx::Sqlite> {
	query.push("(");
	for (i, value) in values.iter().enumerate() {
		if i > 0 {
			query.push(", ");
		}
		query.push_bind(value.as_ref());
	}
	query.push(")");
	query
}

/// Collect row-mapping results, dropping the batch on the first bad row.
pub(crate) fn collect_res<T>(
	iter: impl Iterator<Item = Result<T, sqlx::Error>>,
) -> TnResult<Vec<T>> {
	let mut items = Vec::new();
	for item in iter {
		items.push(item.inspect_err(inspect).map_err(|_| Error::DbError)?);
	}
	Ok(items)
}

/// Shared row decoder for SELECTs over the settings table. Expects the rowid
/// aliased as s_id.
pub(crate) fn setting_from_row(
	row: &SqliteRow,
) -> Result<tenantry::store_adapter::Setting, sqlx::Error> {
	Ok(tenantry::store_adapter::Setting {
		s_id: row.try_get("s_id")?,
		tn_id: TnId(row.try_get("tn_id")?),
		name: row.try_get("name")?,
		value: row.try_get("value")?,
	})
}

// vim: ts=4
