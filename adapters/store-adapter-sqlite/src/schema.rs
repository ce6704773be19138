//! Database schema initialization.
//!
//! Idempotent; runs inside one transaction on every adapter construction.

use sqlx::SqlitePool;

pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Tenants
	//*********
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS tenants (
			tn_id integer PRIMARY KEY,
			name text NOT NULL,
			url_prefix text NOT NULL COLLATE NOCASE,
			local_prefix text NOT NULL,
			active boolean NOT NULL DEFAULT true,
			type integer NOT NULL DEFAULT 0,
			created_at datetime DEFAULT (unixepoch())
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_tenants_name ON tenants(name)")
		.execute(&mut *tx)
		.await?;
	sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_tenants_url_prefix ON tenants(url_prefix)")
		.execute(&mut *tx)
		.await?;

	// Settings
	//**********
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS settings (
			tn_id integer NOT NULL,
			name text NOT NULL,
			value text NOT NULL,
			PRIMARY KEY(tn_id, name)
	)",
	)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;

	Ok(())
}

// vim: ts=4
