//! SQLite implementation of the Tenantry store collaborator.
//!
//! One module per table; this file holds the pool setup and the trait impl
//! delegating into them.

use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};

use tenantry::prelude::*;
use tenantry::store_adapter::{Setting, StoreAdapter, Tenant, UpdateTenantData};

mod schema;
mod setting;
mod tenant;
mod utils;

#[derive(Debug)]
pub struct StoreAdapterSqlite {
	db: SqlitePool,
}

impl StoreAdapterSqlite {
	/// Open (creating if missing) the database at `path` and initialize the
	/// schema.
	pub async fn new(path: impl AsRef<Path>) -> TnResult<Self> {
		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref())
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| warn!("DB open: {:#?}", err))
			.map_err(|_| Error::DbError)?;

		schema::init_db(&db)
			.await
			.inspect_err(|err| warn!("DB init: {:#?}", err))
			.map_err(|_| Error::DbError)?;

		Ok(Self { db })
	}
}

#[async_trait]
impl StoreAdapter for StoreAdapterSqlite {
	// Tenants
	//*********

	async fn list_tenants(&self) -> TnResult<Vec<Tenant>> {
		tenant::list(&self.db).await
	}

	async fn read_tenant(&self, tn_id: TnId) -> TnResult<Option<Tenant>> {
		tenant::read(&self.db, tn_id).await
	}

	async fn read_tenant_by_prefix(&self, url_prefix: &str) -> TnResult<Option<Tenant>> {
		tenant::read_by_prefix(&self.db, url_prefix).await
	}

	async fn read_tenant_by_name(&self, name: &str) -> TnResult<Option<Tenant>> {
		tenant::read_by_name(&self.db, name).await
	}

	async fn create_tenant(
		&self,
		name: &str,
		url_prefix: &str,
		local_prefix: &str,
	) -> TnResult<Option<TnId>> {
		tenant::create(&self.db, name, url_prefix, local_prefix).await
	}

	async fn update_tenant(&self, tn_id: TnId, data: &UpdateTenantData) -> TnResult<bool> {
		tenant::update(&self.db, tn_id, data).await
	}

	// Settings
	//**********

	async fn read_setting(&self, tn_id: TnId, name: &str) -> TnResult<Option<Setting>> {
		setting::read(&self.db, tn_id, name).await
	}

	async fn list_settings(&self, tn_id: TnId, except: &[Box<str>]) -> TnResult<Vec<Setting>> {
		setting::list_except(&self.db, tn_id, except).await
	}

	async fn create_setting(&self, tn_id: TnId, name: &str, value: &str) -> TnResult<i64> {
		setting::create(&self.db, tn_id, name, value).await
	}

	async fn update_setting(&self, tn_id: TnId, name: &str, value: &str) -> TnResult<u64> {
		setting::update(&self.db, tn_id, name, value).await
	}

	async fn delete_setting(&self, tn_id: TnId, name: &str) -> TnResult<u64> {
		setting::delete(&self.db, tn_id, name).await
	}
}

// vim: ts=4
