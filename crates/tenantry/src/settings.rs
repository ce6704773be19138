//! Per-tenant key/value settings with a cache-aside read path.
//!
//! Every cache entry in a tenant's settings namespace holds the full record
//! serialized as JSON, keyed by setting name. Reads populate on miss; `set`
//! and `delete` evict their entry; `add` rewrites it with the new value.

use std::collections::HashMap;
use std::sync::Arc;

use tenantry_types::cache_adapter::{CacheAdapter, settings_namespace};
use tenantry_types::prelude::*;
use tenantry_types::store_adapter::{Setting, StoreAdapter};

use crate::directory::TenantDirectory;

pub struct SettingsStore {
	store: Arc<dyn StoreAdapter>,
	cache: Arc<dyn CacheAdapter>,
	directory: TenantDirectory,
}

impl SettingsStore {
	pub fn new(store: Arc<dyn StoreAdapter>, cache: Arc<dyn CacheAdapter>) -> Self {
		let directory = TenantDirectory::new(store.clone(), cache.clone());
		Self { store, cache, directory }
	}

	fn cache_setting(&self, setting: &Setting) {
		match serde_json::to_value(setting) {
			Ok(value) => {
				self.cache.set(&settings_namespace(setting.tn_id), &setting.name, value);
			}
			Err(err) => warn!("Cache serialize: {}", err),
		}
	}

	/// Cache-aside fetch of the full record; populates the cache on a store
	/// hit. An unreadable cache entry counts as a miss.
	async fn fetch(&self, name: &str, tn_id: TnId) -> TnResult<Option<Setting>> {
		if let Some(value) = self.cache.get(&settings_namespace(tn_id), name) {
			if let Ok(setting) = serde_json::from_value::<Setting>(value) {
				debug!("Setting cache hit: {}.{}", tn_id, name);
				return Ok(Some(setting));
			}
		}

		let setting = self.store.read_setting(tn_id, name).await?;
		if let Some(setting) = &setting {
			self.cache_setting(setting);
		}

		Ok(setting)
	}

	pub async fn get(&self, name: &str, tn_id: TnId) -> TnResult<Option<Box<str>>> {
		Ok(self.fetch(name, tn_id).await?.map(|setting| setting.value))
	}

	/// Upsert: update the existing row or insert a new one. Returns `None`
	/// when `tn_id` does not resolve to a known tenant; otherwise the row id
	/// (the existing row's id on the update path).
	pub async fn add(&self, name: &str, value: &str, tn_id: TnId) -> TnResult<Option<i64>> {
		if self.directory.find_by_id(tn_id).await?.is_none() {
			return Ok(None);
		}

		let s_id = match self.fetch(name, tn_id).await? {
			Some(existing) => {
				self.store.update_setting(tn_id, name, value).await?;
				existing.s_id
			}
			None => self.store.create_setting(tn_id, name, value).await?,
		};

		// rewrite the entry with the full record, same shape the read path
		// caches
		self.cache_setting(&Setting { s_id, tn_id, name: name.into(), value: value.into() });

		info!("Setting '{}' added for tenant {}", name, tn_id);
		Ok(Some(s_id))
	}

	/// Update-only. False when no such setting exists; true iff the store
	/// reports at least one row updated.
	pub async fn set(&self, name: &str, value: &str, tn_id: TnId) -> TnResult<bool> {
		if self.fetch(name, tn_id).await?.is_none() {
			return Ok(false);
		}

		let affected = self.store.update_setting(tn_id, name, value).await?;
		// evict rather than repopulate; the next get is a cold read
		self.cache.delete(&settings_namespace(tn_id), name);

		info!("Setting '{}' updated for tenant {}", name, tn_id);
		Ok(affected > 0)
	}

	/// False when no such setting exists; true iff the store reports at
	/// least one row deleted.
	pub async fn delete(&self, name: &str, tn_id: TnId) -> TnResult<bool> {
		if self.fetch(name, tn_id).await?.is_none() {
			return Ok(false);
		}

		let affected = self.store.delete_setting(tn_id, name).await?;
		self.cache.delete(&settings_namespace(tn_id), name);

		info!("Setting '{}' deleted for tenant {}", name, tn_id);
		Ok(affected > 0)
	}

	/// Full name-to-record mapping for one tenant, read through the cache:
	/// only names missing from the namespace are fetched from the store, the
	/// fetched rows are cached, and the namespace contents become the
	/// response.
	pub async fn list(&self, tn_id: TnId) -> TnResult<HashMap<Box<str>, Setting>> {
		let namespace = settings_namespace(tn_id);
		let known: Vec<Box<str>> = self.cache.group(&namespace).into_keys().collect();

		let fetched = self.store.list_settings(tn_id, &known).await?;
		for setting in &fetched {
			self.cache_setting(setting);
		}

		let settings = self
			.cache
			.group(&namespace)
			.into_iter()
			.filter_map(|(name, value)| {
				Some((name, serde_json::from_value::<Setting>(value).ok()?))
			})
			.collect();

		Ok(settings)
	}
}

// vim: ts=4
