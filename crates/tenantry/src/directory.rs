//! Tenant directory: registration, lookup, and partial update.
//!
//! Lookups by id and url prefix are cache-aside over the tenants namespace,
//! keyed by tenant id. Registration and update flush the whole namespace so
//! the next lookup is a cold read.

use std::sync::Arc;

use regex::Regex;

use tenantry_types::cache_adapter::{CacheAdapter, TENANTS_NAMESPACE};
use tenantry_types::prelude::*;
use tenantry_types::store_adapter::{StoreAdapter, Tenant, UpdateTenantData};

const URL_PREFIX_MAX_LEN: usize = 32;

/// Check the name pattern and url prefix length, collecting every violation
/// so the caller gets one aggregated error. `None` fields are not checked
/// (partial updates patch only some of them).
fn validate(name: Option<&str>, url_prefix: Option<&str>) -> TnResult<()> {
	let mut errors = Vec::new();

	if let Some(url_prefix) = url_prefix {
		if url_prefix.len() > URL_PREFIX_MAX_LEN {
			errors.push(format!(
				"tenant url prefix exceeds {} character limit",
				URL_PREFIX_MAX_LEN
			));
		}
	}

	if let Some(name) = name {
		let name_regex = Regex::new(r"^[0-9A-Za-z_-]+$")
			.map_err(|e| Error::Internal(format!("name regex compilation failed: {}", e)))?;
		if !name_regex.is_match(name) {
			errors.push(
				"tenant name contains invalid characters; \
				allowed characters: alphanumeric, dashes, and underscores"
					.to_string(),
			);
		}
	}

	if errors.is_empty() { Ok(()) } else { Err(Error::Validation(errors)) }
}

#[derive(Clone)]
pub struct TenantDirectory {
	store: Arc<dyn StoreAdapter>,
	cache: Arc<dyn CacheAdapter>,
}

impl TenantDirectory {
	pub fn new(store: Arc<dyn StoreAdapter>, cache: Arc<dyn CacheAdapter>) -> Self {
		Self { store, cache }
	}

	fn cache_tenant(&self, tenant: &Tenant) {
		match serde_json::to_value(tenant) {
			Ok(value) => self.cache.set(TENANTS_NAMESPACE, &tenant.tn_id.to_string(), value),
			Err(err) => warn!("Cache serialize: {}", err),
		}
	}

	/// All tenants except the reserved "default" one. A superset read, so it
	/// warms the tenants namespace as a side effect instead of consulting it.
	pub async fn list(&self) -> TnResult<Vec<Tenant>> {
		let tenants = self.store.list_tenants().await?;

		for tenant in &tenants {
			self.cache_tenant(tenant);
		}

		Ok(tenants)
	}

	/// Case-insensitive lookup by url prefix. The tenants namespace is keyed
	/// by id, so the cached group is scanned first; on a miss the store is
	/// queried with the lower-cased prefix and the single result is cached.
	pub async fn find_by_url_prefix(&self, url_prefix: &str) -> TnResult<Option<Tenant>> {
		for value in self.cache.group(TENANTS_NAMESPACE).into_values() {
			if let Ok(tenant) = serde_json::from_value::<Tenant>(value) {
				if tenant.url_prefix.eq_ignore_ascii_case(url_prefix) {
					debug!("Tenant cache hit: {}", tenant.tn_id);
					return Ok(Some(tenant));
				}
			}
		}

		let tenant = self.store.read_tenant_by_prefix(&url_prefix.to_lowercase()).await?;
		if let Some(tenant) = &tenant {
			self.cache_tenant(tenant);
		}

		Ok(tenant)
	}

	pub async fn find_by_id(&self, tn_id: TnId) -> TnResult<Option<Tenant>> {
		if let Some(value) = self.cache.get(TENANTS_NAMESPACE, &tn_id.to_string()) {
			if let Ok(tenant) = serde_json::from_value::<Tenant>(value) {
				debug!("Tenant cache hit: {}", tn_id);
				return Ok(Some(tenant));
			}
		}

		let tenant = self.store.read_tenant(tn_id).await?;
		if let Some(tenant) = &tenant {
			self.cache_tenant(tenant);
		}

		Ok(tenant)
	}

	/// Store-only lookup; not on the hot path, so it does not touch the
	/// cache.
	pub async fn find_by_name(&self, name: &str) -> TnResult<Option<Tenant>> {
		self.store.read_tenant_by_name(name).await
	}

	/// Register a new tenant and return its store-assigned id.
	///
	/// Fails with an aggregated [`Error::Validation`] listing every violated
	/// constraint, [`Error::DuplicateTenant`] when the url prefix already
	/// resolves, or [`Error::CreateFailed`] when the store assigns no id.
	pub async fn register(
		&self,
		name: &str,
		url_prefix: &str,
		local_prefix: &str,
	) -> TnResult<TnId> {
		validate(Some(name), Some(url_prefix))?;

		if self.find_by_url_prefix(url_prefix).await?.is_some() {
			return Err(Error::DuplicateTenant);
		}

		let Some(tn_id) = self.store.create_tenant(name, url_prefix, local_prefix).await? else {
			return Err(Error::CreateFailed);
		};

		// force cold reads so the new row is seen on the next lookup
		self.cache.flush(TENANTS_NAMESPACE);

		info!("Tenant '{}' registered as {}", name, tn_id);
		Ok(tn_id)
	}

	/// Partial update. The target id travels with the payload and must refer
	/// to an existing tenant; only the patched fields among active, name,
	/// url_prefix, and type are applied. True iff the store reports the row
	/// updated.
	pub async fn update(&self, data: &UpdateTenantData) -> TnResult<bool> {
		let tn_id = match data.tn_id {
			Some(tn_id) if tn_id.0 > 0 => tn_id,
			_ => return Err(Error::MalformedRequest),
		};
		if self.find_by_id(tn_id).await?.is_none() {
			return Err(Error::MalformedRequest);
		}

		validate(data.name.value().map(|v| &**v), data.url_prefix.value().map(|v| &**v))?;

		// flush before the write; a racing read repopulates from the store
		self.cache.flush(TENANTS_NAMESPACE);

		let updated = self.store.update_tenant(tn_id, data).await?;
		info!("Tenant {} update applied: {}", tn_id, updated);
		Ok(updated)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn validate_accepts_alphanumeric_dash_underscore() {
		assert!(validate(Some("Acme_2-west"), Some("acme")).is_ok());
	}

	#[test]
	fn validate_rejects_invalid_name() {
		let res = validate(Some("acme corp"), Some("acme"));
		assert!(matches!(res, Err(Error::Validation(errors)) if errors.len() == 1));
	}

	#[test]
	fn validate_rejects_empty_name() {
		assert!(validate(Some(""), Some("acme")).is_err());
	}

	#[test]
	fn validate_rejects_overlong_url_prefix() {
		let prefix = "a".repeat(33);
		let res = validate(Some("acme"), Some(&prefix));
		assert!(matches!(res, Err(Error::Validation(errors)) if errors.len() == 1));
	}

	#[test]
	fn validate_collects_all_violations() {
		let prefix = "a".repeat(33);
		let res = validate(Some("acme corp"), Some(&prefix));
		assert!(matches!(res, Err(Error::Validation(errors)) if errors.len() == 2));
	}

	#[test]
	fn validate_skips_absent_fields() {
		assert!(validate(None, None).is_ok());
	}
}

// vim: ts=4
