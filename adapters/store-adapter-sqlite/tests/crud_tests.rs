//! Store adapter CRUD operation tests
//!
//! Tests create, read, update, and delete operations for tenants and
//! settings against a throwaway database file.

use tempfile::TempDir;
use tenantry::store_adapter::{StoreAdapter, TenantType, UpdateTenantData};
use tenantry::types::{Patch, TnId};
use tenantry_store_adapter_sqlite::StoreAdapterSqlite;

async fn create_test_adapter() -> (StoreAdapterSqlite, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");

	let adapter = StoreAdapterSqlite::new(temp_dir.path().join("tenantry.db"))
		.await
		.expect("Failed to create adapter");

	(adapter, temp_dir)
}

#[tokio::test]
async fn test_create_and_read_tenant() {
	let (adapter, _temp) = create_test_adapter().await;

	let tn_id = adapter
		.create_tenant("acme", "acme", "acme-local")
		.await
		.expect("Should create tenant")
		.expect("Store should assign an id");

	let tenant = adapter
		.read_tenant(tn_id)
		.await
		.expect("Should read tenant")
		.expect("Tenant should exist");

	assert_eq!(tenant.tn_id, tn_id);
	assert_eq!(tenant.name.as_ref(), "acme");
	assert_eq!(tenant.url_prefix.as_ref(), "acme");
	assert_eq!(tenant.local_prefix.as_ref(), "acme-local");
	// column defaults
	assert!(tenant.active);
	assert_eq!(tenant.typ, TenantType::Parent);
	assert!(tenant.created_at.0 > 0);
}

#[tokio::test]
async fn test_create_assigns_sequential_ids() {
	let (adapter, _temp) = create_test_adapter().await;

	for i in 1..=3 {
		let tn_id = adapter
			.create_tenant(&format!("user{}", i), &format!("user{}", i), "local")
			.await
			.expect("Should create tenant")
			.expect("Store should assign an id");
		assert_eq!(tn_id, TnId(i));
	}
}

#[tokio::test]
async fn test_create_duplicate_name_errors() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter.create_tenant("acme", "acme", "local").await.expect("Should create tenant");
	let res = adapter.create_tenant("acme", "other", "local").await;

	assert!(res.is_err(), "Unique name index should reject the insert");
}

#[tokio::test]
async fn test_read_nonexistent_tenant_is_none() {
	let (adapter, _temp) = create_test_adapter().await;

	let res = adapter.read_tenant(TnId(9999)).await.expect("Read should succeed");

	assert!(res.is_none());
}

#[tokio::test]
async fn test_read_by_prefix_is_case_insensitive() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter.create_tenant("acme", "acme", "local").await.expect("Should create tenant");

	let tenant = adapter
		.read_tenant_by_prefix("AcMe")
		.await
		.expect("Read should succeed")
		.expect("Tenant should be found");
	assert_eq!(tenant.name.as_ref(), "acme");
}

#[tokio::test]
async fn test_read_by_name() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter.create_tenant("acme", "acme-prefix", "local").await.expect("Should create tenant");

	let tenant = adapter
		.read_tenant_by_name("acme")
		.await
		.expect("Read should succeed")
		.expect("Tenant should be found");
	assert_eq!(tenant.url_prefix.as_ref(), "acme-prefix");

	let missing = adapter.read_tenant_by_name("initech").await.expect("Read should succeed");
	assert!(missing.is_none());
}

#[tokio::test]
async fn test_list_tenants_excludes_default() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter.create_tenant("default", "default", "local").await.expect("Should create tenant");
	adapter.create_tenant("acme", "acme", "local").await.expect("Should create tenant");

	let tenants = adapter.list_tenants().await.expect("Should list tenants");

	assert_eq!(tenants.len(), 1);
	assert_eq!(tenants[0].name.as_ref(), "acme");
}

#[tokio::test]
async fn test_update_tenant_applies_patched_fields_only() {
	let (adapter, _temp) = create_test_adapter().await;

	let tn_id = adapter
		.create_tenant("acme", "acme", "local")
		.await
		.expect("Should create tenant")
		.expect("Store should assign an id");

	let data = UpdateTenantData {
		tn_id: Some(tn_id),
		active: Patch::Value(false),
		typ: Patch::Value(TenantType::Connect),
		..Default::default()
	};
	let updated = adapter.update_tenant(tn_id, &data).await.expect("Update should succeed");
	assert!(updated);

	let tenant = adapter
		.read_tenant(tn_id)
		.await
		.expect("Should read tenant")
		.expect("Tenant should exist");
	assert!(!tenant.active);
	assert_eq!(tenant.typ, TenantType::Connect);
	assert_eq!(tenant.name.as_ref(), "acme");
	assert_eq!(tenant.url_prefix.as_ref(), "acme");
}

#[tokio::test]
async fn test_update_tenant_without_fields_is_false() {
	let (adapter, _temp) = create_test_adapter().await;

	let tn_id = adapter
		.create_tenant("acme", "acme", "local")
		.await
		.expect("Should create tenant")
		.expect("Store should assign an id");

	let data = UpdateTenantData { tn_id: Some(tn_id), ..Default::default() };
	let updated = adapter.update_tenant(tn_id, &data).await.expect("Update should succeed");

	assert!(!updated);
}

#[tokio::test]
async fn test_update_unknown_tenant_is_false() {
	let (adapter, _temp) = create_test_adapter().await;

	let data = UpdateTenantData { name: Patch::Value("acme".into()), ..Default::default() };
	let updated = adapter.update_tenant(TnId(9999), &data).await.expect("Update should succeed");

	assert!(!updated);
}

#[tokio::test]
async fn test_create_and_read_setting() {
	let (adapter, _temp) = create_test_adapter().await;
	let tn_id = TnId(1);

	let s_id = adapter.create_setting(tn_id, "theme", "dark").await.expect("Should create setting");
	assert!(s_id > 0);

	let setting = adapter
		.read_setting(tn_id, "theme")
		.await
		.expect("Read should succeed")
		.expect("Setting should exist");
	assert_eq!(setting.s_id, s_id);
	assert_eq!(setting.tn_id, tn_id);
	assert_eq!(setting.value.as_ref(), "dark");
}

#[tokio::test]
async fn test_read_missing_setting_is_none() {
	let (adapter, _temp) = create_test_adapter().await;

	let res = adapter.read_setting(TnId(1), "theme").await.expect("Read should succeed");

	assert!(res.is_none());
}

#[tokio::test]
async fn test_update_setting_reports_affected_rows() {
	let (adapter, _temp) = create_test_adapter().await;
	let tn_id = TnId(1);

	adapter.create_setting(tn_id, "theme", "dark").await.expect("Should create setting");

	let affected = adapter.update_setting(tn_id, "theme", "light").await.expect("Should update");
	assert_eq!(affected, 1);

	let missing = adapter.update_setting(tn_id, "voice", "man").await.expect("Should update");
	assert_eq!(missing, 0);
}

#[tokio::test]
async fn test_delete_setting_reports_affected_rows() {
	let (adapter, _temp) = create_test_adapter().await;
	let tn_id = TnId(1);

	adapter.create_setting(tn_id, "theme", "dark").await.expect("Should create setting");

	let affected = adapter.delete_setting(tn_id, "theme").await.expect("Should delete");
	assert_eq!(affected, 1);

	let missing = adapter.delete_setting(tn_id, "theme").await.expect("Should delete");
	assert_eq!(missing, 0);
}

#[tokio::test]
async fn test_list_settings_filters_excluded_names() {
	let (adapter, _temp) = create_test_adapter().await;
	let tn_id = TnId(1);

	adapter.create_setting(tn_id, "theme", "dark").await.expect("Should create setting");
	adapter.create_setting(tn_id, "voice", "man").await.expect("Should create setting");
	adapter.create_setting(tn_id, "gravatars", "on").await.expect("Should create setting");

	let all = adapter.list_settings(tn_id, &[]).await.expect("Should list settings");
	assert_eq!(all.len(), 3);

	let except: Vec<Box<str>> = vec!["theme".into(), "voice".into()];
	let rest = adapter.list_settings(tn_id, &except).await.expect("Should list settings");
	assert_eq!(rest.len(), 1);
	assert_eq!(rest[0].name.as_ref(), "gravatars");
}

#[tokio::test]
async fn test_list_settings_is_scoped_to_tenant() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter.create_setting(TnId(1), "theme", "dark").await.expect("Should create setting");
	adapter.create_setting(TnId(2), "theme", "light").await.expect("Should create setting");

	let settings = adapter.list_settings(TnId(1), &[]).await.expect("Should list settings");

	assert_eq!(settings.len(), 1);
	assert_eq!(settings[0].value.as_ref(), "dark");
}

#[tokio::test]
async fn test_duplicate_setting_insert_errors() {
	let (adapter, _temp) = create_test_adapter().await;
	let tn_id = TnId(1);

	adapter.create_setting(tn_id, "theme", "dark").await.expect("Should create setting");
	let res = adapter.create_setting(tn_id, "theme", "light").await;

	assert!(res.is_err(), "Composite primary key should reject the insert");
}

// vim: ts=4
