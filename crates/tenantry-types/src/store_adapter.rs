//! Relational store collaborator contract.
//!
//! The core never talks SQL; it consumes this trait. Reads that can miss
//! return `Option`, inserts return the generated id, and updates/deletes
//! report affected-row counts so callers can distinguish a no-op from a
//! write.

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TnResult;
use crate::types::{Patch, Timestamp, TnId};

/// Account type constants, passed through to the application layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenantType {
	Parent = 0,
	/// Reserved for future expansion, currently unused.
	Full = 1,
	Subaccount = 2,
	Connect = 3,
}

impl TenantType {
	pub fn as_i64(self) -> i64 {
		self as i64
	}

	pub fn from_i64(value: i64) -> Option<Self> {
		match value {
			0 => Some(TenantType::Parent),
			1 => Some(TenantType::Full),
			2 => Some(TenantType::Subaccount),
			3 => Some(TenantType::Connect),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
	#[serde(rename = "id")]
	pub tn_id: TnId,
	pub name: Box<str>,
	pub url_prefix: Box<str>,
	pub local_prefix: Box<str>,
	pub active: bool,
	#[serde(rename = "type")]
	pub typ: TenantType,
	pub created_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
	/// Row id assigned by the store. `(tn_id, name)` is the logical identity.
	#[serde(rename = "id")]
	pub s_id: i64,
	pub tn_id: TnId,
	pub name: Box<str>,
	pub value: Box<str>,
}

/// Partial tenant update. Only the patched fields are applied; the target id
/// travels with the payload.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTenantData {
	#[serde(rename = "id")]
	pub tn_id: Option<TnId>,
	#[serde(default)]
	pub active: Patch<bool>,
	#[serde(default)]
	pub name: Patch<Box<str>>,
	#[serde(default)]
	pub url_prefix: Patch<Box<str>>,
	#[serde(rename = "type", default)]
	pub typ: Patch<TenantType>,
}

/// Setting names the application layer recognizes. Published for discovery;
/// the store accepts any name.
pub const SETTING_OPTIONS: [&str; 12] = [
	"twilio_sid",
	"twilio_token",
	"application_sid",
	"twilio_endpoint",
	"from_email",
	"recording_host",
	"theme",
	"transcriptions",
	"voice",
	"voice_language",
	"numbers_country",
	"gravatars",
];

#[async_trait]
pub trait StoreAdapter: Debug + Send + Sync {
	// Tenants
	//*********

	/// All tenants except the reserved `"default"` row.
	async fn list_tenants(&self) -> TnResult<Vec<Tenant>>;
	async fn read_tenant(&self, tn_id: TnId) -> TnResult<Option<Tenant>>;
	/// Case-insensitive url_prefix lookup; callers pass the prefix lower-cased.
	async fn read_tenant_by_prefix(&self, url_prefix: &str) -> TnResult<Option<Tenant>>;
	async fn read_tenant_by_name(&self, name: &str) -> TnResult<Option<Tenant>>;
	/// Returns the generated id, or `None` if the store assigned none.
	async fn create_tenant(
		&self,
		name: &str,
		url_prefix: &str,
		local_prefix: &str,
	) -> TnResult<Option<TnId>>;
	/// Applies the patched fields only. True iff the row was updated.
	async fn update_tenant(&self, tn_id: TnId, data: &UpdateTenantData) -> TnResult<bool>;

	// Settings
	//**********

	async fn read_setting(&self, tn_id: TnId, name: &str) -> TnResult<Option<Setting>>;
	/// All of a tenant's settings whose name is not in `except`.
	async fn list_settings(&self, tn_id: TnId, except: &[Box<str>]) -> TnResult<Vec<Setting>>;
	/// Returns the new row's id.
	async fn create_setting(&self, tn_id: TnId, name: &str, value: &str) -> TnResult<i64>;
	/// Returns the affected-row count.
	async fn update_setting(&self, tn_id: TnId, name: &str, value: &str) -> TnResult<u64>;
	/// Returns the affected-row count.
	async fn delete_setting(&self, tn_id: TnId, name: &str) -> TnResult<u64>;
}

// vim: ts=4
