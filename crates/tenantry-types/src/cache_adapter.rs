//! Key/value cache collaborator contract.
//!
//! Entries are grouped under a namespace so a whole group can be enumerated
//! or flushed at once. The cache is a soft mirror of the store: a missing or
//! expired entry is always resolved by a store read, never an error.

use std::collections::HashMap;
use std::fmt::Debug;

use crate::types::TnId;

/// Namespace holding cached tenant records, keyed by tenant id.
pub const TENANTS_NAMESPACE: &str = "tenants";

/// Namespace holding one tenant's cached setting records, keyed by name.
pub fn settings_namespace(tn_id: TnId) -> String {
	format!("settings-{}", tn_id)
}

pub trait CacheAdapter: Debug + Send + Sync {
	fn get(&self, namespace: &str, key: &str) -> Option<serde_json::Value>;
	fn set(&self, namespace: &str, key: &str, value: serde_json::Value);
	fn delete(&self, namespace: &str, key: &str);
	/// All live entries in a namespace.
	fn group(&self, namespace: &str) -> HashMap<Box<str>, serde_json::Value>;
	/// Drop every entry in a namespace.
	fn flush(&self, namespace: &str);
}

// vim: ts=4
