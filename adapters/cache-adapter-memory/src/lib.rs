//! In-process implementation of the Tenantry cache collaborator.
//!
//! Entries live in one LRU group per namespace behind a single RwLock. Every
//! entry carries an expiry stamp; the default TTL is one second, so the cache
//! only absorbs duplicate reads within the same request burst and staleness
//! from racing invalidations stays bounded. An expired entry reads as a miss
//! and is pruned on access.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::RwLock;

use tenantry::cache_adapter::CacheAdapter;

/// Per-namespace entry limit.
const DEFAULT_GROUP_CAPACITY: usize = 256;

/// Entries are a micro-optimization for duplicate reads, not a long-lived
/// cache.
const DEFAULT_TTL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
struct CacheSlot {
	value: serde_json::Value,
	expires_at: Instant,
}

impl CacheSlot {
	fn is_expired(&self) -> bool {
		Instant::now() >= self.expires_at
	}
}

pub struct CacheAdapterMemory {
	groups: RwLock<HashMap<Box<str>, LruCache<Box<str>, CacheSlot>>>,
	ttl: Duration,
	capacity: NonZeroUsize,
}

impl CacheAdapterMemory {
	pub fn new() -> Self {
		Self::with_ttl(DEFAULT_TTL)
	}

	pub fn with_ttl(ttl: Duration) -> Self {
		let capacity = NonZeroUsize::new(DEFAULT_GROUP_CAPACITY).unwrap_or(NonZeroUsize::MIN);

		Self { groups: RwLock::new(HashMap::new()), ttl, capacity }
	}
}

impl Default for CacheAdapterMemory {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for CacheAdapterMemory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CacheAdapterMemory")
			.field("ttl", &self.ttl)
			.field("capacity", &self.capacity)
			.finish_non_exhaustive()
	}
}

impl CacheAdapter for CacheAdapterMemory {
	fn get(&self, namespace: &str, key: &str) -> Option<serde_json::Value> {
		let mut groups = self.groups.write();
		let group = groups.get_mut(namespace)?;
		if group.get(key).is_some_and(CacheSlot::is_expired) {
			group.pop(key);
			return None;
		}
		group.get(key).map(|slot| slot.value.clone())
	}

	fn set(&self, namespace: &str, key: &str, value: serde_json::Value) {
		let mut groups = self.groups.write();
		let group = groups
			.entry(Box::from(namespace))
			.or_insert_with(|| LruCache::new(self.capacity));
		group.put(Box::from(key), CacheSlot { value, expires_at: Instant::now() + self.ttl });
	}

	fn delete(&self, namespace: &str, key: &str) {
		let mut groups = self.groups.write();
		if let Some(group) = groups.get_mut(namespace) {
			group.pop(key);
		}
	}

	fn group(&self, namespace: &str) -> HashMap<Box<str>, serde_json::Value> {
		let mut groups = self.groups.write();
		let Some(group) = groups.get_mut(namespace) else {
			return HashMap::new();
		};

		let expired: Vec<Box<str>> = group
			.iter()
			.filter(|(_, slot)| slot.is_expired())
			.map(|(key, _)| key.clone())
			.collect();
		for key in &expired {
			group.pop(key);
		}

		group.iter().map(|(key, slot)| (key.clone(), slot.value.clone())).collect()
	}

	fn flush(&self, namespace: &str) {
		let mut groups = self.groups.write();
		groups.remove(namespace);
	}
}

// vim: ts=4
