//! Tenantry core services.
//!
//! Two facets over the same collaborator pair: the [`TenantDirectory`]
//! (registration and lookup of tenants) and the [`SettingsStore`]
//! (per-tenant key/value configuration). Both follow one pattern: check the
//! cache, fall back to the store, repopulate the cache; mutations invalidate
//! the affected entries or namespace. The store and cache handles are passed
//! in at construction; there is no global state.

pub mod directory;
pub mod settings;

pub use directory::TenantDirectory;
pub use settings::SettingsStore;

// vim: ts=4
