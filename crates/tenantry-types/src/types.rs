//! Core newtypes and the partial-update field wrapper.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Tenant identifier, assigned by the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TnId(pub i64);

impl std::fmt::Display for TnId {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Unix timestamp in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

/// A field of a partial-update payload.
///
/// Distinguishes "field not present in the request" (`Undefined`) from
/// "field explicitly cleared" (`Null`). Serde maps a missing field to
/// `Undefined` (via `#[serde(default)]` on the containing struct field),
/// JSON `null` to `Null`, and anything else to `Value`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
	#[default]
	Undefined,
	Null,
	Value(T),
}

impl<T> Patch<T> {
	pub fn is_undefined(&self) -> bool {
		matches!(self, Patch::Undefined)
	}

	/// The patched value, if one was supplied.
	pub fn value(&self) -> Option<&T> {
		match self {
			Patch::Value(v) => Some(v),
			_ => None,
		}
	}
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		Option::<T>::deserialize(deserializer).map(|opt| match opt {
			Some(v) => Patch::Value(v),
			None => Patch::Null,
		})
	}
}

impl<T: Serialize> Serialize for Patch<T> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			// Undefined is expected to be skipped with skip_serializing_if;
			// if it gets here anyway, emit null.
			Patch::Undefined | Patch::Null => serializer.serialize_none(),
			Patch::Value(v) => serializer.serialize_some(v),
		}
	}
}


// vim: ts=4
