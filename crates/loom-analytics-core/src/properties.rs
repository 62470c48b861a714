// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Builder for user traits and event properties.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A JSON object of traits or event properties.
///
/// # Example
///
/// ```
/// use loom_analytics_core::Properties;
///
/// let traits = Properties::new()
///     .insert("email", "ada@example.com")
///     .insert("plan", "enterprise")
///     .insert("seats", 12);
/// assert_eq!(traits.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties {
	inner: Map<String, Value>,
}

impl Properties {
	/// Creates a new empty Properties builder.
	pub fn new() -> Self {
		Self { inner: Map::new() }
	}

	/// Inserts a key-value pair. Any `Into<serde_json::Value>` works,
	/// including nested objects built with `serde_json::json!`.
	pub fn insert<K, V>(mut self, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.inner.insert(key.into(), value.into());
		self
	}

	/// Merges `other` into this set. Keys present in both take `other`'s value.
	pub fn merge(mut self, other: Properties) -> Self {
		self.inner.extend(other.inner);
		self
	}

	/// Returns true if no properties are set.
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	/// Returns the number of properties.
	pub fn len(&self) -> usize {
		self.inner.len()
	}

	/// Returns the value stored under `key`.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.inner.get(key)
	}

	/// Iterates over the key-value pairs.
	pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
		self.inner.iter()
	}

	pub fn into_value(self) -> Value {
		Value::Object(self.inner)
	}
}

impl From<Properties> for Value {
	fn from(props: Properties) -> Self {
		props.into_value()
	}
}

/// Non-object values carry no keys and convert to an empty set.
impl From<Value> for Properties {
	fn from(value: Value) -> Self {
		match value {
			Value::Object(map) => Self { inner: map },
			_ => Self::new(),
		}
	}
}

impl From<Map<String, Value>> for Properties {
	fn from(map: Map<String, Value>) -> Self {
		Self { inner: map }
	}
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Properties {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			inner: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use serde_json::json;

	#[test]
	fn new_is_empty() {
		let props = Properties::new();
		assert!(props.is_empty());
		assert_eq!(props.len(), 0);
	}

	#[test]
	fn insert_mixed_values() {
		let props = Properties::new()
			.insert("email", "fsdfsdf")
			.insert("seats", 3)
			.insert("beta", true);

		assert_eq!(props.len(), 3);
		assert_eq!(props.get("email"), Some(&json!("fsdfsdf")));
		assert_eq!(props.get("seats"), Some(&json!(3)));
		assert_eq!(props.get("beta"), Some(&json!(true)));
	}

	#[test]
	fn merge_prefers_other() {
		let base = Properties::new().insert("a", 1).insert("b", 2);
		let merged = base.merge(Properties::new().insert("b", 20).insert("c", 3));

		assert_eq!(merged.len(), 3);
		assert_eq!(merged.get("b"), Some(&json!(20)));
	}

	#[test]
	fn non_object_value_converts_to_empty() {
		let props = Properties::from(json!("not an object"));
		assert!(props.is_empty());
	}

	#[test]
	fn serializes_as_plain_object() {
		let props = Properties::new().insert("hello", "world");
		assert_eq!(serde_json::to_value(&props).unwrap(), json!({"hello": "world"}));
	}

	#[test]
	fn iter_visits_every_pair() {
		let props = Properties::new().insert("zeta", 1).insert("alpha", 2);
		let total: i64 = props.iter().filter_map(|(_, v)| v.as_i64()).sum();
		assert_eq!(props.iter().count(), 2);
		assert_eq!(total, 3);
	}

	#[test]
	fn collects_from_pairs() {
		let props: Properties = [("plan", "pro"), ("role", "admin")].into_iter().collect();
		assert_eq!(props.get("role"), Some(&json!("admin")));
	}

	proptest! {
		#[test]
		fn len_matches_unique_keys(keys in proptest::collection::vec("[a-z]{1,10}", 0..20)) {
			let unique: std::collections::HashSet<_> = keys.iter().cloned().collect();
			let props = keys.iter().fold(Properties::new(), |p, k| p.insert(k.clone(), "v"));
			prop_assert_eq!(props.len(), unique.len());
		}

		#[test]
		fn equality_ignores_construction_path(key in "[a-z]{1,20}", value in "[a-zA-Z0-9]{1,50}") {
			let built = Properties::new().insert(key.clone(), value.clone());
			let mut map = Map::new();
			map.insert(key, Value::String(value));
			let converted = Properties::from(map);
			prop_assert_eq!(built, converted);
		}
	}
}
