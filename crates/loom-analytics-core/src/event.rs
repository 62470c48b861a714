// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

use crate::properties::Properties;

/// A custom named event with an arbitrary property payload.
///
/// Clients receive track events exactly as the caller built them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackEvent {
	pub event: String,
	#[serde(default)]
	pub properties: Properties,
}

impl TrackEvent {
	pub fn new(event: impl Into<String>) -> Self {
		Self {
			event: event.into(),
			properties: Properties::new(),
		}
	}

	pub fn with_properties(mut self, properties: Properties) -> Self {
		self.properties = properties;
		self
	}

	/// Adds a single property (builder pattern).
	pub fn property<K, V>(mut self, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Into<serde_json::Value>,
	{
		self.properties = self.properties.insert(key, value);
		self
	}
}
