// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The credential an analytics client is constructed from.
//!
//! Write keys identify the source that events are attributed to. They are not
//! passwords, but they still must not show up in logs, so `Debug` and
//! `Display` print [`REDACTED`] instead of the value.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CoreError, Result};

/// Placeholder printed in place of a write key.
pub const REDACTED: &str = "[REDACTED]";

/// A non-empty analytics write key.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WriteKey(String);

impl WriteKey {
	/// Creates a write key, rejecting empty or whitespace-only input.
	pub fn new(key: impl Into<String>) -> Result<Self> {
		let key = key.into();
		if key.trim().is_empty() {
			return Err(CoreError::EmptyWriteKey);
		}
		Ok(Self(key))
	}

	/// Creates a write key from a compile-time constant.
	///
	/// # Panics
	///
	/// Panics if `key` is empty or whitespace.
	pub fn from_static(key: &'static str) -> Self {
		assert!(!key.trim().is_empty(), "write key must not be empty");
		Self(key.to_string())
	}

	/// Returns the raw key. Callers are responsible for not logging it.
	pub fn expose(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for WriteKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("WriteKey").field(&REDACTED).finish()
	}
}

impl fmt::Display for WriteKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl std::str::FromStr for WriteKey {
	type Err = CoreError;

	fn from_str(s: &str) -> Result<Self> {
		Self::new(s)
	}
}

impl<'de> Deserialize<'de> for WriteKey {
	fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let raw = String::deserialize(deserializer)?;
		WriteKey::new(raw).map_err(serde::de::Error::custom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn empty_key_is_rejected() {
		assert_eq!(WriteKey::new(""), Err(CoreError::EmptyWriteKey));
		assert_eq!(WriteKey::new("   "), Err(CoreError::EmptyWriteKey));
	}

	#[test]
	fn from_static_accepts_constant() {
		assert_eq!(WriteKey::from_static("test").expose(), "test");
	}

	#[test]
	#[should_panic(expected = "write key must not be empty")]
	fn from_static_panics_on_empty() {
		let _ = WriteKey::from_static("");
	}

	#[test]
	fn expose_returns_raw_value() {
		let key = WriteKey::new("wk_live_123").unwrap();
		assert_eq!(key.expose(), "wk_live_123");
	}

	#[test]
	fn debug_and_display_are_redacted() {
		let key = WriteKey::new("wk_live_123").unwrap();
		assert!(!format!("{key:?}").contains("wk_live_123"));
		assert!(format!("{key:?}").contains(REDACTED));
		assert_eq!(key.to_string(), REDACTED);
	}

	#[test]
	fn parses_from_str() {
		let key: WriteKey = "wk_parsed".parse().unwrap();
		assert_eq!(key.expose(), "wk_parsed");
		assert_eq!(" ".parse::<WriteKey>(), Err(CoreError::EmptyWriteKey));
	}

	#[test]
	fn deserialize_rejects_empty_key() {
		let result: std::result::Result<WriteKey, _> = serde_json::from_str("\"\"");
		assert!(result.is_err());

		let key: WriteKey = serde_json::from_str("\"abc\"").unwrap();
		assert_eq!(key.expose(), "abc");
	}

	proptest! {
		#[test]
		fn redaction_never_leaks(raw in "[a-z0-9_]{8,40}") {
			let key = WriteKey::new(raw.clone()).unwrap();
			let debug = format!("{key:?}");
			let display = key.to_string();
			prop_assert!(!debug.contains(&raw));
			prop_assert!(!display.contains(&raw));
		}
	}
}
