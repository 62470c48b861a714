// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client configuration.
//!
//! The write key can come from the environment directly or from a file, so
//! that deployments can mount it as a secret:
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `LOOM_ANALYTICS_WRITE_KEY` | The write key |
//! | `LOOM_ANALYTICS_WRITE_KEY_FILE` | Path to a file holding the write key |
//! | `LOOM_ANALYTICS_MAX_QUEUE_SIZE` | Queue bound (default 1000) |
//!
//! The direct variable wins when both are set.

use std::path::PathBuf;

use loom_analytics_core::WriteKey;

use crate::error::{AnalyticsError, Result};

pub const WRITE_KEY_ENV: &str = "LOOM_ANALYTICS_WRITE_KEY";
pub const MAX_QUEUE_SIZE_ENV: &str = "LOOM_ANALYTICS_MAX_QUEUE_SIZE";

/// Default bound on the number of messages a client buffers.
pub const DEFAULT_MAX_QUEUE_SIZE: usize = 1000;

/// Configuration for constructing an analytics client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsConfig {
	/// The credential the client is constructed from.
	pub write_key: WriteKey,
	/// Maximum number of messages to buffer before dropping the oldest.
	pub max_queue_size: usize,
}

impl AnalyticsConfig {
	/// Creates a configuration with the default queue bound.
	pub fn new(write_key: WriteKey) -> Self {
		Self {
			write_key,
			max_queue_size: DEFAULT_MAX_QUEUE_SIZE,
		}
	}

	/// Sets the maximum number of queued messages.
	pub fn with_max_queue_size(mut self, max_queue_size: usize) -> Self {
		self.max_queue_size = max_queue_size;
		self
	}

	/// Loads configuration from the process environment.
	pub fn from_env() -> Result<Self> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Loads configuration through `lookup`, which maps a variable name to
	/// its value.
	pub fn from_lookup<F>(lookup: F) -> Result<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let write_key = WriteKey::new(load_secret(&lookup, WRITE_KEY_ENV)?)?;

		let max_queue_size = match lookup(MAX_QUEUE_SIZE_ENV) {
			Some(raw) => parse_queue_size(&raw)?,
			None => DEFAULT_MAX_QUEUE_SIZE,
		};

		Ok(Self {
			write_key,
			max_queue_size,
		})
	}
}

fn load_secret<F>(lookup: &F, name: &str) -> Result<String>
where
	F: Fn(&str) -> Option<String>,
{
	if let Some(value) = lookup(name) {
		return Ok(value);
	}

	let file_var = format!("{name}_FILE");
	let Some(path) = lookup(&file_var) else {
		return Err(AnalyticsError::MissingEnv {
			name: name.to_string(),
		});
	};

	let path = PathBuf::from(path);
	std::fs::read_to_string(&path)
		.map(|contents| contents.trim().to_string())
		.map_err(|source| AnalyticsError::ReadSecretFile { path, source })
}

fn parse_queue_size(raw: &str) -> Result<usize> {
	match raw.trim().parse::<usize>() {
		Ok(n) if n > 0 => Ok(n),
		_ => Err(AnalyticsError::InvalidQueueSize {
			value: raw.to_string(),
		}),
	}
}
