// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the analytics client.

use std::path::PathBuf;

use loom_analytics_core::CoreError;
use thiserror::Error;

/// Analytics client errors.
///
/// These only arise while configuring or constructing a client. Calls on a
/// constructed client are fire-and-forget and never fail.
#[derive(Debug, Error)]
pub enum AnalyticsError {
	/// Write key is missing or empty.
	#[error("invalid write key: {0}")]
	InvalidWriteKey(#[from] CoreError),

	/// A required environment variable is not set.
	#[error("missing environment variable {name} (or {name}_FILE)")]
	MissingEnv { name: String },

	/// The file named by a `*_FILE` variable could not be read.
	#[error("failed to read secret file {}: {source}", path.display())]
	ReadSecretFile {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The queue bound is zero or not a number.
	#[error("invalid queue size {value:?}: must be a positive integer")]
	InvalidQueueSize { value: String },
}

/// Result type alias for analytics operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_env_names_file_variant() {
		let err = AnalyticsError::MissingEnv {
			name: "LOOM_ANALYTICS_WRITE_KEY".to_string(),
		};
		assert_eq!(
			err.to_string(),
			"missing environment variable LOOM_ANALYTICS_WRITE_KEY (or LOOM_ANALYTICS_WRITE_KEY_FILE)"
		);
	}

	#[test]
	fn core_errors_convert() {
		let err: AnalyticsError = CoreError::EmptyWriteKey.into();
		assert!(matches!(
			err,
			AnalyticsError::InvalidWriteKey(CoreError::EmptyWriteKey)
		));
	}

	#[test]
	fn read_failure_keeps_source() {
		let err = AnalyticsError::ReadSecretFile {
			path: PathBuf::from("/nope"),
			source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
		};
		assert!(std::error::Error::source(&err).is_some());
		assert!(err.to_string().contains("/nope"));
	}
}
