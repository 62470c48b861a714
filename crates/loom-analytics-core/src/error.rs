// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

/// Errors raised while constructing core analytics values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
	/// The write key was empty or whitespace.
	#[error("write key must not be empty")]
	EmptyWriteKey,

	/// The user id was empty or whitespace.
	#[error("user id must not be empty")]
	EmptyUserId,
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
