// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

/// Errors raised by the provider layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
	/// The analytics client was requested outside a provider's subtree.
	///
	/// This is a usage error in the calling code and is never retried.
	#[error(
		"Missing AnalyticsContext. Did you forget to wrap your component with AnalyticsProvider?"
	)]
	MissingContext,
}

/// Result type alias for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;
