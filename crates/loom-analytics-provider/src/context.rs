// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The context holder and the consumer accessor.
//!
//! An [`AnalyticsContext`] is the slot a provider publishes its client into.
//! The provider hands clones of the context down to the components it
//! renders; they read the client with [`use_analytics`]. Clones share the
//! slot, so every descendant sees the client the provider currently
//! publishes and sees nothing once the provider has unmounted.

use std::sync::Arc;

use loom_analytics::SharedAnalyticsClient;
use parking_lot::RwLock;

use crate::error::{ProviderError, Result};

/// Tree-scoped slot holding the published analytics client.
#[derive(Clone, Default)]
pub struct AnalyticsContext {
	slot: Arc<RwLock<Option<SharedAnalyticsClient>>>,
}

impl AnalyticsContext {
	/// A context with no provider in scope.
	pub fn empty() -> Self {
		Self::default()
	}

	/// A context that serves `client` directly, without a provider.
	///
	/// Tests use this to put a spy client in front of the code under test.
	pub fn with_client(client: SharedAnalyticsClient) -> Self {
		Self {
			slot: Arc::new(RwLock::new(Some(client))),
		}
	}

	/// Returns the published client, or `None` outside a provider.
	pub fn get(&self) -> Option<SharedAnalyticsClient> {
		self.slot.read().clone()
	}

	/// Returns true while a client is published.
	pub fn is_provided(&self) -> bool {
		self.slot.read().is_some()
	}

	/// Returns the published client, failing when no provider is in scope.
	pub fn analytics(&self) -> Result<SharedAnalyticsClient> {
		self.get().ok_or(ProviderError::MissingContext)
	}

	pub(crate) fn publish(&self, client: SharedAnalyticsClient) {
		*self.slot.write() = Some(client);
	}

	pub(crate) fn clear(&self) {
		self.slot.write().take();
	}
}

impl std::fmt::Debug for AnalyticsContext {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AnalyticsContext")
			.field("provided", &self.is_provided())
			.finish()
	}
}

/// Returns the analytics client published by the nearest provider.
///
/// Fails with [`ProviderError::MissingContext`] when `ctx` has no provider,
/// on every call.
///
/// # Example
///
/// ```
/// use loom_analytics_provider::{use_analytics, AnalyticsContext, ProviderError};
///
/// let ctx = AnalyticsContext::empty();
/// assert_eq!(use_analytics(&ctx).err(), Some(ProviderError::MissingContext));
/// ```
pub fn use_analytics(ctx: &AnalyticsContext) -> Result<SharedAnalyticsClient> {
	ctx.analytics()
}

#[cfg(test)]
mod tests {
	use super::*;
	use loom_analytics::{same_client, NoOpAnalyticsClient};

	#[test]
	fn empty_context_fails_every_time() {
		let ctx = AnalyticsContext::empty();
		for _ in 0..3 {
			assert_eq!(use_analytics(&ctx).err(), Some(ProviderError::MissingContext));
		}
	}

	#[test]
	fn missing_context_message_is_fixed() {
		assert_eq!(
			ProviderError::MissingContext.to_string(),
			"Missing AnalyticsContext. Did you forget to wrap your component with AnalyticsProvider?"
		);
	}

	#[test]
	fn with_client_serves_that_client() {
		let client: SharedAnalyticsClient = Arc::new(NoOpAnalyticsClient);
		let ctx = AnalyticsContext::with_client(Arc::clone(&client));

		let served = use_analytics(&ctx).unwrap();
		assert!(same_client(&served, &client));
	}

	#[test]
	fn clones_share_the_slot() {
		let ctx = AnalyticsContext::empty();
		let child = ctx.clone();

		ctx.publish(Arc::new(NoOpAnalyticsClient));
		assert!(child.is_provided());

		ctx.clear();
		assert!(use_analytics(&child).is_err());
	}
}
