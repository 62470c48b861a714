// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Analytics for tests and demos.
//!
//! Wrap the code under test in a [`MockAnalyticsProvider`]. Its client never
//! sends anything; calls pile up in the client's queue:
//!
//! ```
//! use loom_analytics::TrackEvent;
//! use loom_analytics_provider::{use_analytics, MockAnalyticsProvider};
//!
//! let provider = MockAnalyticsProvider::mount();
//! let analytics = use_analytics(&provider.context()).unwrap();
//! analytics.track(TrackEvent::new("policy_updated").property("uuid", "12456"));
//!
//! assert_eq!(provider.client().queue_len(), 1);
//! ```
//!
//! To assert on exact calls, publish a spy client yourself with
//! [`AnalyticsContext::with_client`].

use std::sync::Arc;

use loom_analytics::{BufferedAnalyticsClient, SharedAnalyticsClient, WriteKey};
use tracing::debug;

use crate::context::AnalyticsContext;

/// The fixed, non-production write key used by mock clients.
pub const MOCK_WRITE_KEY: &str = "test";

/// Creates a fresh mock client with the [`MOCK_WRITE_KEY`] credential.
pub fn mock_client() -> Arc<BufferedAnalyticsClient> {
	Arc::new(BufferedAnalyticsClient::new(WriteKey::from_static(MOCK_WRITE_KEY)))
}

/// A provider that publishes a mock client and nothing else.
///
/// No router subscription and no identification: it only makes
/// [`use_analytics`](crate::use_analytics) work for the wrapped code. One
/// client is created per mount.
pub struct MockAnalyticsProvider {
	client: Arc<BufferedAnalyticsClient>,
	context: AnalyticsContext,
}

impl MockAnalyticsProvider {
	/// Mounts the provider with a fresh mock client.
	pub fn mount() -> Self {
		let client = mock_client();
		let shared: SharedAnalyticsClient = client.clone();
		let context = AnalyticsContext::empty();
		context.publish(shared);
		debug!("Mock analytics provider mounted");
		Self { client, context }
	}

	/// Returns a handle to the context the mock client is published in.
	pub fn context(&self) -> AnalyticsContext {
		self.context.clone()
	}

	/// The mock client, for inspecting recorded messages.
	pub fn client(&self) -> Arc<BufferedAnalyticsClient> {
		Arc::clone(&self.client)
	}

	/// Unmounts the provider and clears its context.
	pub fn unmount(self) {
		drop(self);
	}
}

impl Drop for MockAnalyticsProvider {
	fn drop(&mut self) {
		self.context.clear();
	}
}

impl std::fmt::Debug for MockAnalyticsProvider {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MockAnalyticsProvider")
			.field("client", &self.client)
			.finish_non_exhaustive()
	}
}
