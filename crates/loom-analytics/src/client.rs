// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The analytics client capability.
//!
//! [`AnalyticsClient`] is the surface the provider and application code talk
//! to. Every call is fire-and-forget: it returns nothing and never blocks on
//! delivery. Queueing, batching and transport belong to the implementation.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use loom_analytics::{AnalyticsClient, NoOpAnalyticsClient, SharedAnalyticsClient, TrackEvent};
//!
//! let client: SharedAnalyticsClient = Arc::new(NoOpAnalyticsClient);
//! client.track(TrackEvent::new("signup").property("plan", "pro"));
//! client.page();
//! ```

use std::sync::Arc;

use loom_analytics_core::{IdentifyPayload, TrackEvent};

/// Calls an application can make against an analytics backend.
pub trait AnalyticsClient: Send + Sync + 'static {
	/// Associates all subsequent calls with a known user.
	fn identify(&self, payload: IdentifyPayload);

	/// Records a page or route view.
	fn page(&self);

	/// Records a custom named event. The event is passed on unmodified.
	fn track(&self, event: TrackEvent);
}

/// Type alias for a shared analytics client.
pub type SharedAnalyticsClient = Arc<dyn AnalyticsClient>;

/// Returns true if both handles point at the same client instance.
///
/// Only the data pointer is compared, so two handles to one client created
/// through different trait-object casts still compare equal.
pub fn same_client(a: &SharedAnalyticsClient, b: &SharedAnalyticsClient) -> bool {
	std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// A client that discards every call.
///
/// Used where events must be a no-op, such as server-side rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpAnalyticsClient;

impl AnalyticsClient for NoOpAnalyticsClient {
	fn identify(&self, _payload: IdentifyPayload) {}

	fn page(&self) {}

	fn track(&self, _event: TrackEvent) {}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicUsize, Ordering};

	#[derive(Default)]
	struct CountingClient {
		calls: AtomicUsize,
	}

	impl AnalyticsClient for CountingClient {
		fn identify(&self, _payload: IdentifyPayload) {
			self.calls.fetch_add(1, Ordering::SeqCst);
		}

		fn page(&self) {
			self.calls.fetch_add(1, Ordering::SeqCst);
		}

		fn track(&self, _event: TrackEvent) {
			self.calls.fetch_add(1, Ordering::SeqCst);
		}
	}

	#[test]
	fn same_client_compares_instances() {
		let a: SharedAnalyticsClient = Arc::new(CountingClient::default());
		let b: SharedAnalyticsClient = Arc::new(CountingClient::default());
		let a2 = Arc::clone(&a);

		assert!(same_client(&a, &a2));
		assert!(!same_client(&a, &b));
	}

	#[test]
	fn calls_go_through_trait_object() {
		let counting = Arc::new(CountingClient::default());
		let client: SharedAnalyticsClient = counting.clone();

		client.identify(IdentifyPayload::new("1"));
		client.page();
		client.track(TrackEvent::new("test"));

		assert_eq!(counting.calls.load(Ordering::SeqCst), 3);
	}

	#[test]
	fn noop_client_accepts_everything() {
		let client = NoOpAnalyticsClient;
		client.identify(IdentifyPayload::new("1"));
		client.page();
		client.track(TrackEvent::new("ignored"));
	}
}
