// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Page tracking on route changes.
//!
//! A [`RouteSubscription`] registers one [`ROUTE_CHANGE_COMPLETE`] handler
//! that calls `page()` and removes it again when dropped. [`RouteTracking`]
//! keeps exactly one subscription alive for the current (client, router)
//! pair.

use std::sync::Arc;

use loom_analytics::{same_client, SharedAnalyticsClient};
use tracing::debug;

use crate::router::{
	same_router, HandlerId, RouteHandler, SharedRouterEvents, ROUTE_CHANGE_COMPLETE,
};

/// Guard for a registered page-tracking handler.
///
/// The handler is deregistered when the guard is dropped, on every exit path.
#[must_use = "dropping the subscription deregisters the handler"]
pub struct RouteSubscription {
	client: SharedAnalyticsClient,
	router: SharedRouterEvents,
	handler_id: HandlerId,
}

impl RouteSubscription {
	/// Registers a handler on `router` that calls `client.page()` for every
	/// completed route change.
	pub fn subscribe(client: &SharedAnalyticsClient, router: &SharedRouterEvents) -> Self {
		let page_client = Arc::clone(client);
		let handler: RouteHandler = Arc::new(move || {
			debug!("Route change complete, recording page");
			page_client.page();
		});
		let handler_id = router.on(ROUTE_CHANGE_COMPLETE, handler);
		debug!(handler_id = %handler_id, "Subscribed to route changes");

		Self {
			client: Arc::clone(client),
			router: Arc::clone(router),
			handler_id,
		}
	}

	/// Returns true if this subscription was made for exactly this pair.
	pub fn is_bound_to(&self, client: &SharedAnalyticsClient, router: &SharedRouterEvents) -> bool {
		same_client(&self.client, client) && same_router(&self.router, router)
	}
}

impl Drop for RouteSubscription {
	fn drop(&mut self) {
		self.router.off(ROUTE_CHANGE_COMPLETE, self.handler_id);
		debug!(handler_id = %self.handler_id, "Unsubscribed from route changes");
	}
}

impl std::fmt::Debug for RouteSubscription {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouteSubscription")
			.field("handler_id", &self.handler_id)
			.finish_non_exhaustive()
	}
}

/// Keeps one route subscription per mounted (client, router) pair.
#[derive(Debug, Default)]
pub struct RouteTracking {
	active: Option<RouteSubscription>,
}

impl RouteTracking {
	pub fn new() -> Self {
		Self::default()
	}

	/// Ensures a subscription exists for this pair.
	///
	/// Does nothing when the pair is unchanged. Otherwise the previous
	/// subscription is removed before the new one is registered.
	pub fn sync(&mut self, client: &SharedAnalyticsClient, router: &SharedRouterEvents) {
		if self
			.active
			.as_ref()
			.is_some_and(|sub| sub.is_bound_to(client, router))
		{
			return;
		}

		drop(self.active.take());
		self.active = Some(RouteSubscription::subscribe(client, router));
	}

	/// Removes the current subscription, if any.
	pub fn release(&mut self) {
		drop(self.active.take());
	}

	pub fn is_active(&self) -> bool {
		self.active.is_some()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::router::RouteEventBus;
	use loom_analytics::{AnalyticsClient, IdentifyPayload, TrackEvent};
	use std::sync::atomic::{AtomicUsize, Ordering};

	#[derive(Default)]
	struct PageCounter {
		pages: AtomicUsize,
	}

	impl AnalyticsClient for PageCounter {
		fn identify(&self, _payload: IdentifyPayload) {}

		fn page(&self) {
			self.pages.fetch_add(1, Ordering::SeqCst);
		}

		fn track(&self, _event: TrackEvent) {}
	}

	fn setup() -> (
		Arc<PageCounter>,
		SharedAnalyticsClient,
		Arc<RouteEventBus>,
		SharedRouterEvents,
	) {
		let counter = Arc::new(PageCounter::default());
		let client: SharedAnalyticsClient = counter.clone();
		let bus = Arc::new(RouteEventBus::new());
		let router: SharedRouterEvents = bus.clone();
		(counter, client, bus, router)
	}

	#[test]
	fn subscription_pages_on_each_route_change() {
		let (counter, client, bus, router) = setup();
		let _sub = RouteSubscription::subscribe(&client, &router);

		bus.emit(ROUTE_CHANGE_COMPLETE);
		bus.emit(ROUTE_CHANGE_COMPLETE);

		assert_eq!(counter.pages.load(Ordering::SeqCst), 2);
	}

	#[test]
	fn dropping_subscription_deregisters() {
		let (counter, client, bus, router) = setup();
		let sub = RouteSubscription::subscribe(&client, &router);
		drop(sub);

		assert_eq!(bus.listener_count(ROUTE_CHANGE_COMPLETE), 0);
		bus.emit(ROUTE_CHANGE_COMPLETE);
		assert_eq!(counter.pages.load(Ordering::SeqCst), 0);
	}

	#[test]
	fn subscription_released_on_unwind() {
		let (counter, client, bus, router) = setup();

		let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
			let _sub = RouteSubscription::subscribe(&client, &router);
			panic!("render failed");
		}));

		assert!(result.is_err());
		assert_eq!(bus.listener_count(ROUTE_CHANGE_COMPLETE), 0);
		bus.emit(ROUTE_CHANGE_COMPLETE);
		assert_eq!(counter.pages.load(Ordering::SeqCst), 0);
	}

	#[test]
	fn sync_with_same_pair_keeps_single_subscription() {
		let (counter, client, bus, router) = setup();
		let mut tracking = RouteTracking::new();

		for _ in 0..5 {
			tracking.sync(&client, &router);
		}

		assert_eq!(bus.listener_count(ROUTE_CHANGE_COMPLETE), 1);
		bus.emit(ROUTE_CHANGE_COMPLETE);
		assert_eq!(counter.pages.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn sync_with_new_router_moves_subscription() {
		let (counter, client, old_bus, old_router) = setup();
		let new_bus = Arc::new(RouteEventBus::new());
		let new_router: SharedRouterEvents = new_bus.clone();
		let mut tracking = RouteTracking::new();

		tracking.sync(&client, &old_router);
		tracking.sync(&client, &new_router);

		assert_eq!(old_bus.listener_count(ROUTE_CHANGE_COMPLETE), 0);
		assert_eq!(new_bus.listener_count(ROUTE_CHANGE_COMPLETE), 1);

		old_bus.emit(ROUTE_CHANGE_COMPLETE);
		assert_eq!(counter.pages.load(Ordering::SeqCst), 0);
		new_bus.emit(ROUTE_CHANGE_COMPLETE);
		assert_eq!(counter.pages.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn sync_with_new_client_stops_paging_old_client() {
		let (old_counter, old_client, bus, router) = setup();
		let new_counter = Arc::new(PageCounter::default());
		let new_client: SharedAnalyticsClient = new_counter.clone();
		let mut tracking = RouteTracking::new();

		tracking.sync(&old_client, &router);
		tracking.sync(&new_client, &router);
		bus.emit(ROUTE_CHANGE_COMPLETE);

		assert_eq!(old_counter.pages.load(Ordering::SeqCst), 0);
		assert_eq!(new_counter.pages.load(Ordering::SeqCst), 1);
		assert_eq!(bus.listener_count(ROUTE_CHANGE_COMPLETE), 1);
	}

	#[test]
	fn release_removes_subscription() {
		let (_, client, bus, router) = setup();
		let mut tracking = RouteTracking::new();
		tracking.sync(&client, &router);

		tracking.release();

		assert!(!tracking.is_active());
		assert_eq!(bus.listener_count(ROUTE_CHANGE_COMPLETE), 0);
	}
}
