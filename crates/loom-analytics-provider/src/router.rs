// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The router capability the provider subscribes to.
//!
//! A router exposes named navigation events. The provider only needs
//! [`ROUTE_CHANGE_COMPLETE`], fired once a navigation has finished.
//! [`RouteEventBus`] is an in-process implementation for hosts that drive
//! navigation themselves, and for tests.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

/// Event emitted when a route transition has completed.
pub const ROUTE_CHANGE_COMPLETE: &str = "routeChangeComplete";

/// A navigation event handler. Handlers take no arguments.
pub type RouteHandler = Arc<dyn Fn() + Send + Sync>;

/// Identifies one registered handler, for deregistration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

impl fmt::Display for HandlerId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Subscription surface for a router's navigation events.
pub trait RouterEvents: Send + Sync + 'static {
	/// Registers `handler` for `event` and returns its id.
	fn on(&self, event: &str, handler: RouteHandler) -> HandlerId;

	/// Removes the handler registered under `id`. Unknown ids are ignored.
	fn off(&self, event: &str, id: HandlerId);
}

/// Type alias for a shared router.
pub type SharedRouterEvents = Arc<dyn RouterEvents>;

/// Returns true if both handles point at the same router instance.
pub fn same_router(a: &SharedRouterEvents, b: &SharedRouterEvents) -> bool {
	std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// In-process event emitter implementing [`RouterEvents`].
#[derive(Default)]
pub struct RouteEventBus {
	next_id: AtomicU64,
	handlers: Mutex<HashMap<String, Vec<(HandlerId, RouteHandler)>>>,
}

impl RouteEventBus {
	/// Creates a bus with no listeners.
	pub fn new() -> Self {
		Self::default()
	}

	/// Invokes every handler registered for `event`, in registration order.
	///
	/// Handlers are invoked outside the lock, so a handler may register or
	/// remove handlers. Returns the number of handlers invoked.
	pub fn emit(&self, event: &str) -> usize {
		let handlers: Vec<RouteHandler> = self
			.handlers
			.lock()
			.get(event)
			.map(|list| list.iter().map(|(_, h)| Arc::clone(h)).collect())
			.unwrap_or_default();

		trace!(event, listeners = handlers.len(), "Emitting router event");
		for handler in &handlers {
			handler();
		}
		handlers.len()
	}

	/// Returns how many handlers are registered for `event`.
	pub fn listener_count(&self, event: &str) -> usize {
		self.handlers.lock().get(event).map_or(0, Vec::len)
	}
}

impl RouterEvents for RouteEventBus {
	fn on(&self, event: &str, handler: RouteHandler) -> HandlerId {
		let id = HandlerId(self.next_id.fetch_add(1, Ordering::Relaxed));
		self.handlers
			.lock()
			.entry(event.to_string())
			.or_default()
			.push((id, handler));
		id
	}

	fn off(&self, event: &str, id: HandlerId) {
		let mut handlers = self.handlers.lock();
		if let Some(list) = handlers.get_mut(event) {
			list.retain(|(existing, _)| *existing != id);
			if list.is_empty() {
				handlers.remove(event);
			}
		}
	}
}

impl fmt::Debug for RouteEventBus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let handlers = self.handlers.lock();
		let counts: HashMap<&str, usize> = handlers
			.iter()
			.map(|(event, list)| (event.as_str(), list.len()))
			.collect();
		f.debug_struct("RouteEventBus")
			.field("listeners", &counts)
			.finish()
	}
}
