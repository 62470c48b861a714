// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Analytics provider for Loom applications.
//!
//! This crate connects an application to an analytics client and a
//! client-side router:
//!
//! - **[`AnalyticsProvider`]**: resolves the client and router, publishes the
//!   client, identifies the user and records a page view for every
//!   completed route change
//! - **[`use_analytics`]**: reads the published client from an
//!   [`AnalyticsContext`]; fails outside a provider
//! - **[`MockAnalyticsProvider`]** and **[`mock_client`]**: analytics for
//!   tests that never sends anything
//!
//! Delivery, batching and retry are the analytics client's business. The
//! provider only makes fire-and-forget calls.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use loom_analytics::{Properties, TrackEvent, User, WriteKey};
//! use loom_analytics_provider::{
//!     use_analytics, AnalyticsProvider, ProviderProps, RouteEventBus, SharedRouterEvents,
//!     ROUTE_CHANGE_COMPLETE,
//! };
//!
//! let router = Arc::new(RouteEventBus::new());
//! let ambient: SharedRouterEvents = router.clone();
//!
//! let user = Arc::new(User::new("user_123", Properties::new().insert("plan", "pro")).unwrap());
//! let props = ProviderProps::with_write_key(WriteKey::new("wk_dev").unwrap()).user(user);
//! let provider = AnalyticsProvider::mount(props, ambient);
//!
//! // Route changes become page views.
//! router.emit(ROUTE_CHANGE_COMPLETE);
//!
//! // Descendants read the client from the context.
//! let analytics = use_analytics(&provider.context()).unwrap();
//! analytics.track(TrackEvent::new("checkout").property("total", 42));
//!
//! provider.unmount();
//! assert_eq!(router.listener_count(ROUTE_CHANGE_COMPLETE), 0);
//! ```

mod context;
mod error;
mod identification;
mod mock;
mod provider;
mod route_tracking;
mod router;

pub use context::{use_analytics, AnalyticsContext};
pub use error::{ProviderError, Result};
pub use identification::UserIdentification;
pub use mock::{mock_client, MockAnalyticsProvider, MOCK_WRITE_KEY};
pub use provider::{AnalyticsProvider, ClientSource, ProviderProps};
pub use route_tracking::{RouteSubscription, RouteTracking};
pub use router::{
	same_router, HandlerId, RouteEventBus, RouteHandler, RouterEvents, SharedRouterEvents,
	ROUTE_CHANGE_COMPLETE,
};
