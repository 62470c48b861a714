// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The analytics provider.
//!
//! Mount one [`AnalyticsProvider`] at the top of the application. It
//! resolves the analytics client and router, publishes the client into an
//! [`AnalyticsContext`], identifies the user and records a page view for
//! every completed route change.

use std::sync::Arc;

use loom_analytics::{
	same_client, AnalyticsConfig, BufferedAnalyticsClient, SharedAnalyticsClient, User, WriteKey,
};
use tracing::debug;

use crate::context::AnalyticsContext;
use crate::identification::UserIdentification;
use crate::route_tracking::RouteTracking;
use crate::router::SharedRouterEvents;

/// Where the provider's analytics client comes from.
#[derive(Clone)]
pub enum ClientSource {
	/// Use this client as-is. The provider does not own its lifecycle.
	Provided(SharedAnalyticsClient),
	/// Build a client from this configuration, once per provider mount.
	Construct(AnalyticsConfig),
}

impl std::fmt::Debug for ClientSource {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ClientSource::Provided(_) => f.write_str("Provided(..)"),
			ClientSource::Construct(config) => f.debug_tuple("Construct").field(config).finish(),
		}
	}
}

/// Inputs to the provider, re-supplied on every render.
#[derive(Clone)]
pub struct ProviderProps {
	pub client: ClientSource,
	pub user: Option<Arc<User>>,
	pub router_override: Option<SharedRouterEvents>,
}

impl ProviderProps {
	/// Creates props with the given client source, no user and no router override.
	pub fn new(client: ClientSource) -> Self {
		Self {
			client,
			user: None,
			router_override: None,
		}
	}

	/// Props that construct a client from `write_key` with default settings.
	pub fn with_write_key(write_key: WriteKey) -> Self {
		Self::new(ClientSource::Construct(AnalyticsConfig::new(write_key)))
	}

	/// Creates props that construct a client from `config`.
	pub fn from_config(config: AnalyticsConfig) -> Self {
		Self::new(ClientSource::Construct(config))
	}

	/// Uses `client` instead of constructing one.
	pub fn client_override(mut self, client: SharedAnalyticsClient) -> Self {
		self.client = ClientSource::Provided(client);
		self
	}

	/// Sets the signed-in user.
	pub fn user(mut self, user: Arc<User>) -> Self {
		self.user = Some(user);
		self
	}

	/// Subscribes to `router` instead of the ambient router.
	pub fn router_override(mut self, router: SharedRouterEvents) -> Self {
		self.router_override = Some(router);
		self
	}
}

impl std::fmt::Debug for ProviderProps {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ProviderProps")
			.field("client", &self.client)
			.field("user", &self.user)
			.field("router_override", &self.router_override.is_some())
			.finish()
	}
}

/// A mounted analytics provider.
///
/// Dropping the provider (or calling [`unmount`](Self::unmount)) removes the
/// route subscription first and then clears the published context.
pub struct AnalyticsProvider {
	route_tracking: RouteTracking,
	identification: UserIdentification,
	context: AnalyticsContext,
	ambient_router: SharedRouterEvents,
	constructed: Option<(WriteKey, SharedAnalyticsClient)>,
	client: SharedAnalyticsClient,
	router: SharedRouterEvents,
}

impl AnalyticsProvider {
	/// Mounts a provider and runs the first render.
	///
	/// `ambient_router` is the application's router; `props.router_override`
	/// takes precedence over it.
	pub fn mount(props: ProviderProps, ambient_router: SharedRouterEvents) -> Self {
		let mut constructed = None;
		let client = resolve_client(&props.client, &mut constructed);
		let router = props
			.router_override
			.clone()
			.unwrap_or_else(|| Arc::clone(&ambient_router));

		let context = AnalyticsContext::empty();
		context.publish(Arc::clone(&client));
		debug!(user_present = props.user.is_some(), "Analytics provider mounted");

		let mut provider = Self {
			route_tracking: RouteTracking::new(),
			identification: UserIdentification::new(),
			context,
			ambient_router,
			constructed,
			client,
			router,
		};
		provider.run_behaviours(props.user.as_ref());
		provider
	}

	/// Re-renders the provider with new props.
	///
	/// The client is republished only if it changed. The route subscription
	/// moves only if the client or router changed. The user is identified
	/// only if the client or user changed.
	pub fn render(&mut self, props: ProviderProps) {
		let client = resolve_client(&props.client, &mut self.constructed);
		let router = props
			.router_override
			.clone()
			.unwrap_or_else(|| Arc::clone(&self.ambient_router));

		if !same_client(&client, &self.client) {
			debug!("Publishing new analytics client");
			self.context.publish(Arc::clone(&client));
		}
		self.client = client;
		self.router = router;

		self.run_behaviours(props.user.as_ref());
	}

	fn run_behaviours(&mut self, user: Option<&Arc<User>>) {
		self.route_tracking.sync(&self.client, &self.router);
		self.identification.sync(&self.client, user);
	}

	/// Context handle to pass to descendants.
	pub fn context(&self) -> AnalyticsContext {
		self.context.clone()
	}

	/// The client currently published.
	pub fn client(&self) -> SharedAnalyticsClient {
		Arc::clone(&self.client)
	}

	/// Tears the provider down. Equivalent to dropping it.
	pub fn unmount(self) {
		drop(self);
	}

	fn teardown(&mut self) {
		self.route_tracking.release();
		self.identification.reset();
		self.context.clear();
		debug!("Analytics provider unmounted");
	}
}

impl Drop for AnalyticsProvider {
	fn drop(&mut self) {
		self.teardown();
	}
}

impl std::fmt::Debug for AnalyticsProvider {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AnalyticsProvider")
			.field("route_tracking", &self.route_tracking)
			.field("identification", &self.identification)
			.field("context", &self.context)
			.finish_non_exhaustive()
	}
}

/// Resolves the effective client. Constructed clients are reused for as long
/// as the write key stays the same.
fn resolve_client(
	source: &ClientSource,
	constructed: &mut Option<(WriteKey, SharedAnalyticsClient)>,
) -> SharedAnalyticsClient {
	match source {
		ClientSource::Provided(client) => Arc::clone(client),
		ClientSource::Construct(config) => {
			if let Some((key, client)) = constructed.as_ref() {
				if *key == config.write_key {
					return Arc::clone(client);
				}
			}
			let client: SharedAnalyticsClient =
				Arc::new(BufferedAnalyticsClient::from_config(config));
			*constructed = Some((config.write_key.clone(), Arc::clone(&client)));
			client
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::router::{RouteEventBus, ROUTE_CHANGE_COMPLETE};
	use loom_analytics::NoOpAnalyticsClient;

	fn bus() -> (Arc<RouteEventBus>, SharedRouterEvents) {
		let bus = Arc::new(RouteEventBus::new());
		let router: SharedRouterEvents = bus.clone();
		(bus, router)
	}

	fn key(raw: &str) -> WriteKey {
		WriteKey::new(raw).unwrap()
	}

	#[test]
	fn constructed_client_is_memoised_by_write_key() {
		let (_, router) = bus();
		let mut provider =
			AnalyticsProvider::mount(ProviderProps::with_write_key(key("wk_1")), router);
		let first = provider.client();

		provider.render(ProviderProps::with_write_key(key("wk_1")));
		assert!(same_client(&first, &provider.client()));

		provider.render(ProviderProps::with_write_key(key("wk_2")));
		assert!(!same_client(&first, &provider.client()));
	}

	#[test]
	fn provided_client_takes_precedence() {
		let (_, router) = bus();
		let override_client: SharedAnalyticsClient = Arc::new(NoOpAnalyticsClient);
		let props = ProviderProps::with_write_key(key("wk_1"))
			.client_override(Arc::clone(&override_client));

		let provider = AnalyticsProvider::mount(props, router);

		assert!(same_client(&provider.client(), &override_client));
		let published = provider.context().analytics().unwrap();
		assert!(same_client(&published, &override_client));
	}

	#[test]
	fn router_override_takes_precedence() {
		let (ambient_bus, ambient) = bus();
		let (override_bus, override_router) = bus();
		let props = ProviderProps::with_write_key(key("wk")).router_override(override_router);

		let _provider = AnalyticsProvider::mount(props, ambient);

		assert_eq!(ambient_bus.listener_count(ROUTE_CHANGE_COMPLETE), 0);
		assert_eq!(override_bus.listener_count(ROUTE_CHANGE_COMPLETE), 1);
	}

	#[test]
	fn dropping_override_falls_back_to_ambient_router() {
		let (ambient_bus, ambient) = bus();
		let (override_bus, override_router) = bus();
		let mut provider = AnalyticsProvider::mount(
			ProviderProps::with_write_key(key("wk")).router_override(override_router),
			ambient,
		);

		provider.render(ProviderProps::with_write_key(key("wk")));

		assert_eq!(override_bus.listener_count(ROUTE_CHANGE_COMPLETE), 0);
		assert_eq!(ambient_bus.listener_count(ROUTE_CHANGE_COMPLETE), 1);
	}

	#[test]
	fn new_write_key_republishes_to_existing_context_handles() {
		let (_, router) = bus();
		let mut provider =
			AnalyticsProvider::mount(ProviderProps::with_write_key(key("wk_1")), router);
		let descendant = provider.context();

		provider.render(ProviderProps::with_write_key(key("wk_2")));

		let seen = descendant.analytics().unwrap();
		assert!(same_client(&seen, &provider.client()));
	}

	#[test]
	fn unmount_clears_context_after_unsubscribing() {
		let (bus, router) = bus();
		let provider = AnalyticsProvider::mount(ProviderProps::with_write_key(key("wk")), router);
		let descendant = provider.context();

		provider.unmount();

		assert_eq!(bus.listener_count(ROUTE_CHANGE_COMPLETE), 0);
		assert!(!descendant.is_provided());
	}

	#[test]
	fn debug_does_not_leak_write_key() {
		let (_, router) = bus();
		let props = ProviderProps::with_write_key(key("wk_secret_value"));
		assert!(!format!("{props:?}").contains("wk_secret_value"));

		let provider = AnalyticsProvider::mount(props, router);
		assert!(!format!("{provider:?}").contains("wk_secret_value"));
	}
}
