// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Example: mount the analytics provider, navigate, and print what was recorded.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example navigation -p loom-analytics-provider
//!
//! Set LOOM_ANALYTICS_WRITE_KEY (or LOOM_ANALYTICS_WRITE_KEY_FILE) to use a
//! real write key; otherwise the mock key is used.

use std::sync::Arc;

use loom_analytics::{
	AnalyticsConfig, BufferedAnalyticsClient, Properties, TrackEvent, User, WriteKey,
};
use loom_analytics_provider::{
	use_analytics, AnalyticsProvider, ProviderProps, RouteEventBus, SharedRouterEvents,
	MOCK_WRITE_KEY, ROUTE_CHANGE_COMPLETE,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.init();

	let config = AnalyticsConfig::from_env().unwrap_or_else(|err| {
		tracing::warn!(error = %err, "No analytics configuration, using the mock write key");
		AnalyticsConfig::new(WriteKey::from_static(MOCK_WRITE_KEY))
	});

	let client = Arc::new(BufferedAnalyticsClient::from_config(&config));
	let router = Arc::new(RouteEventBus::new());
	let ambient: SharedRouterEvents = router.clone();

	let user = Arc::new(User::new(
		"user_example_123",
		Properties::new().insert("email", "example@example.com"),
	)?);
	let props = ProviderProps::from_config(config)
		.client_override(client.clone())
		.user(user);
	let provider = AnalyticsProvider::mount(props, ambient);

	// Three navigations, then a button click in some page component.
	for _ in 0..3 {
		router.emit(ROUTE_CHANGE_COMPLETE);
	}
	let analytics = use_analytics(&provider.context())?;
	analytics.track(TrackEvent::new("example_clicked").property("source", "navigation_example"));

	provider.unmount();

	for message in client.drain() {
		println!("{}", serde_json::to_string(&message)?);
	}

	Ok(())
}
