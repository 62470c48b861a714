// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Analytics client for the Loom analytics provider.
//!
//! This crate defines the [`AnalyticsClient`] capability that the provider
//! publishes to application code, plus two implementations:
//!
//! - [`BufferedAnalyticsClient`]: built from a write key, records every call
//!   as a [`Message`] in a bounded queue
//! - [`NoOpAnalyticsClient`]: discards every call
//!
//! # Example
//!
//! ```
//! use loom_analytics::{
//!     AnalyticsClient, AnalyticsConfig, BufferedAnalyticsClient, IdentifyPayload, WriteKey,
//! };
//!
//! let config = AnalyticsConfig::new(WriteKey::new("wk_dev").unwrap());
//! let client = BufferedAnalyticsClient::from_config(&config);
//!
//! client.identify(IdentifyPayload::new("user_123"));
//! client.page();
//!
//! assert_eq!(client.user_id().as_deref(), Some("user_123"));
//! ```

mod buffered;
mod client;
mod config;
mod error;

pub use buffered::{BufferedAnalyticsClient, BufferedAnalyticsClientBuilder};
pub use client::{same_client, AnalyticsClient, NoOpAnalyticsClient, SharedAnalyticsClient};
pub use config::{AnalyticsConfig, DEFAULT_MAX_QUEUE_SIZE, MAX_QUEUE_SIZE_ENV, WRITE_KEY_ENV};
pub use error::{AnalyticsError, Result};

// Re-export core types for convenience
pub use loom_analytics_core::{
	CoreError, IdentifyPayload, Message, MessageContext, MessageId, Properties, TrackEvent, User,
	WriteKey,
};
