// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! A client that records every call into a bounded in-memory queue.
//!
//! The client assigns each session an anonymous id when it is constructed.
//! After `identify`, every later message also carries the user id. Nothing
//! is ever sent anywhere: whoever owns the client drains the queue and hands
//! the messages to a transport, or inspects them in tests.

use std::collections::VecDeque;

use loom_analytics_core::{CoreError, IdentifyPayload, Message, TrackEvent, WriteKey};
use parking_lot::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::client::AnalyticsClient;
use crate::config::{AnalyticsConfig, DEFAULT_MAX_QUEUE_SIZE};
use crate::error::Result;

/// Builder for constructing a [`BufferedAnalyticsClient`].
pub struct BufferedAnalyticsClientBuilder {
	write_key: Option<WriteKey>,
	max_queue_size: usize,
}

impl BufferedAnalyticsClientBuilder {
	pub fn new() -> Self {
		Self {
			write_key: None,
			max_queue_size: DEFAULT_MAX_QUEUE_SIZE,
		}
	}

	pub fn write_key(mut self, key: WriteKey) -> Self {
		self.write_key = Some(key);
		self
	}

	/// Sets the queue bound. Values below one are raised to one.
	pub fn max_queue_size(mut self, max: usize) -> Self {
		self.max_queue_size = max.max(1);
		self
	}

	pub fn build(self) -> Result<BufferedAnalyticsClient> {
		let write_key = self.write_key.ok_or(CoreError::EmptyWriteKey)?;
		Ok(BufferedAnalyticsClient::with_parts(
			write_key,
			self.max_queue_size,
		))
	}
}

impl Default for BufferedAnalyticsClientBuilder {
	fn default() -> Self {
		Self::new()
	}
}

struct QueueState {
	user_id: Option<String>,
	messages: VecDeque<Message>,
}

/// Analytics client that buffers messages in memory.
///
/// # Example
///
/// ```
/// use loom_analytics::{AnalyticsClient, BufferedAnalyticsClient, TrackEvent, WriteKey};
///
/// let client = BufferedAnalyticsClient::new(WriteKey::new("wk_dev").unwrap());
/// client.track(TrackEvent::new("opened_settings"));
///
/// let messages = client.drain();
/// assert_eq!(messages.len(), 1);
/// assert_eq!(messages[0].kind(), "track");
/// ```
pub struct BufferedAnalyticsClient {
	write_key: WriteKey,
	anonymous_id: String,
	max_queue_size: usize,
	state: Mutex<QueueState>,
}

impl BufferedAnalyticsClient {
	pub fn builder() -> BufferedAnalyticsClientBuilder {
		BufferedAnalyticsClientBuilder::new()
	}

	/// Creates a client with the default queue bound.
	pub fn new(write_key: WriteKey) -> Self {
		Self::with_parts(write_key, DEFAULT_MAX_QUEUE_SIZE)
	}

	pub fn from_config(config: &AnalyticsConfig) -> Self {
		Self::with_parts(config.write_key.clone(), config.max_queue_size.max(1))
	}

	fn with_parts(write_key: WriteKey, max_queue_size: usize) -> Self {
		let anonymous_id = Uuid::new_v4().to_string();
		info!(
			write_key = %write_key,
			anonymous_id = %anonymous_id,
			max_queue_size,
			"Analytics client initialized"
		);
		Self {
			write_key,
			anonymous_id,
			max_queue_size,
			state: Mutex::new(QueueState {
				user_id: None,
				messages: VecDeque::new(),
			}),
		}
	}

	pub fn write_key(&self) -> &WriteKey {
		&self.write_key
	}

	pub fn anonymous_id(&self) -> &str {
		&self.anonymous_id
	}

	/// The user id set by the most recent `identify`, if any.
	pub fn user_id(&self) -> Option<String> {
		self.state.lock().user_id.clone()
	}

	pub fn queue_len(&self) -> usize {
		self.state.lock().messages.len()
	}

	/// Returns a copy of the buffered messages, oldest first.
	pub fn messages(&self) -> Vec<Message> {
		self.state.lock().messages.iter().cloned().collect()
	}

	/// Removes and returns all buffered messages, oldest first.
	pub fn drain(&self) -> Vec<Message> {
		let mut state = self.state.lock();
		std::mem::take(&mut state.messages).into()
	}

	fn push(&self, state: &mut QueueState, message: Message) {
		while state.messages.len() >= self.max_queue_size {
			if let Some(dropped) = state.messages.pop_front() {
				warn!(
					kind = dropped.kind(),
					message_id = %dropped.context().message_id,
					"Dropped analytics message due to queue overflow"
				);
			}
		}
		state.messages.push_back(message);
	}
}

impl AnalyticsClient for BufferedAnalyticsClient {
	fn identify(&self, payload: IdentifyPayload) {
		let mut state = self.state.lock();
		debug!(user_id = %payload.user_id, "Recording identify");
		state.user_id = Some(payload.user_id.clone());
		let message = Message::identify(&self.anonymous_id, payload);
		self.push(&mut state, message);
	}

	fn page(&self) {
		let mut state = self.state.lock();
		debug!("Recording page");
		let message = Message::page(&self.anonymous_id, state.user_id.clone());
		self.push(&mut state, message);
	}

	fn track(&self, event: TrackEvent) {
		let mut state = self.state.lock();
		debug!(event = %event.event, "Recording track");
		let message = Message::track(&self.anonymous_id, state.user_id.clone(), event);
		self.push(&mut state, message);
	}
}

impl std::fmt::Debug for BufferedAnalyticsClient {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("BufferedAnalyticsClient")
			.field("write_key", &self.write_key)
			.field("anonymous_id", &self.anonymous_id)
			.field("max_queue_size", &self.max_queue_size)
			.finish_non_exhaustive()
	}
}
