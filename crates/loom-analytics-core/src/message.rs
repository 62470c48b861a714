// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Recorded analytics calls.
//!
//! A buffering client turns every `identify`, `page` and `track` call into a
//! [`Message`]. Each message carries the anonymous id assigned by the client
//! and, once the session has been identified, the user id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::event::TrackEvent;
use crate::properties::Properties;
use crate::user::IdentifyPayload;

/// Unique identifier for a recorded message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub Uuid);

impl MessageId {
	pub fn new() -> Self {
		Self(Uuid::new_v4())
	}
}

impl Default for MessageId {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Display for MessageId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Fields common to every message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageContext {
	pub message_id: MessageId,
	pub anonymous_id: String,
	pub user_id: Option<String>,
	pub timestamp: DateTime<Utc>,
}

impl MessageContext {
	pub fn new(anonymous_id: impl Into<String>, user_id: Option<String>) -> Self {
		Self {
			message_id: MessageId::new(),
			anonymous_id: anonymous_id.into(),
			user_id,
			timestamp: Utc::now(),
		}
	}
}

/// One recorded analytics call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
	Identify {
		#[serde(flatten)]
		context: MessageContext,
		traits: Properties,
	},
	Page {
		#[serde(flatten)]
		context: MessageContext,
	},
	Track {
		#[serde(flatten)]
		context: MessageContext,
		event: String,
		properties: Properties,
	},
}

impl Message {
	/// Builds an identify message. The context's user id is the identified user.
	pub fn identify(anonymous_id: &str, payload: IdentifyPayload) -> Self {
		Message::Identify {
			context: MessageContext::new(anonymous_id, Some(payload.user_id)),
			traits: payload.traits,
		}
	}

	pub fn page(anonymous_id: &str, user_id: Option<String>) -> Self {
		Message::Page {
			context: MessageContext::new(anonymous_id, user_id),
		}
	}

	pub fn track(anonymous_id: &str, user_id: Option<String>, event: TrackEvent) -> Self {
		Message::Track {
			context: MessageContext::new(anonymous_id, user_id),
			event: event.event,
			properties: event.properties,
		}
	}

	pub fn context(&self) -> &MessageContext {
		match self {
			Message::Identify { context, .. }
			| Message::Page { context }
			| Message::Track { context, .. } => context,
		}
	}

	/// Returns the message type ("identify", "page" or "track").
	pub fn kind(&self) -> &'static str {
		match self {
			Message::Identify { .. } => "identify",
			Message::Page { .. } => "page",
			Message::Track { .. } => "track",
		}
	}
}
