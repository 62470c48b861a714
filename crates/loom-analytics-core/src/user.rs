// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The identified user and the payload sent when identifying them.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::properties::Properties;

/// A known user, supplied by the host application.
///
/// Anonymous sessions have no `User`; the analytics client assigns them an
/// anonymous id on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
	id: String,
	#[serde(default)]
	traits: Properties,
}

impl User {
	/// Creates a user. The id is the stable identifier reported to analytics
	/// and must not be empty.
	pub fn new(id: impl Into<String>, traits: Properties) -> Result<Self> {
		let id = id.into();
		if id.trim().is_empty() {
			return Err(CoreError::EmptyUserId);
		}
		Ok(Self { id, traits })
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn traits(&self) -> &Properties {
		&self.traits
	}
}

/// Payload for `identify`, linking subsequent events to a user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifyPayload {
	pub user_id: String,
	#[serde(default)]
	pub traits: Properties,
}

impl IdentifyPayload {
	pub fn new(user_id: impl Into<String>) -> Self {
		Self {
			user_id: user_id.into(),
			traits: Properties::new(),
		}
	}

	/// Sets the traits to attach to the user (builder pattern).
	pub fn with_traits(mut self, traits: Properties) -> Self {
		self.traits = traits;
		self
	}
}

impl From<&User> for IdentifyPayload {
	fn from(user: &User) -> Self {
		Self {
			user_id: user.id.clone(),
			traits: user.traits.clone(),
		}
	}
}
