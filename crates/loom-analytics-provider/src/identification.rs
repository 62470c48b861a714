// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Automatic `identify` when the user changes.

use std::sync::Arc;

use loom_analytics::{same_client, IdentifyPayload, SharedAnalyticsClient, User};
use tracing::debug;

/// Calls `identify` whenever the (client, user) pair changes and a user is
/// present.
///
/// Both members are compared by identity. Re-syncing with the same
/// `Arc<User>` is a no-op; a new `Arc<User>` with equal fields identifies
/// again. Anonymous sessions (no user) are never identified.
#[derive(Default)]
pub struct UserIdentification {
	last: Option<(SharedAnalyticsClient, Option<Arc<User>>)>,
}

impl UserIdentification {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns true if `identify` was called.
	pub fn sync(&mut self, client: &SharedAnalyticsClient, user: Option<&Arc<User>>) -> bool {
		let unchanged = self.last.as_ref().is_some_and(|(last_client, last_user)| {
			same_client(last_client, client) && same_user(last_user.as_ref(), user)
		});
		if unchanged {
			return false;
		}

		self.last = Some((Arc::clone(client), user.cloned()));

		let Some(user) = user else {
			debug!("No user, skipping identify");
			return false;
		};

		debug!(user_id = %user.id(), "Identifying user");
		client.identify(IdentifyPayload::from(user.as_ref()));
		true
	}

	/// Forgets the last pair, so the next sync identifies again.
	pub fn reset(&mut self) {
		self.last = None;
	}
}

fn same_user(a: Option<&Arc<User>>, b: Option<&Arc<User>>) -> bool {
	match (a, b) {
		(Some(a), Some(b)) => Arc::ptr_eq(a, b),
		(None, None) => true,
		_ => false,
	}
}

impl std::fmt::Debug for UserIdentification {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let user_id = self
			.last
			.as_ref()
			.and_then(|(_, user)| user.as_ref())
			.map(|user| user.id().to_string());
		f.debug_struct("UserIdentification")
			.field("last_user_id", &user_id)
			.finish()
	}
}
