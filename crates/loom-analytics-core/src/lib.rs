// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core data model for the Loom analytics provider.
//!
//! This crate holds the types shared between the analytics client and the
//! provider that wires it into an application:
//!
//! - [`User`]: the identity the provider reports through `identify`
//! - [`Properties`]: JSON object builder used for traits and event properties
//! - [`IdentifyPayload`] and [`TrackEvent`]: the arguments of client calls
//! - [`WriteKey`]: the credential a client is constructed from
//! - [`Message`]: what a buffering client records for each call

mod error;
mod event;
mod message;
mod properties;
mod user;
mod write_key;

pub use error::{CoreError, Result};
pub use event::TrackEvent;
pub use message::{Message, MessageContext, MessageId};
pub use properties::Properties;
pub use user::{IdentifyPayload, User};
pub use write_key::{WriteKey, REDACTED};
