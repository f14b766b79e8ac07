// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use async_trait::async_trait;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, MessageMarker, RoleMarker, UserMarker};

/// A file attached to an incoming message, which gets re-uploaded wherever the message is relayed.
#[derive(Clone, Debug, PartialEq)]
pub struct RelayAttachment {
	pub filename: String,
	pub url: String,
}

/// A message the relay sends somewhere.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutgoingMessage {
	pub content: Option<String>,
	pub attachments: Vec<RelayAttachment>,
}

impl OutgoingMessage {
	pub fn text(content: impl Into<String>) -> Self {
		Self {
			content: Some(content.into()),
			attachments: Vec::new(),
		}
	}

	pub fn with_attachments(mut self, attachments: Vec<RelayAttachment>) -> Self {
		self.attachments = attachments;
		self
	}
}

/// The chat platform operations the relay needs.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
	/// Sends a direct message. An error here usually means the user doesn't accept DMs from the bot.
	async fn send_direct_message(&self, user: Id<UserMarker>, message: &OutgoingMessage) -> miette::Result<()>;

	async fn send_channel_message(
		&self,
		channel: Id<ChannelMarker>,
		message: &OutgoingMessage,
	) -> miette::Result<Id<MessageMarker>>;

	async fn pin_message(&self, channel: Id<ChannelMarker>, message: Id<MessageMarker>) -> miette::Result<()>;

	/// Gets the category a channel currently sits under. Returns `None` if the channel has no parent or no longer
	/// exists.
	async fn channel_parent(&self, channel: Id<ChannelMarker>) -> Option<Id<ChannelMarker>>;

	/// Creates a text channel under `parent` which only the given roles (and the bot itself) can see.
	async fn create_ticket_channel(
		&self,
		name: &str,
		parent: Id<ChannelMarker>,
		visible_to: &[Id<RoleMarker>],
	) -> miette::Result<Id<ChannelMarker>>;

	async fn move_channel(&self, channel: Id<ChannelMarker>, parent: Id<ChannelMarker>) -> miette::Result<()>;

	/// Gets a human-readable tag for a user.
	async fn user_tag(&self, user: Id<UserMarker>) -> miette::Result<String>;
}
