// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::commands::route_command;
use super::utils::attachments::relay_attachments;
use super::utils::timestamp::datetime_from_timestamp;
use crate::config::ConfigData;
use crate::relay::{ChatPlatform, RelayAttachment, RelayEngine, StaffCommand};
use chrono::{DateTime, Utc};
use twilight_model::channel::message::Message;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, GuildMarker, RoleMarker, UserMarker};

/// The parts of a gateway message the relay routes on.
#[derive(Clone, Debug)]
pub struct IncomingMessage {
	pub author: Id<UserMarker>,
	pub author_is_bot: bool,
	/// Unset for direct messages
	pub guild_id: Option<Id<GuildMarker>>,
	pub channel_id: Id<ChannelMarker>,
	pub content: String,
	pub attachments: Vec<RelayAttachment>,
	pub member_roles: Vec<Id<RoleMarker>>,
	pub sent_at: DateTime<Utc>,
}

impl From<&Message> for IncomingMessage {
	fn from(message: &Message) -> Self {
		let member_roles = message
			.member
			.as_ref()
			.map(|member| member.roles.clone())
			.unwrap_or_default();
		Self {
			author: message.author.id,
			author_is_bot: message.author.bot,
			guild_id: message.guild_id,
			channel_id: message.channel_id,
			content: message.content.clone(),
			attachments: relay_attachments(&message.attachments),
			member_roles,
			sent_at: datetime_from_timestamp(&message.timestamp).unwrap_or_else(Utc::now),
		}
	}
}

pub async fn handle_message<P: ChatPlatform>(
	message: IncomingMessage,
	config: &ConfigData,
	engine: &RelayEngine<P>,
) -> miette::Result<()> {
	if message.author_is_bot {
		return Ok(());
	}

	let Some(guild_id) = message.guild_id else {
		let outcome = engine
			.handle_private_message(message.author, &message.content, message.attachments, message.sent_at)
			.await?;
		tracing::debug!(?outcome, "handled private message");
		return Ok(());
	};

	if guild_id != config.discord.guild {
		return Ok(());
	}

	if let Some(command) = StaffCommand::parse(&message.content, &config.discord.command_prefix) {
		return route_command(command, &message, engine).await;
	}

	let channel = message.channel_id;
	let outcome = engine
		.handle_staff_message(channel, &message.content, message.attachments)
		.await?;
	tracing::debug!(?outcome, %channel, "handled guild message");

	Ok(())
}
