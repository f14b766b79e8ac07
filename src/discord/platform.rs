// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::utils::attachments::download_attachments;
use super::utils::users::format_user_tag;
use crate::relay::{ChatPlatform, OutgoingMessage};
use async_trait::async_trait;
use miette::IntoDiagnostic;
use std::sync::Arc;
use twilight_cache_inmemory::DefaultInMemoryCache;
use twilight_http::client::Client;
use twilight_model::channel::ChannelType;
use twilight_model::channel::permission_overwrite::{PermissionOverwrite, PermissionOverwriteType};
use twilight_model::channel::message::AllowedMentions;
use twilight_model::guild::Permissions;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, GuildMarker, MessageMarker, RoleMarker, UserMarker};

/// Permissions granted to everyone who can see a ticket channel
fn ticket_channel_permissions() -> Permissions {
	Permissions::VIEW_CHANNEL
		| Permissions::READ_MESSAGE_HISTORY
		| Permissions::SEND_MESSAGES
		| Permissions::ATTACH_FILES
}

/// Builds the overwrites for a ticket channel: hidden from @everyone, open to the given roles, and manageable by the
/// bot so it can pin the report.
fn ticket_channel_overwrites(
	guild: Id<GuildMarker>,
	bot_user: Id<UserMarker>,
	visible_to: &[Id<RoleMarker>],
) -> Vec<PermissionOverwrite> {
	let everyone_role: Id<RoleMarker> = guild.cast();
	let mut permission_overwrites = vec![PermissionOverwrite {
		allow: Permissions::empty(),
		deny: Permissions::VIEW_CHANNEL,
		id: everyone_role.cast(),
		kind: PermissionOverwriteType::Role,
	}];
	for role in visible_to {
		permission_overwrites.push(PermissionOverwrite {
			allow: ticket_channel_permissions(),
			deny: Permissions::empty(),
			id: role.cast(),
			kind: PermissionOverwriteType::Role,
		});
	}
	permission_overwrites.push(PermissionOverwrite {
		allow: ticket_channel_permissions() | Permissions::MANAGE_MESSAGES,
		deny: Permissions::empty(),
		id: bot_user.cast(),
		kind: PermissionOverwriteType::Member,
	});
	permission_overwrites
}

/// [ChatPlatform] backed by the Discord HTTP API.
pub struct DiscordPlatform {
	http_client: Arc<Client>,
	cache: Arc<DefaultInMemoryCache>,
	web_client: reqwest::Client,
	guild: Id<GuildMarker>,
	bot_user: Id<UserMarker>,
}

impl DiscordPlatform {
	pub fn new(
		http_client: Arc<Client>,
		cache: Arc<DefaultInMemoryCache>,
		guild: Id<GuildMarker>,
		bot_user: Id<UserMarker>,
	) -> Self {
		Self {
			http_client,
			cache,
			web_client: reqwest::Client::new(),
			guild,
			bot_user,
		}
	}

	async fn send_message(
		&self,
		channel: Id<ChannelMarker>,
		message: &OutgoingMessage,
	) -> miette::Result<Id<MessageMarker>> {
		let files = download_attachments(&self.web_client, &message.attachments).await?;
		// Relayed text is user-written, so it must never ping anyone.
		let allowed_mentions = AllowedMentions::default();
		let mut request = self
			.http_client
			.create_message(channel)
			.allowed_mentions(Some(&allowed_mentions))
			.attachments(&files);
		if let Some(content) = &message.content {
			request = request.content(content);
		}
		let sent_message = request.await.into_diagnostic()?.model().await.into_diagnostic()?;
		Ok(sent_message.id)
	}
}

#[async_trait]
impl ChatPlatform for DiscordPlatform {
	async fn send_direct_message(&self, user: Id<UserMarker>, message: &OutgoingMessage) -> miette::Result<()> {
		let private_channel = self
			.http_client
			.create_private_channel(user)
			.await
			.into_diagnostic()?
			.model()
			.await
			.into_diagnostic()?;
		self.send_message(private_channel.id, message).await?;
		Ok(())
	}

	async fn send_channel_message(
		&self,
		channel: Id<ChannelMarker>,
		message: &OutgoingMessage,
	) -> miette::Result<Id<MessageMarker>> {
		self.send_message(channel, message).await
	}

	async fn pin_message(&self, channel: Id<ChannelMarker>, message: Id<MessageMarker>) -> miette::Result<()> {
		self.http_client
			.create_pin(channel, message)
			.await
			.into_diagnostic()?;
		Ok(())
	}

	async fn channel_parent(&self, channel: Id<ChannelMarker>) -> Option<Id<ChannelMarker>> {
		let cached_parent = self.cache.channel(channel).map(|cached_channel| cached_channel.parent_id);
		if let Some(parent) = cached_parent {
			return parent;
		}

		let response = match self.http_client.channel(channel).await {
			Ok(response) => response,
			Err(error) => {
				tracing::debug!(source = ?error, %channel, "couldn't look up channel");
				return None;
			}
		};
		match response.model().await {
			Ok(channel_data) => channel_data.parent_id,
			Err(error) => {
				tracing::debug!(source = ?error, %channel, "couldn't read channel data");
				None
			}
		}
	}

	async fn create_ticket_channel(
		&self,
		name: &str,
		parent: Id<ChannelMarker>,
		visible_to: &[Id<RoleMarker>],
	) -> miette::Result<Id<ChannelMarker>> {
		let permission_overwrites = ticket_channel_overwrites(self.guild, self.bot_user, visible_to);

		let channel = self
			.http_client
			.create_guild_channel(self.guild, name)
			.kind(ChannelType::GuildText)
			.parent_id(parent)
			.permission_overwrites(&permission_overwrites)
			.await
			.into_diagnostic()?
			.model()
			.await
			.into_diagnostic()?;
		Ok(channel.id)
	}

	async fn move_channel(&self, channel: Id<ChannelMarker>, parent: Id<ChannelMarker>) -> miette::Result<()> {
		self.http_client
			.update_channel(channel)
			.parent_id(Some(parent))
			.await
			.into_diagnostic()?;
		Ok(())
	}

	async fn user_tag(&self, user: Id<UserMarker>) -> miette::Result<String> {
		let user_data = self
			.http_client
			.user(user)
			.await
			.into_diagnostic()?
			.model()
			.await
			.into_diagnostic()?;
		Ok(format_user_tag(&user_data.name, user_data.discriminator))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ticket_channel_is_hidden_from_everyone_else() {
		let guild: Id<GuildMarker> = Id::new(10);
		let bot_user: Id<UserMarker> = Id::new(20);
		let staff_role: Id<RoleMarker> = Id::new(11);
		let owner_role: Id<RoleMarker> = Id::new(12);

		let overwrites = ticket_channel_overwrites(guild, bot_user, &[owner_role, staff_role]);
		assert_eq!(overwrites.len(), 4);

		let everyone = &overwrites[0];
		assert_eq!(everyone.id.get(), 10);
		assert_eq!(everyone.kind, PermissionOverwriteType::Role);
		assert_eq!(everyone.deny, Permissions::VIEW_CHANNEL);
		assert!(everyone.allow.is_empty());

		for (overwrite, role) in overwrites[1..3].iter().zip([owner_role, staff_role]) {
			assert_eq!(overwrite.id.get(), role.get());
			assert_eq!(overwrite.kind, PermissionOverwriteType::Role);
			assert!(overwrite.allow.contains(Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES));
			assert!(overwrite.deny.is_empty());
		}

		let bot = &overwrites[3];
		assert_eq!(bot.id.get(), 20);
		assert_eq!(bot.kind, PermissionOverwriteType::Member);
		assert!(bot.allow.contains(Permissions::MANAGE_MESSAGES | Permissions::VIEW_CHANNEL));
	}
}
