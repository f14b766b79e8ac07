// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::announcement::post_report_button;
use super::incoming_messages::{IncomingMessage, handle_message};
use super::interactions::route_interaction;
use super::platform::DiscordPlatform;
use crate::config::ConfigData;
use crate::relay::{RelayEngine, RelaySettings};
use miette::IntoDiagnostic;
use std::sync::Arc;
use twilight_cache_inmemory::{DefaultInMemoryCache, ResourceType};
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt};
use twilight_http::client::Client;
use twilight_model::application::interaction::InteractionData;
use twilight_model::gateway::event::Event;
use twilight_model::id::Id;
use twilight_model::id::marker::ApplicationMarker;

pub type Engine = RelayEngine<DiscordPlatform>;

pub fn set_up_client(config: &ConfigData) -> Arc<Client> {
	Arc::new(Client::new(config.discord.bot_token.clone()))
}

pub async fn run_bot(config: Arc<ConfigData>, http_client: Arc<Client>) -> miette::Result<()> {
	let intents = Intents::GUILDS | Intents::GUILD_MESSAGES | Intents::DIRECT_MESSAGES | Intents::MESSAGE_CONTENT;

	let mut shard = Shard::new(ShardId::ONE, config.discord.bot_token.clone(), intents);

	// Only channels are cached; they tell us which category a ticket channel currently sits in.
	let cache = Arc::new(
		DefaultInMemoryCache::builder()
			.resource_types(ResourceType::CHANNEL)
			.build(),
	);

	let application_id = {
		let application_response = http_client.current_user_application().await.into_diagnostic()?;
		application_response.model().await.into_diagnostic()?.id
	};
	let bot_user = http_client
		.current_user()
		.await
		.into_diagnostic()?
		.model()
		.await
		.into_diagnostic()?;

	let platform = DiscordPlatform::new(
		Arc::clone(&http_client),
		Arc::clone(&cache),
		config.discord.guild,
		bot_user.id,
	);
	let settings = RelaySettings::from_config(&config)?;
	let engine = Arc::new(RelayEngine::new(platform, settings));

	while let Some(event) = shard.next_event(EventTypeFlags::all()).await {
		let event = match event {
			Ok(event) => event,
			Err(error) => {
				tracing::warn!(source = ?error, "error receiving event");
				continue;
			}
		};
		cache.update(&event);

		tokio::spawn(handle_event(
			event,
			Arc::clone(&http_client),
			application_id,
			Arc::clone(&config),
			Arc::clone(&engine),
		));
	}

	Ok(())
}

async fn handle_event(
	event: Event,
	http_client: Arc<Client>,
	application_id: Id<ApplicationMarker>,
	config: Arc<ConfigData>,
	engine: Arc<Engine>,
) {
	let event_result = handle_event_route(event, &http_client, application_id, &config, &engine).await;
	if let Err(error) = event_result {
		tracing::error!(source = ?error, "An error occurred handling a gateway event");
	}
}

async fn handle_event_route(
	event: Event,
	http_client: &Client,
	application_id: Id<ApplicationMarker>,
	config: &ConfigData,
	engine: &Engine,
) -> miette::Result<()> {
	tracing::trace!("Incoming gateway message: {:?}", event.kind());
	match event {
		Event::MessageCreate(message) => handle_message(IncomingMessage::from(&message.0), config, engine).await?,
		Event::InteractionCreate(interaction) => {
			if let Some(InteractionData::MessageComponent(interaction_data)) = &interaction.data {
				route_interaction(&interaction, interaction_data, http_client, application_id, engine).await?;
			}
		}
		Event::Ready(ready) => {
			tracing::info!("Discord gateway is ready");
			post_report_button(http_client, config.discord.announcement_channel, ready.user.id).await?;
		}
		_ => (),
	}
	Ok(())
}
