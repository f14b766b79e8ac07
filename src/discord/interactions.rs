// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::connection::Engine;
use miette::{IntoDiagnostic, bail};
use twilight_http::client::Client;
use twilight_model::application::interaction::message_component::MessageComponentInteractionData;
use twilight_model::channel::message::MessageFlags;
use twilight_model::gateway::payload::incoming::InteractionCreate;
use twilight_model::http::interaction::{InteractionResponse, InteractionResponseType};
use twilight_model::id::Id;
use twilight_model::id::marker::ApplicationMarker;
use twilight_util::builder::InteractionResponseDataBuilder;

pub const OPEN_REPORT_ID: &str = "report/open";

const CHECK_DMS: &str = "✅ Check your DMs to start the report.";
const CANNOT_DM: &str = "❌ I can't DM you. Please check your privacy settings.";

pub async fn route_interaction(
	interaction: &InteractionCreate,
	interaction_data: &MessageComponentInteractionData,
	http_client: &Client,
	application_id: Id<ApplicationMarker>,
	engine: &Engine,
) -> miette::Result<()> {
	match interaction_data.custom_id.as_str() {
		OPEN_REPORT_ID => open_report(interaction, http_client, application_id, engine).await,
		_ => bail!("Unknown component interaction: {}", interaction_data.custom_id),
	}
}

async fn open_report(
	interaction: &InteractionCreate,
	http_client: &Client,
	application_id: Id<ApplicationMarker>,
	engine: &Engine,
) -> miette::Result<()> {
	let Some(user_id) = interaction.author_id() else {
		bail!("Report button interaction has no user");
	};

	let content = if engine.start_report(user_id).await {
		CHECK_DMS
	} else {
		CANNOT_DM
	};

	let response = InteractionResponseDataBuilder::new()
		.content(content)
		.flags(MessageFlags::EPHEMERAL)
		.build();
	let response = InteractionResponse {
		kind: InteractionResponseType::ChannelMessageWithSource,
		data: Some(response),
	};
	http_client
		.interaction(application_id)
		.create_response(interaction.id, &interaction.token, &response)
		.await
		.into_diagnostic()?;

	Ok(())
}
