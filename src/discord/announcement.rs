// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::interactions::OPEN_REPORT_ID;
use miette::IntoDiagnostic;
use twilight_http::client::Client;
use twilight_model::channel::message::component::{ActionRow, Button, ButtonStyle, Component};
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, UserMarker};

const ANNOUNCEMENT_MESSAGE: &str = "🎫 Want to make a report? Click the button below to create one!:";
/// How far back to look for old announcements to clean up
const ANNOUNCEMENT_HISTORY_LIMIT: u16 = 50;

pub fn report_button() -> Component {
	let report_button = Button {
		custom_id: Some(String::from(OPEN_REPORT_ID)),
		disabled: false,
		emoji: None,
		label: Some(String::from("Make A Report!")),
		style: ButtonStyle::Primary,
		url: None,
		sku_id: None,
	};
	Component::ActionRow(ActionRow {
		components: vec![Component::Button(report_button)],
	})
}

/// Replaces the bot's previous announcements in the channel with a fresh one carrying the report button.
pub async fn post_report_button(
	http_client: &Client,
	channel: Id<ChannelMarker>,
	bot_user: Id<UserMarker>,
) -> miette::Result<()> {
	let recent_messages = http_client
		.channel_messages(channel)
		.limit(ANNOUNCEMENT_HISTORY_LIMIT)
		.await
		.into_diagnostic()?
		.models()
		.await
		.into_diagnostic()?;

	for message in recent_messages.iter().filter(|message| message.author.id == bot_user) {
		if let Err(error) = http_client.delete_message(channel, message.id).await {
			tracing::warn!(source = ?error, message_id = %message.id, "couldn't remove old announcement");
		}
	}

	let components = [report_button()];
	http_client
		.create_message(channel)
		.content(ANNOUNCEMENT_MESSAGE)
		.components(&components)
		.await
		.into_diagnostic()?;
	tracing::info!(%channel, "posted report button");

	Ok(())
}
