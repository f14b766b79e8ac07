// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::commands::StaffCommand;
use super::naming::{ticket_channel_name, ticket_suffix};
use super::platform::{ChatPlatform, OutgoingMessage, RelayAttachment};
use super::responses;
use super::store::TicketStore;
use crate::config::ConfigData;
use chrono::{DateTime, TimeDelta, Utc};
use miette::{IntoDiagnostic, miette};
use tokio::sync::Mutex;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, RoleMarker, UserMarker};

/// The settings the relay works with, taken from the bot configuration.
#[derive(Clone, Debug)]
pub struct RelaySettings {
	pub staff_role: Id<RoleMarker>,
	pub owner_role: Id<RoleMarker>,
	pub ticket_category: Id<ChannelMarker>,
	pub archive_category: Id<ChannelMarker>,
	/// Minimum time between a reporter's tickets
	pub cooldown: TimeDelta,
	/// Number of messages a reporter may send within [Self::spam_window] before being asked to slow down
	pub spam_limit: usize,
	pub spam_window: TimeDelta,
	pub command_prefix: String,
}

impl RelaySettings {
	pub fn from_config(config: &ConfigData) -> miette::Result<Self> {
		Ok(Self {
			staff_role: config.discord.staff_role,
			owner_role: config.discord.owner_role,
			ticket_category: config.discord.ticket_category,
			archive_category: config.discord.archive_category,
			cooldown: seconds_delta(config.limits.cooldown_seconds)?,
			spam_limit: config.limits.spam_limit,
			spam_window: seconds_delta(config.limits.spam_window_seconds)?,
			command_prefix: config.discord.command_prefix.clone(),
		})
	}
}

fn seconds_delta(seconds: u64) -> miette::Result<TimeDelta> {
	let seconds = i64::try_from(seconds).into_diagnostic()?;
	TimeDelta::try_seconds(seconds).ok_or_else(|| miette!("Duration of {} seconds is too long", seconds))
}

#[derive(Debug, Eq, PartialEq)]
pub enum PrivateMessageOutcome {
	/// The reporter has no open ticket and opened one too recently.
	CoolingDown { remaining_seconds: i64 },
	/// The message was taken as the name of who is being reported.
	TargetCaptured,
	Forwarded { channel: Id<ChannelMarker> },
	TicketOpened { channel: Id<ChannelMarker> },
}

#[derive(Debug, Eq, PartialEq)]
pub enum StaffMessageOutcome {
	/// The channel isn't an open ticket, no reporter is known for it, or the message was empty.
	Ignored,
	Delivered { reporter: Id<UserMarker> },
	DeliveryFailed { reporter: Id<UserMarker> },
}

#[derive(Debug, Eq, PartialEq)]
pub enum CommandOutcome {
	Unauthorized,
	NotTicketChannel,
	Closed { reporter: Option<Id<UserMarker>> },
	Identified { reporter: Id<UserMarker> },
	ReporterUnknown,
	Forgotten { reporter: Id<UserMarker> },
	NothingToForget,
}

/// Routes messages between reporters and their ticket channels.
///
/// Each handler holds the store lock from start to finish, so handlers run one at a time even when events are handled
/// on separate tasks.
pub struct RelayEngine<P> {
	platform: P,
	settings: RelaySettings,
	store: Mutex<TicketStore>,
}

impl<P: ChatPlatform> RelayEngine<P> {
	pub fn new(platform: P, settings: RelaySettings) -> Self {
		Self {
			platform,
			settings,
			store: Mutex::new(TicketStore::default()),
		}
	}

	pub fn platform(&self) -> &P {
		&self.platform
	}

	pub fn settings(&self) -> &RelaySettings {
		&self.settings
	}

	/// Starts a fresh report for a user by asking them who they're reporting. Returns whether the DM got through.
	pub async fn start_report(&self, reporter: Id<UserMarker>) -> bool {
		let mut store = self.store.lock().await;
		store.clear_pending_target(reporter);
		self.notify(reporter, responses::ASK_TARGET).await
	}

	pub async fn handle_private_message(
		&self,
		reporter: Id<UserMarker>,
		content: &str,
		attachments: Vec<RelayAttachment>,
		now: DateTime<Utc>,
	) -> miette::Result<PrivateMessageOutcome> {
		let mut store = self.store.lock().await;
		let open_ticket = store.ticket_for_reporter(reporter);

		if open_ticket.is_none() {
			if let Some(remaining) = store.cooldown_remaining(reporter, now) {
				let remaining_seconds = remaining.num_seconds();
				self.notify(reporter, &responses::cooldown_message(remaining_seconds))
					.await;
				return Ok(PrivateMessageOutcome::CoolingDown { remaining_seconds });
			}
		}

		let recent_messages = store.record_message(reporter, now, self.settings.spam_window);
		if recent_messages > self.settings.spam_limit {
			tracing::debug!(%reporter, recent_messages, "reporter is sending messages quickly");
			self.notify(reporter, responses::SLOW_DOWN).await;
		}

		let body = if content.is_empty() { responses::NO_TEXT } else { content };

		if let Some(channel) = open_ticket {
			if self.platform.channel_parent(channel).await == Some(self.settings.ticket_category) {
				let message = OutgoingMessage::text(body).with_attachments(attachments);
				self.platform.send_channel_message(channel, &message).await?;
				self.notify(reporter, responses::MESSAGE_ADDED).await;
				return Ok(PrivateMessageOutcome::Forwarded { channel });
			}
		}

		let Some(target) = store.pending_target(reporter).map(str::to_string) else {
			store.set_pending_target(reporter, content.trim());
			self.notify(reporter, responses::ASK_DESCRIPTION).await;
			return Ok(PrivateMessageOutcome::TargetCaptured);
		};

		let channel_name = ticket_channel_name(&target, &ticket_suffix());
		let visible_to = [self.settings.owner_role, self.settings.staff_role];
		let channel = self
			.platform
			.create_ticket_channel(&channel_name, self.settings.ticket_category, &visible_to)
			.await?;

		store.open_ticket(reporter, channel);
		store.clear_pending_target(reporter);
		store.start_cooldown(reporter, now + self.settings.cooldown);
		tracing::info!(%channel, name = %channel_name, "opened a new ticket");

		let report = responses::headed_messages(&responses::new_report_header(&target), body, attachments);
		let mut report_message = None;
		for part in &report {
			let sent_message = self.platform.send_channel_message(channel, part).await?;
			report_message.get_or_insert(sent_message);
		}
		if let Some(report_message) = report_message {
			self.platform.pin_message(channel, report_message).await?;
		}

		self.notify(reporter, responses::REPORT_SENT).await;
		Ok(PrivateMessageOutcome::TicketOpened { channel })
	}

	/// Relays a message staff posted in a ticket channel to the ticket's reporter.
	pub async fn handle_staff_message(
		&self,
		channel: Id<ChannelMarker>,
		content: &str,
		attachments: Vec<RelayAttachment>,
	) -> miette::Result<StaffMessageOutcome> {
		let store = self.store.lock().await;
		if self.platform.channel_parent(channel).await != Some(self.settings.ticket_category) {
			return Ok(StaffMessageOutcome::Ignored);
		}
		let Some(reporter) = store.reporter_for_ticket(channel) else {
			return Ok(StaffMessageOutcome::Ignored);
		};
		if content.is_empty() && attachments.is_empty() {
			return Ok(StaffMessageOutcome::Ignored);
		}

		let reply = if content.is_empty() {
			vec![OutgoingMessage {
				content: None,
				attachments,
			}]
		} else {
			responses::headed_messages(responses::STAFF_REPLY_HEADER, content, attachments)
		};
		let (outcome, notice) = match self.deliver(reporter, &reply).await {
			Ok(()) => (StaffMessageOutcome::Delivered { reporter }, responses::REPLY_SENT),
			Err(error) => {
				tracing::warn!(source = ?error, %channel, "couldn't relay staff reply to reporter");
				(StaffMessageOutcome::DeliveryFailed { reporter }, responses::REPLY_FAILED)
			}
		};
		self.platform
			.send_channel_message(channel, &OutgoingMessage::text(notice))
			.await?;
		Ok(outcome)
	}

	/// Runs a staff command. Members without the command's role are turned away without anything changing.
	pub async fn handle_command(
		&self,
		command: StaffCommand,
		channel: Id<ChannelMarker>,
		invoker_roles: &[Id<RoleMarker>],
	) -> miette::Result<CommandOutcome> {
		let mut store = self.store.lock().await;

		if !invoker_roles.contains(&command.required_role(&self.settings)) {
			tracing::info!(command = command.name(), %channel, "rejected command from member without the required role");
			return Ok(CommandOutcome::Unauthorized);
		}

		let (outcome, response) = match command {
			StaffCommand::Close => {
				if self.platform.channel_parent(channel).await != Some(self.settings.ticket_category) {
					(CommandOutcome::NotTicketChannel, responses::NOT_A_TICKET_CHANNEL.to_string())
				} else {
					let reporter = store.reporter_for_ticket(channel);
					if let Some(reporter) = reporter {
						self.notify(reporter, responses::TICKET_CLOSED).await;
						store.close_ticket(reporter, channel);
					}
					self.platform
						.move_channel(channel, self.settings.archive_category)
						.await?;
					tracing::info!(%channel, "archived ticket");
					(CommandOutcome::Closed { reporter }, responses::TICKET_ARCHIVED.to_string())
				}
			}
			StaffCommand::Identify => match store.reporter_for_ticket(channel) {
				Some(reporter) => {
					let tag = self.platform.user_tag(reporter).await?;
					(
						CommandOutcome::Identified { reporter },
						responses::reporter_identity_message(&tag, reporter.get()),
					)
				}
				None => (CommandOutcome::ReporterUnknown, responses::REPORTER_NOT_FOUND.to_string()),
			},
			StaffCommand::Forget => match store.forget_reporter(channel) {
				Some(reporter) => {
					tracing::info!(%channel, "forgot ticket reporter");
					(
						CommandOutcome::Forgotten { reporter },
						responses::REPORTER_FORGOTTEN.to_string(),
					)
				}
				None => (CommandOutcome::NothingToForget, responses::NOTHING_TO_FORGET.to_string()),
			},
		};

		self.platform
			.send_channel_message(channel, &OutgoingMessage::text(response))
			.await?;
		Ok(outcome)
	}

	async fn deliver(&self, reporter: Id<UserMarker>, messages: &[OutgoingMessage]) -> miette::Result<()> {
		for message in messages {
			self.platform.send_direct_message(reporter, message).await?;
		}
		Ok(())
	}

	/// Sends the reporter a DM, logging instead of failing if they can't be reached.
	async fn notify(&self, reporter: Id<UserMarker>, text: &str) -> bool {
		match self
			.platform
			.send_direct_message(reporter, &OutgoingMessage::text(text))
			.await
		{
			Ok(()) => true,
			Err(error) => {
				tracing::warn!(source = ?error, %reporter, "couldn't send a direct message");
				false
			}
		}
	}
}
