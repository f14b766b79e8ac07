// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::platform::{ChatPlatform, OutgoingMessage};
use async_trait::async_trait;
use miette::{IntoDiagnostic, bail};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, MessageMarker, RoleMarker, UserMarker};

const FIRST_GENERATED_ID: u64 = 1000;

/// An outbound operation the relay asked the platform to perform.
#[derive(Clone, Debug, PartialEq)]
pub enum PlatformCall {
	DirectMessage {
		user: Id<UserMarker>,
		content: Option<String>,
		attachments: usize,
	},
	ChannelMessage {
		channel: Id<ChannelMarker>,
		message: Id<MessageMarker>,
		content: Option<String>,
		attachments: usize,
	},
	Pin {
		channel: Id<ChannelMarker>,
		message: Id<MessageMarker>,
	},
	CreateChannel {
		channel: Id<ChannelMarker>,
		name: String,
		parent: Id<ChannelMarker>,
		visible_to: Vec<Id<RoleMarker>>,
	},
	MoveChannel {
		channel: Id<ChannelMarker>,
		parent: Id<ChannelMarker>,
	},
}

/// An in-memory platform which records everything sent through it.
#[derive(Debug)]
pub struct MockPlatform {
	calls: Mutex<Vec<PlatformCall>>,
	parents: Mutex<HashMap<Id<ChannelMarker>, Id<ChannelMarker>>>,
	unreachable_users: Mutex<HashSet<Id<UserMarker>>>,
	next_id: AtomicU64,
}

impl Default for MockPlatform {
	fn default() -> Self {
		Self {
			calls: Mutex::new(Vec::new()),
			parents: Mutex::new(HashMap::new()),
			unreachable_users: Mutex::new(HashSet::new()),
			next_id: AtomicU64::new(FIRST_GENERATED_ID),
		}
	}
}

impl MockPlatform {
	pub fn calls(&self) -> Vec<PlatformCall> {
		self.calls.lock().unwrap().clone()
	}

	pub fn direct_messages_to(&self, user: Id<UserMarker>) -> Vec<String> {
		self.calls()
			.into_iter()
			.filter_map(|call| match call {
				PlatformCall::DirectMessage {
					user: recipient,
					content,
					..
				} if recipient == user => content,
				_ => None,
			})
			.collect()
	}

	pub fn channel_messages(&self, channel: Id<ChannelMarker>) -> Vec<String> {
		self.calls()
			.into_iter()
			.filter_map(|call| match call {
				PlatformCall::ChannelMessage {
					channel: sent_to,
					content,
					..
				} if sent_to == channel => content,
				_ => None,
			})
			.collect()
	}

	pub fn pinned(&self, channel: Id<ChannelMarker>) -> Vec<Id<MessageMarker>> {
		self.calls()
			.into_iter()
			.filter_map(|call| match call {
				PlatformCall::Pin {
					channel: pinned_in,
					message,
				} if pinned_in == channel => Some(message),
				_ => None,
			})
			.collect()
	}

	pub fn created_channels(&self) -> Vec<PlatformCall> {
		self.calls()
			.into_iter()
			.filter(|call| matches!(call, PlatformCall::CreateChannel { .. }))
			.collect()
	}

	pub fn parent_of(&self, channel: Id<ChannelMarker>) -> Option<Id<ChannelMarker>> {
		self.parents.lock().unwrap().get(&channel).copied()
	}

	pub fn set_parent(&self, channel: Id<ChannelMarker>, parent: Id<ChannelMarker>) {
		self.parents.lock().unwrap().insert(channel, parent);
	}

	pub fn block_direct_messages(&self, user: Id<UserMarker>) {
		self.unreachable_users.lock().unwrap().insert(user);
	}

	fn generate_id<T>(&self) -> Id<T> {
		Id::new(self.next_id.fetch_add(1, Ordering::Relaxed))
	}

	/// Rejects what Discord would reject, such as text over the message length limit.
	fn check_content(message: &OutgoingMessage) -> miette::Result<()> {
		if let Some(content) = &message.content {
			twilight_validate::message::content(content).into_diagnostic()?;
		}
		Ok(())
	}

	fn record(&self, call: PlatformCall) {
		self.calls.lock().unwrap().push(call);
	}
}

#[async_trait]
impl ChatPlatform for MockPlatform {
	async fn send_direct_message(&self, user: Id<UserMarker>, message: &OutgoingMessage) -> miette::Result<()> {
		if self.unreachable_users.lock().unwrap().contains(&user) {
			bail!("Cannot send messages to this user");
		}
		Self::check_content(message)?;
		self.record(PlatformCall::DirectMessage {
			user,
			content: message.content.clone(),
			attachments: message.attachments.len(),
		});
		Ok(())
	}

	async fn send_channel_message(
		&self,
		channel: Id<ChannelMarker>,
		message: &OutgoingMessage,
	) -> miette::Result<Id<MessageMarker>> {
		Self::check_content(message)?;
		let message_id = self.generate_id();
		self.record(PlatformCall::ChannelMessage {
			channel,
			message: message_id,
			content: message.content.clone(),
			attachments: message.attachments.len(),
		});
		Ok(message_id)
	}

	async fn pin_message(&self, channel: Id<ChannelMarker>, message: Id<MessageMarker>) -> miette::Result<()> {
		self.record(PlatformCall::Pin { channel, message });
		Ok(())
	}

	async fn channel_parent(&self, channel: Id<ChannelMarker>) -> Option<Id<ChannelMarker>> {
		self.parent_of(channel)
	}

	async fn create_ticket_channel(
		&self,
		name: &str,
		parent: Id<ChannelMarker>,
		visible_to: &[Id<RoleMarker>],
	) -> miette::Result<Id<ChannelMarker>> {
		let channel = self.generate_id();
		self.set_parent(channel, parent);
		self.record(PlatformCall::CreateChannel {
			channel,
			name: name.to_string(),
			parent,
			visible_to: visible_to.to_vec(),
		});
		Ok(channel)
	}

	async fn move_channel(&self, channel: Id<ChannelMarker>, parent: Id<ChannelMarker>) -> miette::Result<()> {
		self.set_parent(channel, parent);
		self.record(PlatformCall::MoveChannel { channel, parent });
		Ok(())
	}

	async fn user_tag(&self, user: Id<UserMarker>) -> miette::Result<String> {
		Ok(format!("reporter{}", user.get()))
	}
}
