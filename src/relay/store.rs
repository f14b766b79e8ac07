// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, UserMarker};

/// All of the relay's ticket state.
///
/// Every table here shares one lock in [super::RelayEngine]; the tables must not be split across locks, or a reporter
/// could end up with two open tickets.
#[derive(Debug, Default)]
pub struct TicketStore {
	/// Reporter to their currently open ticket channel. Removed when the ticket is closed.
	open_tickets: HashMap<Id<UserMarker>, Id<ChannelMarker>>,
	/// Ticket channel to the reporter who opened it. Survives closing; only removed by forgetting.
	ticket_reporters: HashMap<Id<ChannelMarker>, Id<UserMarker>>,
	/// Target names given by reporters who haven't sent a description yet.
	pending_targets: HashMap<Id<UserMarker>, String>,
	cooldowns: HashMap<Id<UserMarker>, DateTime<Utc>>,
	message_history: HashMap<Id<UserMarker>, Vec<DateTime<Utc>>>,
}

impl TicketStore {
	pub fn ticket_for_reporter(&self, reporter: Id<UserMarker>) -> Option<Id<ChannelMarker>> {
		self.open_tickets.get(&reporter).copied()
	}

	/// Registers a new ticket in both directions, replacing any stale open ticket the reporter still had mapped.
	pub fn open_ticket(&mut self, reporter: Id<UserMarker>, channel: Id<ChannelMarker>) {
		self.open_tickets.insert(reporter, channel);
		self.ticket_reporters.insert(channel, reporter);
	}

	/// Removes the reporter's open ticket mapping if it refers to the given channel. The channel's reporter mapping
	/// is left alone. Returns whether anything was removed.
	pub fn close_ticket(&mut self, reporter: Id<UserMarker>, channel: Id<ChannelMarker>) -> bool {
		if self.open_tickets.get(&reporter) == Some(&channel) {
			self.open_tickets.remove(&reporter);
			true
		} else {
			false
		}
	}

	pub fn reporter_for_ticket(&self, channel: Id<ChannelMarker>) -> Option<Id<UserMarker>> {
		self.ticket_reporters.get(&channel).copied()
	}

	pub fn forget_reporter(&mut self, channel: Id<ChannelMarker>) -> Option<Id<UserMarker>> {
		self.ticket_reporters.remove(&channel)
	}

	pub fn pending_target(&self, reporter: Id<UserMarker>) -> Option<&str> {
		self.pending_targets.get(&reporter).map(String::as_str)
	}

	pub fn set_pending_target(&mut self, reporter: Id<UserMarker>, target: &str) {
		self.pending_targets.insert(reporter, target.to_string());
	}

	pub fn clear_pending_target(&mut self, reporter: Id<UserMarker>) {
		self.pending_targets.remove(&reporter);
	}

	/// Gets the time left on the reporter's cooldown, or `None` if they aren't on cooldown.
	pub fn cooldown_remaining(&self, reporter: Id<UserMarker>, now: DateTime<Utc>) -> Option<TimeDelta> {
		let expiry = self.cooldowns.get(&reporter)?;
		if now < *expiry { Some(*expiry - now) } else { None }
	}

	pub fn start_cooldown(&mut self, reporter: Id<UserMarker>, until: DateTime<Utc>) {
		self.cooldowns.insert(reporter, until);
	}

	/// Records a message and drops history older than the window. Returns how many messages the reporter has sent
	/// within the window, including this one.
	pub fn record_message(&mut self, reporter: Id<UserMarker>, now: DateTime<Utc>, window: TimeDelta) -> usize {
		let history = self.message_history.entry(reporter).or_default();
		history.push(now);
		history.retain(|sent_at| now - *sent_at <= window);
		history.len()
	}
}
