// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::platform::{OutgoingMessage, RelayAttachment};

pub const ASK_TARGET: &str = "👤 What is the name of the person(s) you want to report?";
pub const ASK_DESCRIPTION: &str = "📝 Please describe the issue you want to report.";
pub const SLOW_DOWN: &str = "⚠️ You're sending messages too quickly. Please slow down.";
pub const MESSAGE_ADDED: &str = "📨 Message added to your ticket.";
pub const REPORT_SENT: &str =
	"✅ Your anonymous report has been sent to staff! Someone will get back to you when available.";
pub const TICKET_CLOSED: &str = "🔒 Your ticket has been closed. Thank you!";

pub const REPLY_SENT: &str = "✅ Reply sent to reporter.";
pub const REPLY_FAILED: &str = "⚠️ Could not send message to user.";
pub const TICKET_ARCHIVED: &str = "🗂️ Ticket has been archived.";
pub const NOT_A_TICKET_CHANNEL: &str = "This command is only useful in a ticket channel.";
pub const REPORTER_NOT_FOUND: &str = "❓ Could not identify the reporter.";
pub const REPORTER_FORGOTTEN: &str = "🧹 Ticket owner info has been forgotten.";
pub const NOTHING_TO_FORGET: &str = "ℹ️ No owner info stored for this ticket.";

/// Placeholder for messages that only carry attachments.
pub const NO_TEXT: &str = "(no text)";

pub fn cooldown_message(remaining_seconds: i64) -> String {
	format!(
		"⏳ You need to wait {} seconds before opening a new ticket.",
		remaining_seconds
	)
}

pub const STAFF_REPLY_HEADER: &str = "💬 Staff reply:";

/// Longest target name shown in a report header. Targets are free text, so a long one gets cut short here; the full
/// text is still in the reporter's own DM history.
const MAX_TARGET_DISPLAY_LENGTH: usize = 200;

pub fn new_report_header(target: &str) -> String {
	let target = if target.chars().count() > MAX_TARGET_DISPLAY_LENGTH {
		let shortened: String = target.chars().take(MAX_TARGET_DISPLAY_LENGTH).collect();
		format!("{}…", shortened)
	} else {
		target.to_string()
	};
	format!("📩 New Report! (Target: **{}**):", target)
}

/// Puts a header above relayed text. When both won't fit in one message, the header goes out on its own and the body
/// follows. Attachments always ride along with the body.
pub fn headed_messages(header: &str, body: &str, attachments: Vec<RelayAttachment>) -> Vec<OutgoingMessage> {
	let combined = format!("{}\n{}", header, body);
	if twilight_validate::message::content(&combined).is_ok() {
		return vec![OutgoingMessage::text(combined).with_attachments(attachments)];
	}
	vec![
		OutgoingMessage::text(header),
		OutgoingMessage::text(body).with_attachments(attachments),
	]
}

pub fn reporter_identity_message(tag: &str, reporter_id: u64) -> String {
	format!("🕵️ Reporter: {} ({})", tag, reporter_id)
}
