// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::incoming_messages::IncomingMessage;
use crate::relay::{ChatPlatform, RelayEngine, StaffCommand};

/// Runs a text command with the roles the invoking member has. Messages without member data (webhooks, for example)
/// carry no roles, so every command is refused for them.
pub async fn route_command<P: ChatPlatform>(
	command: StaffCommand,
	message: &IncomingMessage,
	engine: &RelayEngine<P>,
) -> miette::Result<()> {
	let outcome = engine
		.handle_command(command, message.channel_id, &message.member_roles)
		.await?;
	tracing::debug!(command = command.name(), ?outcome, "handled staff command");
	Ok(())
}
