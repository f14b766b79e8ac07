// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::RelaySettings;
use twilight_model::id::Id;
use twilight_model::id::marker::RoleMarker;

/// Text commands staff can use inside ticket channels.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StaffCommand {
	Close,
	Identify,
	Forget,
}

impl StaffCommand {
	/// Parses a command invocation such as `!close`. Anything after the command name is ignored.
	pub fn parse(content: &str, prefix: &str) -> Option<Self> {
		let invocation = content.strip_prefix(prefix)?;
		let name = invocation.split_whitespace().next()?;
		if !invocation.starts_with(name) {
			return None;
		}
		match name {
			"close" => Some(Self::Close),
			"identify" => Some(Self::Identify),
			"forget" => Some(Self::Forget),
			_ => None,
		}
	}

	/// The role a member must have to use this command.
	pub fn required_role(&self, settings: &RelaySettings) -> Id<RoleMarker> {
		match self {
			Self::Close => settings.staff_role,
			Self::Identify | Self::Forget => settings.owner_role,
		}
	}

	pub fn name(&self) -> &'static str {
		match self {
			Self::Close => "close",
			Self::Identify => "identify",
			Self::Forget => "forget",
		}
	}
}
