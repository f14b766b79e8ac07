// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use kdl::{KdlDocument, KdlValue};
use miette::{IntoDiagnostic, bail, miette};
use std::env;
use tokio::fs::read_to_string;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, GuildMarker, RoleMarker};

/// Environment variable which, when set, replaces the bot token from the configuration file.
pub const TOKEN_ENV_VAR: &str = "DISCORD_TOKEN";

const DEFAULT_COMMAND_PREFIX: &str = "!";
const DEFAULT_COOLDOWN_SECONDS: u64 = 300;
const DEFAULT_SPAM_LIMIT: usize = 5;
const DEFAULT_SPAM_WINDOW_SECONDS: u64 = 10;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug)]
pub struct ConfigData {
	pub discord: DiscordConfig,
	pub limits: LimitsConfig,
	pub web: WebConfig,
}

#[derive(Debug)]
pub struct DiscordConfig {
	pub bot_token: String,
	/// The one guild the bot serves.
	pub guild: Id<GuildMarker>,
	/// Role allowed to close tickets.
	pub staff_role: Id<RoleMarker>,
	/// Role allowed to identify reporters and forget them.
	pub owner_role: Id<RoleMarker>,
	/// Category under which open ticket channels are created.
	pub ticket_category: Id<ChannelMarker>,
	/// Category to which closed ticket channels are moved.
	pub archive_category: Id<ChannelMarker>,
	/// Channel holding the "make a report" button.
	pub announcement_channel: Id<ChannelMarker>,
	pub command_prefix: String,
}

#[derive(Debug)]
pub struct LimitsConfig {
	pub cooldown_seconds: u64,
	pub spam_limit: usize,
	pub spam_window_seconds: u64,
}

impl Default for LimitsConfig {
	fn default() -> Self {
		Self {
			cooldown_seconds: DEFAULT_COOLDOWN_SECONDS,
			spam_limit: DEFAULT_SPAM_LIMIT,
			spam_window_seconds: DEFAULT_SPAM_WINDOW_SECONDS,
		}
	}
}

#[derive(Debug)]
pub struct WebConfig {
	pub bind_addr: String,
}

impl Default for WebConfig {
	fn default() -> Self {
		Self {
			bind_addr: String::from(DEFAULT_BIND_ADDR),
		}
	}
}

pub async fn parse_config(config_path: &str) -> miette::Result<ConfigData> {
	let config_file_contents = read_to_string(config_path).await.into_diagnostic()?;
	let token_override = env::var(TOKEN_ENV_VAR).ok().filter(|token| !token.is_empty());
	parse_config_str(&config_file_contents, token_override)
}

/// Parses a configuration document. The token override, if given, takes precedence over the `bot-token` value in the
/// document, which then becomes optional.
pub fn parse_config_str(contents: &str, token_override: Option<String>) -> miette::Result<ConfigData> {
	let document: KdlDocument = contents.parse()?;

	let Some(discord) = document.get("discord").and_then(|node| node.children()) else {
		bail!("Configuration is missing the discord block");
	};

	let bot_token = match token_override {
		Some(token) => token,
		None => required_string(discord, "bot-token")?,
	};
	let command_prefix = optional_string(discord, "command-prefix")?.unwrap_or_else(|| DEFAULT_COMMAND_PREFIX.to_string());
	if command_prefix.is_empty() {
		bail!("Configuration value discord.command-prefix must not be empty");
	}

	let discord = DiscordConfig {
		bot_token,
		guild: required_id(discord, "guild")?,
		staff_role: required_id(discord, "staff-role")?,
		owner_role: required_id(discord, "owner-role")?,
		ticket_category: required_id(discord, "ticket-category")?,
		archive_category: required_id(discord, "archive-category")?,
		announcement_channel: required_id(discord, "announcement-channel")?,
		command_prefix,
	};

	let limits = match document.get("limits").and_then(|node| node.children()) {
		Some(limits) => {
			let defaults = LimitsConfig::default();
			LimitsConfig {
				cooldown_seconds: optional_unsigned(limits, "cooldown-seconds")?.unwrap_or(defaults.cooldown_seconds),
				spam_limit: match optional_unsigned(limits, "spam-limit")? {
					Some(limit) => usize::try_from(limit).into_diagnostic()?,
					None => defaults.spam_limit,
				},
				spam_window_seconds: optional_unsigned(limits, "spam-window-seconds")?
					.unwrap_or(defaults.spam_window_seconds),
			}
		}
		None => LimitsConfig::default(),
	};

	let web = match document.get("web").and_then(|node| node.children()) {
		Some(web) => WebConfig {
			bind_addr: optional_string(web, "bind-addr")?.unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
		},
		None => WebConfig::default(),
	};

	Ok(ConfigData { discord, limits, web })
}

fn required_string(block: &KdlDocument, name: &str) -> miette::Result<String> {
	optional_string(block, name)?.ok_or_else(|| miette!("Missing required configuration value: {}", name))
}

fn optional_string(block: &KdlDocument, name: &str) -> miette::Result<Option<String>> {
	match block.get_arg(name) {
		Some(KdlValue::String(value)) => Ok(Some(value.clone())),
		Some(other) => bail!("Configuration value {} must be a string (got {})", name, other),
		None => Ok(None),
	}
}

fn optional_unsigned(block: &KdlDocument, name: &str) -> miette::Result<Option<u64>> {
	let Some(value) = block.get_arg(name) else {
		return Ok(None);
	};
	let Some(value) = value.as_integer() else {
		bail!("Configuration value {} must be an integer (got {})", name, value);
	};
	match u64::try_from(value) {
		Ok(value) => Ok(Some(value)),
		Err(_) => bail!("Configuration value {} is out of range: {}", name, value),
	}
}

fn required_id<T>(block: &KdlDocument, name: &str) -> miette::Result<Id<T>> {
	let Some(raw_id) = optional_unsigned(block, name)? else {
		bail!("Missing required configuration value: {}", name);
	};
	Id::new_checked(raw_id).ok_or_else(|| miette!("Configuration value {} must be a nonzero ID", name))
}
