// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Discord's limit on channel name length
const MAX_CHANNEL_NAME_LENGTH: usize = 100;
const TICKET_PREFIX: &str = "ticket-";
const SUFFIX_LENGTH: usize = 8;
const UNKNOWN_TARGET: &str = "unknown";

/// Generates the random part of a ticket channel name.
pub fn ticket_suffix() -> String {
	cuid2::create_id().chars().take(SUFFIX_LENGTH).collect()
}

/// Builds a channel name in the form Discord would normalize it to, so the name we log matches the name staff see.
pub fn ticket_channel_name(target: &str, suffix: &str) -> String {
	let mut slug = String::new();
	let mut separator_pending = false;
	for character in target.chars() {
		if character.is_whitespace() || character == '-' {
			separator_pending = !slug.is_empty();
		} else if character.is_ascii_alphanumeric() || character == '_' {
			if separator_pending {
				slug.push('-');
				separator_pending = false;
			}
			slug.push(character.to_ascii_lowercase());
		}
	}

	let max_slug_length = MAX_CHANNEL_NAME_LENGTH
		.saturating_sub(TICKET_PREFIX.len() + 1 + suffix.len())
		.max(1);
	// The slug is ASCII-only at this point, so byte truncation is safe.
	slug.truncate(max_slug_length);
	let slug = slug.trim_end_matches('-');
	let slug = if slug.is_empty() { UNKNOWN_TARGET } else { slug };

	format!("{}{}-{}", TICKET_PREFIX, slug, suffix)
}
