// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Formats a user the way staff would recognize them. Accounts that have moved to unique usernames have a
/// discriminator of 0 and are shown by name alone.
pub fn format_user_tag(name: &str, discriminator: u16) -> String {
	if discriminator == 0 {
		name.to_string()
	} else {
		format!("{}#{:04}", name, discriminator)
	}
}
