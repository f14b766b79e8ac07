// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod commands;
mod engine;
#[cfg(test)]
pub(crate) mod mock;
mod naming;
mod platform;
mod responses;
mod store;

pub use commands::StaffCommand;
pub use engine::{CommandOutcome, PrivateMessageOutcome, RelayEngine, RelaySettings, StaffMessageOutcome};
pub use platform::{ChatPlatform, OutgoingMessage, RelayAttachment};
pub use store::TicketStore;
