// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use whisper_desk::config::parse_config;
use whisper_desk::discord::{run_bot, set_up_client};
use whisper_desk::web::server::run_server_task;

#[tokio::main]
async fn main() -> miette::Result<()> {
	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt().with_env_filter(env_filter).init();

	let config = Arc::new(parse_config("config.kdl").await?);
	let http_client = set_up_client(&config);

	tokio::spawn(run_server_task(Arc::clone(&config)));

	run_bot(config, http_client).await
}
