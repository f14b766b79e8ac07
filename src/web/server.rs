// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::ConfigData;
use axum::Router;
use axum::routing::get;
use miette::IntoDiagnostic;
use std::sync::Arc;
use tokio::net::TcpListener;

pub const LIVENESS_MESSAGE: &str = "Bot is alive! Use an external uptime monitor to keep me awake.";

pub async fn run_server_task(config: Arc<ConfigData>) {
	let task_result = run_server(config).await;
	if let Err(error) = task_result {
		tracing::error!(source = ?error, "Keep-alive server failed to run");
	}
}

async fn run_server(config: Arc<ConfigData>) -> miette::Result<()> {
	let site_addr = &config.web.bind_addr;
	let listener = TcpListener::bind(site_addr).await.into_diagnostic()?;
	tracing::info!("Keep-alive endpoint listening on http://{}", site_addr);
	axum::serve(listener, router()).await.into_diagnostic()?;

	Ok(())
}

/// Routes for uptime checks. Nothing here touches bot state.
pub fn router() -> Router {
	Router::new().route("/", get(liveness))
}

async fn liveness() -> &'static str {
	LIVENESS_MESSAGE
}
