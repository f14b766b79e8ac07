// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::relay::RelayAttachment;
use miette::IntoDiagnostic;
use twilight_model::channel::Attachment;
use twilight_model::http::attachment::Attachment as UploadAttachment;

/// Collects the files on an incoming message so they can be sent on.
pub fn relay_attachments(attachments: &[Attachment]) -> Vec<RelayAttachment> {
	attachments
		.iter()
		.map(|attachment| RelayAttachment {
			filename: attachment.filename.clone(),
			url: attachment.url.clone(),
		})
		.collect()
}

/// Downloads attachments from Discord's CDN so they can be uploaded again elsewhere.
pub async fn download_attachments(
	web_client: &reqwest::Client,
	attachments: &[RelayAttachment],
) -> miette::Result<Vec<UploadAttachment>> {
	let mut files = Vec::with_capacity(attachments.len());
	for (id, attachment) in (0u64..).zip(attachments) {
		let response = web_client
			.get(&attachment.url)
			.send()
			.await
			.into_diagnostic()?
			.error_for_status()
			.into_diagnostic()?;
		let file = response.bytes().await.into_diagnostic()?;
		files.push(UploadAttachment::from_bytes(
			attachment.filename.clone(),
			file.to_vec(),
			id,
		));
	}
	Ok(files)
}
