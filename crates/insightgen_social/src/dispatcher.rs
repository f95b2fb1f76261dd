//! Publish dispatch.

use std::sync::Arc;

use insightgen_core::{ImageData, PublishReceipt};
use insightgen_error::InsightgenResult;
use insightgen_interface::PublishPlatform;
use tracing::{debug, error, info, instrument};

/// Sends one post to one target.
///
/// An embedded (`data:`) image goes up as a binary photo upload with the
/// text as caption. Anything else, including a remote image URL the platform
/// cannot ingest, becomes a text-only feed post. A rejected upload is
/// returned as is; the dispatcher never retries it as text.
pub struct PublishDispatcher<P: PublishPlatform> {
    platform: Arc<P>,
}

impl<P: PublishPlatform> Clone for PublishDispatcher<P> {
    fn clone(&self) -> Self {
        Self {
            platform: Arc::clone(&self.platform),
        }
    }
}

impl<P: PublishPlatform> PublishDispatcher<P> {
    /// Dispatcher over `platform`.
    pub fn new(platform: Arc<P>) -> Self {
        Self { platform }
    }

    /// The platform.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Publish `text`, with `image_url` when present, to `target_id`.
    ///
    /// # Errors
    ///
    /// - [`PublishErrorKind::InvalidImage`](insightgen_error::PublishErrorKind::InvalidImage) when `image_url` is a data URI
    ///   that cannot be decoded; nothing is sent
    /// - [`PublishErrorKind::Rejected`](insightgen_error::PublishErrorKind::Rejected) carrying the platform payload verbatim
    /// - [`PublishErrorKind::Transport`](insightgen_error::PublishErrorKind::Transport) when the platform could not be reached
    #[instrument(
        skip(self, access_token, text, image_url),
        fields(
            platform = self.platform.platform_name(),
            len = text.len(),
            has_image = image_url.is_some()
        )
    )]
    pub async fn publish(
        &self,
        target_id: &str,
        access_token: &str,
        text: &str,
        image_url: Option<&str>,
    ) -> InsightgenResult<PublishReceipt> {
        let embedded = match image_url {
            Some(uri) => ImageData::from_data_uri(uri).map_err(|e| {
                error!(error = %e, "Embedded image could not be decoded");
                e
            })?,
            None => None,
        };

        let receipt = match embedded {
            Some(image) => {
                debug!(mime_type = %image.mime_type, bytes = image.data.len(), "Uploading photo");
                self.platform
                    .upload_binary(target_id, access_token, &image, text)
                    .await?
            }
            None => {
                if image_url.is_some() {
                    debug!("Remote image reference; posting text only");
                }
                self.platform.post_text(target_id, access_token, text).await?
            }
        };

        info!(id = %receipt.id(), "Published");
        Ok(receipt)
    }
}
